//! Ports - contracts between the domain and external collaborators.
//!
//! Following hexagonal architecture, ports define what the core consumes;
//! adapters implement them. Two collaborator families exist:
//!
//! - the **entitlement store** (offers, orders, user credits, token ledger)
//! - the **payment gateway** (intents, webhook verification)

mod entitlement_store;
mod payment_gateway;

pub use entitlement_store::{
    OfferFilter, OfferRepository, OrderRepository, TokenLedger, UserCreditsRepository,
};
pub use payment_gateway::PaymentGateway;
