//! Order aggregate and its payment lifecycle state machine.

mod aggregate;
mod status;

pub use aggregate::{HistoryEntry, Order, TransitionOutcome};
pub use status::OrderStatus;
