//! Checkout handlers: the order / payment-intent lifecycle.

mod create_payment_intent;
mod errors;
mod execute_payment;
mod ingest_webhook;
mod settlement;

pub use create_payment_intent::CreatePaymentIntentHandler;
pub use errors::CheckoutError;
pub use execute_payment::ExecutePaymentHandler;
pub use ingest_webhook::IngestWebhookHandler;
