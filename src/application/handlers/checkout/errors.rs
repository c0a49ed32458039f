//! Checkout error type.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentError;

/// Errors surfaced by checkout handlers.
///
/// Gateway and verification failures keep their `PaymentError` identity so
/// callers can apply retry policy; store and aggregate failures surface as
/// `DomainError`.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn payment_error_keeps_identity() {
        let err: CheckoutError = PaymentError::NoIntent.into();
        assert!(matches!(
            err,
            CheckoutError::Payment(PaymentError::NoIntent)
        ));
    }

    #[test]
    fn domain_error_keeps_message() {
        let err: CheckoutError =
            DomainError::new(ErrorCode::OrderNotFound, "Order gone").into();
        assert!(err.to_string().contains("Order gone"));
    }
}
