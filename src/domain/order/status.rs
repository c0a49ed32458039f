//! Order status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of an order in the payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, payment not yet settled.
    Pending,

    /// Payment settled. Terminal success state; the order is immutable
    /// with respect to intent fields from here on.
    Paid,

    /// Payment failed on the payment method. May be retried with a new
    /// order or a fresh intent at the caller's discretion.
    Refused,

    /// The gateway required an action this crate does not handle.
    /// Needs manual resolution; never retried automatically.
    Error,
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Paid)
                | (Pending, Refused)
                | (Pending, Error)
            // From REFUSED: a replacement intent can still settle or stall
                | (Refused, Paid)
                | (Refused, Error)
            // From ERROR: manual resolution can unblock either way
                | (Error, Paid)
                | (Error, Refused)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Paid, Refused, Error],
            Refused => vec![Paid, Error],
            Error => vec![Paid, Refused],
            Paid => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_reach_all_outcomes() {
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Paid));
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Refused));
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Error));
    }

    #[test]
    fn paid_is_terminal() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Paid.can_transition_to(&OrderStatus::Refused));
        assert!(!OrderStatus::Paid.can_transition_to(&OrderStatus::Pending));
    }

    #[test]
    fn refused_can_settle_through_replacement_intent() {
        let result = OrderStatus::Refused.transition_to(OrderStatus::Paid);
        assert_eq!(result, Ok(OrderStatus::Paid));
    }

    #[test]
    fn no_status_returns_to_pending() {
        for status in [OrderStatus::Paid, OrderStatus::Refused, OrderStatus::Error] {
            assert!(!status.can_transition_to(&OrderStatus::Pending));
        }
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Refused).unwrap(),
            "\"refused\""
        );
    }
}
