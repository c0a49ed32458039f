//! Settled entitlements: subscriptions, token balances, and the ledger.

mod subscription;
mod token_timetable;
mod user_credits;

pub use subscription::{Subscription, SubscriptionStatus};
pub use token_timetable::{balance_of, TokenTimetableEntry};
pub use user_credits::UserCredits;
