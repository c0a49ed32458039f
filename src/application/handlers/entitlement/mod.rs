//! Entitlement query handlers.

mod get_active_subscriptions;
mod get_token_balance;

pub use get_active_subscriptions::GetActiveSubscriptionsHandler;
pub use get_token_balance::GetTokenBalanceHandler;
