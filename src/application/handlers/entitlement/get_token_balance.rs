//! GetTokenBalanceHandler - ledger fold for a user's token balance.

use std::sync::Arc;

use crate::domain::credits::balance_of;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::TokenLedger;

/// Handler computing a user's token balance from the ledger.
///
/// The ledger is the source of truth; the running `tokens` counter on
/// the UserCredits record is a denormalized convenience. A user with no
/// entries has a balance of zero.
pub struct GetTokenBalanceHandler {
    ledger: Arc<dyn TokenLedger>,
}

impl GetTokenBalanceHandler {
    pub fn new(ledger: Arc<dyn TokenLedger>) -> Self {
        Self { ledger }
    }

    /// Folds the user's ledger entries into a signed balance.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn handle(&self, user_id: &UserId) -> Result<i64, DomainError> {
        let entries = self.ledger.entries_for_user(user_id).await?;
        Ok(balance_of(&entries))
    }
}
