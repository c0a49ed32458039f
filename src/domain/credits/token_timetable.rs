//! Token ledger entries.
//!
//! The ledger, not a mutable counter, is the durable source of truth for
//! balance history and auditing: one append-only entry per settled
//! token-kind order (and per consumption, written by the host), with the
//! balance defined as the fold over a user's entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Append-only token ledger entry. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTimetableEntry {
    /// User whose balance this entry affects.
    pub user_id: UserId,

    /// Signed token delta: positive for grants, negative for consumption.
    pub tokens: i64,

    /// When the entry was written.
    pub created_at: Timestamp,
}

impl TokenTimetableEntry {
    /// Creates a ledger entry dated now.
    pub fn new(user_id: UserId, tokens: i64) -> Self {
        Self {
            user_id,
            tokens,
            created_at: Timestamp::now(),
        }
    }
}

/// Balance as the sum of a user's ledger entries.
pub fn balance_of(entries: &[TokenTimetableEntry]) -> i64 {
    entries.iter().map(|entry| entry.tokens).sum()
}
