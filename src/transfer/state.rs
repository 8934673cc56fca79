//! Transfer Status Definitions
//!
//! ```text
//! NEW → ACCEPTED
//!  ↓
//! REJECTED
//! ```
//!
//! Terminal states: ACCEPTED, REJECTED. A record leaves NEW exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transfer lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    /// Attempt recorded, balance legs not yet settled
    New,

    /// Terminal: both legs applied
    Accepted,

    /// Terminal: no net balance change, comment holds the reason
    Rejected,
}

impl TransferStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Accepted | TransferStatus::Rejected)
    }

    /// Check whether `self -> next` is a legal transition
    #[inline]
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        *self == TransferStatus::New && next.is_terminal()
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::New => "NEW",
            TransferStatus::Accepted => "ACCEPTED",
            TransferStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
