//! Domain model for the personal task board.
//!
//! # Responsibility
//! - Define canonical User/List/Card records used by core business logic.
//! - Provide entity-level validation shared by all repository write paths.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - A card's `completed_datetime` is set exactly when its completed flag is.
//! - Ownership is exclusive: List belongs to one User, Card to one List.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod card;
pub mod list;
pub mod user;

/// Entity-level validation failure raised before any persistent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Nil UUID would collide with "absent" semantics downstream.
    NilUuid,
    /// User email must not be empty.
    EmptyEmail,
    /// User or list display name must not be empty.
    EmptyName,
    /// Card title must not be empty.
    EmptyTitle,
    /// Card content must not be empty.
    EmptyContent,
    /// `completed_datetime` must be present iff the completed flag is set.
    CompletionTimestampMismatch,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "entity id must not be the nil uuid"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::CompletionTimestampMismatch => write!(
                f,
                "completed_datetime must be set exactly when the completed flag is set"
            ),
        }
    }
}

impl Error for ModelValidationError {}

/// Current wall-clock instant as epoch milliseconds.
///
/// Used to stamp `created_at`/`updated_at` on freshly constructed entities
/// and to refresh `updated_at` via `touch()` before every update write, so
/// the record handed back to callers always matches the persisted row.
pub(crate) fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
