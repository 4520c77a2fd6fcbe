//! List domain model.

use super::{now_epoch_ms, ModelValidationError};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a list.
pub type ListId = Uuid;

/// Named card collection owned by exactly one user.
///
/// The five-lists-per-user cap is a cross-entity rule and lives in the
/// service layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Serialized as `list_id` to match external record naming.
    #[serde(rename = "list_id")]
    pub uuid: ListId,
    /// Display name shown on the board.
    pub name: String,
    /// Owning user. Deleting the user cascades to this list.
    pub user: UserId,
    /// Creation timestamp, epoch milliseconds.
    pub created_at: i64,
    /// Last-update timestamp, epoch milliseconds.
    pub updated_at: i64,
}

impl List {
    /// Creates a list with a generated stable ID and fresh timestamps.
    pub fn new(name: impl Into<String>, user: UserId) -> Self {
        let now = now_epoch_ms();
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            user,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes the update timestamp ahead of an update write.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }

    /// Checks entity-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.uuid.is_nil() || self.user.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyName);
        }
        Ok(())
    }
}
