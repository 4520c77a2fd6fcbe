//! User domain model.
//!
//! The password credential is an opaque hash supplied by the caller; the core
//! never hashes or verifies passwords itself.

use super::{now_epoch_ms, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user account.
pub type UserId = Uuid;

/// Account record owning up to five lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Serialized as `user_id` to match external record naming.
    #[serde(rename = "user_id")]
    pub uuid: UserId,
    /// Unique login address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Opaque credential hash. Never serialized outward.
    #[serde(skip)]
    pub password_hash: String,
    /// Creation timestamp, epoch milliseconds.
    pub created_at: i64,
    /// Last-update timestamp, epoch milliseconds.
    pub updated_at: i64,
}

impl User {
    /// Creates a user with a generated stable ID and fresh timestamps.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            uuid: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks entity-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.uuid.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        if self.email.trim().is_empty() {
            return Err(ModelValidationError::EmptyEmail);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyName);
        }
        Ok(())
    }
}
