//! Card domain model and completion lifecycle.
//!
//! # Responsibility
//! - Define the task card record owned by a list.
//! - Derive `completed_datetime` from the submitted completed flag.
//!
//! # Invariants
//! - `completed_datetime` is `Some` exactly when `completed` is true.
//! - Every write that sets the flag gets a fresh completion instant; the
//!   previous instant is never preserved across updates.
//! - Deadlines are calendar dates with no time-of-day component.

use super::{now_epoch_ms, ModelValidationError};
use crate::model::list::ListId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a card.
pub type CardId = Uuid;

/// Submitted flag value that marks a card completed.
///
/// The check is literal string equality: `"0"`, `"true"`, or anything else
/// counts as not completed. Kept as observed upstream behavior; do not
/// normalize to a boolean parse.
pub const COMPLETED_FLAG: &str = "1";

/// Task card owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Serialized as `card_id` to match external record naming.
    #[serde(rename = "card_id")]
    pub uuid: CardId,
    /// Short task title.
    pub title: String,
    /// Task body text.
    pub content: String,
    /// Due date, date-only.
    pub deadline: NaiveDate,
    /// Completion flag. Stored as 0/1 in the entity store.
    pub completed: bool,
    /// Instant of the last write that set the completed flag.
    pub completed_datetime: Option<NaiveDateTime>,
    /// Owning list. Deleting the list cascades to this card.
    pub list: ListId,
    /// Creation timestamp, epoch milliseconds.
    pub created_at: i64,
    /// Last-update timestamp, epoch milliseconds.
    pub updated_at: i64,
}

impl Card {
    /// Creates an incomplete card with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        deadline: NaiveDate,
        list: ListId,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            deadline,
            completed: false,
            completed_datetime: None,
            list,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether a submitted flag value counts as completed.
    pub fn is_completed_value(value: &str) -> bool {
        value == COMPLETED_FLAG
    }

    /// Derives the completion instant for a write carrying `value` at `now`.
    ///
    /// Pure in (value, now); invoked identically on create and update. A
    /// completed write always yields `now`, even when the card was already
    /// completed before.
    pub fn completion_timestamp(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if Self::is_completed_value(value) {
            Some(now)
        } else {
            None
        }
    }

    /// Applies the submitted completed flag to this card at instant `now`.
    pub fn set_completion(&mut self, value: &str, now: NaiveDateTime) {
        self.completed = Self::is_completed_value(value);
        self.completed_datetime = Self::completion_timestamp(value, now);
    }

    /// Refreshes the update timestamp ahead of an update write.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }

    /// Returns whether this card is overdue as of `today`.
    ///
    /// Overdue means incomplete with a deadline strictly before `today`; a
    /// deadline equal to `today` is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && today > self.deadline
    }

    /// Checks entity-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.uuid.is_nil() || self.list.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ModelValidationError::EmptyContent);
        }
        if self.completed != self.completed_datetime.is_some() {
            return Err(ModelValidationError::CompletionTimestampMismatch);
        }
        Ok(())
    }
}
