//! Card use-case service.
//!
//! # Responsibility
//! - Validate card field maps and derive completion state on every write.
//! - Provide card CRUD with referential checks against lists.
//!
//! # Invariants
//! - Updates are full-field: title, content, deadline and completed must all
//!   be submitted together.
//! - The completion lifecycle is applied identically on create and update;
//!   see [`Card::completion_timestamp`].
//! - Deadlines must arrive as strict `YYYY-MM-DD`; anything else is a
//!   `MalformedDate` rejection, never a silent default.

use crate::model::card::{Card, CardId};
use crate::model::list::ListId;
use crate::repo::card_repo::CardRepository;
use crate::repo::list_repo::ListRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult, ValidationError};
use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid deadline regex"));

/// Request fields for card creation, mirroring the flat field map of the
/// external API surface. Absent fields are `None`.
///
/// `completed` is the raw submitted string; only the literal `"1"` marks the
/// card completed.
#[derive(Debug, Clone, Default)]
pub struct CreateCardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub deadline: Option<String>,
    pub completed: Option<String>,
    pub list: Option<ListId>,
}

/// Request fields for a full-field card update. The owning list is not
/// changed through this surface.
#[derive(Debug, Clone, Default)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub deadline: Option<String>,
    pub completed: Option<String>,
}

/// Use-case service for card operations.
pub struct CardService<C: CardRepository, L: ListRepository> {
    cards: C,
    lists: L,
}

impl<C: CardRepository, L: ListRepository> CardService<C, L> {
    pub fn new(cards: C, lists: L) -> Self {
        Self { cards, lists }
    }

    /// Creates a card on an existing list, stamping completion at the current
    /// local instant.
    pub fn create_card(&self, request: &CreateCardRequest) -> ServiceResult<Card> {
        self.create_card_at(request, Local::now().naive_local())
    }

    /// Creates a card with an explicit write instant.
    ///
    /// # Contract
    /// - `title`, `content`, `deadline`, `completed` and `list` are required.
    /// - The list must exist.
    /// - A submitted `completed` of `"1"` yields `completed_datetime = now`;
    ///   any other value yields `None`.
    pub fn create_card_at(
        &self,
        request: &CreateCardRequest,
        now: NaiveDateTime,
    ) -> ServiceResult<Card> {
        let title = request
            .title
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C101", "title is required"))?;
        let content = request
            .content
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C102", "content is required"))?;
        let deadline = request
            .deadline
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C103", "deadline is required"))?;
        let completed = request
            .completed
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C104", "completed flag is required"))?;
        let list = request
            .list
            .ok_or_else(|| ValidationError::field_required("C105", "list id is required"))?;

        if self.lists.get_list(list)?.is_none() {
            return Err(ValidationError::reference_not_found("L104", "List does not exist").into());
        }

        let deadline = parse_deadline(deadline)?;

        let mut card = Card::new(title, content, deadline, list);
        card.set_completion(completed, now);
        self.cards.create_card(&card)?;
        Ok(card)
    }

    /// Resolves a card by id.
    pub fn get_card(&self, id: CardId) -> ServiceResult<Card> {
        self.cards
            .get_card(id)?
            .ok_or_else(|| card_not_found().into())
    }

    /// Rewrites all mutable card fields, stamping completion at the current
    /// local instant.
    pub fn update_card(&self, id: CardId, request: &UpdateCardRequest) -> ServiceResult<Card> {
        self.update_card_at(id, request, Local::now().naive_local())
    }

    /// Rewrites all mutable card fields with an explicit write instant.
    ///
    /// A card that was already completed and is submitted completed again
    /// still gets a fresh `completed_datetime`; the original instant is not
    /// preserved.
    pub fn update_card_at(
        &self,
        id: CardId,
        request: &UpdateCardRequest,
        now: NaiveDateTime,
    ) -> ServiceResult<Card> {
        let title = request
            .title
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C101", "title is required"))?;
        let content = request
            .content
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C102", "content is required"))?;
        let deadline = request
            .deadline
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C103", "deadline is required"))?;
        let completed = request
            .completed
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("C104", "completed flag is required"))?;

        let mut card = self
            .cards
            .get_card(id)?
            .ok_or_else(|| ServiceError::from(card_not_found()))?;

        let deadline = parse_deadline(deadline)?;

        card.title = title.to_string();
        card.content = content.to_string();
        card.deadline = deadline;
        card.set_completion(completed, now);
        card.touch();
        self.cards.update_card(&card)?;
        Ok(card)
    }

    /// Deletes a card.
    pub fn delete_card(&self, id: CardId) -> ServiceResult<()> {
        match self.cards.delete_card(id) {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound(_)) => Err(card_not_found().into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Returns all cards on an existing list in creation order.
    pub fn cards_for_list(&self, list: ListId) -> ServiceResult<Vec<Card>> {
        if self.lists.get_list(list)?.is_none() {
            return Err(ValidationError::not_found("L104", "List does not exist").into());
        }
        Ok(self.cards.cards_for_list(list)?)
    }
}

/// Parses a submitted deadline as a strict `YYYY-MM-DD` calendar date.
///
/// The shape check runs first so loosely formatted inputs (`2024-1-2`) are
/// rejected even where the date parser would accept them; the parser then
/// rejects impossible dates such as `2024-02-30`.
fn parse_deadline(value: &str) -> Result<NaiveDate, ValidationError> {
    if !DEADLINE_RE.is_match(value) {
        return Err(ValidationError::malformed_date(value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::malformed_date(value))
}

fn card_not_found() -> ValidationError {
    ValidationError::not_found("C106", "Card does not exist")
}
