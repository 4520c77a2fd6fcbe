//! Summary aggregation over a user's lists.
//!
//! # Responsibility
//! - Produce per-list totals, overdue counts and a completion-date histogram.
//!
//! # Invariants
//! - Single pass per list; a list with zero cards yields all-zero counts and
//!   an empty histogram.
//! - Overdue counts only incomplete cards with a deadline strictly before
//!   `today`.
//! - Histogram keys are unordered; consumers sort if they need ordering.

use crate::model::card::Card;
use crate::model::list::ListId;
use crate::model::user::UserId;
use crate::repo::card_repo::CardRepository;
use crate::repo::list_repo::ListRepository;
use crate::repo::RepoResult;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Derived statistics for one list at a given `today`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    /// Count of cards on the list.
    pub total: usize,
    /// Cards with the completed flag set.
    pub total_completed: usize,
    /// Cards without the completed flag.
    pub total_incomplete: usize,
    /// Incomplete cards whose deadline is strictly before `today`.
    pub d_passed: usize,
    /// Completion-date histogram: date -> cards completed that day.
    pub date_count: HashMap<NaiveDate, usize>,
    /// Raw completion dates, one entry per completed card, unsorted.
    pub completion_dates: Vec<NaiveDate>,
}

/// Aggregates one list's cards in a single pass.
pub fn summarize_cards(cards: &[Card], today: NaiveDate) -> ListSummary {
    let mut summary = ListSummary {
        total: cards.len(),
        ..ListSummary::default()
    };

    for card in cards {
        if card.completed {
            summary.total_completed += 1;
            if let Some(instant) = card.completed_datetime {
                let date = instant.date();
                *summary.date_count.entry(date).or_insert(0) += 1;
                summary.completion_dates.push(date);
            }
        } else {
            summary.total_incomplete += 1;
            if card.is_overdue(today) {
                summary.d_passed += 1;
            }
        }
    }

    summary
}

/// Aggregates every list owned by `user` against an explicit `today`.
///
/// Read-only derived view over a consistent snapshot; safe to run repeatedly.
pub fn summarize_user_at<L, C>(
    lists: &L,
    cards: &C,
    user: UserId,
    today: NaiveDate,
) -> RepoResult<HashMap<ListId, ListSummary>>
where
    L: ListRepository,
    C: CardRepository,
{
    let mut summaries = HashMap::new();

    for list in lists.lists_for_user(user)? {
        let list_cards = cards.cards_for_list(list.uuid)?;
        summaries.insert(list.uuid, summarize_cards(&list_cards, today));
    }

    Ok(summaries)
}

/// Aggregates every list owned by `user` against the current local date.
pub fn summarize_user<L, C>(
    lists: &L,
    cards: &C,
    user: UserId,
) -> RepoResult<HashMap<ListId, ListSummary>>
where
    L: ListRepository,
    C: CardRepository,
{
    summarize_user_at(lists, cards, user, Local::now().date_naive())
}
