//! Core domain logic for a personal kanban board.
//! This crate is the single source of truth for business invariants:
//! entity validation, the five-lists-per-user cap, card completion
//! semantics and per-list summary aggregation.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod summary;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{Card, CardId, COMPLETED_FLAG};
pub use model::list::{List, ListId};
pub use model::user::{User, UserId};
pub use model::ModelValidationError;
pub use repo::card_repo::{CardRepository, SqliteCardRepository};
pub use repo::list_repo::{ListRepository, SqliteListRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::card_service::{CardService, CreateCardRequest, UpdateCardRequest};
pub use service::error::{ErrorKind, ServiceError, ServiceResult, ValidationError};
pub use service::list_service::{
    CreateListRequest, ListService, UpdateListRequest, MAX_LISTS_PER_USER,
};
pub use service::user_service::{CreateUserRequest, UserService};
pub use summary::aggregate::{summarize_cards, summarize_user, summarize_user_at, ListSummary};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
