//! Core use-case services.
//!
//! # Responsibility
//! - Validate incoming field maps before any persistent write.
//! - Orchestrate repository calls into use-case level APIs.
//!
//! # Invariants
//! - Validation order is field presence, then referential checks, then
//!   capacity; the first failure wins and nothing is persisted.
//! - The acting user is always an explicit parameter; services hold no
//!   ambient identity state.

pub mod card_service;
pub mod error;
pub mod list_service;
pub mod user_service;
