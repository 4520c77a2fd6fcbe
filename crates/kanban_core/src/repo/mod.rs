//! Repository layer abstractions and SQLite persistence implementations.
//!
//! # Responsibility
//! - Define CRUD-by-identifier and filter-by-owner contracts per entity.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must call the entity's `validate()` before SQL
//!   mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::ModelValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod card_repo;
pub mod list_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entity data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

const DB_DATE_FORMAT: &str = "%Y-%m-%d";
const DB_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a stored uuid column, reporting the offending column on failure.
pub(crate) fn parse_uuid_column(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn date_to_db(value: NaiveDate) -> String {
    value.format(DB_DATE_FORMAT).to_string()
}

pub(crate) fn parse_date_column(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DB_DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}

pub(crate) fn datetime_to_db(value: NaiveDateTime) -> String {
    value.format(DB_DATETIME_FORMAT).to_string()
}

pub(crate) fn parse_datetime_column(value: &str, column: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DB_DATETIME_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid datetime value `{value}` in {column}"))
    })
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool_column(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}
