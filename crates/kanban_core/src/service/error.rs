//! Service-level error taxonomy.
//!
//! # Responsibility
//! - Give every validation failure a stable (kind, code, message, status)
//!   shape so callers can discriminate without string matching.
//! - Keep store failures separate from domain rejections.
//!
//! Error codes (`L1xx`, `C1xx`, `U1xx`) are part of the external API contract
//! and must not be renumbered.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Broad classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A mandatory field was absent on create/update.
    FieldRequired,
    /// A looked-up or referenced entity does not exist.
    NotFound,
    /// List creation would exceed the five-lists-per-user cap.
    CapacityExceeded,
    /// Deadline string failed to parse as `YYYY-MM-DD`.
    MalformedDate,
    /// Email does not look like an address.
    MalformedEmail,
    /// Another account already uses this email.
    EmailTaken,
}

/// Structured domain rejection raised before any persistent mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Stable machine-readable code, e.g. `L103`.
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
    /// Suggested HTTP status for the external API surface.
    pub status: u16,
}

impl ValidationError {
    pub fn field_required(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::FieldRequired,
            code,
            message: message.into(),
            status: 400,
        }
    }

    /// Missing lookup target (get/update/delete by id).
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code,
            message: message.into(),
            status: 404,
        }
    }

    /// Missing referenced entity on a create (foreign key style failure).
    pub fn reference_not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            code,
            message: message.into(),
            status: 400,
        }
    }

    pub fn capacity_exceeded() -> Self {
        Self {
            kind: ErrorKind::CapacityExceeded,
            code: "L103",
            message: "Cannot create more than 5 lists for a user".to_string(),
            status: 400,
        }
    }

    pub fn malformed_date(value: &str) -> Self {
        Self {
            kind: ErrorKind::MalformedDate,
            code: "C107",
            message: format!("deadline `{value}` is not a valid YYYY-MM-DD date"),
            status: 400,
        }
    }

    pub fn malformed_email(value: &str) -> Self {
        Self {
            kind: ErrorKind::MalformedEmail,
            code: "U105",
            message: format!("`{value}` is not a valid email address"),
            status: 400,
        }
    }

    pub fn email_taken() -> Self {
        Self {
            kind: ErrorKind::EmailTaken,
            code: "U106",
            message: "User already exists with this email address".to_string(),
            status: 400,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for ValidationError {}

/// Error surface of all service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rejection; nothing was written.
    Validation(ValidationError),
    /// Entity store failure, propagated unchanged and never retried here.
    Repo(RepoError),
}

impl ServiceError {
    /// Validation kind, when this is a domain rejection.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Validation(err) => Some(err.kind),
            Self::Repo(_) => None,
        }
    }

    /// Stable error code, when this is a domain rejection.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Validation(err) => Some(err.code),
            Self::Repo(_) => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
