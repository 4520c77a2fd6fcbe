//! User account use-case service.
//!
//! # Responsibility
//! - Register accounts with presence, shape and uniqueness checks.
//! - Resolve accounts for the external API surface.
//!
//! Password hashing happens outside the core; the credential arrives here as
//! an opaque hash.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::service::error::{ServiceResult, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Request fields for account registration, mirroring the flat field map of
/// the external API surface. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Use-case service for account operations.
pub struct UserService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Registers a new account.
    ///
    /// # Contract
    /// - `email`, `name` and `password_hash` are all required.
    /// - `email` must look like an address and must not be in use.
    /// - Nothing is persisted when validation fails.
    pub fn create_user(&self, request: &CreateUserRequest) -> ServiceResult<User> {
        let email = request
            .email
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("U102", "email is required"))?;
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("U103", "name is required"))?;
        let password_hash = request
            .password_hash
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("U104", "password is required"))?;

        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::malformed_email(email).into());
        }

        if self.users.find_user_by_email(email)?.is_some() {
            return Err(ValidationError::email_taken().into());
        }

        let user = User::new(email, name, password_hash);
        self.users.create_user(&user)?;
        Ok(user)
    }

    /// Resolves an account by id.
    pub fn get_user(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .get_user(id)?
            .ok_or_else(|| ValidationError::not_found("U101", "User does not exist").into())
    }
}
