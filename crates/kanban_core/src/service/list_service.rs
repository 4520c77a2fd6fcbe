//! List use-case service.
//!
//! # Responsibility
//! - Enforce the five-lists-per-user cap at creation time.
//! - Provide list CRUD with referential checks against users.
//!
//! # Invariants
//! - Capacity is counted before the insert and only on creation, never on
//!   update. Count-then-insert is not atomic against concurrent inserts on
//!   separate connections; a single shared `Connection` serializes writes.
//! - Deleting a list cascades to its cards at the store level.

use crate::model::list::{List, ListId};
use crate::model::user::UserId;
use crate::repo::list_repo::ListRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult, ValidationError};

/// Maximum number of lists one user may own.
pub const MAX_LISTS_PER_USER: u32 = 5;

/// Request fields for list creation, mirroring the flat field map of the
/// external API surface. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct CreateListRequest {
    pub name: Option<String>,
    pub user: Option<UserId>,
}

/// Request fields for list update. Only the name is mutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateListRequest {
    pub name: Option<String>,
}

/// Use-case service for list operations.
pub struct ListService<L: ListRepository, U: UserRepository> {
    lists: L,
    users: U,
}

impl<L: ListRepository, U: UserRepository> ListService<L, U> {
    pub fn new(lists: L, users: U) -> Self {
        Self { lists, users }
    }

    /// Creates a list for an existing user.
    ///
    /// # Contract
    /// - `name` and `user` are required.
    /// - The user must exist.
    /// - A user already owning [`MAX_LISTS_PER_USER`] lists is rejected with
    ///   `CapacityExceeded`.
    pub fn create_list(&self, request: &CreateListRequest) -> ServiceResult<List> {
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("L101", "name is required"))?;
        let user = request
            .user
            .ok_or_else(|| ValidationError::field_required("L102", "user id is required"))?;

        if self.users.get_user(user)?.is_none() {
            return Err(ValidationError::reference_not_found("U101", "User does not exist").into());
        }

        if self.lists.count_for_user(user)? > MAX_LISTS_PER_USER - 1 {
            return Err(ValidationError::capacity_exceeded().into());
        }

        let list = List::new(name, user);
        self.lists.create_list(&list)?;
        Ok(list)
    }

    /// Resolves a list by id.
    pub fn get_list(&self, id: ListId) -> ServiceResult<List> {
        self.lists
            .get_list(id)?
            .ok_or_else(|| list_not_found().into())
    }

    /// Renames an existing list. Capacity is not re-checked here.
    pub fn update_list(&self, id: ListId, request: &UpdateListRequest) -> ServiceResult<List> {
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| ValidationError::field_required("L101", "name is required"))?;

        let mut list = self
            .lists
            .get_list(id)?
            .ok_or_else(|| ServiceError::from(list_not_found()))?;

        list.name = name.to_string();
        list.touch();
        self.lists.update_list(&list)?;
        Ok(list)
    }

    /// Deletes a list and, by cascade, all of its cards.
    pub fn delete_list(&self, id: ListId) -> ServiceResult<()> {
        match self.lists.delete_list(id) {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound(_)) => Err(list_not_found().into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Returns all lists owned by `user` in creation order.
    pub fn lists_for_user(&self, user: UserId) -> ServiceResult<Vec<List>> {
        Ok(self.lists.lists_for_user(user)?)
    }
}

fn list_not_found() -> ValidationError {
    ValidationError::not_found("L104", "List does not exist")
}
