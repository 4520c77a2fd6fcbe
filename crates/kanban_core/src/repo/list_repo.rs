//! List repository contract and SQLite implementation.
//!
//! # Invariants
//! - `delete_list` relies on `foreign_keys=ON` to cascade card deletion in
//!   the same implicit transaction.
//! - Owner filters are exact matches on `user_uuid`.

use super::{parse_uuid_column, RepoError, RepoResult};
use crate::model::list::{List, ListId};
use crate::model::user::UserId;
use rusqlite::{params, Connection, Row};

const LIST_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    user_uuid,
    created_at,
    updated_at
FROM lists";

/// Repository interface for list persistence.
pub trait ListRepository {
    fn create_list(&self, list: &List) -> RepoResult<ListId>;
    fn get_list(&self, id: ListId) -> RepoResult<Option<List>>;
    fn update_list(&self, list: &List) -> RepoResult<()>;
    fn delete_list(&self, id: ListId) -> RepoResult<()>;
    fn lists_for_user(&self, user: UserId) -> RepoResult<Vec<List>>;
    fn count_for_user(&self, user: UserId) -> RepoResult<u32>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create_list(&self, list: &List) -> RepoResult<ListId> {
        list.validate()?;

        self.conn.execute(
            "INSERT INTO lists (
                uuid,
                name,
                user_uuid,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                list.uuid.to_string(),
                list.name.as_str(),
                list.user.to_string(),
                list.created_at,
                list.updated_at,
            ],
        )?;

        Ok(list.uuid)
    }

    fn get_list(&self, id: ListId) -> RepoResult<Option<List>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LIST_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_list_row(row)?));
        }

        Ok(None)
    }

    fn update_list(&self, list: &List) -> RepoResult<()> {
        list.validate()?;

        let changed = self.conn.execute(
            "UPDATE lists
             SET
                name = ?1,
                updated_at = ?2
             WHERE uuid = ?3;",
            params![list.name.as_str(), list.updated_at, list.uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(list.uuid));
        }

        Ok(())
    }

    fn delete_list(&self, id: ListId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM lists WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn lists_for_user(&self, user: UserId) -> RepoResult<Vec<List>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             WHERE user_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([user.to_string()])?;
        let mut lists = Vec::new();

        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }

        Ok(lists)
    }

    fn count_for_user(&self, user: UserId) -> RepoResult<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM lists WHERE user_uuid = ?1;",
            [user.to_string()],
            |row| row.get::<_, u32>(0),
        )?;

        Ok(count)
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<List> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;
    let list = List {
        uuid: parse_uuid_column(&uuid_text, "lists.uuid")?,
        name: row.get("name")?,
        user: parse_uuid_column(&user_text, "lists.user_uuid")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    list.validate().map_err(RepoError::Validation)?;
    Ok(list)
}
