//! Card repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Card::validate()` before SQL mutations, so the
//!   completed-flag/timestamp pairing can never be persisted out of sync.
//! - Deadlines are stored as `YYYY-MM-DD` text; completion instants as
//!   ISO-8601 text.

use super::{
    bool_to_int, date_to_db, datetime_to_db, parse_bool_column, parse_date_column,
    parse_datetime_column, parse_uuid_column, RepoError, RepoResult,
};
use crate::model::card::{Card, CardId};
use crate::model::list::ListId;
use rusqlite::{params, Connection, Row};

const CARD_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    deadline,
    completed,
    completed_datetime,
    list_uuid,
    created_at,
    updated_at
FROM cards";

/// Repository interface for card persistence.
pub trait CardRepository {
    fn create_card(&self, card: &Card) -> RepoResult<CardId>;
    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>>;
    fn update_card(&self, card: &Card) -> RepoResult<()>;
    fn delete_card(&self, id: CardId) -> RepoResult<()>;
    fn cards_for_list(&self, list: ListId) -> RepoResult<Vec<Card>>;
}

/// SQLite-backed card repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn create_card(&self, card: &Card) -> RepoResult<CardId> {
        card.validate()?;

        self.conn.execute(
            "INSERT INTO cards (
                uuid,
                title,
                content,
                deadline,
                completed,
                completed_datetime,
                list_uuid,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                card.uuid.to_string(),
                card.title.as_str(),
                card.content.as_str(),
                date_to_db(card.deadline),
                bool_to_int(card.completed),
                card.completed_datetime.map(datetime_to_db),
                card.list.to_string(),
                card.created_at,
                card.updated_at,
            ],
        )?;

        Ok(card.uuid)
    }

    fn get_card(&self, id: CardId) -> RepoResult<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CARD_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }

        Ok(None)
    }

    fn update_card(&self, card: &Card) -> RepoResult<()> {
        card.validate()?;

        let changed = self.conn.execute(
            "UPDATE cards
             SET
                title = ?1,
                content = ?2,
                deadline = ?3,
                completed = ?4,
                completed_datetime = ?5,
                list_uuid = ?6,
                updated_at = ?7
             WHERE uuid = ?8;",
            params![
                card.title.as_str(),
                card.content.as_str(),
                date_to_db(card.deadline),
                bool_to_int(card.completed),
                card.completed_datetime.map(datetime_to_db),
                card.list.to_string(),
                card.updated_at,
                card.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(card.uuid));
        }

        Ok(())
    }

    fn delete_card(&self, id: CardId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cards WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn cards_for_list(&self, list: ListId) -> RepoResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CARD_SELECT_SQL}
             WHERE list_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([list.to_string()])?;
        let mut cards = Vec::new();

        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(row)?);
        }

        Ok(cards)
    }
}

fn parse_card_row(row: &Row<'_>) -> RepoResult<Card> {
    let uuid_text: String = row.get("uuid")?;
    let list_text: String = row.get("list_uuid")?;
    let deadline_text: String = row.get("deadline")?;

    let completed = parse_bool_column(row.get::<_, i64>("completed")?, "cards.completed")?;
    let completed_datetime = match row.get::<_, Option<String>>("completed_datetime")? {
        Some(value) => Some(parse_datetime_column(&value, "cards.completed_datetime")?),
        None => None,
    };

    let card = Card {
        uuid: parse_uuid_column(&uuid_text, "cards.uuid")?,
        title: row.get("title")?,
        content: row.get("content")?,
        deadline: parse_date_column(&deadline_text, "cards.deadline")?,
        completed,
        completed_datetime,
        list: parse_uuid_column(&list_text, "cards.list_uuid")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    card.validate().map_err(RepoError::Validation)?;
    Ok(card)
}
