use chrono::{NaiveDate, NaiveDateTime};
use kanban_core::db::open_db_in_memory;
use kanban_core::{
    CardService, CreateCardRequest, CreateListRequest, ErrorKind, ListId, ListService,
    ServiceError, SqliteCardRepository, SqliteListRepository, SqliteUserRepository,
    UpdateCardRequest, User, UserRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_with_completed_one_stamps_the_write_instant() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);
    let now = instant("2024-05-20 18:45:00");

    let card = service
        .create_card_at(&request(list, "1"), now)
        .unwrap();

    assert!(card.completed);
    assert_eq!(card.completed_datetime, Some(now));

    let loaded = service.get_card(card.uuid).unwrap();
    assert_eq!(loaded, card);
}

#[test]
fn create_with_other_flag_values_leaves_timestamp_null() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);
    let now = instant("2024-05-20 18:45:00");

    for value in ["0", "true", "yes", ""] {
        let card = service
            .create_card_at(&request(list, value), now)
            .unwrap();
        assert!(!card.completed, "value `{value}` must not complete the card");
        assert_eq!(card.completed_datetime, None);
    }
}

#[test]
fn create_requires_every_field() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    let cases = [
        (
            CreateCardRequest {
                title: None,
                ..request(list, "0")
            },
            "C101",
        ),
        (
            CreateCardRequest {
                content: None,
                ..request(list, "0")
            },
            "C102",
        ),
        (
            CreateCardRequest {
                deadline: None,
                ..request(list, "0")
            },
            "C103",
        ),
        (
            CreateCardRequest {
                completed: None,
                ..request(list, "0")
            },
            "C104",
        ),
        (
            CreateCardRequest {
                list: None,
                ..request(list, "0")
            },
            "C105",
        ),
    ];

    for (case, code) in cases {
        let err = service.create_card(&case).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::FieldRequired));
        assert_eq!(err.code(), Some(code));
    }
}

#[test]
fn create_rejects_unknown_list_before_writing() {
    let conn = open_db_in_memory().unwrap();
    seed_list(&conn);
    let service = card_service(&conn);

    let err = service
        .create_card(&request(Uuid::new_v4(), "0"))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.code(), Some("L104"));

    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM cards;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn create_rejects_malformed_deadlines() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    for bad in ["2024-02-30", "2024-1-2", "02-30-2024", "tomorrow"] {
        let err = service
            .create_card(&CreateCardRequest {
                deadline: Some(bad.to_string()),
                ..request(list, "0")
            })
            .unwrap_err();
        assert_eq!(
            err.kind(),
            Some(ErrorKind::MalformedDate),
            "deadline `{bad}` must be rejected"
        );
        assert_eq!(err.code(), Some("C107"));
    }
}

#[test]
fn recompleting_a_card_refreshes_the_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);
    let first = instant("2024-05-20 09:00:00");
    let second = instant("2024-05-21 17:30:00");

    let card = service.create_card_at(&request(list, "1"), first).unwrap();
    assert_eq!(card.completed_datetime, Some(first));

    let updated = service
        .update_card_at(card.uuid, &update_request("1"), second)
        .unwrap();
    assert_eq!(updated.completed_datetime, Some(second));

    let loaded = service.get_card(card.uuid).unwrap();
    assert_eq!(loaded.completed_datetime, Some(second));
}

#[test]
fn marking_incomplete_clears_the_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    let card = service
        .create_card_at(&request(list, "1"), instant("2024-05-20 09:00:00"))
        .unwrap();

    let updated = service
        .update_card(card.uuid, &update_request("0"))
        .unwrap();
    assert!(!updated.completed);
    assert_eq!(updated.completed_datetime, None);
}

#[test]
fn update_rewrites_all_mutable_fields() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    let card = service.create_card(&request(list, "0")).unwrap();
    let updated = service
        .update_card(
            card.uuid,
            &UpdateCardRequest {
                title: Some("New title".to_string()),
                content: Some("New body".to_string()),
                deadline: Some("2025-01-31".to_string()),
                completed: Some("0".to_string()),
            },
        )
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.content, "New body");
    assert_eq!(
        updated.deadline,
        NaiveDate::parse_from_str("2025-01-31", "%Y-%m-%d").unwrap()
    );
    assert_eq!(updated.list, list);

    let loaded = service.get_card(card.uuid).unwrap();
    assert_eq!(loaded.title, "New title");
    assert_eq!(loaded.deadline, updated.deadline);
}

#[test]
fn update_returns_the_persisted_record() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    let card = service.create_card(&request(list, "0")).unwrap();
    let updated = service
        .update_card(card.uuid, &update_request("1"))
        .unwrap();

    let loaded = service.get_card(card.uuid).unwrap();
    assert_eq!(updated, loaded);
    assert!(loaded.updated_at >= loaded.created_at);
    assert!(loaded.updated_at >= card.updated_at);
}

#[test]
fn update_and_delete_missing_card_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_list(&conn);
    let service = card_service(&conn);

    let err = service
        .update_card(Uuid::new_v4(), &update_request("0"))
        .unwrap_err();
    assert_eq!(err.code(), Some("C106"));
    match err {
        ServiceError::Validation(validation) => assert_eq!(validation.status, 404),
        other => panic!("unexpected error: {other}"),
    }

    let err = service.delete_card(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.code(), Some("C106"));
}

#[test]
fn delete_removes_the_card() {
    let conn = open_db_in_memory().unwrap();
    let list = seed_list(&conn);
    let service = card_service(&conn);

    let card = service.create_card(&request(list, "0")).unwrap();
    service.delete_card(card.uuid).unwrap();

    let err = service.get_card(card.uuid).unwrap_err();
    assert_eq!(err.code(), Some("C106"));
    assert!(service.cards_for_list(list).unwrap().is_empty());
}

fn card_service(
    conn: &Connection,
) -> CardService<SqliteCardRepository<'_>, SqliteListRepository<'_>> {
    CardService::new(SqliteCardRepository::new(conn), SqliteListRepository::new(conn))
}

fn seed_list(conn: &Connection) -> ListId {
    let users = SqliteUserRepository::new(conn);
    let owner = users.create_user(&User::new("a@example.com", "Owner", "hash")).unwrap();

    let lists = ListService::new(SqliteListRepository::new(conn), SqliteUserRepository::new(conn));
    lists
        .create_list(&CreateListRequest {
            name: Some("Backlog".to_string()),
            user: Some(owner),
        })
        .unwrap()
        .uuid
}

fn request(list: ListId, completed: &str) -> CreateCardRequest {
    CreateCardRequest {
        title: Some("Task".to_string()),
        content: Some("body".to_string()),
        deadline: Some("2024-06-01".to_string()),
        completed: Some(completed.to_string()),
        list: Some(list),
    }
}

fn update_request(completed: &str) -> UpdateCardRequest {
    UpdateCardRequest {
        title: Some("Task".to_string()),
        content: Some("body".to_string()),
        deadline: Some("2024-06-01".to_string()),
        completed: Some(completed.to_string()),
    }
}

fn instant(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}
