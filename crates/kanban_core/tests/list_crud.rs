use kanban_core::db::open_db_in_memory;
use kanban_core::{
    CardService, CreateCardRequest, CreateListRequest, ErrorKind, ListService, ServiceError,
    SqliteCardRepository, SqliteListRepository, SqliteUserRepository, UpdateListRequest, User,
    UserId, UserRepository, MAX_LISTS_PER_USER,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let service = list_service(&conn);

    let created = service
        .create_list(&CreateListRequest {
            name: Some("Backlog".to_string()),
            user: Some(owner),
        })
        .unwrap();

    let loaded = service.get_list(created.uuid).unwrap();
    assert_eq!(loaded.uuid, created.uuid);
    assert_eq!(loaded.name, "Backlog");
    assert_eq!(loaded.user, owner);
}

#[test]
fn create_requires_name_and_user() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let service = list_service(&conn);

    let err = service
        .create_list(&CreateListRequest {
            name: None,
            user: Some(owner),
        })
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FieldRequired));
    assert_eq!(err.code(), Some("L101"));

    let err = service
        .create_list(&CreateListRequest {
            name: Some("Backlog".to_string()),
            user: None,
        })
        .unwrap_err();
    assert_eq!(err.code(), Some("L102"));
}

#[test]
fn create_rejects_unknown_user_with_referential_error() {
    let conn = open_db_in_memory().unwrap();
    let service = list_service(&conn);

    let err = service
        .create_list(&CreateListRequest {
            name: Some("Backlog".to_string()),
            user: Some(Uuid::new_v4()),
        })
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.code(), Some("U101"));
    match err {
        ServiceError::Validation(validation) => assert_eq!(validation.status, 400),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sixth_list_is_rejected_but_other_users_are_unaffected() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let other = seed_user(&conn, "b@example.com");
    let service = list_service(&conn);

    for i in 0..MAX_LISTS_PER_USER {
        service
            .create_list(&CreateListRequest {
                name: Some(format!("List {i}")),
                user: Some(owner),
            })
            .unwrap();
    }

    let err = service
        .create_list(&CreateListRequest {
            name: Some("One too many".to_string()),
            user: Some(owner),
        })
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::CapacityExceeded));
    assert_eq!(err.code(), Some("L103"));

    service
        .create_list(&CreateListRequest {
            name: Some("Fresh start".to_string()),
            user: Some(other),
        })
        .unwrap();

    assert_eq!(service.lists_for_user(owner).unwrap().len(), 5);
    assert_eq!(service.lists_for_user(other).unwrap().len(), 1);
}

#[test]
fn update_renames_and_skips_capacity_check() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let service = list_service(&conn);

    let mut last = None;
    for i in 0..MAX_LISTS_PER_USER {
        last = Some(
            service
                .create_list(&CreateListRequest {
                    name: Some(format!("List {i}")),
                    user: Some(owner),
                })
                .unwrap(),
        );
    }

    // Owner is at the cap; renaming must still succeed.
    let target = last.unwrap();
    let renamed = service
        .update_list(
            target.uuid,
            &UpdateListRequest {
                name: Some("Renamed".to_string()),
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(service.get_list(target.uuid).unwrap().name, "Renamed");
}

#[test]
fn update_returns_the_persisted_record() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let service = list_service(&conn);

    let created = service
        .create_list(&CreateListRequest {
            name: Some("Backlog".to_string()),
            user: Some(owner),
        })
        .unwrap();

    let renamed = service
        .update_list(
            created.uuid,
            &UpdateListRequest {
                name: Some("Renamed".to_string()),
            },
        )
        .unwrap();

    let loaded = service.get_list(created.uuid).unwrap();
    assert_eq!(renamed, loaded);
    assert!(loaded.updated_at >= loaded.created_at);
    assert!(loaded.updated_at >= created.updated_at);
}

#[test]
fn update_and_delete_missing_list_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = list_service(&conn);

    let err = service
        .update_list(
            Uuid::new_v4(),
            &UpdateListRequest {
                name: Some("anything".to_string()),
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), Some("L104"));
    match err {
        ServiceError::Validation(validation) => assert_eq!(validation.status, 404),
        other => panic!("unexpected error: {other}"),
    }

    let err = service.delete_list(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    assert_eq!(err.code(), Some("L104"));
}

#[test]
fn delete_list_cascades_to_cards() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let lists = list_service(&conn);
    let cards = card_service(&conn);

    let list = lists
        .create_list(&CreateListRequest {
            name: Some("Doomed".to_string()),
            user: Some(owner),
        })
        .unwrap();

    let card_a = cards.create_card(&card_request(list.uuid, "first")).unwrap();
    let card_b = cards.create_card(&card_request(list.uuid, "second")).unwrap();
    assert_eq!(cards.cards_for_list(list.uuid).unwrap().len(), 2);

    lists.delete_list(list.uuid).unwrap();

    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM cards WHERE list_uuid = ?1;",
            [list.uuid.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);

    let err = cards.get_card(card_a.uuid).unwrap_err();
    assert_eq!(err.code(), Some("C106"));
    let err = cards.get_card(card_b.uuid).unwrap_err();
    assert_eq!(err.code(), Some("C106"));
}

#[test]
fn lists_for_user_returns_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "a@example.com");
    let service = list_service(&conn);

    for name in ["Todo", "Doing", "Done"] {
        service
            .create_list(&CreateListRequest {
                name: Some(name.to_string()),
                user: Some(owner),
            })
            .unwrap();
    }

    let names: Vec<String> = service
        .lists_for_user(owner)
        .unwrap()
        .into_iter()
        .map(|list| list.name)
        .collect();
    assert_eq!(names, ["Todo", "Doing", "Done"]);
}

fn list_service(
    conn: &Connection,
) -> ListService<SqliteListRepository<'_>, SqliteUserRepository<'_>> {
    ListService::new(SqliteListRepository::new(conn), SqliteUserRepository::new(conn))
}

fn card_service(
    conn: &Connection,
) -> CardService<SqliteCardRepository<'_>, SqliteListRepository<'_>> {
    CardService::new(SqliteCardRepository::new(conn), SqliteListRepository::new(conn))
}

fn card_request(list: Uuid, title: &str) -> CreateCardRequest {
    CreateCardRequest {
        title: Some(title.to_string()),
        content: Some("body".to_string()),
        deadline: Some("2024-06-01".to_string()),
        completed: Some("0".to_string()),
        list: Some(list),
    }
}

fn seed_user(conn: &Connection, email: &str) -> UserId {
    let users = SqliteUserRepository::new(conn);
    users.create_user(&User::new(email, "Owner", "hash")).unwrap()
}
