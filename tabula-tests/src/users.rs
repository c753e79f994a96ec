use indoc::indoc;
use std::sync::LazyLock;
use tabula::{
    Connection, KeyKind, Mapper, Statement, TypeCode, Value, args, load_table, record,
};
use time::{PrimitiveDateTime, macros::datetime};
use tokio::sync::Mutex;

#[derive(Debug, Default, PartialEq)]
struct User {
    id: i64,
    name: String,
    score: Option<f64>,
    active: bool,
    created: Option<PrimitiveDateTime>,
}
record!(User {
    id,
    name,
    score,
    active,
    created,
});

pub async fn users<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    connection
        .execute(Statement::from("DROP TABLE IF EXISTS tabula_users"))
        .await
        .expect("Failed to drop the tabula_users table");
    connection
        .execute(Statement::from(indoc! {"
            CREATE TABLE tabula_users (
                id BIGINT NOT NULL AUTO_INCREMENT,
                name VARCHAR(64) NOT NULL,
                score DOUBLE NULL,
                active INT NOT NULL DEFAULT 1,
                created DATETIME NULL,
                PRIMARY KEY (id),
                UNIQUE KEY name_0 (name)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8
        "}))
        .await
        .expect("Failed to create the tabula_users table");

    // Catalog
    let database = connection.database().to_owned();
    connection
        .use_database(&database)
        .await
        .expect("Failed to switch database");
    assert_eq!(connection.database(), database);
    let tables = connection
        .show_tables()
        .await
        .expect("Failed to list the tables");
    assert!(tables.iter().any(|v| v == "tabula_users"));
    let table = load_table(connection, "tabula_users")
        .await
        .expect("Failed to load tabula_users");
    assert_eq!(table.len(), 5);
    assert_eq!(table.primary_key(), Some("id"));
    assert_eq!(table.unique_fields(), ["name".to_string()]);
    let codes = table
        .fields()
        .iter()
        .map(|v| v.field_type.code)
        .collect::<Vec<_>>();
    assert_eq!(
        codes,
        [
            TypeCode::Bigint,
            TypeCode::Varchar,
            TypeCode::Double,
            TypeCode::Int,
            TypeCode::Datetime
        ]
    );
    assert_eq!(table.fields()[1].field_type.length, 64);
    assert!(!table.fields()[1].nullable);
    assert!(table.fields()[2].nullable);
    assert_eq!(table.fields()[1].key, KeyKind::Unique);
    assert!(table.fields()[0].extra.contains("auto_increment"));
    assert!(
        load_table(connection, "tabula_missing").await.is_err(),
        "A table without columns must not load"
    );

    // Add
    let alice = table
        .add(
            connection,
            &args![
                Value::Null,
                "alice",
                4.5,
                1,
                datetime!(2024-01-02 03:04:05)
            ],
        )
        .await
        .expect("Failed to add alice")
        .expect("The identifier of alice was not generated");
    let bob = table
        .add(connection, &args![Value::Null, "bob", None::<f64>, 0])
        .await
        .expect("Failed to add bob")
        .expect("The identifier of bob was not generated");
    assert!(bob > alice);

    // Count
    assert_eq!(table.count(connection).await.expect("Failed to count"), 2);
    assert_eq!(
        table
            .count_by(connection, &args![Value::Null, Value::Null, Value::Null, 1])
            .await
            .expect("Failed to count the active users"),
        1
    );

    // Get
    let row = table
        .get(connection, &args![Value::Null, "alice"])
        .await
        .expect("Failed to get alice")
        .expect("alice was not found");
    let mut user = User::default();
    row.record(&mut user).expect("Failed to decode alice");
    assert_eq!(
        user,
        User {
            id: alice,
            name: "alice".into(),
            score: Some(4.5),
            active: true,
            created: Some(datetime!(2024-01-02 03:04:05)),
        }
    );
    let map = row.map().expect("Failed to decode alice as a map");
    assert_eq!(map["name"], Value::Varchar(Some("alice".into())));
    assert_eq!(map["score"], Value::Float64(Some(4.5)));
    let mut name = String::new();
    let mut score = String::new();
    row.scan([None, Some(tabula::Cell::slot(&mut name)), Some(tabula::Cell::slot(&mut score))])
        .expect("Failed to scan alice");
    assert_eq!(name, "alice");
    assert_eq!(score, "4.5");

    // Find
    let row = table
        .find(connection, &args![bob, "nobody"])
        .await
        .expect("Failed to find bob")
        .expect("bob was not found");
    let slice = row.slice().expect("Failed to decode bob");
    assert_eq!(slice[1], Value::Varchar(Some("bob".into())));
    assert_eq!(slice[2], Value::Null);
    assert!(
        table
            .get(connection, &args![Value::Null, "nobody"])
            .await
            .expect("Failed to get nobody")
            .is_none()
    );

    // List
    {
        let mut rows = table.list(connection, 10, 0);
        let mut names = Vec::new();
        while rows.advance().await.expect("Failed to advance the list") {
            names.push(rows.slice().expect("Failed to decode the list")[1].clone());
        }
        assert_eq!(names, args!["alice", "bob"]);
    }
    {
        let mut rows = table.list_desc(connection, 1, 0);
        assert!(rows.advance().await.expect("Failed to advance the list"));
        let mut user = User::default();
        rows.record(&mut user).expect("Failed to decode the list");
        assert_eq!(user.name, "bob");
        assert_eq!(user.score, None);
        assert!(!user.active);
        assert!(!rows.advance().await.expect("Failed to advance the list"));
    }

    // Update
    let affected = table
        .update(&args![Value::Null, "bob"])
        .expect("Failed to prepare the update")
        .assign(connection, &args![Value::Null, Value::Null, 7.25])
        .await
        .expect("Failed to update bob");
    assert_eq!(affected, 1);
    let affected = table
        .update_many(&args![Value::Null, Value::Null, Value::Null, 1])
        .expect("Failed to prepare the update")
        .assign(connection, &args![Value::Null, Value::Null, Value::Null, 0])
        .await
        .expect("Failed to deactivate everybody");
    assert_eq!(affected, 1);

    // Query
    {
        let mut rows = table.query(
            connection,
            "WHERE tabula_users.`score` > ? ORDER BY tabula_users.`id`",
            vec![5.into()],
        );
        assert!(rows.advance().await.expect("Failed to advance the query"));
        let map = rows.map().expect("Failed to decode the query");
        assert_eq!(map["name"], Value::Varchar(Some("bob".into())));
        assert_eq!(map["score"], Value::Float64(Some(7.25)));
        assert!(!rows.advance().await.expect("Failed to advance the query"));
    }
    let row = table
        .query_row(connection, "WHERE tabula_users.`active` = ?", vec![1.into()])
        .await
        .expect("Failed to run query_row");
    assert!(row.is_none());

    // Delete
    let affected = table
        .del(connection, &args![Value::Null, "bob"])
        .await
        .expect("Failed to delete bob");
    assert_eq!(affected, 1);
    assert_eq!(table.count(connection).await.expect("Failed to count"), 1);

    connection
        .execute(Statement::from("DROP TABLE tabula_users"))
        .await
        .expect("Failed to drop the tabula_users table");
}
