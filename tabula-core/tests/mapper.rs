#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use tabula_core::{
        AsValue, Cell, Error, Field, FieldType, KeyKind, Mapper, Slot, Table, Value, args, record,
    };
    use tabula_tests::{MockExecutor, init_logs};
    use time::{PrimitiveDateTime, macros::datetime};

    const LABELS: &[&str] = &["id", "name", "score", "created"];

    #[derive(Debug, PartialEq)]
    struct Item {
        id: i64,
        name: String,
        score: String,
        created: Option<PrimitiveDateTime>,
    }
    record!(Item {
        id,
        name,
        score,
        created
    });

    impl Default for Item {
        fn default() -> Self {
            Item {
                id: 0,
                name: String::new(),
                score: String::new(),
                created: None,
            }
        }
    }

    struct Short {
        id: i64,
        name: String,
    }
    record!(Short { id, name });

    fn table() -> Table {
        Table::new(
            "db",
            "items",
            [
                Field::new("id", FieldType::parse("bigint(20)").unwrap()).key(KeyKind::Primary),
                Field::new("name", FieldType::parse("varchar(32)").unwrap()),
                Field::new("score", FieldType::parse("decimal(8,2)").unwrap()),
                Field::new("created", FieldType::parse("datetime").unwrap()),
            ],
        )
        .unwrap()
    }

    fn raw(id: i64, name: &str, score: &str, created: Option<&str>) -> Vec<Value> {
        vec![
            Value::Int64(Some(id)),
            Value::Blob(Some(name.as_bytes().into())),
            Value::Blob(Some(score.as_bytes().into())),
            created.map_or(Value::Null, |v| Value::Blob(Some(v.as_bytes().into()))),
        ]
    }

    #[tokio::test]
    async fn record_and_map_agree() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db").with_rows(
            LABELS,
            vec![raw(1, "pen", "2.50", Some("2024-01-02 03:04:05"))],
        );
        let row = table
            .get(&mut executor, &args![1])
            .await
            .unwrap()
            .expect("The row is missing");

        let mut item = Item::default();
        row.record(&mut item).unwrap();
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "pen".into(),
                score: "2.5".into(),
                created: Some(datetime!(2024-01-02 03:04:05)),
            }
        );

        let map = row.map().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(i64::try_from_value(map["id"].clone()).unwrap(), item.id);
        assert_eq!(String::try_from_value(map["name"].clone()).unwrap(), item.name);
        assert_eq!(String::try_from_value(map["score"].clone()).unwrap(), item.score);
        assert_eq!(
            Option::<PrimitiveDateTime>::try_from_value(map["created"].clone()).unwrap(),
            item.created
        );

        let slice = row.slice().unwrap();
        let by_name = table
            .fields()
            .iter()
            .map(|v| v.name.clone())
            .zip(slice)
            .collect::<HashMap<_, _>>();
        assert_eq!(by_name, map);
    }

    #[tokio::test]
    async fn nulls_normalize_to_null() {
        init_logs();
        let table = table();
        let mut executor =
            MockExecutor::new("db").with_rows(LABELS, vec![raw(2, "cup", "1", None)]);
        let row = table
            .find(&mut executor, &args![Value::Null, "cup"])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.map().unwrap()["created"], Value::Null);
        assert_eq!(
            row.slice().unwrap(),
            [
                Value::Int64(Some(2)),
                Value::Varchar(Some("cup".into())),
                Value::Float64(Some(1.0)),
                Value::Null,
            ]
        );

        let mut item = Item::default();
        row.record(&mut item).unwrap();
        assert_eq!(item.created, None);

        let mut created = PrimitiveDateTime::MIN;
        assert!(matches!(
            row.scan([None, None, None, Some(created.slot())]),
            Err(Error::Conversion { from: "NULL", .. })
        ));
    }

    #[tokio::test]
    async fn scan_positions() {
        init_logs();
        let table = table();
        let mut executor =
            MockExecutor::new("db").with_rows(LABELS, vec![raw(3, "box", "12.75", None)]);
        let row = table
            .get(&mut executor, &args![3])
            .await
            .unwrap()
            .unwrap();
        let mut id = String::new();
        let mut score = 0.0f64;
        row.scan([Some(id.slot()), None, Some(score.slot())]).unwrap();
        assert_eq!(id, "3");
        assert_eq!(score, 12.75);

        let mut too_many = (0..5).map(|_| None).collect::<Vec<Option<Slot>>>();
        too_many[0] = Some(id.slot());
        assert!(matches!(
            row.scan(too_many),
            Err(Error::ShapeMismatch {
                what: "destinations",
                expected: 4,
                actual: 5,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn record_shape_must_match() {
        init_logs();
        let table = table();
        let mut executor =
            MockExecutor::new("db").with_rows(LABELS, vec![raw(4, "bag", "0", None)]);
        let row = table
            .get(&mut executor, &args![4])
            .await
            .unwrap()
            .unwrap();
        let mut short = Short {
            id: 0,
            name: String::new(),
        };
        assert!(matches!(
            row.record(&mut short),
            Err(Error::ShapeMismatch {
                what: "record members",
                expected: 4,
                actual: 2,
                ..
            })
        ));
        assert_eq!(short.id, 0);
        assert!(short.name.is_empty());
    }

    #[tokio::test]
    async fn rows_are_forward_only() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db").with_rows(
            LABELS,
            vec![
                raw(1, "a", "1", None),
                raw(2, "b", "2", Some("2024-02-03")),
                raw(3, "c", "3", None),
            ],
        );
        let mut rows = table.list(&mut executor, 10, 0);
        assert!(matches!(rows.slice(), Err(Error::NoRows)));
        let mut items = Vec::new();
        while rows.advance().await.unwrap() {
            let mut item = Item::default();
            rows.record(&mut item).unwrap();
            items.push(item);
        }
        assert!(matches!(rows.map(), Err(Error::NoRows)));
        assert!(!rows.advance().await.unwrap());
        drop(rows);
        assert_eq!(
            items.iter().map(|v| v.id).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert_eq!(items[1].created, Some(datetime!(2024-02-03 00:00:00)));
        assert_eq!(items[2].created, None);
        assert_eq!(
            executor.last().unwrap().sql,
            "SELECT items.`id`,items.`name`,items.`score`,items.`created` FROM `db`.`items` ORDER BY `id` LIMIT ?, ?"
        );
    }

    #[tokio::test]
    async fn mismatching_rows() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db")
            .with_rows(&["id"], vec![vec![Value::Int64(Some(1))]])
            .with_rows(LABELS, vec![raw(1, "a", "not a number", None)]);
        assert!(matches!(
            table.get(&mut executor, &args![1]).await,
            Err(Error::ShapeMismatch {
                what: "columns",
                expected: 4,
                actual: 1,
                ..
            })
        ));
        let mut rows = table.query(&mut executor, "WHERE items.`id` = ?", args![1].to_vec());
        assert!(matches!(
            rows.advance().await,
            Err(Error::Conversion { into: "f64", .. })
        ));
    }

    #[tokio::test]
    async fn query_row_and_missing_rows() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db");
        let row = table
            .query_row(&mut executor, "WHERE items.`name` LIKE ?", vec!["a%".into()])
            .await
            .unwrap();
        assert!(row.is_none());
        assert_eq!(
            executor.last().unwrap().sql,
            "SELECT items.`id`,items.`name`,items.`score`,items.`created` FROM `db`.`items` WHERE items.`name` LIKE ?"
        );
    }
}
