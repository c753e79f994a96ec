#[cfg(test)]
mod tests {
    use tabula_core::{
        Error, Field, FieldType, KeyKind, Statement, Table, Value, args,
    };
    use tabula_tests::{MockExecutor, init_logs};

    const SELECT: &str = "SELECT tb.`id`,tb.`name`,tb.`score` FROM `db`.`tb`";

    fn table() -> Table {
        Table::new(
            "db",
            "tb",
            [
                Field::new("id", FieldType::parse("int(11)").unwrap()).key(KeyKind::Primary),
                Field::new("name", FieldType::parse("varchar(32)").unwrap()),
                Field::new("score", FieldType::parse("double(8)").unwrap()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn insert_skips_absent_values() {
        let statement = table()
            .insert_statement(&args![Value::Null, "x", 5])
            .unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO `db`.`tb` (tb.`name`, tb.`score`) VALUES (?, ?)"
        );
        assert_eq!(statement.args, args!["x", 5]);

        let statement = table().insert_statement(&[]).unwrap();
        assert_eq!(statement.sql, "INSERT INTO `db`.`tb` () VALUES ()");
        assert!(statement.args.is_empty());
    }

    #[test]
    fn lookups() {
        let table = table();
        let statement = table.get_statement(&args![Value::Null, "x", Value::Null]).unwrap();
        assert_eq!(statement.sql, format!("{SELECT} WHERE tb.`name`=? LIMIT 1"));
        assert_eq!(statement.args, args!["x"]);

        let statement = table.find_statement(&args![Value::Null, "x", Value::Null]).unwrap();
        assert_eq!(statement.sql, format!("{SELECT} WHERE tb.`name`=? LIMIT 1"));

        let statement = table.find_statement(&args!["a", "b", Value::Null]).unwrap();
        assert_eq!(
            statement.sql,
            format!("{SELECT} WHERE tb.`id`=? OR tb.`name`=? LIMIT 1")
        );
        assert_eq!(statement.args, args!["a", "b"]);

        let statement = table.get_many_statement(&args![1, Value::Null, 2.5]).unwrap();
        assert_eq!(
            statement.sql,
            format!("{SELECT} WHERE tb.`id`=? AND tb.`score`=?")
        );
        assert_eq!(statement.args, args![1, 2.5]);

        let statement = table.find_many_statement(&args![None::<i64>, "n"]).unwrap();
        assert_eq!(statement.sql, format!("{SELECT} WHERE tb.`name`=?"));
    }

    #[test]
    fn empty_predicates_are_rejected() {
        let table = table();
        let none = args![Value::Null, None::<String>, Value::Float64(None)];
        assert!(matches!(
            table.get_statement(&none),
            Err(Error::EmptyPredicate { operation: "get", .. })
        ));
        assert!(matches!(
            table.find_many_statement(&none),
            Err(Error::EmptyPredicate { operation: "find_many", .. })
        ));
        assert!(matches!(
            table.delete_statement(&[]),
            Err(Error::EmptyPredicate { operation: "del", .. })
        ));
        assert!(matches!(
            table.count_by_statement(&none),
            Err(Error::EmptyPredicate { operation: "count_by", .. })
        ));
        assert!(matches!(
            table.update_many(&none),
            Err(Error::EmptyPredicate { operation: "update_many", .. })
        ));
        let setter = table.update(&args![1]).unwrap();
        assert!(matches!(
            setter.statement(&none),
            Err(Error::EmptyPredicate { operation: "assign", .. })
        ));
    }

    #[test]
    fn too_many_arguments() {
        assert!(matches!(
            table().get_statement(&args![1, "a", 2.0, 3]),
            Err(Error::ShapeMismatch {
                expected: 3,
                actual: 4,
                ..
            })
        ));
        assert!(matches!(
            table().insert_statement(&args![1, "a", 2.0, 3]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn modifications() {
        let table = table();
        let statement = table.delete_statement(&args![7]).unwrap();
        assert_eq!(
            statement.sql,
            "DELETE FROM `db`.`tb` WHERE tb.`id`=? LIMIT 1"
        );

        let setter = table.update(&args![7]).unwrap();
        let statement = setter.statement(&args![Value::Null, "y", 1.5]).unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE `db`.`tb` SET tb.`name`=?, tb.`score`=? WHERE tb.`id`=? LIMIT 1"
        );
        assert_eq!(statement.args, args!["y", 1.5, 7]);

        let setter = table.update_many(&args![Value::Null, "x"]).unwrap();
        let statement = setter.statement(&args![Value::Null, Value::Null, 0]).unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE `db`.`tb` SET tb.`score`=? WHERE tb.`name`=?"
        );
        assert_eq!(statement.args, args![0, "x"]);
    }

    #[test]
    fn counts_and_pages() {
        let table = table();
        assert_eq!(
            table.count_statement(),
            Statement::from("SELECT COUNT(`id`) FROM `db`.`tb`")
        );
        let statement = table.count_by_statement(&args![Value::Null, "x"]).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT COUNT(`id`) FROM `db`.`tb` WHERE tb.`name`=?"
        );

        let statement = table.list_statement(10, 20, false);
        assert_eq!(statement.sql, format!("{SELECT} ORDER BY `id` LIMIT ?, ?"));
        assert_eq!(statement.args, args![20, 10]);
        let statement = table.list_statement(5, 0, true);
        assert_eq!(
            statement.sql,
            format!("{SELECT} ORDER BY `id` DESC LIMIT ?, ?")
        );
        assert_eq!(statement.args, args![0, 5]);

        let statement = table.query_statement("WHERE tb.`score` > ?", vec![Value::Null]);
        assert_eq!(statement.sql, format!("{SELECT} WHERE tb.`score` > ?"));
        assert_eq!(statement.args, [Value::Null]);
    }

    #[tokio::test]
    async fn executes_through_the_executor() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db")
            .with_affected(1, Some(42))
            .with_affected(1, None)
            .with_affected(2, None);

        let id = table
            .add(&mut executor, &args![Value::Null, "x", 5])
            .await
            .unwrap();
        assert_eq!(id, Some(42));

        let deleted = table.del(&mut executor, &args![42]).await.unwrap();
        assert_eq!(deleted, 1);

        let updated = table
            .update_many(&args![Value::Null, "x"])
            .unwrap()
            .assign(&mut executor, &args![Value::Null, "z"])
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let sql = executor
            .statements
            .iter()
            .map(|v| v.sql.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            sql,
            [
                "INSERT INTO `db`.`tb` (tb.`name`, tb.`score`) VALUES (?, ?)",
                "DELETE FROM `db`.`tb` WHERE tb.`id`=? LIMIT 1",
                "UPDATE `db`.`tb` SET tb.`name`=? WHERE tb.`name`=?",
            ]
        );
        assert_eq!(executor.last().unwrap().args, args!["z", "x"]);
    }

    #[tokio::test]
    async fn counts_through_the_executor() {
        init_logs();
        let table = table();
        let mut executor = MockExecutor::new("db")
            .with_rows(&["COUNT(`id`)"], vec![vec![Value::Int64(Some(12))]])
            .with_rows(&["COUNT(`id`)"], vec![vec![Value::Blob(Some(b"3".as_slice().into()))]]);
        assert_eq!(table.count(&mut executor).await.unwrap(), 12);
        assert_eq!(
            table
                .count_by(&mut executor, &args![Value::Null, "x"])
                .await
                .unwrap(),
            3
        );
        assert!(matches!(
            table.count(&mut executor).await,
            Err(Error::NoRows)
        ));
    }

    #[test]
    fn statement_display() {
        let statement = Statement::new("SELECT ?", args!["a", Value::Null].to_vec());
        assert_eq!(statement.to_string(), "SELECT ? [\"a\", NULL]");
        let long = Statement::from("x".repeat(600));
        assert!(long.to_string().ends_with("..."));
        assert!(long.to_string().len() < 510);
    }
}
