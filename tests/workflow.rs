#[cfg(test)]
mod tests {
    use tabula::{Mapper, Table, Value, args, record};
    use tabula_tests::{MockExecutor, init_logs};

    #[derive(Debug, Default, PartialEq)]
    struct Book {
        id: i64,
        title: String,
        pages: Option<i32>,
    }
    record!(Book { id, title, pages });

    fn text(value: &str) -> Value {
        Value::Blob(Some(value.as_bytes().into()))
    }

    #[tokio::test]
    async fn load_insert_and_read_back() {
        init_logs();
        let labels = &[
            "COLUMN_NAME",
            "COLUMN_TYPE",
            "COLUMN_DEFAULT",
            "IS_NULLABLE",
            "COLUMN_KEY",
            "EXTRA",
            "COLUMN_COMMENT",
        ];
        let mut executor = MockExecutor::new("library")
            .with_rows(
                labels,
                vec![
                    vec![
                        text("id"),
                        text("int(11)"),
                        Value::Null,
                        text("NO"),
                        text("PRI"),
                        text("auto_increment"),
                        text(""),
                    ],
                    vec![
                        text("title"),
                        text("varchar(200)"),
                        Value::Null,
                        text("NO"),
                        text(""),
                        text(""),
                        text(""),
                    ],
                    vec![
                        text("pages"),
                        text("int(11)"),
                        Value::Null,
                        text("YES"),
                        text(""),
                        text(""),
                        text(""),
                    ],
                ],
            )
            .with_affected(1, Some(9))
            .with_rows(
                &["id", "title", "pages"],
                vec![vec![Value::Int64(Some(9)), text("Dune"), Value::Null]],
            );

        let books = Table::load(&mut executor, "library", "books").await.unwrap();
        let id = books
            .add(&mut executor, &args![Value::Null, "Dune", None::<i32>])
            .await
            .unwrap();
        assert_eq!(id, Some(9));
        assert_eq!(
            executor.last().unwrap().sql,
            "INSERT INTO `library`.`books` (books.`title`) VALUES (?)"
        );

        let row = books
            .get(&mut executor, &args![id])
            .await
            .unwrap()
            .expect("The book was not found");
        let mut book = Book::default();
        row.record(&mut book).unwrap();
        assert_eq!(
            book,
            Book {
                id: 9,
                title: "Dune".into(),
                pages: None,
            }
        );
        assert_eq!(
            executor.last().unwrap().sql,
            "SELECT books.`id`,books.`title`,books.`pages` FROM `library`.`books` WHERE books.`id`=? LIMIT 1"
        );
        assert_eq!(executor.last().unwrap().args, args![9]);
    }
}
