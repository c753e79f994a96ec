use crate::{
    AsValue, Connection, Error, Executor, Field, FieldDefault, FieldType, KeyKind, Result,
    RowLabeled, Statement, Table, Value, stream::TryStreamExt,
};
use std::pin::pin;

/// Column metadata of one table, in ordinal order. Binds schema then table name.
pub const CATALOG_QUERY: &str = "SELECT COLUMN_NAME, COLUMN_TYPE, COLUMN_DEFAULT, IS_NULLABLE, COLUMN_KEY, EXTRA, COLUMN_COMMENT \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

impl Table {
    /// Loads `schema`.`name` from the information catalog.
    ///
    /// Nothing is cached, every call queries the catalog again and returns an
    /// independent table. No columns means [`Error::Schema`].
    pub async fn load(executor: &mut impl Executor, schema: &str, name: &str) -> Result<Table> {
        log::trace!("Loading the columns of `{}`.`{}`", schema, name);
        let statement = Statement::new(CATALOG_QUERY, vec![schema.into(), name.into()]);
        let mut rows = pin!(executor.run(statement));
        let mut fields = Vec::new();
        while let Some(row) = rows.try_next().await? {
            fields.push(field_from_catalog(row)?);
        }
        log::trace!(
            "Loaded {} columns for `{}`.`{}`",
            fields.len(),
            schema,
            name
        );
        Table::new(schema, name, fields)
    }
}

/// Loads `name` from the active database of `connection`.
pub async fn load_table<C: Connection>(connection: &mut C, name: &str) -> Result<Table> {
    let schema = connection.database().to_owned();
    Table::load(connection, &schema, name).await
}

fn field_from_catalog(row: RowLabeled) -> Result<Field> {
    let values: [Value; 7] = row.values.into_vec().try_into().map_err(|v: Vec<Value>| {
        Error::ShapeMismatch {
            table: "information_schema.COLUMNS".into(),
            what: "catalog columns",
            expected: 7,
            actual: v.len(),
        }
    })?;
    let [name, column_type, default, nullable, key, extra, comment] = values;
    let text = |v: Value| Option::<String>::try_from_value(v).map(Option::unwrap_or_default);
    Ok(Field {
        name: String::try_from_value(name)?,
        qualified_name: String::new(),
        field_type: FieldType::parse(&text(column_type)?)?,
        nullable: text(nullable)?.eq_ignore_ascii_case("YES"),
        key: KeyKind::parse(&text(key)?),
        default: FieldDefault::new(Option::<String>::try_from_value(default)?),
        extra: text(extra)?,
        comment: text(comment)?,
    })
}
