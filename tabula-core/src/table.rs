use crate::{Error, Field, GenericSqlWriter, KeyKind, Result, SqlWriter};

/// Metadata of one table, with the SQL skeletons every operation starts from.
///
/// Immutable once built: fields keep the catalog ordinal order, which is the
/// order positional arguments bind to.
#[derive(Debug, Clone)]
pub struct Table {
    schema: String,
    name: String,
    fields: Box<[Field]>,
    primary_key: Option<String>,
    unique_fields: Box<[String]>,
    full_name: String,
    sql_insert: String,
    sql_delete: String,
    sql_update: String,
    sql_select: String,
    sql_count: String,
    placeholders: Box<[&'static str]>,
}

impl Table {
    /// Builds the table and precomputes its fragments.
    ///
    /// Fails with [`Error::Schema`] when `fields` is empty. Only the first primary
    /// field is kept as such, any later one is demoted to [`KeyKind::None`].
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Result<Self> {
        let schema = schema.into();
        let name = name.into();
        let writer = GenericSqlWriter;
        let mut primary_key: Option<String> = None;
        let mut unique_fields = Vec::new();
        let mut result = Vec::new();
        for mut field in fields {
            field.qualified_name.clear();
            writer.write_qualified_column(&mut field.qualified_name, &name, &field.name);
            match field.key {
                KeyKind::Primary => {
                    if let Some(primary_key) = &primary_key {
                        log::warn!(
                            "Table `{}`.`{}` has more than one primary column, `{}` is kept and `{}` is ignored",
                            schema,
                            name,
                            primary_key,
                            field.name,
                        );
                        field.key = KeyKind::None;
                    } else {
                        primary_key = Some(field.name.clone());
                    }
                }
                KeyKind::Unique => unique_fields.push(field.name.clone()),
                KeyKind::None => {}
            }
            result.push(field);
        }
        if result.is_empty() {
            let error = Error::Schema {
                schema,
                table: name,
            };
            log::error!("{:#}", error);
            return Err(error);
        }

        let mut full_name = String::new();
        writer.write_table_name(&mut full_name, &schema, &name);
        let sql_count = {
            let mut out = String::from("SELECT COUNT(");
            match &primary_key {
                Some(primary_key) => writer.write_identifier_quoted(&mut out, primary_key),
                None => out.push('*'),
            }
            out.push_str(") FROM ");
            out.push_str(&full_name);
            out
        };
        let placeholders = vec!["?"; result.len()].into_boxed_slice();
        let mut table = Table {
            sql_insert: format!("INSERT INTO {full_name}"),
            sql_delete: format!("DELETE FROM {full_name}"),
            sql_update: format!("UPDATE {full_name}"),
            sql_select: String::new(),
            sql_count,
            full_name,
            schema,
            name,
            fields: result.into_boxed_slice(),
            primary_key,
            unique_fields: unique_fields.into_boxed_slice(),
            placeholders,
        };
        let mut sql_select = String::new();
        writer.write_select(&mut sql_select, &table);
        table.sql_select = sql_select;
        Ok(table)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `` `schema`.`table` ``
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|v| v.name == name)
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false, a table has at least one field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One `?` per field.
    pub fn placeholders(&self) -> &[&'static str] {
        &self.placeholders
    }

    /// `INSERT INTO <table>`
    pub fn sql_insert(&self) -> &str {
        &self.sql_insert
    }

    /// `DELETE FROM <table>`
    pub fn sql_delete(&self) -> &str {
        &self.sql_delete
    }

    /// `UPDATE <table>`
    pub fn sql_update(&self) -> &str {
        &self.sql_update
    }

    /// `SELECT <every qualified column> FROM <table>`
    pub fn sql_select(&self) -> &str {
        &self.sql_select
    }

    /// `SELECT COUNT(<primary key>) FROM <table>`, `COUNT(*)` without a primary key.
    pub fn sql_count(&self) -> &str {
        &self.sql_count
    }

    /// Column used to order paginated listings: the primary key, or the first field.
    pub fn order_column(&self) -> String {
        let mut out = String::new();
        let column = self.primary_key().unwrap_or(&self.fields[0].name);
        GenericSqlWriter.write_identifier_quoted(&mut out, column);
        out
    }

    /// `CREATE TABLE` statement reproducing this table.
    pub fn generate_ddl(&self) -> String {
        let mut out = String::new();
        GenericSqlWriter.write_create_table(&mut out, self);
        out
    }
}

pub fn generate_ddl(table: &Table) -> String {
    table.generate_ddl()
}
