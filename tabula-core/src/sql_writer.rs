use crate::{Field, FieldDefault, FieldType, Table, Value, separated_by};

/// Renders identifiers, DDL and statement pieces in the MySQL dialect.
pub trait SqlWriter {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    /// `` `schema`.`table` ``
    fn write_table_name(&self, out: &mut String, schema: &str, name: &str) {
        if !schema.is_empty() {
            self.write_identifier_quoted(out, schema);
            out.push('.');
        }
        self.write_identifier_quoted(out, name);
    }

    /// ``table.`column` ``, the table part is left bare.
    fn write_qualified_column(&self, out: &mut String, table: &str, column: &str) {
        out.push_str(table);
        out.push('.');
        self.write_identifier_quoted(out, column);
    }

    fn write_field_type(&self, out: &mut String, value: &FieldType) {
        out.push_str(&value.name);
        if !value.code.is_length_less() {
            out.push('(');
            out.push_str(itoa::Buffer::new().format(value.length));
            out.push(')');
        }
    }

    fn write_field_default(&self, out: &mut String, value: &FieldDefault) {
        out.push_str("DEFAULT ");
        out.push_str(&value.literal);
    }

    /// Nullable columns always carry their default (`DEFAULT NULL` included),
    /// non nullable ones only when it is not NULL. The extra attributes close the
    /// line even when empty.
    fn write_column_definition(&self, out: &mut String, value: &Field) {
        self.write_identifier_quoted(out, &value.name);
        out.push(' ');
        self.write_field_type(out, &value.field_type);
        if value.nullable {
            out.push_str(" NULL ");
            self.write_field_default(out, &value.default);
        } else {
            out.push_str(" NOT NULL");
            if !value.default.is_null {
                out.push(' ');
                self.write_field_default(out, &value.default);
            }
        }
        out.push(' ');
        out.push_str(&value.extra);
    }

    fn write_create_table(&self, out: &mut String, table: &Table) {
        out.push_str("CREATE TABLE ");
        self.write_identifier_quoted(out, table.name());
        out.push_str(" (\n");
        separated_by(
            out,
            table.fields(),
            |out, field| {
                out.push('\t');
                self.write_column_definition(out, field);
            },
            ",\n",
        );
        if let Some(primary_key) = table.primary_key() {
            out.push_str(",\n\tPRIMARY KEY (");
            self.write_identifier_quoted(out, primary_key);
            out.push(')');
        }
        for (i, unique) in table.unique_fields().iter().enumerate() {
            out.push_str(",\n\tUNIQUE KEY ");
            self.write_identifier_quoted(out, &format!("{unique}_{i}"));
            out.push_str(" (");
            self.write_identifier_quoted(out, unique);
            out.push(')');
        }
        out.push_str("\n) ENGINE=InnoDB DEFAULT CHARSET=utf8");
    }

    /// `SELECT <qualified columns> FROM <table>`
    fn write_select(&self, out: &mut String, table: &Table) {
        out.push_str("SELECT ");
        separated_by(
            out,
            table.fields(),
            |out, field| out.push_str(&field.qualified_name),
            ",",
        );
        out.push_str(" FROM ");
        out.push_str(table.full_name());
    }

    /// Writes `column=?` for every present positional argument, joined by
    /// `joiner`, and returns the arguments that were bound.
    fn write_predicates(
        &self,
        out: &mut String,
        table: &Table,
        args: &[Value],
        joiner: &str,
    ) -> Vec<Value> {
        let mut bound = Vec::new();
        separated_by(
            out,
            table.fields().iter().zip(args).filter(|(_, v)| !v.is_null()),
            |out, (field, value)| {
                out.push_str(&field.qualified_name);
                out.push_str("=?");
                bound.push(value.clone());
            },
            joiner,
        );
        bound
    }
}

/// The plain MySQL writer.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl SqlWriter for GenericSqlWriter {}
