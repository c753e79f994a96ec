use crate::{FieldType, GenericSqlWriter, SqlWriter};

/// Literal of the auto generated timestamp default.
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Column default as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefault {
    pub is_null: bool,
    /// Literal text, `NULL` when the catalog reports no default.
    pub literal: String,
    pub current_timestamp: bool,
}

impl FieldDefault {
    /// Builds the default from the nullable catalog cell.
    pub fn new(literal: Option<String>) -> Self {
        match literal {
            None => FieldDefault {
                is_null: true,
                literal: "NULL".into(),
                current_timestamp: false,
            },
            Some(literal) => FieldDefault {
                is_null: false,
                current_timestamp: literal == CURRENT_TIMESTAMP,
                literal,
            },
        }
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        GenericSqlWriter.write_field_default(&mut out, self);
        out
    }
}

impl Default for FieldDefault {
    fn default() -> Self {
        FieldDefault::new(None)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    #[default]
    None,
    Primary,
    Unique,
}

impl KeyKind {
    /// Reads the catalog `COLUMN_KEY` classification, `MUL` and blanks are [`KeyKind::None`].
    pub fn parse(value: &str) -> Self {
        match value {
            "PRI" => KeyKind::Primary,
            "UNI" => KeyKind::Unique,
            _ => KeyKind::None,
        }
    }
}

/// One column of a [`crate::Table`], in catalog ordinal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// `table.`column``, filled by [`crate::Table::new`].
    pub qualified_name: String,
    pub field_type: FieldType,
    pub nullable: bool,
    pub key: KeyKind,
    pub default: FieldDefault,
    pub extra: String,
    pub comment: String,
}

impl Field {
    /// A nullable column without key, default or extra attributes.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            qualified_name: String::new(),
            field_type,
            nullable: true,
            key: KeyKind::None,
            default: FieldDefault::default(),
            extra: String::new(),
            comment: String::new(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn key(mut self, key: KeyKind) -> Self {
        self.key = key;
        self
    }

    pub fn default_value(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Column definition line as it appears inside `CREATE TABLE`.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        GenericSqlWriter.write_column_definition(&mut out, self);
        out
    }
}
