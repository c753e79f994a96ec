use crate::{Error, GenericSqlWriter, Result, SqlWriter, find_run};
use std::fmt::{self, Display};

/// Column types understood by the catalog loader.
///
/// The set is closed: a catalog reporting any other type is a deployment defect
/// and surfaces as [`Error::Configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeCode {
    Int,
    Bigint,
    Float,
    Double,
    Decimal,
    Char,
    Varchar,
    Text,
    MediumText,
    Longtext,
    Date,
    Datetime,
    Year,
    Time,
    Timestamp,
}

impl TypeCode {
    pub const ALL: [TypeCode; 15] = [
        TypeCode::Int,
        TypeCode::Bigint,
        TypeCode::Float,
        TypeCode::Double,
        TypeCode::Decimal,
        TypeCode::Char,
        TypeCode::Varchar,
        TypeCode::Text,
        TypeCode::MediumText,
        TypeCode::Longtext,
        TypeCode::Date,
        TypeCode::Datetime,
        TypeCode::Year,
        TypeCode::Time,
        TypeCode::Timestamp,
    ];

    /// Case insensitive lookup of a catalog type name.
    pub fn parse(name: &str) -> Result<Self> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "int" => TypeCode::Int,
            "bigint" => TypeCode::Bigint,
            "float" => TypeCode::Float,
            "double" => TypeCode::Double,
            "decimal" => TypeCode::Decimal,
            "char" => TypeCode::Char,
            "varchar" => TypeCode::Varchar,
            "text" => TypeCode::Text,
            "mediumtext" => TypeCode::MediumText,
            "longtext" => TypeCode::Longtext,
            "date" => TypeCode::Date,
            "datetime" => TypeCode::Datetime,
            "year" => TypeCode::Year,
            "time" => TypeCode::Time,
            "timestamp" => TypeCode::Timestamp,
            _ => {
                let error = Error::Configuration(format!("unknown column type name `{name}`"));
                log::error!("{:#}", error);
                return Err(error);
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Int => "int",
            TypeCode::Bigint => "bigint",
            TypeCode::Float => "float",
            TypeCode::Double => "double",
            TypeCode::Decimal => "decimal",
            TypeCode::Char => "char",
            TypeCode::Varchar => "varchar",
            TypeCode::Text => "text",
            TypeCode::MediumText => "mediumtext",
            TypeCode::Longtext => "longtext",
            TypeCode::Date => "date",
            TypeCode::Datetime => "datetime",
            TypeCode::Year => "year",
            TypeCode::Time => "time",
            TypeCode::Timestamp => "timestamp",
        }
    }

    /// Types written without a `(length)` suffix in DDL.
    pub fn is_length_less(&self) -> bool {
        matches!(
            self,
            TypeCode::Date
                | TypeCode::Datetime
                | TypeCode::Year
                | TypeCode::Time
                | TypeCode::Timestamp
                | TypeCode::Text
                | TypeCode::MediumText
                | TypeCode::Longtext
        )
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self> {
        TypeCode::ALL.get(value as usize).copied().ok_or_else(|| {
            let error = Error::Configuration(format!("unknown column type code {value}"));
            log::error!("{:#}", error);
            error
        })
    }
}

impl Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a catalog type name into its code.
pub fn parse_type_name(name: &str) -> Result<TypeCode> {
    TypeCode::parse(name)
}

/// Formats a code back into its catalog type name.
pub fn format_type_code(code: TypeCode) -> &'static str {
    code.name()
}

/// Column type as reported by the catalog, e.g. `varchar(255)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Type name exactly as it appears in the catalog (case preserved).
    pub name: String,
    pub code: TypeCode,
    /// Declared length, 0 when the type has none.
    pub length: u32,
}

impl FieldType {
    /// Extracts the first word as the name and the first digit run as the length.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = find_run(raw, |c| c.is_ascii_alphanumeric() || *c == '_');
        let length = find_run(raw, char::is_ascii_digit);
        let length = if length.is_empty() {
            0
        } else {
            length.parse::<u32>().map_err(|e| {
                Error::Configuration(format!("invalid length in column type `{raw}`: {e}"))
            })?
        };
        Ok(FieldType {
            name: name.to_string(),
            code: TypeCode::parse(name)?,
            length,
        })
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        GenericSqlWriter.write_field_type(&mut out, self);
        out
    }
}

/// Returns `(name, code, length)` for a raw catalog type string.
pub fn parse_field_type(raw: &str) -> Result<(String, TypeCode, u32)> {
    let FieldType { name, code, length } = FieldType::parse(raw)?;
    Ok((name, code, length))
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
