use crate::TypeCode;
use std::{
    fmt::{self, Display},
    mem,
};
use time::PrimitiveDateTime;

/// Dynamically typed value moving between the database and the caller.
///
/// Every variant but [`Value::Null`] carries an `Option`: `None` is a typed
/// empty value (a SQL NULL of a known kind), which is what the result mapper
/// scans into before redistributing.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int64(Option<i64>),
    Float64(Option<f64>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int64(None)
                | Value::Float64(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Timestamp(None)
        )
    }

    /// Human readable name of the runtime kind, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "bool",
            Value::Int64(..) => "i64",
            Value::Float64(..) => "f64",
            Value::Varchar(..) => "String",
            Value::Blob(..) => "bytes",
            Value::Timestamp(..) => "PrimitiveDateTime",
        }
    }

    /// Typed empty scratch value for a column of the given type.
    pub fn empty_for(code: TypeCode) -> Value {
        match code {
            TypeCode::Int | TypeCode::Bigint | TypeCode::Year => Value::Int64(None),
            TypeCode::Float | TypeCode::Double | TypeCode::Decimal => Value::Float64(None),
            TypeCode::Char
            | TypeCode::Varchar
            | TypeCode::Text
            | TypeCode::MediumText
            | TypeCode::Longtext
            | TypeCode::Time => Value::Varchar(None),
            TypeCode::Date | TypeCode::Datetime | TypeCode::Timestamp => Value::Timestamp(None),
        }
    }

    /// The same kind with the payload removed.
    pub fn as_empty(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int64(..) => Value::Int64(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Timestamp(..) => Value::Timestamp(None),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => f.write_str("NULL"),
            Value::Boolean(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::Float64(Some(v)) => write!(f, "{v}"),
            Value::Varchar(Some(v)) => write!(f, "{v:?}"),
            Value::Blob(Some(v)) => {
                f.write_str("x'")?;
                for b in v.iter() {
                    write!(f, "{b:02X}")?;
                }
                f.write_str("'")
            }
            Value::Timestamp(Some(v)) => write!(f, "{v}"),
            _ => f.write_str("NULL"),
        }
    }
}
