use crate::{AsValue, Error, Result, Value};
use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

/// Layout used to read and write point-in-time values as text.
pub const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// [`DATETIME_FORMAT`] with optional fractional seconds, used when reading.
pub const DATETIME_PARSE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);
/// Fallback layout tried when [`DATETIME_PARSE_FORMAT`] does not match.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Mutable destination of a coercion.
///
/// The typed variants go through the conversion matrix of [`coerce`],
/// [`Slot::Accept`] receives the source untouched.
pub enum Slot<'a> {
    Boolean(&'a mut bool),
    Int64(&'a mut i64),
    Float64(&'a mut f64),
    Varchar(&'a mut String),
    Blob(&'a mut Vec<u8>),
    Timestamp(&'a mut PrimitiveDateTime),
    Accept(&'a mut dyn AcceptValue),
}

impl<'a> Slot<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Boolean(..) => "bool",
            Slot::Int64(..) => "i64",
            Slot::Float64(..) => "f64",
            Slot::Varchar(..) => "String",
            Slot::Blob(..) => "bytes",
            Slot::Timestamp(..) => "PrimitiveDateTime",
            Slot::Accept(..) => "value acceptor",
        }
    }
}

/// Types that take a raw [`Value`] directly, bypassing the conversion matrix.
pub trait AcceptValue {
    fn accept_value(&mut self, value: Value) -> Result<()>;
}

/// Types that produce a canonical [`Value`] of themselves.
pub trait Canonical {
    fn canonical(&self) -> Value;
}

/// Anything that can be handed out as a coercion destination.
pub trait Cell {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! impl_cell {
    ($type:ty, $variant:path) => {
        impl Cell for $type {
            fn slot(&mut self) -> Slot<'_> {
                $variant(self)
            }
        }
    };
}
impl_cell!(bool, Slot::Boolean);
impl_cell!(i64, Slot::Int64);
impl_cell!(f64, Slot::Float64);
impl_cell!(String, Slot::Varchar);
impl_cell!(Vec<u8>, Slot::Blob);
impl_cell!(PrimitiveDateTime, Slot::Timestamp);

macro_rules! impl_cell_accept {
    ($($type:ty),+ $(,)?) => {
        $(
            impl AcceptValue for $type {
                fn accept_value(&mut self, value: Value) -> Result<()> {
                    *self = <$type as AsValue>::try_from_value(value)?;
                    Ok(())
                }
            }
            impl Cell for $type {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Accept(self)
                }
            }
        )+
    };
}
impl_cell_accept!(i8, i16, i32, u8, u16, u32, f32, Date);

impl<T: AsValue> AcceptValue for Option<T> {
    fn accept_value(&mut self, value: Value) -> Result<()> {
        *self = <Option<T> as AsValue>::try_from_value(value)?;
        Ok(())
    }
}

impl<T: AsValue> Cell for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Accept(self)
    }
}

impl AcceptValue for Value {
    fn accept_value(&mut self, value: Value) -> Result<()> {
        *self = value;
        Ok(())
    }
}

impl Cell for Value {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Accept(self)
    }
}

impl Canonical for Value {
    fn canonical(&self) -> Value {
        if self.is_null() {
            Value::Null
        } else {
            self.clone()
        }
    }
}

impl<T: AsValue + Clone> Canonical for Option<T> {
    fn canonical(&self) -> Value {
        match self {
            Some(v) => v.clone().as_value(),
            None => Value::Null,
        }
    }
}

/// Canonical value of a scanned cell, typed empty cells become [`Value::Null`].
pub fn normalize<C: Canonical + ?Sized>(cell: &C) -> Value {
    cell.canonical()
}

/// Converts `source` into `destination`.
///
/// Integers narrow to booleans only from 0 and 1, floats only from 0.0 and 1.0.
/// Text is parsed into numbers and booleans, and into point-in-time values trying
/// [`DATETIME_PARSE_FORMAT`] first and [`DATE_FORMAT`] second. Bytes are read as text
/// unless the destination holds bytes. Any other pair is an
/// [`Error::Conversion`], an absent destination is an [`Error::NilDestination`].
pub fn coerce(destination: Option<Slot<'_>>, source: Value) -> Result<()> {
    let Some(destination) = destination else {
        return Err(Error::NilDestination);
    };
    coerce_into(destination, source)
}

fn coerce_into(destination: Slot<'_>, source: Value) -> Result<()> {
    let destination = match destination {
        Slot::Accept(d) => return d.accept_value(source),
        destination => destination,
    };
    match (&source, destination) {
        (Value::Int64(Some(s)), Slot::Int64(d)) => *d = *s,
        (Value::Int64(Some(s)), Slot::Varchar(d)) => {
            *d = itoa::Buffer::new().format(*s).to_owned()
        }
        (Value::Int64(Some(s)), Slot::Boolean(d)) => {
            *d = match s {
                0 => false,
                1 => true,
                _ => {
                    return Err(Error::conversion(
                        "i64",
                        "bool",
                        s,
                        Some("only 0 and 1 have a boolean meaning".into()),
                    ));
                }
            }
        }
        (Value::Int64(Some(s)), Slot::Float64(d)) => *d = *s as f64,

        (Value::Float64(Some(s)), Slot::Float64(d)) => *d = *s,
        (Value::Float64(Some(s)), Slot::Varchar(d)) => *d = s.to_string(),
        (Value::Float64(Some(s)), Slot::Boolean(d)) => {
            *d = if *s == 0.0 {
                false
            } else if *s == 1.0 {
                true
            } else {
                return Err(Error::conversion(
                    "f64",
                    "bool",
                    s,
                    Some("only 0.0 and 1.0 have a boolean meaning".into()),
                ));
            }
        }

        (Value::Boolean(Some(s)), Slot::Boolean(d)) => *d = *s,
        (Value::Boolean(Some(s)), Slot::Varchar(d)) => *d = s.to_string(),
        (Value::Boolean(Some(s)), Slot::Float64(d)) => *d = if *s { 1.0 } else { 0.0 },
        (Value::Boolean(Some(s)), Slot::Int64(d)) => *d = *s as i64,

        (Value::Varchar(Some(s)), Slot::Varchar(d)) => d.clone_from(s),
        (Value::Varchar(Some(s)), Slot::Int64(d)) => {
            *d = s
                .parse::<i64>()
                .map_err(|e| Error::conversion("String", "i64", s, Some(e.to_string())))?
        }
        (Value::Varchar(Some(s)), Slot::Float64(d)) => {
            *d = s
                .parse::<f64>()
                .map_err(|e| Error::conversion("String", "f64", s, Some(e.to_string())))?
        }
        (Value::Varchar(Some(s)), Slot::Boolean(d)) => *d = parse_bool(s)?,
        (Value::Varchar(Some(s)), Slot::Timestamp(d)) => *d = parse_timestamp(s)?,

        (Value::Blob(Some(s)), Slot::Blob(d)) => *d = s.to_vec(),
        (Value::Blob(Some(s)), destination) => {
            let text = std::str::from_utf8(s).map_err(|e| {
                Error::conversion("bytes", destination.kind(), &source, Some(e.to_string()))
            })?;
            return coerce_into(destination, Value::Varchar(Some(text.to_owned())));
        }

        (Value::Timestamp(Some(s)), Slot::Varchar(d)) => {
            *d = s.format(DATETIME_FORMAT).map_err(|e| {
                Error::conversion("PrimitiveDateTime", "String", s, Some(e.to_string()))
            })?
        }
        (Value::Timestamp(Some(s)), Slot::Timestamp(d)) => *d = *s,

        (source, destination) => {
            return Err(Error::conversion(
                source.kind(),
                destination.kind(),
                source,
                None,
            ));
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::conversion(
            "String",
            "bool",
            value,
            Some("not a boolean literal".into()),
        )),
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS[.fraction]`, falling back to `YYYY-MM-DD` at midnight.
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime> {
    PrimitiveDateTime::parse(value, DATETIME_PARSE_FORMAT)
        .or_else(|_| Date::parse(value, DATE_FORMAT).map(Date::midnight))
        .map_err(|e| Error::conversion("String", "PrimitiveDateTime", value, Some(e.to_string())))
}

impl Value {
    /// Scans a raw driver value into this typed scratch cell.
    ///
    /// NULL leaves the cell typed but empty. An untyped cell ([`Value::Null`])
    /// takes the raw value as it is.
    pub fn fill(&mut self, raw: Value) -> Result<()> {
        if raw.is_null() {
            *self = self.as_empty();
            return Ok(());
        }
        macro_rules! fill_as {
            ($variant:path, $type:ty) => {
                *self = $variant(Some(<$type as AsValue>::try_from_value(raw)?))
            };
        }
        match self {
            Value::Null => *self = raw,
            Value::Boolean(..) => fill_as!(Value::Boolean, bool),
            Value::Int64(..) => fill_as!(Value::Int64, i64),
            Value::Float64(..) => fill_as!(Value::Float64, f64),
            Value::Varchar(..) => fill_as!(Value::Varchar, String),
            Value::Blob(..) => {
                *self = Value::Blob(Some(<Vec<u8> as AsValue>::try_from_value(raw)?.into()))
            }
            Value::Timestamp(..) => fill_as!(Value::Timestamp, PrimitiveDateTime),
        }
        Ok(())
    }
}
