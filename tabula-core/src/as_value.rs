use crate::{Cell, Error, Result, Value, coerce};
use std::any;
use time::{Date, PrimitiveDateTime};

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// `as_value` wraps the native value into its canonical variant, while
/// `try_from_value` goes through [`coerce`], so every native type accepts the
/// same sources the conversion matrix allows (e.g. `"42"` into `i64`).
///
/// ```rust
/// use tabula_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int64(Some(42)));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Typed NULL variant for this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(Some(value.into()))
    }
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path, $blank:expr) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let mut result: $source = $blank;
                coerce(Some(result.slot()), value)?;
                Ok(result)
            }
        }
    };
}
impl_as_value!(bool, Value::Boolean, false);
impl_as_value!(i64, Value::Int64, 0);
impl_as_value!(f64, Value::Float64, 0.0);
impl_as_value!(String, Value::Varchar, String::new());
impl_as_value!(Vec<u8>, Value::Blob, Vec::new());
impl_as_value!(PrimitiveDateTime, Value::Timestamp, PrimitiveDateTime::MIN);

// Narrower integers travel as i64 and are range checked on the way back.
macro_rules! impl_as_value_narrow {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_empty_value() -> Value {
                    Value::Int64(None)
                }
                fn as_value(self) -> Value {
                    Value::Int64(Some(self as i64))
                }
                fn try_from_value(value: Value) -> Result<Self> {
                    let v = i64::try_from_value(value)?;
                    <$source>::try_from(v).map_err(|_| {
                        Error::conversion(
                            "i64",
                            any::type_name::<Self>(),
                            v,
                            Some("out of range".into()),
                        )
                    })
                }
            }
        )+
    };
}
impl_as_value_narrow!(i8, i16, i32, u8, u16, u32);

impl AsValue for f32 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self as f64))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        f64::try_from_value(value).map(|v| v as f32)
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            v => Vec::<u8>::try_from_value(v).map(Into::into),
        }
    }
}

/// Dates travel as point-in-time values at midnight.
impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self.midnight()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        PrimitiveDateTime::try_from_value(value).map(|v| v.date())
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}
