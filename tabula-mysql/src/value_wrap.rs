use tabula_core::{Error, Value};
use time::{Date, Month, PrimitiveDateTime, Time};

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
impl From<ValueWrap> for Value {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

impl mysql_async::prelude::FromValue for ValueWrap {
    type Intermediate = ValueWrap;
}

/// Driver values as they come off the wire.
///
/// Text columns arrive as bytes and are left for the scratch cells to read.
/// Unsigned integers that do not fit in `i64` become their decimal text, time of
/// day becomes `[-]HH:MM:SS` text with days folded into hours.
impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = mysql_async::FromValueError;
    fn try_from(value: mysql_async::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            mysql_async::Value::NULL => Value::Null,
            mysql_async::Value::Bytes(v) => Value::Blob(Some(v.into())),
            mysql_async::Value::Int(v) => Value::Int64(Some(v)),
            mysql_async::Value::UInt(v) => match i64::try_from(v) {
                Ok(v) => Value::Int64(Some(v)),
                Err(..) => Value::Varchar(Some(v.to_string())),
            },
            mysql_async::Value::Float(v) => Value::Float64(Some(v as f64)),
            mysql_async::Value::Double(v) => Value::Float64(Some(v)),
            mysql_async::Value::Date(year, month, day, hour, minute, second, microsecond) => {
                let month = Month::try_from(month)
                    .map_err(|_| mysql_async::FromValueError(value.clone()))?;
                Value::Timestamp(Some(PrimitiveDateTime::new(
                    Date::from_calendar_date(year as _, month, day)
                        .map_err(|_| mysql_async::FromValueError(value.clone()))?,
                    Time::from_hms_micro(hour, minute, second, microsecond)
                        .map_err(|_| mysql_async::FromValueError(value.clone()))?,
                )))
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, ..) => {
                let hours = days as u64 * 24 + hours as u64;
                Value::Varchar(Some(format!(
                    "{}{:02}:{:02}:{:02}",
                    if negative { "-" } else { "" },
                    hours,
                    minutes,
                    seconds
                )))
            }
        }
        .into())
    }
}

impl TryFrom<ValueWrap> for mysql_async::Value {
    type Error = Error;

    fn try_from(value: ValueWrap) -> Result<Self, Self::Error> {
        type MySQLValue = mysql_async::Value;
        Ok(match value.0 {
            _ if value.0.is_null() => MySQLValue::NULL,
            Value::Boolean(Some(v)) => MySQLValue::from(v),
            Value::Int64(Some(v)) => MySQLValue::from(v),
            Value::Float64(Some(v)) => MySQLValue::from(v),
            Value::Varchar(Some(v)) => MySQLValue::from(v),
            Value::Blob(Some(v)) => MySQLValue::Bytes(v.into()),
            Value::Timestamp(Some(v)) => {
                if !(0..=9999).contains(&v.year()) {
                    return Err(Error::Execution(anyhow::anyhow!(
                        "Date {} is out of range for MySQL",
                        v
                    )));
                }
                MySQLValue::Date(
                    v.year() as _,
                    v.month().into(),
                    v.day(),
                    v.hour(),
                    v.minute(),
                    v.second(),
                    v.microsecond(),
                )
            }
            _ => MySQLValue::NULL,
        })
    }
}
