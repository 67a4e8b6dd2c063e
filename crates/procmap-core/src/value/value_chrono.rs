use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::Value;
use crate::Error;

macro_rules! impl_chrono_conversions {
    ($chrono:ty, $name:ident, $lit:literal) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Self::$name(value)
            }
        }

        impl From<&$chrono> for Value {
            fn from(value: &$chrono) -> Self {
                Self::$name(*value)
            }
        }

        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$name(value) => Ok(value),
                    _ => Err(Error::conversion_failed(value, $lit)),
                }
            }
        }
    };
}

impl_chrono_conversions!(NaiveTime, Time, "NaiveTime");
impl_chrono_conversions!(DateTime<FixedOffset>, DateTimeOffset, "DateTime<FixedOffset>");

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<&NaiveDate> for Value {
    fn from(value: &NaiveDate) -> Self {
        Self::Date(*value)
    }
}

impl TryFrom<Value> for NaiveDate {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Date(value) => Ok(value),
            // Some drivers only know a single date-time wire type
            Value::DateTime(value) => Ok(value.date()),
            _ => Err(Error::conversion_failed(value, "NaiveDate")),
        }
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<&NaiveDateTime> for Value {
    fn from(value: &NaiveDateTime) -> Self {
        Self::DateTime(*value)
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::Date(value) => Ok(value.and_time(NaiveTime::MIN)),
            _ => Err(Error::conversion_failed(value, "NaiveDateTime")),
        }
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTimeOffset(value.fixed_offset())
    }
}

impl From<&DateTime<Utc>> for Value {
    fn from(value: &DateTime<Utc>) -> Self {
        Self::DateTimeOffset(value.fixed_offset())
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTimeOffset(value) => Ok(value.with_timezone(&Utc)),
            // A naive date-time coming back from the database is taken as UTC
            Value::DateTime(value) => Ok(value.and_utc()),
            _ => Err(Error::conversion_failed(value, "DateTime<Utc>")),
        }
    }
}
