mod num;

mod parameter;
pub use parameter::{Parameter, PRIMITIVE};

mod row;
pub use row::Row;

mod ty;
pub use ty::Type;

mod value_chrono;
mod value_decimal;
mod value_misc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A dynamically typed value crossing the driver boundary, either as a
/// procedure parameter or as a result column.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 8-bit integer
    U8(u8),

    /// Unsigned 16-bit integer
    U16(u16),

    /// Unsigned 32-bit integer
    U32(u32),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 32-bit floating point number
    F32(f32),

    /// 64-bit floating point number
    F64(f64),

    /// Fixed-precision decimal number
    Decimal(Decimal),

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// A UUID
    Uuid(Uuid),

    /// Calendar date without time zone
    Date(NaiveDate),

    /// Time of day without time zone
    Time(NaiveTime),

    /// Date and time without time zone
    DateTime(NaiveDateTime),

    /// Date and time with a fixed UTC offset
    DateTimeOffset(DateTime<FixedOffset>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<&bool> for Value {
    fn from(src: &bool) -> Self {
        Self::Bool(*src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(v) => Ok(v),
            // MySQL reports BOOLEAN columns as TINYINT(1)
            Value::I8(v @ (0 | 1)) => Ok(v == 1),
            Value::I16(v @ (0 | 1)) => Ok(v == 1),
            Value::I32(v @ (0 | 1)) => Ok(v == 1),
            Value::I64(v @ (0 | 1)) => Ok(v == 1),
            Value::U8(v @ (0 | 1)) => Ok(v == 1),
            Value::U64(v @ (0 | 1)) => Ok(v == 1),
            _ => Err(crate::Error::conversion_failed(value, "bool")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(crate::Error::conversion_failed(value, "String")),
        }
    }
}
