use rust_decimal::Decimal;

use super::Value;
use crate::Error;

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&Decimal> for Value {
    fn from(value: &Decimal) -> Self {
        Self::Decimal(*value)
    }
}

impl TryFrom<Value> for Decimal {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Decimal(v) => Ok(v),
            Value::I8(v) => Ok(v.into()),
            Value::I16(v) => Ok(v.into()),
            Value::I32(v) => Ok(v.into()),
            Value::I64(v) => Ok(v.into()),
            Value::U8(v) => Ok(v.into()),
            Value::U16(v) => Ok(v.into()),
            Value::U32(v) => Ok(v.into()),
            Value::U64(v) => Ok(v.into()),
            // MySQL sends DECIMAL columns as text in the text protocol
            Value::String(ref s) => s
                .parse::<Decimal>()
                .map_err(|_| Error::conversion_failed(value.clone(), "Decimal")),
            _ => Err(Error::conversion_failed(value, "Decimal")),
        }
    }
}
