use uuid::Uuid;

use super::Value;
use crate::Error;

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<&Uuid> for Value {
    fn from(value: &Uuid) -> Self {
        Self::Uuid(*value)
    }
}

impl TryFrom<Value> for Uuid {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(ref s) => {
                Uuid::parse_str(s).map_err(|_| Error::conversion_failed(value.clone(), "Uuid"))
            }
            Value::Bytes(ref b) => {
                Uuid::from_slice(b).map_err(|_| Error::conversion_failed(value.clone(), "Uuid"))
            }
            _ => Err(Error::conversion_failed(value, "Uuid")),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bytes(v) => Ok(v),
            _ => Err(Error::conversion_failed(value, "Vec<u8>")),
        }
    }
}
