use crate::{Error, Result, Row, Value};

/// Raw result of a procedure call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Result set rows, in backend order
    Rows(Vec<Row>),

    /// A single value; `Null` when the procedure produced none
    Scalar(Value),

    /// Affected-row or status count
    Count(i64),
}

impl Response {
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Scalar(_) => "a scalar",
            Self::Count(_) => "a count",
        }
    }

    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            other => Err(Error::invalid_result(format!(
                "expected rows, got {}",
                other.kind()
            ))),
        }
    }

    pub fn into_scalar(self) -> Result<Value> {
        match self {
            Self::Scalar(value) => Ok(value),
            other => Err(Error::invalid_result(format!(
                "expected a scalar, got {}",
                other.kind()
            ))),
        }
    }

    pub fn into_count(self) -> Result<i64> {
        match self {
            Self::Count(count) => Ok(count),
            other => Err(Error::invalid_result(format!(
                "expected a count, got {}",
                other.kind()
            ))),
        }
    }
}
