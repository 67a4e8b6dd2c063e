use crate::{Error, Result, ReturnShape};

/// Result of a dispatched operation, one variant per [`ReturnShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R> {
    Collection(Vec<R>),
    SingleRow(Option<R>),
    Scalar(Option<R>),
    NoResult(i64),
}

impl<R> Outcome<R> {
    pub fn shape(&self) -> ReturnShape {
        match self {
            Self::Collection(_) => ReturnShape::Collection,
            Self::SingleRow(_) => ReturnShape::SingleRow,
            Self::Scalar(_) => ReturnShape::Scalar,
            Self::NoResult(_) => ReturnShape::NoResult,
        }
    }

    pub fn into_collection(self) -> Result<Vec<R>> {
        match self {
            Self::Collection(records) => Ok(records),
            other => Err(other.mismatch(ReturnShape::Collection)),
        }
    }

    pub fn into_row(self) -> Result<Option<R>> {
        match self {
            Self::SingleRow(record) => Ok(record),
            other => Err(other.mismatch(ReturnShape::SingleRow)),
        }
    }

    pub fn into_scalar(self) -> Result<Option<R>> {
        match self {
            Self::Scalar(value) => Ok(value),
            other => Err(other.mismatch(ReturnShape::Scalar)),
        }
    }

    pub fn into_count(self) -> Result<i64> {
        match self {
            Self::NoResult(count) => Ok(count),
            other => Err(other.mismatch(ReturnShape::NoResult)),
        }
    }

    fn mismatch(&self, expected: ReturnShape) -> Error {
        Error::invalid_result(format!(
            "expected a {expected} outcome, operation returned {}",
            self.shape()
        ))
    }
}
