use super::{Error, ErrorKind};
use crate::Value;

/// Error when a value cannot be converted to the expected type.
#[derive(Debug)]
pub(super) struct ConversionFailedError {
    field: Option<Box<str>>,
    value: Value,
    to_type: &'static str,
}

impl std::error::Error for ConversionFailedError {}

impl core::fmt::Display for ConversionFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {:?} to {}", self.value, self.to_type)?;
        if let Some(field) = &self.field {
            write!(f, " for field `{field}`")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a conversion error for `value`, which could not become a `to_type`.
    pub fn conversion_failed(value: Value, to_type: &'static str) -> Error {
        Error::from(ErrorKind::ConversionFailed(ConversionFailedError {
            field: None,
            value,
            to_type,
        }))
    }

    /// Attaches the name of the record field being assigned to a conversion
    /// error. Any other error is returned unchanged.
    pub fn for_field(self, field: &str) -> Error {
        let ErrorKind::ConversionFailed(err) = self.kind() else {
            return self;
        };

        let cause = self.inner.as_ref().and_then(|inner| inner.cause.clone());
        let mut err = Error::from(ErrorKind::ConversionFailed(ConversionFailedError {
            field: Some(field.into()),
            value: err.value.clone(),
            to_type: err.to_type,
        }));

        if let Some(cause) = cause {
            err = cause.context(err);
        }

        err
    }

    /// Returns `true` if this error is a conversion error.
    pub fn is_conversion_failed(&self) -> bool {
        matches!(self.kind(), ErrorKind::ConversionFailed(_))
    }
}
