use super::Error;

/// Error when an operation name is not present in the mapping table.
#[derive(Debug)]
pub(super) struct UnknownOperationError {
    operation: Box<str>,
}

impl std::error::Error for UnknownOperationError {}

impl core::fmt::Display for UnknownOperationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown operation `{}`", self.operation)
    }
}

impl Error {
    /// Creates an unknown-operation error.
    pub fn unknown_operation(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownOperation(UnknownOperationError {
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown-operation error.
    pub fn is_unknown_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownOperation(_))
    }
}
