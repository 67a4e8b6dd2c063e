use super::Error;

/// Error when an operation name is registered twice.
#[derive(Debug)]
pub(super) struct DuplicateRegistrationError {
    operation: Box<str>,
}

impl std::error::Error for DuplicateRegistrationError {}

impl core::fmt::Display for DuplicateRegistrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "operation `{}` is already registered", self.operation)
    }
}

impl Error {
    /// Creates a duplicate-registration error.
    pub fn duplicate_registration(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateRegistration(
            DuplicateRegistrationError {
                operation: operation.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a duplicate-registration error.
    pub fn is_duplicate_registration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateRegistration(_))
    }
}
