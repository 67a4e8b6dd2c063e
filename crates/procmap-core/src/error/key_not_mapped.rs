use super::Error;

/// Error when a caller-supplied parameter key has no entry in the operation's
/// parameter translation.
#[derive(Debug)]
pub(super) struct KeyNotMappedError {
    operation: Box<str>,
    key: Box<str>,
}

impl std::error::Error for KeyNotMappedError {}

impl core::fmt::Display for KeyNotMappedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "parameter `{}` has no translation for operation `{}`",
            self.key, self.operation
        )
    }
}

impl Error {
    /// Creates a key-not-mapped error.
    pub fn key_not_mapped(operation: impl Into<String>, key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::KeyNotMapped(KeyNotMappedError {
            operation: operation.into().into(),
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is a key-not-mapped error.
    pub fn is_key_not_mapped(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::KeyNotMapped(_))
    }
}
