use super::Error;

/// Error when a mapping builder is asked to produce its table a second time.
#[derive(Debug)]
pub(super) struct AlreadyConstructedError;

impl std::error::Error for AlreadyConstructedError {}

impl core::fmt::Display for AlreadyConstructedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("mapping table already constructed")
    }
}

impl Error {
    /// Creates an error for a mapping builder that was already consumed.
    pub fn already_constructed() -> Error {
        Error::from(super::ErrorKind::AlreadyConstructed(AlreadyConstructedError))
    }

    /// Returns `true` if this error is an already-constructed error.
    pub fn is_already_constructed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AlreadyConstructed(_))
    }
}
