use super::Error;

/// Error when an operation with a primitive input is registered without the
/// wire name of its lone parameter.
#[derive(Debug)]
pub(super) struct MissingPrimitiveParameterNameError {
    operation: Box<str>,
}

impl std::error::Error for MissingPrimitiveParameterNameError {}

impl core::fmt::Display for MissingPrimitiveParameterNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "operation `{}` takes a primitive input but no parameter name was given",
            self.operation
        )
    }
}

impl Error {
    pub fn missing_primitive_parameter_name(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimitiveParameterName(
            MissingPrimitiveParameterNameError {
                operation: operation.into().into(),
            },
        ))
    }

    pub fn is_missing_primitive_parameter_name(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::MissingPrimitiveParameterName(_)
        )
    }
}
