use crate::{Error, Parameter, Result, ReturnShape};

/// One stored procedure invocation, as handed to a [`Connection`](super::Connection).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    /// Procedure name, never empty.
    pub procedure: String,

    /// The result kind the caller expects.
    pub shape: ReturnShape,

    /// Arguments in wire order. `None` when the operation takes no
    /// parameters.
    pub params: Option<Vec<Parameter>>,
}

impl ProcedureCall {
    pub fn new(
        procedure: impl Into<String>,
        shape: ReturnShape,
        params: Option<Vec<Parameter>>,
    ) -> Self {
        Self {
            procedure: procedure.into(),
            shape,
            params,
        }
    }

    /// Arguments, treating absence as an empty list.
    pub fn params(&self) -> &[Parameter] {
        self.params.as_deref().unwrap_or(&[])
    }

    /// The procedure name, checked for safe interpolation into SQL text.
    ///
    /// Accepts optionally schema-qualified identifiers made of ASCII
    /// letters, digits, `_` and `$`, not starting with a digit.
    pub fn checked_procedure(&self) -> Result<&str> {
        let valid = !self.procedure.is_empty() && self.procedure.split('.').all(is_identifier);

        if valid {
            Ok(&self.procedure)
        } else {
            Err(Error::invalid_mapping(format!(
                "procedure name `{}` is not a valid identifier",
                self.procedure
            )))
        }
    }
}

/// Whether `name` is a plain SQL identifier: ASCII letters, digits, `_`
/// and `$`, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
