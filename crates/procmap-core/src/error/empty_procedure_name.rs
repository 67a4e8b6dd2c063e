use super::Error;

#[derive(Debug)]
pub(super) struct EmptyProcedureNameError;

impl std::error::Error for EmptyProcedureNameError {}

impl core::fmt::Display for EmptyProcedureNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("procedure name cannot be empty")
    }
}

impl Error {
    pub fn empty_procedure_name() -> Error {
        Error::from(super::ErrorKind::EmptyProcedureName(EmptyProcedureNameError))
    }

    pub fn is_empty_procedure_name(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::EmptyProcedureName(_))
    }
}
