use crate::{Error, MappingTable, OperationDescriptor, Result, ReturnShape, Translation};

/// One operation as read from a mapping file. The shape name is only
/// checked when the table is built.
#[derive(Debug, Clone)]
pub(super) struct OperationEntry {
    pub(super) name: String,
    pub(super) procedure: String,
    pub(super) shape: String,
    pub(super) parameters: Option<Translation>,
}

impl OperationEntry {
    fn into_descriptor(self) -> Result<OperationDescriptor> {
        let shape = self
            .shape
            .parse::<ReturnShape>()
            .map_err(|err| err.context(format!("operation `{}`", self.name)))?;

        Ok(OperationDescriptor {
            name: self.name,
            procedure: self.procedure,
            shape,
            parameters: self.parameters,
        })
    }
}

/// Parsed entries of a file-backed source, turned into a table once.
#[derive(Debug, Default)]
pub(super) struct Entries {
    operations: Vec<OperationEntry>,

    /// Set once `build` has handed out the table.
    constructed: bool,
}

impl Entries {
    pub(super) fn new(operations: Vec<OperationEntry>) -> Self {
        Self {
            operations,
            constructed: false,
        }
    }

    pub(super) fn build(&mut self) -> Result<MappingTable> {
        if self.constructed {
            return Err(Error::already_constructed());
        }

        // Nothing is consumed until every entry converts and registers, so a
        // failed build can be retried and fails the same way.
        let operations = self
            .operations
            .iter()
            .cloned()
            .map(OperationEntry::into_descriptor)
            .collect::<Result<Vec<_>>>()?;
        let table = MappingTable::try_from(operations)?;

        self.operations.clear();
        self.constructed = true;
        Ok(table)
    }
}
