use super::{MappingTable, OperationDescriptor};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Collects descriptors and produces a [`MappingTable`] exactly once.
#[derive(Debug, Default)]
pub struct Builder {
    operations: IndexMap<String, Arc<OperationDescriptor>>,

    /// Set once `build` has handed out the table.
    constructed: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor.
    ///
    /// Fails if the name is empty, already registered, or if the table has
    /// already been built.
    pub fn insert(&mut self, op: OperationDescriptor) -> Result<&mut Self> {
        if self.constructed {
            return Err(Error::already_constructed());
        }

        if op.name.is_empty() {
            return Err(Error::invalid_mapping("operation name cannot be empty"));
        }

        if self.operations.contains_key(&op.name) {
            return Err(Error::duplicate_registration(op.name));
        }

        self.operations.insert(op.name.clone(), Arc::new(op));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Produces the table. A second call fails with `AlreadyConstructed`.
    pub fn build(&mut self) -> Result<MappingTable> {
        if self.constructed {
            return Err(Error::already_constructed());
        }

        self.constructed = true;
        Ok(MappingTable::from_operations(std::mem::take(
            &mut self.operations,
        )))
    }
}
