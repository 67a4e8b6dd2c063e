use super::{Builder, OperationDescriptor};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Immutable lookup table from operation name to its descriptor.
///
/// Descriptors are reference counted so merged tables share them instead of
/// copying.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    operations: IndexMap<String, Arc<OperationDescriptor>>,
}

impl MappingTable {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(super) fn from_operations(operations: IndexMap<String, Arc<OperationDescriptor>>) -> Self {
        Self { operations }
    }

    /// Returns the descriptor registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&OperationDescriptor> {
        self.get(name)
            .map(|op| &**op)
            .ok_or_else(|| Error::unknown_operation(name))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<OperationDescriptor>> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Left-biased union: every entry of `self`, plus the entries of `other`
    /// whose names `self` does not already hold. Neither input is modified.
    pub fn merge(&self, other: &MappingTable) -> MappingTable {
        let mut operations = self.operations.clone();

        for (name, op) in &other.operations {
            if operations.contains_key(name) {
                tracing::warn!(
                    operation = %name,
                    procedure = %op.procedure,
                    "duplicate operation dropped while merging mapping tables"
                );
                continue;
            }

            operations.insert(name.clone(), op.clone());
        }

        MappingTable { operations }
    }

    /// Like [`merge`](Self::merge), but fails on the first name present in
    /// both tables.
    pub fn try_merge(&self, other: &MappingTable) -> Result<MappingTable> {
        let mut operations = self.operations.clone();

        for (name, op) in &other.operations {
            if operations.contains_key(name) {
                return Err(Error::duplicate_registration(name.as_str()));
            }

            operations.insert(name.clone(), op.clone());
        }

        Ok(MappingTable { operations })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values().map(|op| &**op)
    }
}

impl TryFrom<Vec<OperationDescriptor>> for MappingTable {
    type Error = Error;

    /// Registers each descriptor in order, failing on a repeated name.
    fn try_from(operations: Vec<OperationDescriptor>) -> Result<Self> {
        let mut builder = Builder::new();

        for op in operations {
            builder.insert(op)?;
        }

        builder.build()
    }
}
