use crate::cache::TypeCache;
use crate::{Record, Result, Row, Value};

use std::sync::Arc;

/// Builds records from result rows.
#[derive(Debug, Default)]
pub struct Materializer {
    mappers: TypeCache,
}

/// Compiled row-to-record function for one record type.
pub struct Mapper<T> {
    fields: Vec<(&'static str, fn(&mut T, Value) -> Result<()>)>,
}

impl<T: Record> Mapper<T> {
    /// Default-constructs a `T` and assigns every field from the column of
    /// the same name.
    pub fn map(&self, mut row: Row) -> Result<T> {
        let mut record = T::default();

        for (name, set) in &self.fields {
            let value = row.take(name)?;
            set(&mut record, value).map_err(|err| err.for_field(name))?;
        }

        Ok(record)
    }
}

impl<T> core::fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapper")
            .field("type", &core::any::type_name::<T>())
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn materialize<T: Record>(&self, row: Row) -> Result<T> {
        self.mapper::<T>().map(row)
    }

    /// The cached mapper for `T`, compiling it on first use.
    pub fn mapper<T: Record>(&self) -> Arc<Mapper<T>> {
        self.mappers.get_or_compile(|| {
            let fields = T::fields();

            tracing::trace!(
                ty = core::any::type_name::<T>(),
                fields = fields.len(),
                "compiling row mapper"
            );

            Mapper {
                fields: fields.iter().map(|field| (field.name, field.set)).collect(),
            }
        })
    }

    /// Number of mappers compiled so far.
    pub fn compilations(&self) -> usize {
        self.mappers.compilations()
    }
}
