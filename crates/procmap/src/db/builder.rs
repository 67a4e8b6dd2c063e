use super::{connect, Db};
use crate::{Driver, Error, MapSource, MappingTable, ProcExecutor, Result};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Mapping table, merged from every registered source
    table: Option<MappingTable>,
}

impl Builder {
    /// Adds a mapping table. Tables added later only contribute operations
    /// that earlier tables do not define.
    pub fn table(&mut self, table: MappingTable) -> &mut Self {
        self.table = Some(match self.table.take() {
            Some(existing) => existing.merge(&table),
            None => table,
        });
        self
    }

    /// Builds a mapping table from `source` and adds it.
    pub fn source(&mut self, mut source: impl MapSource) -> Result<&mut Self> {
        let table = source.build()?;
        Ok(self.table(table))
    }

    /// Connects through the driver selected by the URL scheme.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = connect::driver_for_url(url).await?;
        self.build_with(driver)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_with(Arc::new(driver))
    }

    fn build_with(&mut self, driver: Arc<dyn Driver>) -> Result<Db> {
        let table = self
            .table
            .take()
            .ok_or_else(|| Error::invalid_mapping("no mapping table configured"))?;

        tracing::debug!(operations = table.len(), ?driver, "building database handle");

        Ok(Db::new(table, ProcExecutor::from_arc(driver)))
    }
}
