//! Synchronous access for callers outside an async runtime.
//!
//! Each [`Db`] owns a current-thread Tokio runtime and blocks on it for every
//! call. Do not use it from within an async context.

use crate::{
    Driver, Executor, Load, MappingTable, Outcome, Param, Parameter, ProcExecutor, Result, Value,
};

use tokio::runtime::{self, Runtime};

pub struct Db<E: Executor = ProcExecutor> {
    inner: crate::Db<E>,
    runtime: Runtime,
}

impl Db {
    /// Builds a handle over `driver`.
    pub fn new(table: MappingTable, driver: impl Driver) -> Result<Self> {
        Self::from_async(crate::Db::new(table, ProcExecutor::new(driver)))
    }

    /// Connects through the driver selected by the URL scheme.
    pub fn connect(table: MappingTable, url: &str) -> Result<Self> {
        let runtime = new_runtime()?;
        let inner = runtime.block_on(crate::Db::builder().table(table).connect(url))?;
        Ok(Self { inner, runtime })
    }
}

impl<E: Executor> Db<E> {
    /// Wraps an async handle.
    pub fn from_async(inner: crate::Db<E>) -> Result<Self> {
        Ok(Self {
            inner,
            runtime: new_runtime()?,
        })
    }

    /// The async handle; clones share caches with this one.
    pub fn as_async(&self) -> &crate::Db<E> {
        &self.inner
    }

    pub fn operate<R: Load>(
        &self,
        operation: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Outcome<R>> {
        self.runtime.block_on(self.inner.operate(operation, params))
    }

    pub fn exec<R: Load>(&self, operation: &str) -> Result<Outcome<R>> {
        self.runtime.block_on(self.inner.exec(operation))
    }

    pub fn exec_params<R, K, V>(
        &self,
        operation: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Outcome<R>>
    where
        R: Load,
        K: Into<String>,
        V: Into<Value>,
    {
        self.runtime.block_on(self.inner.exec_params(operation, params))
    }

    pub fn exec_with<P: Param, R: Load>(&self, operation: &str, input: &P) -> Result<Outcome<R>> {
        self.runtime.block_on(self.inner.exec_with(operation, input))
    }

    pub fn exec_with_pair<P1: Param, P2: Param, R: Load>(
        &self,
        operation: &str,
        first: &P1,
        second: &P2,
    ) -> Result<Outcome<R>> {
        self.runtime
            .block_on(self.inner.exec_with_pair(operation, first, second))
    }
}

impl<E: Executor + core::fmt::Debug> core::fmt::Debug for Db<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Db").field("inner", &self.inner).finish()
    }
}

fn new_runtime() -> Result<Runtime> {
    Ok(runtime::Builder::new_current_thread().enable_all().build()?)
}
