use crate::driver::{ProcedureCall, Response};
use crate::{async_trait, Driver, Error, Load, Materializer, Parameter, Result, ReturnShape};

use std::sync::Arc;

/// Runs stored procedures, one method per [`ReturnShape`].
///
/// Every method fails with `EmptyProcedureName` when `procedure` is empty.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    /// Every row, loaded as `R`. No rows give an empty `Vec`.
    async fn execute_collection<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Vec<R>>;

    /// The first row loaded as `R`, or `None` when there are no rows.
    async fn execute_single_row<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Option<R>>;

    /// The procedure's single value, or `None` when it is SQL `NULL`.
    async fn execute_scalar<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Option<R>>;

    /// The affected-row or status count.
    ///
    /// What the count means depends on the backend. MySQL reports affected
    /// rows and SQL Server the procedure's `RETURN` value. PostgreSQL reports
    /// the first OUT or INOUT parameter, or 0 for a procedure without one.
    async fn execute_non_query(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<i64>;
}

/// The default executor: one connection per call from a [`Driver`], rows
/// materialized through a shared [`Materializer`].
#[derive(Debug, Clone)]
pub struct ProcExecutor {
    driver: Arc<dyn Driver>,
    materializer: Arc<Materializer>,
}

impl ProcExecutor {
    pub fn new(driver: impl Driver) -> Self {
        Self::from_arc(Arc::new(driver))
    }

    pub fn from_arc(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            materializer: Arc::new(Materializer::new()),
        }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// Performs one remote call on a fresh connection. The connection is
    /// dropped before returning, on success and failure alike.
    async fn call(
        &self,
        procedure: &str,
        shape: ReturnShape,
        params: Option<Vec<Parameter>>,
    ) -> Result<Response> {
        if procedure.is_empty() {
            return Err(Error::empty_procedure_name());
        }

        tracing::debug!(
            procedure,
            %shape,
            params = params.as_ref().map_or(0, Vec::len),
            "calling stored procedure"
        );

        let mut connection = self.driver.connect().await?;
        let response = connection
            .call(ProcedureCall::new(procedure, shape, params))
            .await;
        drop(connection);

        response
    }
}

#[async_trait]
impl Executor for ProcExecutor {
    async fn execute_collection<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Vec<R>> {
        let rows = self
            .call(procedure, ReturnShape::Collection, params)
            .await?
            .into_rows()?;

        rows.into_iter()
            .map(|row| R::load_row(row, &self.materializer))
            .collect()
    }

    async fn execute_single_row<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Option<R>> {
        let rows = self
            .call(procedure, ReturnShape::SingleRow, params)
            .await?
            .into_rows()?;

        rows.into_iter()
            .next()
            .map(|row| R::load_row(row, &self.materializer))
            .transpose()
    }

    async fn execute_scalar<R: Load>(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Option<R>> {
        let value = self
            .call(procedure, ReturnShape::Scalar, params)
            .await?
            .into_scalar()?;

        if value.is_null() {
            return Ok(None);
        }

        R::load_scalar(value).map(Some)
    }

    async fn execute_non_query(
        &self,
        procedure: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<i64> {
        self.call(procedure, ReturnShape::NoResult, params)
            .await?
            .into_count()
    }
}
