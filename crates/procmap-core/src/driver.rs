mod call;
pub use call::{is_identifier, ProcedureCall};

mod response;
pub use response::Response;

use crate::{async_trait, Result};

use std::fmt::Debug;

/// A database backend able to invoke stored procedures.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Opens a connection used for exactly one invocation.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Invokes one stored procedure and returns its raw result.
    ///
    /// Row shapes must answer with [`Response::Rows`], `Scalar` with
    /// [`Response::Scalar`] and `NoResult` with [`Response::Count`].
    async fn call(&mut self, call: ProcedureCall) -> Result<Response>;
}
