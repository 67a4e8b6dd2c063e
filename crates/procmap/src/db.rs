mod builder;
pub use builder::Builder;

mod connect;

use crate::{
    Error, Executor, Load, MappingTable, OperationDescriptor, Outcome, Param, Parameter,
    ProcExecutor, Projector, Result, ReturnShape, Value,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
struct Shared<E> {
    table: MappingTable,
    projector: Projector,
    executor: E,
}

/// Dispatches named operations to stored procedures.
///
/// Cloning is cheap; clones share the mapping table, the compiled accessor
/// caches and the executor.
#[derive(Debug)]
pub struct Db<E: Executor = ProcExecutor> {
    shared: Arc<Shared<E>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<E: Executor> Clone for Db<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: Executor> Db<E> {
    /// Creates a dispatcher over an arbitrary executor.
    pub fn new(table: MappingTable, executor: E) -> Self {
        Self {
            shared: Arc::new(Shared {
                table,
                projector: Projector::new(),
                executor,
            }),
        }
    }

    pub fn table(&self) -> &MappingTable {
        &self.shared.table
    }

    pub fn projector(&self) -> &Projector {
        &self.shared.projector
    }

    pub fn executor(&self) -> &E {
        &self.shared.executor
    }

    /// Runs `operation` with caller-supplied parameters keyed by logical
    /// name. Every key is translated to its wire name; `None` is passed
    /// through as "no parameters".
    pub async fn operate<R: Load>(
        &self,
        operation: &str,
        params: Option<Vec<Parameter>>,
    ) -> Result<Outcome<R>> {
        let op = self.shared.table.lookup(operation)?;

        let params = params
            .map(|params| {
                params
                    .into_iter()
                    .map(|param| translate(op, param))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        self.dispatch(op, params).await
    }

    /// Runs a parameterless operation.
    pub async fn exec<R: Load>(&self, operation: &str) -> Result<Outcome<R>> {
        self.operate(operation, None).await
    }

    /// Runs `operation` with `(logical name, value)` pairs.
    pub async fn exec_params<R, K, V>(
        &self,
        operation: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Outcome<R>>
    where
        R: Load,
        K: Into<String>,
        V: Into<Value>,
    {
        let params = params.into_iter().map(Parameter::from).collect();
        self.operate(operation, Some(params)).await
    }

    /// Runs `operation` with a record or primitive input, projected through
    /// the operation's translation.
    pub async fn exec_with<P: Param, R: Load>(
        &self,
        operation: &str,
        input: &P,
    ) -> Result<Outcome<R>> {
        let op = self.shared.table.lookup(operation)?;
        let params = self.project(op, input);

        self.dispatch(op, Some(params)).await
    }

    /// Like [`exec_with`](Self::exec_with) for two inputs; their projections
    /// are concatenated, first input first.
    pub async fn exec_with_pair<P1: Param, P2: Param, R: Load>(
        &self,
        operation: &str,
        first: &P1,
        second: &P2,
    ) -> Result<Outcome<R>> {
        let op = self.shared.table.lookup(operation)?;

        let mut params = self.project(op, first);
        params.extend(self.project(op, second));

        self.dispatch(op, Some(params)).await
    }

    fn project<P: Param>(&self, op: &OperationDescriptor, input: &P) -> Vec<Parameter> {
        let mut params = self
            .shared
            .projector
            .project(input, op.parameters.as_ref());

        // A lone primitive takes the wire name registered for it, if any
        if let Some(wire) = op.primitive_param() {
            for param in params.iter_mut().filter(|param| param.is_primitive()) {
                param.name = wire.to_string();
            }
        }

        params
    }

    async fn dispatch<R: Load>(
        &self,
        op: &OperationDescriptor,
        params: Option<Vec<Parameter>>,
    ) -> Result<Outcome<R>> {
        tracing::debug!(
            operation = %op.name,
            procedure = %op.procedure,
            shape = %op.shape,
            "dispatching operation"
        );

        let executor = &self.shared.executor;
        let procedure = op.procedure.as_str();

        Ok(match op.shape {
            ReturnShape::Collection => {
                Outcome::Collection(executor.execute_collection(procedure, params).await?)
            }
            ReturnShape::SingleRow => {
                Outcome::SingleRow(executor.execute_single_row(procedure, params).await?)
            }
            ReturnShape::Scalar => {
                Outcome::Scalar(executor.execute_scalar(procedure, params).await?)
            }
            ReturnShape::NoResult => {
                Outcome::NoResult(executor.execute_non_query(procedure, params).await?)
            }
        })
    }
}

fn translate(op: &OperationDescriptor, param: Parameter) -> Result<Parameter> {
    let wire = op
        .translate(&param.name)
        .ok_or_else(|| Error::key_not_mapped(op.name.as_str(), param.name.as_str()))?;

    Ok(Parameter {
        name: wire.to_string(),
        value: param.value,
    })
}
