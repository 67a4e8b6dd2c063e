use crate::CallLog;

use procmap_core::{
    async_trait,
    driver::{Connection, Driver, ProcedureCall, Response},
    Error, Result, ReturnShape, Value,
};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// In-memory driver answering each procedure with a scripted response.
///
/// Clones share their script, call log and connection counters, so a test
/// can hand one clone to the database handle and inspect another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriver {
    state: Arc<State>,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    responses: Mutex<HashMap<String, Result<Response>>>,
    refusal: Mutex<Option<Error>>,
    pub(crate) calls: Mutex<Vec<ProcedureCall>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every call to `procedure` with `response`.
    pub fn respond(&self, procedure: &str, response: Response) -> &Self {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(procedure.to_string(), Ok(response));
        self
    }

    /// Fails every call to `procedure` with `error`.
    pub fn fail(&self, procedure: &str, error: Error) -> &Self {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(procedure.to_string(), Err(error));
        self
    }

    /// Fails every subsequent connection attempt.
    pub fn refuse_connections(&self, error: Error) -> &Self {
        *self.state.refusal.lock().unwrap() = Some(error);
        self
    }

    pub fn log(&self) -> CallLog {
        CallLog::new(self.state.clone())
    }

    /// Connections opened so far.
    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    /// Connections dropped so far.
    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        if let Some(error) = self.state.refusal.lock().unwrap().clone() {
            return Err(error);
        }

        self.state.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(ScriptedConnection {
            state: self.state.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct ScriptedConnection {
    state: Arc<State>,
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn call(&mut self, call: ProcedureCall) -> Result<Response> {
        let scripted = self
            .state
            .responses
            .lock()
            .unwrap()
            .get(&call.procedure)
            .cloned();

        // Unscripted procedures answer with the empty result of their shape
        let response = scripted.unwrap_or_else(|| {
            Ok(match call.shape {
                ReturnShape::Collection | ReturnShape::SingleRow => Response::Rows(vec![]),
                ReturnShape::Scalar => Response::Scalar(Value::Null),
                ReturnShape::NoResult => Response::Count(0),
            })
        });

        self.state.calls.lock().unwrap().push(call);

        response
    }
}

impl Drop for ScriptedConnection {
    fn drop(&mut self) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}
