use crate::scripted_driver::State;

use procmap_core::{driver::ProcedureCall, Parameter};
use std::sync::Arc;

/// A view over the calls a [`ScriptedDriver`](crate::ScriptedDriver) received.
pub struct CallLog {
    state: Arc<State>,
}

impl CallLog {
    pub(crate) fn new(state: Arc<State>) -> Self {
        Self { state }
    }

    /// Get the number of logged calls
    pub fn len(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.calls.lock().unwrap().is_empty()
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Procedure names in call order
    pub fn procedures(&self) -> Vec<String> {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.procedure.clone())
            .collect()
    }

    /// The most recent call, panicking if there was none
    #[track_caller]
    pub fn last(&self) -> ProcedureCall {
        self.state
            .calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no procedure was called")
    }

    /// Parameters of the most recent call
    #[track_caller]
    pub fn last_params(&self) -> Option<Vec<Parameter>> {
        self.last().params
    }
}
