#![allow(dead_code)]

use async_trait::async_trait;
use moneris_dx8000::domain::ports::NativeExecutor;
use moneris_dx8000::error::NativeError;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub plugin: String,
    pub method: String,
    pub args: Vec<Value>,
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    responses: HashMap<String, Result<Value, NativeError>>,
}

/// Native executor double: records every call and answers from a script.
/// Unscripted methods succeed with `{"success": true}`.
#[derive(Default, Clone)]
pub struct RecordingExecutor {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, response: Result<Value, NativeError>) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.insert(method.to_string(), response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }
}

#[async_trait]
impl NativeExecutor for RecordingExecutor {
    async fn execute(
        &self,
        plugin: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, NativeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            plugin: plugin.to_string(),
            method: method.to_string(),
            args,
        });
        inner
            .responses
            .get(method)
            .cloned()
            .unwrap_or_else(|| Ok(json!({"success": true})))
    }
}
