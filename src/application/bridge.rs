use crate::domain::config::DeviceConfig;
use crate::domain::ports::{NativeExecutorBox, NativeMethod, PLUGIN_NAME};
use crate::domain::transaction::{PaymentRequest, RefundRequest, VoidRequest};
use crate::error::{Result, TerminalError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Maps each DX8000 operation onto one native call.
///
/// The bridge does not validate, retry or reshape anything: arguments go out
/// as a single JSON object (or no arguments at all) and the native payload
/// or error comes back untouched.
pub struct MonerisBridge {
    executor: Option<NativeExecutorBox>,
}

impl MonerisBridge {
    pub fn new(executor: NativeExecutorBox) -> Self {
        Self {
            executor: Some(executor),
        }
    }

    /// A bridge with no native layer behind it. Every call fails with
    /// `PluginUnavailable`.
    pub fn detached() -> Self {
        Self { executor: None }
    }

    pub fn is_available(&self) -> bool {
        self.executor.is_some()
    }

    pub async fn initialize(&self, config: &DeviceConfig) -> Result<Value> {
        self.call_with(NativeMethod::Initialize, config).await
    }

    pub async fn connect(&self) -> Result<Value> {
        self.call(NativeMethod::Connect, Vec::new()).await
    }

    pub async fn disconnect(&self) -> Result<Value> {
        self.call(NativeMethod::Disconnect, Vec::new()).await
    }

    pub async fn process_payment(&self, request: &PaymentRequest) -> Result<Value> {
        self.call_with(NativeMethod::ProcessPayment, request).await
    }

    pub async fn process_refund(&self, request: &RefundRequest) -> Result<Value> {
        self.call_with(NativeMethod::ProcessRefund, request).await
    }

    pub async fn void_transaction(&self, request: &VoidRequest) -> Result<Value> {
        self.call_with(NativeMethod::VoidTransaction, request).await
    }

    pub async fn get_device_status(&self) -> Result<Value> {
        self.call(NativeMethod::GetDeviceStatus, Vec::new()).await
    }

    pub async fn cancel_transaction(&self) -> Result<Value> {
        self.call(NativeMethod::CancelTransaction, Vec::new()).await
    }

    pub async fn get_last_transaction(&self) -> Result<Value> {
        self.call(NativeMethod::GetLastTransaction, Vec::new()).await
    }

    pub async fn print_receipt(&self, receipt: &Map<String, Value>) -> Result<Value> {
        self.call_with(NativeMethod::PrintReceipt, receipt).await
    }

    async fn call_with<T: Serialize>(&self, method: NativeMethod, payload: &T) -> Result<Value> {
        let arg = serde_json::to_value(payload)?;
        self.call(method, vec![arg]).await
    }

    async fn call(&self, method: NativeMethod, args: Vec<Value>) -> Result<Value> {
        let executor = self
            .executor
            .as_ref()
            .ok_or(TerminalError::PluginUnavailable)?;

        tracing::debug!(plugin = PLUGIN_NAME, %method, "Executing action");
        executor
            .execute(PLUGIN_NAME, method.as_str(), args)
            .await
            .map_err(TerminalError::Native)
    }
}
