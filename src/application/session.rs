use crate::application::bridge::MonerisBridge;
use crate::domain::config::DeviceConfig;
use crate::domain::ports::NativeExecutorBox;
use crate::domain::response::{DeviceStatus, PaymentResponse};
use crate::domain::transaction::{
    Amount, PaymentRequest, RefundRequest, TerminalCommand, VoidRequest,
};
use crate::error::{Result, TerminalError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A connection session with one DX8000 terminal.
///
/// Tracks two flags, `initialized` and `connected`, and refuses to reach the
/// native layer when an operation needs a state the session is not in.
///
/// Lifecycle: `initialize` → `connect` → transactions → `disconnect`, after
/// which the session is initialized but not connected and can connect again.
/// Operations take `&mut self`; callers sequence them, the session adds no
/// locking, timeouts or retries of its own.
pub struct TerminalSession {
    bridge: MonerisBridge,
    initialized: bool,
    connected: bool,
}

impl TerminalSession {
    /// Creates a session over the given native executor.
    pub fn new(executor: NativeExecutorBox) -> Self {
        Self::with_bridge(MonerisBridge::new(executor))
    }

    pub fn with_bridge(bridge: MonerisBridge) -> Self {
        Self {
            bridge,
            initialized: false,
            connected: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub async fn initialize(&mut self, config: &DeviceConfig) -> Result<Value> {
        if !self.bridge.is_available() {
            tracing::warn!("Initialize rejected: native plugin unavailable");
            return Err(TerminalError::PluginUnavailable);
        }

        let result = self.bridge.initialize(config).await;
        self.initialized = result.is_ok();
        match &result {
            Ok(_) => tracing::info!(
                device_ip = %config.device_ip,
                port = config.port,
                connection_type = %config.connection_type,
                "Terminal initialized"
            ),
            Err(e) => tracing::warn!(error = %e, "Initialize failed"),
        }
        result
    }

    pub async fn connect(&mut self) -> Result<Value> {
        if !self.initialized {
            tracing::warn!("Connect rejected: session not initialized");
            return Err(TerminalError::NotInitialized);
        }

        let result = self.bridge.connect().await;
        self.connected = result.is_ok();
        match &result {
            Ok(_) => tracing::info!("Terminal connected"),
            Err(e) => tracing::warn!(error = %e, "Connect failed"),
        }
        result
    }

    pub async fn disconnect(&mut self) -> Result<Value> {
        let result = self.bridge.disconnect().await;
        match &result {
            Ok(_) => {
                self.connected = false;
                tracing::info!("Terminal disconnected");
            }
            Err(e) => tracing::warn!(error = %e, "Disconnect failed"),
        }
        result
    }

    pub async fn process_payment(&mut self, request: &PaymentRequest) -> Result<PaymentResponse> {
        let value = self.payment_payload(request).await?;
        decode("processPayment", value)
    }

    // The raw native payload, checked for the fields a payment result must carry.
    async fn payment_payload(&mut self, request: &PaymentRequest) -> Result<Value> {
        self.ensure_connected("processPayment")?;
        let value = self.bridge.process_payment(request).await?;
        decode::<PaymentResponse>("processPayment", value.clone())?;
        Ok(value)
    }

    pub async fn process_refund(
        &mut self,
        amount: Amount,
        transaction_id: impl Into<String>,
    ) -> Result<Value> {
        self.ensure_connected("processRefund")?;
        let request = RefundRequest::new(amount, transaction_id);
        self.bridge.process_refund(&request).await
    }

    pub async fn void_transaction(&mut self, transaction_id: impl Into<String>) -> Result<Value> {
        self.ensure_connected("voidTransaction")?;
        let request = VoidRequest::new(transaction_id);
        self.bridge.void_transaction(&request).await
    }

    /// Asks the terminal for its current status. Nothing is cached.
    pub async fn get_device_status(&mut self) -> Result<DeviceStatus> {
        let value = self.bridge.get_device_status().await?;
        decode("getDeviceStatus", value)
    }

    pub async fn cancel_transaction(&mut self) -> Result<Value> {
        self.bridge.cancel_transaction().await
    }

    pub async fn get_last_transaction(&mut self) -> Result<Value> {
        self.bridge.get_last_transaction().await
    }

    pub async fn print_receipt(&mut self, receipt: &Map<String, Value>) -> Result<Value> {
        self.bridge.print_receipt(receipt).await
    }

    /// Runs a batch command and returns the native payload as JSON.
    pub async fn run_command(&mut self, command: &TerminalCommand) -> Result<Value> {
        match command {
            TerminalCommand::Payment(request) => self.payment_payload(request).await,
            TerminalCommand::Refund(request) => {
                self.process_refund(request.amount, request.transaction_id.clone())
                    .await
            }
            TerminalCommand::Void(request) => {
                self.void_transaction(request.transaction_id.clone()).await
            }
        }
    }

    fn ensure_connected(&self, operation: &'static str) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            tracing::warn!(operation, "Rejected: device not connected");
            Err(TerminalError::NotConnected)
        }
    }
}

fn decode<T: DeserializeOwned>(method: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|source| TerminalError::MalformedResponse { method, source })
}
