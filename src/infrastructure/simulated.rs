use crate::domain::config::{DEFAULT_DEVICE_IP, DEFAULT_PORT};
use crate::domain::ports::{NativeExecutor, NativeMethod, PLUGIN_NAME};
use crate::error::NativeError;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

pub const DEVICE_NAME: &str = "Moneris DX8000";
const FIRST_TRANSACTION_ID: u64 = 123_456_789;

type NativeResult = Result<Value, NativeError>;

/// An in-process stand-in for the DX8000 native plugin.
///
/// Answers every plugin method with the same payloads, defaults and error
/// messages a real device integration produces, without touching hardware.
/// Payments are always approved. State sits behind `Arc<Mutex<_>>` so clones
/// share one terminal, which lets tests keep a handle while a session owns
/// another.
#[derive(Default, Clone)]
pub struct SimulatedTerminal {
    state: Arc<Mutex<TerminalState>>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct TerminalState {
    device_ip: String,
    port: i64,
    connection_type: String,
    initialized: bool,
    connected: bool,
    issued: u64,
    last_transaction: Option<Value>,
    fail_next: HashMap<NativeMethod, NativeError>,
}

impl SimulatedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every payment by `latency`, like a customer working the PIN pad.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes the next call to `method` fail with `error`.
    pub async fn fail_next(&self, method: NativeMethod, error: NativeError) {
        self.state.lock().await.fail_next.insert(method, error);
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connected
    }
}

#[async_trait]
impl NativeExecutor for SimulatedTerminal {
    async fn execute(&self, plugin: &str, method: &str, args: Vec<Value>) -> NativeResult {
        if plugin != PLUGIN_NAME {
            return Err(NativeError::message(format!("Unknown plugin: {plugin}")));
        }
        let Some(method) = NativeMethod::from_name(method) else {
            tracing::warn!(method, "Simulated terminal received unknown action");
            return Err(NativeError::message(format!("Invalid action: {method}")));
        };
        tracing::debug!(%method, "Simulated terminal executing action");

        {
            let mut state = self.state.lock().await;
            if let Some(error) = state.fail_next.remove(&method) {
                return Err(error);
            }
            if method == NativeMethod::ProcessPayment && !state.connected {
                return Err(not_connected());
            }
        }

        if method == NativeMethod::ProcessPayment && !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.lock().await;
        let arg = args.first().and_then(Value::as_object);
        match method {
            NativeMethod::Initialize => state.initialize(arg),
            NativeMethod::Connect => state.connect(),
            NativeMethod::Disconnect => state.disconnect(),
            NativeMethod::ProcessPayment => state.process_payment(arg),
            NativeMethod::ProcessRefund => state.process_refund(arg),
            NativeMethod::VoidTransaction => state.void_transaction(arg),
            NativeMethod::GetDeviceStatus => Ok(state.status()),
            NativeMethod::CancelTransaction => Ok(json!({
                "success": true,
                "message": "Transaction cancelled",
            })),
            NativeMethod::GetLastTransaction => Ok(state.last_transaction()),
            NativeMethod::PrintReceipt => Ok(json!({
                "success": true,
                "message": "Receipt printed successfully",
            })),
        }
    }
}

impl TerminalState {
    fn initialize(&mut self, config: Option<&Map<String, Value>>) -> NativeResult {
        let config = config.ok_or_else(|| {
            NativeError::message("Initialization failed: missing configuration object")
        })?;

        self.device_ip =
            string_field(config, "device_ip").unwrap_or_else(|| DEFAULT_DEVICE_IP.into());
        self.port = string_field(config, "port")
            .and_then(|port| port.parse().ok())
            .unwrap_or(i64::from(DEFAULT_PORT));
        self.connection_type =
            string_field(config, "connection_type").unwrap_or_else(|| "network".into());
        self.initialized = true;

        tracing::info!(
            device_ip = %self.device_ip,
            port = self.port,
            connection_type = %self.connection_type,
            "Simulated terminal initialized"
        );
        Ok(json!({
            "success": true,
            "message": "Moneris DX8000 initialized successfully",
            "device_ip": self.device_ip,
            "port": self.port,
            "connection_type": self.connection_type,
        }))
    }

    fn connect(&mut self) -> NativeResult {
        if !self.initialized {
            return Err(NativeError::message(
                "Plugin not initialized. Call initialize() first.",
            ));
        }
        self.connected = true;
        Ok(json!({
            "success": true,
            "message": "Connected to DX8000 device",
            "device_ip": self.device_ip,
            "port": self.port,
        }))
    }

    fn disconnect(&mut self) -> NativeResult {
        self.connected = false;
        Ok(json!({
            "success": true,
            "message": "Disconnected from DX8000 device",
        }))
    }

    fn process_payment(&mut self, data: Option<&Map<String, Value>>) -> NativeResult {
        if !self.connected {
            return Err(not_connected());
        }
        let data =
            data.ok_or_else(|| NativeError::message("Payment failed: missing payment data"))?;
        let amount = string_field(data, "amount")
            .ok_or_else(|| NativeError::message("Payment failed: missing 'amount'"))?;
        let order_id =
            string_field(data, "order_id").unwrap_or_else(|| format!("ORD{}", now_millis()));
        let currency = string_field(data, "currency").unwrap_or_else(|| "CAD".into());
        let transaction_type =
            string_field(data, "transaction_type").unwrap_or_else(|| "purchase".into());

        let transaction_id = (FIRST_TRANSACTION_ID + self.issued).to_string();
        self.issued += 1;

        tracing::info!(
            %transaction_id,
            %amount,
            %order_id,
            %currency,
            %transaction_type,
            "Simulated payment approved"
        );
        let response = json!({
            "success": true,
            "response_code": "00",
            "message": "APPROVED",
            "transaction_id": transaction_id,
            "amount": amount,
            "timestamp": now_millis(),
        });
        self.last_transaction = Some(response.clone());
        Ok(response)
    }

    fn process_refund(&mut self, data: Option<&Map<String, Value>>) -> NativeResult {
        if !self.connected {
            return Err(not_connected());
        }
        let data =
            data.ok_or_else(|| NativeError::message("Refund failed: missing refund data"))?;
        let amount = string_field(data, "amount")
            .ok_or_else(|| NativeError::message("Refund failed: missing 'amount'"))?;
        let transaction_id = string_field(data, "transaction_id")
            .ok_or_else(|| NativeError::message("Refund failed: missing 'transaction_id'"))?;

        Ok(json!({
            "success": true,
            "message": "Refund processed successfully",
            "transaction_id": transaction_id,
            "amount": amount,
        }))
    }

    fn void_transaction(&mut self, data: Option<&Map<String, Value>>) -> NativeResult {
        if !self.connected {
            return Err(not_connected());
        }
        let transaction_id = data
            .and_then(|d| string_field(d, "transaction_id"))
            .ok_or_else(|| NativeError::message("Void failed: missing 'transaction_id'"))?;

        Ok(json!({
            "success": true,
            "message": "Transaction voided successfully",
            "transaction_id": transaction_id,
        }))
    }

    fn status(&self) -> Value {
        json!({
            "initialized": self.initialized,
            "connected": self.connected,
            "device_name": DEVICE_NAME,
        })
    }

    fn last_transaction(&self) -> Value {
        match &self.last_transaction {
            Some(tx) => tx.clone(),
            None => json!({
                "success": true,
                "message": "No previous transaction found",
            }),
        }
    }
}

fn not_connected() -> NativeError {
    NativeError::message("Device not connected. Call connect() first.")
}

/// Reads a field as text, accepting JSON numbers the way the native layer does.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
