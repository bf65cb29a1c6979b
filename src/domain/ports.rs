use crate::error::NativeError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Plugin name every native call is addressed to.
pub const PLUGIN_NAME: &str = "MonerisDX8000";

/// Native method names. The strings are the wire contract with the native layer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NativeMethod {
    Initialize,
    Connect,
    Disconnect,
    ProcessPayment,
    ProcessRefund,
    VoidTransaction,
    GetDeviceStatus,
    CancelTransaction,
    GetLastTransaction,
    PrintReceipt,
}

impl NativeMethod {
    pub const ALL: [NativeMethod; 10] = [
        Self::Initialize,
        Self::Connect,
        Self::Disconnect,
        Self::ProcessPayment,
        Self::ProcessRefund,
        Self::VoidTransaction,
        Self::GetDeviceStatus,
        Self::CancelTransaction,
        Self::GetLastTransaction,
        Self::PrintReceipt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::ProcessPayment => "processPayment",
            Self::ProcessRefund => "processRefund",
            Self::VoidTransaction => "voidTransaction",
            Self::GetDeviceStatus => "getDeviceStatus",
            Self::CancelTransaction => "cancelTransaction",
            Self::GetLastTransaction => "getLastTransaction",
            Self::PrintReceipt => "printReceipt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The opaque native execution mechanism.
///
/// Each call resolves exactly once, with the native success payload or the
/// native error value. Implementations decide their own timeouts and retries.
#[async_trait]
pub trait NativeExecutor: Send + Sync {
    async fn execute(
        &self,
        plugin: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, NativeError>;
}

pub type NativeExecutorBox = Box<dyn NativeExecutor>;
