use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// An error value produced by the native layer, relayed untouched.
///
/// Native implementations usually reject with a plain message, but any JSON
/// value is accepted. Strings display without quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeError(pub Value);

impl NativeError {
    pub fn message(message: impl Into<String>) -> Self {
        Self(Value::String(message.into()))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl std::error::Error for NativeError {}

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("MonerisDX8000 plugin not available")]
    PluginUnavailable,
    #[error("Please initialize first")]
    NotInitialized,
    #[error("Device not connected")]
    NotConnected,
    #[error(transparent)]
    Native(#[from] NativeError),
    #[error("Malformed {method} response: {source}")]
    MalformedResponse {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TerminalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_string_error_displays_verbatim() {
        let err = TerminalError::from(NativeError::message("Connection failed: timeout"));
        assert_eq!(err.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_native_object_error_displays_as_json() {
        let err = NativeError(json!({"code": 5}));
        assert_eq!(err.to_string(), r#"{"code":5}"#);
    }

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            TerminalError::PluginUnavailable.to_string(),
            "MonerisDX8000 plugin not available"
        );
        assert_eq!(TerminalError::NotConnected.to_string(), "Device not connected");
    }
}
