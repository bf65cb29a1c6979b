use crate::error::{Result, TerminalError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_DEVICE_IP: &str = "192.168.1.100";
pub const DEFAULT_PORT: u16 = 8080;

/// How the terminal is physically reached.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Network,
    Bluetooth,
    Usb,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Bluetooth => "bluetooth",
            Self::Usb => "usb",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "network" => Ok(Self::Network),
            "bluetooth" => Ok(Self::Bluetooth),
            "usb" => Ok(Self::Usb),
            other => Err(TerminalError::ValidationError(format!(
                "Unknown connection type '{other}' (expected network, bluetooth or usb)"
            ))),
        }
    }
}

/// Connection details handed to `initialize`.
///
/// The field names are the native wire contract and must not change.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct DeviceConfig {
    #[serde(default = "default_device_ip")]
    pub device_ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub connection_type: ConnectionType,
}

fn default_device_ip() -> String {
    DEFAULT_DEVICE_IP.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_ip: default_device_ip(),
            port: DEFAULT_PORT,
            connection_type: ConnectionType::Network,
        }
    }
}

impl DeviceConfig {
    pub fn new(device_ip: impl Into<String>, port: u16, connection_type: ConnectionType) -> Self {
        Self {
            device_ip: device_ip.into(),
            port,
            connection_type,
        }
    }

    /// Loads a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_wire_shape() {
        let config = DeviceConfig::new("10.0.0.7", 10009, ConnectionType::Bluetooth);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({"device_ip": "10.0.0.7", "port": 10009, "connection_type": "bluetooth"})
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DeviceConfig = serde_json::from_value(json!({"port": 10009})).unwrap();
        assert_eq!(config.device_ip, DEFAULT_DEVICE_IP);
        assert_eq!(config.port, 10009);
        assert_eq!(config.connection_type, ConnectionType::Network);
    }

    #[test]
    fn test_connection_type_parsing() {
        assert_eq!("USB".parse::<ConnectionType>().unwrap(), ConnectionType::Usb);
        assert!(matches!(
            "serial".parse::<ConnectionType>(),
            Err(TerminalError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, r#"{"device_ip": "172.16.0.2", "connection_type": "usb"}"#).unwrap();

        let config = DeviceConfig::from_json_file(&path).unwrap();
        assert_eq!(config.device_ip, "172.16.0.2");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.connection_type, ConnectionType::Usb);
    }
}
