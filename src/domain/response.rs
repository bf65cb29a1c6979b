use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a payment as reported by the terminal.
///
/// Only `transaction_id` and `amount` are typed. Every other field stays in
/// `extra` exactly as the native layer sent it, whatever its JSON type.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentResponse {
    pub transaction_id: String,
    pub amount: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentResponse {
    pub fn success(&self) -> Option<bool> {
        self.extra.get("success").and_then(Value::as_bool)
    }

    pub fn response_code(&self) -> Option<&str> {
        self.extra.get("response_code").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.extra.get("message").and_then(Value::as_str)
    }

    pub fn auth_code(&self) -> Option<&str> {
        self.extra.get("auth_code").and_then(Value::as_str)
    }

    /// Epoch millis, when the native layer sent a number.
    pub fn timestamp(&self) -> Option<u64> {
        self.extra.get("timestamp").and_then(Value::as_u64)
    }

    /// `"00"` is the approval code.
    pub fn is_approved(&self) -> bool {
        self.success() == Some(true) && self.response_code() == Some("00")
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct DeviceStatus {
    pub connected: bool,
    pub device_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceStatus {
    pub fn initialized(&self) -> Option<bool> {
        self.extra.get("initialized").and_then(Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_response_keeps_unknown_fields() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "success": true,
            "response_code": "00",
            "message": "APPROVED",
            "transaction_id": "123456789",
            "amount": "10.00",
            "timestamp": 1700000000000u64,
            "card_type": "VISA"
        }))
        .unwrap();

        assert!(response.is_approved());
        assert_eq!(response.amount, "10.00");
        assert_eq!(response.timestamp(), Some(1700000000000));
        assert_eq!(response.extra.get("card_type"), Some(&json!("VISA")));
    }

    #[test]
    fn test_optional_fields_of_any_type_decode() {
        let payload = json!({
            "transaction_id": "1",
            "amount": "10.00",
            "response_code": 0,
            "timestamp": "2024-01-01",
            "success": "yes"
        });
        let response: PaymentResponse = serde_json::from_value(payload.clone()).unwrap();

        assert_eq!(response.response_code(), None);
        assert_eq!(response.timestamp(), None);
        assert!(!response.is_approved());
        assert_eq!(serde_json::to_value(&response).unwrap(), payload);
    }

    #[test]
    fn test_payment_response_requires_transaction_id() {
        let result: Result<PaymentResponse, _> =
            serde_json::from_value(json!({"success": true, "amount": "1.00"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_declined_is_not_approved() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "success": false,
            "response_code": "05",
            "transaction_id": "1",
            "amount": "1.00"
        }))
        .unwrap();
        assert!(!response.is_approved());
    }

    #[test]
    fn test_device_status_decoding() {
        let status: DeviceStatus = serde_json::from_value(json!({
            "connected": true,
            "device_name": "Moneris DX8000",
            "initialized": "unknown",
            "battery": 80
        }))
        .unwrap();
        assert_eq!(status.initialized(), None);
        assert!(status.connected);
        assert_eq!(status.extra.get("battery"), Some(&json!(80)));
    }
}
