use crate::error::TerminalError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A positive monetary amount for terminal transactions.
///
/// Wraps `rust_decimal::Decimal` so the scale the caller typed survives the
/// trip to the device: `"10.00"` goes out on the wire as `"10.00"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, TerminalError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(TerminalError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = TerminalError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| {
            TerminalError::ValidationError(format!("Invalid amount '{}'", s.trim()))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sale sent to the terminal.
///
/// Only `amount` is mandatory. The native layer fills in an order id,
/// `CAD` and `purchase` when the optional fields are left out.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl PaymentRequest {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            order_id: None,
            currency: None,
            transaction_type: None,
            metadata: None,
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Returns money against an earlier transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct RefundRequest {
    pub amount: Amount,
    pub transaction_id: String,
}

impl RefundRequest {
    pub fn new(amount: Amount, transaction_id: impl Into<String>) -> Self {
        Self {
            amount,
            transaction_id: transaction_id.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct VoidRequest {
    pub transaction_id: String,
}

impl VoidRequest {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }
}

/// One unit of work for a connected terminal.
#[derive(Debug, PartialEq, Clone)]
pub enum TerminalCommand {
    Payment(PaymentRequest),
    Refund(RefundRequest),
    Void(VoidRequest),
}
