use crate::domain::transaction::{
    Amount, PaymentRequest, RefundRequest, TerminalCommand, VoidRequest,
};
use crate::error::{Result, TerminalError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum CommandType {
    Payment,
    Refund,
    Void,
}

#[derive(Debug, Deserialize)]
struct CommandRecord {
    r#type: CommandType,
    amount: Option<String>,
    transaction_id: Option<String>,
    order_id: Option<String>,
    currency: Option<String>,
}

impl TryFrom<CommandRecord> for TerminalCommand {
    type Error = TerminalError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        match record.r#type {
            CommandType::Payment => {
                let mut request = PaymentRequest::new(required_amount(&record)?);
                request.order_id = record.order_id;
                request.currency = record.currency;
                Ok(TerminalCommand::Payment(request))
            }
            CommandType::Refund => Ok(TerminalCommand::Refund(RefundRequest::new(
                required_amount(&record)?,
                required_transaction_id(record.transaction_id)?,
            ))),
            CommandType::Void => Ok(TerminalCommand::Void(VoidRequest::new(
                required_transaction_id(record.transaction_id)?,
            ))),
        }
    }
}

// Amounts are parsed from the raw text so "10.00" keeps its two decimals.
fn required_amount(record: &CommandRecord) -> Result<Amount> {
    let raw = record.amount.as_deref().ok_or_else(|| {
        TerminalError::ValidationError(format!("{:?} requires an amount", record.r#type))
    })?;
    raw.parse()
}

fn required_transaction_id(transaction_id: Option<String>) -> Result<String> {
    transaction_id.ok_or_else(|| {
        TerminalError::ValidationError("Missing transaction_id".to_string())
    })
}

/// Reads terminal commands from a CSV source.
///
/// Expected header: `type, amount, transaction_id, order_id, currency`.
/// Whitespace is trimmed and short rows are accepted; a bad row yields an
/// error for that row only.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes commands, one per row.
    pub fn commands(self) -> impl Iterator<Item = Result<TerminalCommand>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| -> Result<TerminalCommand> {
                result.map_err(TerminalError::from)?.try_into()
            })
    }
}
