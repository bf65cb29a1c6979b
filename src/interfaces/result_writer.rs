use crate::error::{Result, TerminalError};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ResultLine<'a> {
    row: usize,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Writes one JSON object per processed command.
pub struct ResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_outcome(&mut self, row: usize, outcome: &Result<Value>) -> Result<()> {
        let line = match outcome {
            Ok(value) => ResultLine {
                row,
                ok: true,
                result: Some(value),
                error: None,
            },
            Err(e) => ResultLine {
                row,
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n").map_err(TerminalError::from)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_writes_json_lines() {
        let mut buffer = Vec::new();
        {
            let mut writer = ResultWriter::new(&mut buffer);
            writer
                .write_outcome(1, &Ok(json!({"transaction_id": "1"})))
                .unwrap();
            writer
                .write_outcome(2, &Err(TerminalError::NotConnected))
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            r#"{"row":1,"ok":true,"result":{"transaction_id":"1"}}"#
        );
        assert_eq!(lines[1], r#"{"row":2,"ok":false,"error":"Device not connected"}"#);
    }
}
