//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, convenient for RAG ingestion and `jq`.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::Message;

/// Writes messages to JSONL (JSON Lines) format.
///
/// # Format
/// ```jsonl
/// {"author":"Alice","body":"Hello"}
/// {"author":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        let line = serde_json::to_string(&OutputMessage::from_message(msg, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&OutputMessage::from_message(
            msg, config,
        ))?);
        out.push('\n');
    }
    Ok(out)
}
