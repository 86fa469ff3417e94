//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::Message;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"author": "Alice", "body": "Hello"},
///   {"author": "Bob", "body": "Hi", "timestamp": "9:01 AM"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(to_json(messages, config)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array string.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let out: Vec<OutputMessage<'_>> = messages
        .iter()
        .map(|m| OutputMessage::from_message(m, config))
        .collect();
    Ok(serde_json::to_string_pretty(&out)?)
}
