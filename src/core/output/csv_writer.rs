//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::{Message, Reaction};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Author`, `Body`
///   - With timestamps: `Timestamp`, `Author`, `Body`
///   - With reactions: `Author`, `Body`, `Reactions`
///   - With threads: `Author`, `Body`, `Thread`
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(messages, &mut buf, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(messages: &[Message], out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Author");
    header.push("Body");

    if config.include_reactions {
        header.push("Reactions");
    }
    if config.include_threads {
        header.push("Thread");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_timestamps {
        record.push(msg.timestamp().unwrap_or_default().to_string());
    }

    record.push(msg.author().to_string());
    record.push(msg.body().to_string());

    if config.include_reactions {
        record.push(format_reactions(msg.reactions()));
    }
    if config.include_threads {
        record.push(msg.thread().unwrap_or_default().to_string());
    }

    record
}

/// Renders reactions as `symbol count` pairs separated by `, `.
///
/// ```
/// use pastepack::Reaction;
/// use pastepack::core::output::format_reactions;
///
/// let r = [Reaction::new(":tada:", 3), Reaction::new("👍", 1)];
/// assert_eq!(format_reactions(&r), ":tada: 3, 👍 1");
/// ```
pub fn format_reactions(reactions: &[Reaction]) -> String {
    reactions
        .iter()
        .map(|r| format!("{} {}", r.symbol, r.count))
        .collect::<Vec<_>>()
        .join(", ")
}
