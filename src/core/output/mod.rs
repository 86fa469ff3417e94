//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! Author and body are always written. Timestamps, reactions and thread
//! markers follow [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> pastepack::Result<()> {
//! use pastepack::core::output::{write_csv, write_jsonl, to_csv};
//! use pastepack::core::models::OutputConfig;
//! use pastepack::Message;
//!
//! let messages = vec![
//!     Message::new("Alice", "Deploy finished").with_timestamp("9:00 AM"),
//!     Message::new("Bob", "nice"),
//! ];
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_csv(&messages, "output.csv", &config)?;
//! write_jsonl(&messages, "output.jsonl", &config)?;
//!
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{format_reactions, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::core::models::OutputConfig;
#[cfg(feature = "json-output")]
use crate::message::{Message, Reaction};

/// Borrowed view of a message with only the fields enabled in `OutputConfig`.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
pub(crate) struct OutputMessage<'a> {
    author: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reactions: Option<&'a [Reaction]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<&'a str>,
}

#[cfg(feature = "json-output")]
impl<'a> OutputMessage<'a> {
    pub(crate) fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            author: msg.author(),
            body: msg.body(),
            timestamp: msg.timestamp().filter(|_| config.include_timestamps),
            reactions: Some(msg.reactions())
                .filter(|r| config.include_reactions && !r.is_empty()),
            thread: msg.thread().filter(|_| config.include_threads),
        }
    }
}
