//! # Pastepack
//!
//! Turns a chat transcript copied out of Slack's web client and pasted as
//! plain text into structured message records.
//!
//! ## Overview
//!
//! A paste has no reliable delimiters. Headers come in several shapes
//! (`Alice [9:00 AM]`, doubled link names, a name with the time on the next
//! line), continuation timestamps sit alone between paragraphs, and the UI
//! leaves reaction counters, "N replies" links, avatars and attachment cards
//! scattered through the text. Pastepack segments such a document with a
//! multi-pass heuristic pipeline:
//!
//! 1. classify every line ([`parsing::classify`])
//! 2. profile the whole document ([`parsing::profile`])
//! 3. rank, cut, extend and merge message boundaries ([`parsing::boundary`])
//! 4. extract author, timestamp, body, reactions and thread marker
//!    ([`parsing::extract`])
//! 5. drop pseudo-messages ([`parsing::validate`])
//!
//! Malformed input never produces an error; only a malformed
//! [`ParserConfig`] is rejected.
//!
//! ## Quick Start
//!
//! ```rust
//! use pastepack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let paste = "Alice [9:00 AM]\nDeploy finished\n:tada: 3\n\nBob [9:02 AM]\nnice";
//!
//!     let parser = TranscriptParser::new();
//!     let messages = parser.parse_str(paste)?;
//!
//!     assert_eq!(messages.len(), 2);
//!     assert_eq!(messages[0].author(), "Alice");
//!     assert_eq!(messages[0].timestamp(), Some("9:00 AM"));
//!     assert_eq!(messages[0].reactions()[0].count, 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`TranscriptParser`], [`ParseReport`](parser::ParseReport)
//! - [`parsing`] - the segmentation engine
//! - [`config`] - [`ParserConfig`]: debug flag, name and emoji maps, iteration cap
//! - [`message`] - [`Message`], [`Reaction`], [`LineSpan`]
//! - [`core`] - merging, emoji resolution and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - [`PastepackError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

pub use config::ParserConfig;
pub use error::{PastepackError, Result};
pub use message::{LineSpan, Message, Reaction, UNKNOWN_AUTHOR};
pub use parser::TranscriptParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use pastepack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::message::{LineSpan, Message, Reaction, UNKNOWN_AUTHOR};

    pub use crate::error::{PastepackError, Result};

    pub use crate::config::ParserConfig;
    pub use crate::parser::{ParseReport, Parser, TranscriptParser};

    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::{ProcessingStats, merge_consecutive, resolve_emoji};

    pub use crate::format::OutputFormat;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
