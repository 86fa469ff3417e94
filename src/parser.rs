//! Parser trait and the transcript parser.
//!
//! # Example
//!
//! ```rust
//! use pastepack::parser::{Parser, TranscriptParser};
//!
//! let parser = TranscriptParser::new();
//! let messages = parser.parse_str("Alice [9:00 AM]\nMorning!\n\nBob [9:02 AM]\nhey")?;
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].author(), "Bob");
//! # Ok::<(), pastepack::PastepackError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{
    DocumentProfile, Segment, build_profile, classify_lines, extract_messages, resolve_segments,
    validate_messages,
};

/// Common interface for anything that turns pasted text into messages.
///
/// Implementors only need [`name`](Parser::name) and
/// [`parse_str`](Parser::parse_str); file handling has default methods.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses transcript text.
    ///
    /// Malformed content never fails; it yields fewer or unattributed
    /// messages instead.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Reads a UTF-8 file and parses its contents.
    ///
    /// # Errors
    ///
    /// Returns [`PastepackError::Io`](crate::PastepackError::Io) if the file
    /// cannot be read.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Same as [`parse`](Parser::parse), for `&str` paths.
    fn parse_file(&self, path: &str) -> Result<Vec<Message>> {
        self.parse(Path::new(path))
    }
}

/// Everything one parse produced, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Document-wide statistics and indices
    pub profile: DocumentProfile,
    /// Final segments, before extraction
    pub segments: Vec<Segment>,
    /// Messages that survived validation
    pub messages: Vec<Message>,
}

impl ParseReport {
    /// Number of segments the validator dropped.
    pub fn discarded(&self) -> usize {
        self.segments.len().saturating_sub(self.messages.len())
    }
}

/// Segments Slack-style pasted transcripts into messages.
///
/// Holds nothing but its read-only configuration, so one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PastepackError::InvalidConfig`](crate::PastepackError::InvalidConfig)
    /// if the configuration fails [`ParserConfig::validate`].
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Runs the full pipeline and keeps the intermediate results.
    pub fn parse_with_report(&self, content: &str) -> ParseReport {
        let config = &self.config;
        let lines = classify_lines(content);
        let profile = build_profile(&lines, config);
        let segments = resolve_segments(&lines, &profile, config);
        let candidates = extract_messages(&lines, &profile, &segments, config);
        let messages = validate_messages(candidates, config.debug);

        if config.debug {
            debug!(
                target: "pastepack",
                lines = lines.len(),
                segments = segments.len(),
                messages = messages.len(),
                format = %profile.format,
                "parse complete"
            );
        }

        ParseReport {
            profile,
            segments,
            messages,
        }
    }
}

impl Parser for TranscriptParser {
    fn name(&self) -> &'static str {
        "Slack paste"
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        Ok(self.parse_with_report(content).messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parser_name() {
        assert_eq!(TranscriptParser::new().name(), "Slack paste");
    }

    #[test]
    fn test_with_config_validates() {
        let bad = ParserConfig::new().with_max_iterations(0);
        let err = TranscriptParser::with_config(bad).unwrap_err();
        assert!(err.is_invalid_config());

        let good = ParserConfig::new().with_user("al", "Alice");
        let parser = TranscriptParser::with_config(good).unwrap();
        assert_eq!(parser.config().canonical_name("al"), Some("Alice"));
    }

    #[test]
    fn test_parse_str_empty() {
        let parser = TranscriptParser::new();
        assert!(parser.parse_str("").unwrap().is_empty());
        assert!(parser.parse_str("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Alice [9:00 AM]").unwrap();
        writeln!(file, "Hello").unwrap();
        file.flush().unwrap();

        let messages = TranscriptParser::new()
            .parse_file(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author(), "Alice");
        assert_eq!(messages[0].body(), "Hello");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = TranscriptParser::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_report_counts() {
        let report = TranscriptParser::new()
            .parse_with_report("Alice [9:00 AM]\nHello\n\nBob [9:01 AM]\nHi there");
        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.discarded(), 0);
        assert_eq!(report.profile.line_count, 5);
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranscriptParser>();
    }
}
