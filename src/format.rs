//! Output format selection.
//!
//! [`OutputFormat`] is usable without the CLI; with the `cli` feature it
//! doubles as the `--format` value type.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> pastepack::Result<()> {
//! use pastepack::format::{OutputFormat, to_format_string};
//! use pastepack::core::models::OutputConfig;
//! use pastepack::Message;
//!
//! let messages = vec![Message::new("Alice", "Hello!")];
//!
//! let format = OutputFormat::from_path("out.jsonl")?;
//! let text = to_format_string(&messages, format, &OutputConfig::new())?;
//! assert!(text.starts_with('{'));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{PastepackError, Result};

/// Output format for parsed messages.
///
/// - [`Csv`](OutputFormat::Csv) - compact, semicolon-delimited, good LLM context
/// - [`Json`](OutputFormat::Json) - one pretty-printed array
/// - [`Jsonl`](OutputFormat::Jsonl) - one object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,
    /// JSON array of messages
    Json,
    /// JSON Lines, also accepted as `ndjson`
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature that provides the writer for this format.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Picks the format from a file extension (case-insensitive).
    ///
    /// ```rust
    /// use pastepack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.NDJSON").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("out.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse().map_err(|_| {
            PastepackError::invalid_format(
                "output",
                format!("unknown file extension '.{ext}', expected csv, json or jsonl"),
            )
        })
    }

    fn unsupported(self) -> PastepackError {
        PastepackError::invalid_format(
            "output",
            format!(
                "{self} output requires the '{}' feature",
                self.required_feature()
            ),
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = PastepackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(PastepackError::invalid_format(
                "output",
                format!("unknown format '{s}', expected csv, json or jsonl"),
            )),
        }
    }
}

/// Writes messages to `path` in the given format.
///
/// # Errors
///
/// Fails if the writer's feature is disabled or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unsupported()),
    }
}

/// Renders messages to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unsupported()),
    }
}
