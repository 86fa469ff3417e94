//! Error type shared by the whole crate.
//!
//! Pasted text never fails to parse. A paste with no recognisable headers
//! comes back as fewer messages, or as messages attributed to
//! [`UNKNOWN_AUTHOR`](crate::message::UNKNOWN_AUTHOR). Errors come from the
//! edges instead:
//!
//! - a [`ParserConfig`](crate::config::ParserConfig) that fails validation,
//!   reported before any line is read
//! - reading the transcript or map files
//! - writing CSV / JSON output

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// `Result` alias used across pastepack.
///
/// ```rust
/// use pastepack::error::Result;
/// use pastepack::{Message, ParserConfig};
///
/// fn checked(config: &ParserConfig) -> Result<Vec<Message>> {
///     config.validate()?;
///     Ok(Vec::new())
/// }
/// # assert!(checked(&ParserConfig::default()).is_ok());
/// ```
pub type Result<T> = std::result::Result<T, PastepackError>;

/// Everything that can go wrong outside the segmentation heuristics.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PastepackError {
    /// Reading a transcript or map file, or writing output, failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is out of shape.
    ///
    /// Produced by [`ParserConfig::validate`](crate::config::ParserConfig::validate),
    /// which every parser constructor runs.
    #[error("Invalid configuration ({field}): {message}")]
    InvalidConfig {
        /// Offending field, e.g. `user_map` or `max_iterations`
        field: &'static str,
        message: String,
    },

    /// Unknown output format name or file extension.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        format: &'static str,
        message: String,
    },

    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Map files and configuration JSON that don't deserialize, or output
    /// that doesn't serialize.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer output that turned out not to be UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        context: String,
        #[source]
        source: FromUtf8Error,
    },
}

impl From<FromUtf8Error> for PastepackError {
    fn from(source: FromUtf8Error) -> Self {
        PastepackError::Utf8 {
            context: "rendered output".to_string(),
            source,
        }
    }
}

// ============================================================================
// Constructors and predicates
// ============================================================================

impl PastepackError {
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        PastepackError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        PastepackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, PastepackError::Io(_))
    }

    /// `true` for errors raised by configuration validation or map loading.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, PastepackError::InvalidConfig { .. })
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, PastepackError::InvalidFormat { .. })
    }
}
