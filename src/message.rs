//! Message record produced by the transcript parser.
//!
//! A [`Message`] is what one segment of a pasted transcript turns into:
//! an author, the header's timestamp text (kept verbatim, never parsed into
//! an instant), the narrative body, parsed reactions and an optional thread
//! marker.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use pastepack::Message;
//!
//! let msg = Message::new("Alice", "Hello, world!");
//! assert_eq!(msg.author(), "Alice");
//! assert_eq!(msg.body(), "Hello, world!");
//! assert!(msg.has_author());
//! ```
//!
//! ## Builder Pattern
//!
//! ```
//! use pastepack::{LineSpan, Message, Reaction};
//!
//! let msg = Message::new("Bob", "Ship it")
//!     .with_timestamp("9:41 AM")
//!     .with_reaction(Reaction::new(":rocket:", 3))
//!     .with_thread("2 replies")
//!     .with_lines(LineSpan::new(4, 9));
//!
//! assert_eq!(msg.timestamp(), Some("9:41 AM"));
//! assert_eq!(msg.reactions().len(), 1);
//! assert!(msg.has_metadata());
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;

/// Author assigned to a message whose segment had no recognizable header.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One reaction counter attached to a message, e.g. `:thumbsup: 3` or `🎉 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The emoji as written in the paste: a Unicode glyph or a `:code:`.
    pub symbol: String,
    /// How many people reacted.
    pub count: u32,
}

impl Reaction {
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }

    /// Returns `true` for the `:code:` form.
    pub fn is_code(&self) -> bool {
        self.symbol.len() > 2 && self.symbol.starts_with(':') && self.symbol.ends_with(':')
    }

    /// The symbol to show a reader: the configured glyph for a `:code:`
    /// when one exists, otherwise the symbol as pasted.
    ///
    /// ```
    /// use pastepack::{ParserConfig, Reaction};
    ///
    /// let config = ParserConfig::new().with_emoji(":tada:", "🎉");
    /// assert_eq!(Reaction::new(":tada:", 2).display_symbol(&config), "🎉");
    /// assert_eq!(Reaction::new(":wave:", 1).display_symbol(&config), ":wave:");
    /// ```
    pub fn display_symbol<'a>(&'a self, config: &'a ParserConfig) -> &'a str {
        if self.is_code() {
            if let Some(glyph) = config.emoji_glyph(&self.symbol) {
                return glyph;
            }
        }
        &self.symbol
    }
}

/// Inclusive, 0-based range of source lines a message was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// A span always covers at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if the two spans share any line.
    pub fn overlaps(&self, other: &LineSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A single message recovered from a pasted transcript.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `author` | `String` | Display name, or [`UNKNOWN_AUTHOR`] when no header was found |
/// | `timestamp` | `Option<String>` | Header timestamp text, unparsed |
/// | `body` | `String` | Narrative text, internal blank lines preserved |
/// | `reactions` | `Vec<Reaction>` | Reaction counters in paste order |
/// | `thread` | `Option<String>` | Thread indicator such as `3 replies` |
/// | `lines` | `Option<LineSpan>` | Source line range of the segment |
///
/// # Serialization
///
/// Optional fields and empty reaction lists are omitted from JSON.
///
/// ```
/// use pastepack::Message;
///
/// let msg = Message::new("Alice", "Hello!").with_timestamp("3:00 PM");
/// let json = serde_json::to_string(&msg)?;
///
/// assert!(json.contains("3:00 PM"));
/// assert!(!json.contains("reactions"));
/// assert!(!json.contains("thread"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub author: String,

    /// Timestamp text exactly as it appeared in the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Message text. May span several lines.
    pub body: String,

    /// Reactions parsed out of the message tail.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub reactions: Vec<Reaction>,

    /// Thread indicator text, e.g. `3 replies` or `View thread`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub thread: Option<String>,

    /// Source lines the message was built from.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub lines: Option<LineSpan>,
}

impl Message {
    /// Creates a message with only author and body.
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            timestamp: None,
            body: body.into(),
            reactions: Vec::new(),
            thread: None,
            lines: None,
        }
    }

    /// Creates a message attributed to [`UNKNOWN_AUTHOR`].
    pub fn unattributed(body: impl Into<String>) -> Self {
        Self::new(UNKNOWN_AUTHOR, body)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    #[must_use]
    pub fn with_thread(mut self, marker: impl Into<String>) -> Self {
        self.thread = Some(marker.into());
        self
    }

    #[must_use]
    pub fn with_lines(mut self, span: LineSpan) -> Self {
        self.lines = Some(span);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn thread(&self) -> Option<&str> {
        self.thread.as_deref()
    }

    pub fn lines(&self) -> Option<LineSpan> {
        self.lines
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `false` for messages attributed to [`UNKNOWN_AUTHOR`].
    pub fn has_author(&self) -> bool {
        self.author != UNKNOWN_AUTHOR
    }

    /// Returns `true` if the message carries a timestamp, reactions or a thread marker.
    pub fn has_metadata(&self) -> bool {
        self.timestamp.is_some() || !self.reactions.is_empty() || self.thread.is_some()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Sum of all reaction counts.
    pub fn reaction_total(&self) -> u32 {
        self.reactions.iter().map(|r| r.count).sum()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::unattributed("")
    }
}
