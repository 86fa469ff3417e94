//! Post-processing of parsed messages.

use crate::config::ParserConfig;
use crate::message::{LineSpan, Message};

/// Merges consecutive messages from the same author into single entries.
///
/// Bodies are joined with a newline, reactions are concatenated, the first
/// timestamp and thread marker win, and the source line spans are unioned.
/// This reduces token count when feeding transcripts to LLMs.
///
/// # Example
///
/// ```rust
/// use pastepack::Message;
/// use pastepack::core::processor::merge_consecutive;
///
/// let merged = merge_consecutive(vec![
///     Message::new("Alice", "Hi"),
///     Message::new("Alice", "How are you?"),
///     Message::new("Bob", "Fine"),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].body(), "Hi\nHow are you?");
/// ```
pub fn merge_consecutive(messages: Vec<Message>) -> Vec<Message> {
    let mut merged: Vec<Message> = Vec::with_capacity(messages.len());

    for msg in messages {
        match merged.last_mut() {
            Some(last) if last.author == msg.author => {
                if !msg.body.is_empty() {
                    if !last.body.is_empty() {
                        last.body.push('\n');
                    }
                    last.body.push_str(&msg.body);
                }
                last.reactions.extend(msg.reactions);
                if last.timestamp.is_none() {
                    last.timestamp = msg.timestamp;
                }
                if last.thread.is_none() {
                    last.thread = msg.thread;
                }
                last.lines = match (last.lines, msg.lines) {
                    (Some(a), Some(b)) => Some(LineSpan::new(a.start.min(b.start), a.end.max(b.end))),
                    (a, b) => a.or(b),
                };
            }
            _ => merged.push(msg),
        }
    }

    merged
}

/// Replaces `:code:` reaction symbols with glyphs from the emoji map.
///
/// Codes without a mapping are left as pasted.
pub fn resolve_emoji(messages: &mut [Message], config: &ParserConfig) {
    if config.emoji_map.is_empty() {
        return;
    }
    for reaction in messages.iter_mut().flat_map(|m| m.reactions.iter_mut()) {
        if !reaction.is_code() {
            continue;
        }
        if let Some(glyph) = config.emoji_glyph(&reaction.symbol) {
            reaction.symbol = glyph.to_string();
        }
    }
}

/// Statistics about a processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub original_count: usize,
    pub merged_count: usize,
}

impl ProcessingStats {
    pub fn new(original_count: usize, merged_count: usize) -> Self {
        Self {
            original_count,
            merged_count,
        }
    }

    /// Percentage of messages removed by merging.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }
        (1.0 - (self.merged_count as f64 / self.original_count as f64)) * 100.0
    }

    /// Number of messages removed by merging.
    pub fn messages_saved(&self) -> usize {
        self.original_count.saturating_sub(self.merged_count)
    }
}
