//! Validator.
//!
//! Drops pseudo-messages that slipped through segmentation: header-only
//! fragments and attachment cards that ended up without an author. Author-less
//! content that reads like real text is kept, and so is a header-only message
//! directly followed by a different author's message.

use tracing::debug;

use super::patterns;
use crate::config::normalize_name;
use crate::message::Message;

/// Shortest body (chars) an unattributed message may have.
pub const MIN_UNATTRIBUTED_BODY: usize = 20;

/// Returns `true` if every non-blank body line is a label, credit or metadata.
fn is_credit_body(body: &str) -> bool {
    body.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .all(|l| patterns::is_attachment_credit(l) || patterns::is_metadata(l))
}

/// Whether a candidate message should be kept.
pub fn is_valid(message: &Message) -> bool {
    let body = message.body().trim();
    if message.has_author() {
        return !body.is_empty();
    }
    body.chars().count() > MIN_UNATTRIBUTED_BODY && !is_credit_body(body)
}

/// `Alice [9:00 AM]` with nothing under it, right before `Bob [9:01 AM]`.
///
/// Back-to-back headers of the same author collapse into the later one, so
/// the empty message is kept only when the next author differs.
fn is_header_before_other_author(message: &Message, next: Option<&Message>) -> bool {
    if !message.has_author() || message.timestamp().is_none() || !message.body().trim().is_empty() {
        return false;
    }
    next.is_some_and(|n| {
        n.has_author() && normalize_name(n.author()) != normalize_name(message.author())
    })
}

/// Filters candidate messages, preserving order.
///
/// Runs back to front so a header-only message is judged against the next
/// message that is actually kept.
pub fn validate_messages(messages: Vec<Message>, debug: bool) -> Vec<Message> {
    let mut keep = vec![false; messages.len()];
    let mut next_kept: Option<usize> = None;
    for (i, m) in messages.iter().enumerate().rev() {
        let next = next_kept.map(|k| &messages[k]);
        if is_valid(m) || is_header_before_other_author(m, next) {
            keep[i] = true;
            next_kept = Some(i);
        }
    }

    messages
        .into_iter()
        .zip(keep)
        .filter_map(|(m, keep)| {
            if !keep && debug {
                debug!(
                    target: "pastepack",
                    author = m.author(),
                    lines = ?m.lines(),
                    "discarding message"
                );
            }
            keep.then_some(m)
        })
        .collect()
}
