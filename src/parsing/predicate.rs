//! "Could this line start a message?"
//!
//! The decision is an ordered chain of small rules. Each rule looks at one
//! line (plus a few lines of look-around) and either returns a verdict or
//! passes. The first verdict wins; a line no rule claims is rejected.

use std::collections::BTreeSet;

use serde::Serialize;

use super::classify::{LineRecord, next_non_blank, prev_non_blank};
use super::patterns;
use crate::config::normalize_name;

/// Lines after a URL that may still be its link preview.
pub const LINK_PREVIEW_WINDOW: usize = 5;
/// Lines after a `>` quote that may still be its preview.
pub const QUOTE_PREVIEW_WINDOW: usize = 3;
/// Look-around, in lines, that keeps weak starts away from continuation markers.
pub const CONTINUATION_GUARD: usize = 3;
/// Lines after a full header in which weak starts are refused.
pub const HEADER_GUARD: usize = 3;
/// Minimum length (chars) of a weak start.
pub const WEAK_START_MIN_LEN: usize = 10;

/// Why a line was accepted or rejected as a message start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Blank,
    Metadata,
    LinkPreview,
    ContinuationMarker,
    SplitHeaderTail,
    StrongIndicator,
    StrongWithoutContext,
    KnownUsername,
    WeakIndicator,
    NoIndicator,
}

/// Outcome of the start predicate for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartVerdict {
    pub line: usize,
    pub accepted: bool,
    pub reason: Reason,
}

type Rule = fn(&StartContext<'_>, usize) -> Option<(bool, Reason)>;

/// Rules in priority order.
const RULES: &[Rule] = &[
    reject_blank,
    reject_metadata,
    reject_link_preview,
    reject_continuation_marker,
    reject_split_header_tail,
    strong_indicator,
    known_username,
    weak_indicator,
];

/// Document-wide facts the rules need, computed once.
pub struct StartContext<'a> {
    lines: &'a [LineRecord],
    known_names: &'a BTreeSet<String>,
    allow_weak: bool,
    split_names: Vec<bool>,
    continuation: Vec<bool>,
}

impl<'a> StartContext<'a> {
    /// Prepares the predicate for a document.
    ///
    /// `allow_weak` enables weak (capitalized-prose) starts; it is turned off
    /// for transcripts whose headers are reliably tagged.
    pub fn new(lines: &'a [LineRecord], known_names: &'a BTreeSet<String>, allow_weak: bool) -> Self {
        let mut ctx = Self {
            lines,
            known_names,
            allow_weak,
            split_names: Vec::new(),
            continuation: Vec::new(),
        };
        ctx.split_names = (0..lines.len()).map(|i| ctx.detect_split_name(i)).collect();
        ctx.continuation = (0..lines.len()).map(|i| ctx.detect_continuation(i)).collect();
        ctx
    }

    pub fn lines(&self) -> &'a [LineRecord] {
        self.lines
    }

    pub fn is_known_name(&self, name: &str) -> bool {
        self.known_names.contains(&normalize_name(name))
    }

    /// Name line of a split header (`Alice` then `9:00 AM` on the next line).
    pub fn is_split_header_name(&self, i: usize) -> bool {
        self.split_names.get(i).copied().unwrap_or(false)
    }

    /// Timestamp line of a split header.
    pub fn is_split_header_tail(&self, i: usize) -> bool {
        i > 0 && self.is_split_header_name(i - 1)
    }

    /// Standalone timestamp that continues the previous message.
    pub fn is_continuation_marker(&self, i: usize) -> bool {
        self.continuation.get(i).copied().unwrap_or(false)
    }

    /// Looks like the first line of a header.
    pub fn is_header_like(&self, i: usize) -> bool {
        let line = &self.lines[i];
        line.has_opening_timestamp()
            || line.standalone_time.is_some()
            || line.is_avatar()
            || self.is_split_header_name(i)
    }

    /// Has an author and a timestamp on its own (same-line or split header).
    pub fn is_full_header(&self, i: usize) -> bool {
        self.lines[i].header.is_some() || self.is_split_header_name(i)
    }

    /// Header, avatar, or a precise timestamp. A standalone time is never
    /// strong: it either continues the message above or is a stray line
    /// that stays with it.
    pub fn is_strong(&self, i: usize) -> bool {
        let line = &self.lines[i];
        line.has_opening_timestamp() || line.is_avatar() || self.is_split_header_name(i)
    }

    fn is_known_username_line(&self, i: usize) -> bool {
        self.lines[i]
            .username
            .as_deref()
            .is_some_and(|name| self.is_known_name(name))
    }

    /// A new message may begin here: start of document, a blank line before,
    /// or a previous line that is not itself the opening of a header.
    fn has_start_context(&self, i: usize) -> bool {
        let line = &self.lines[i];
        if line.context.blank_before {
            return true;
        }
        match prev_non_blank(self.lines, i) {
            None => true,
            Some(p) => !(self.lines[p].is_avatar() || self.is_split_header_name(p)),
        }
    }

    fn detect_split_name(&self, i: usize) -> bool {
        let line = &self.lines[i];
        let Some(name) = line.username.as_deref() else {
            return false;
        };
        let Some(next) = self.lines.get(i + 1) else {
            return false;
        };
        if next.standalone_time.is_none() {
            return false;
        }
        let after_avatar = i > 0 && self.lines[i - 1].is_avatar();
        let opens = line.context.blank_before || after_avatar;
        let plausible = after_avatar
            || self.is_known_name(name)
            || (patterns::is_title_case(name) && !patterns::has_narrative_words(name));
        opens && plausible
    }

    fn detect_continuation(&self, i: usize) -> bool {
        let line = &self.lines[i];
        if line.standalone_time.is_none() || self.is_split_header_tail(i) {
            return false;
        }
        if prev_non_blank(self.lines, i).is_none() {
            return false;
        }
        match next_non_blank(self.lines, i) {
            None => true,
            Some(k) => !self.is_header_like(k),
        }
    }

    /// Runs the rule chain for line `i`.
    pub fn evaluate(&self, i: usize) -> StartVerdict {
        let (accepted, reason) = RULES
            .iter()
            .find_map(|rule| rule(self, i))
            .unwrap_or((false, Reason::NoIndicator));
        StartVerdict {
            line: i,
            accepted,
            reason,
        }
    }

    /// Runs the rule chain for every line.
    pub fn evaluate_all(&self) -> Vec<StartVerdict> {
        (0..self.lines.len()).map(|i| self.evaluate(i)).collect()
    }
}

// ============================================================================
// Rules
// ============================================================================

fn reject_blank(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    ctx.lines[i].is_blank.then_some((false, Reason::Blank))
}

fn reject_metadata(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    ctx.lines[i].is_noise().then_some((false, Reason::Metadata))
}

fn reject_link_preview(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    if ctx.is_strong(i) || ctx.is_known_username_line(i) {
        return None;
    }
    let lines = ctx.lines;

    let after_url = lines[i.saturating_sub(LINK_PREVIEW_WINDOW)..i]
        .iter()
        .any(|l| l.features.has_url && !l.is_avatar() && l.header.is_none());

    let after_quote = !lines[i].trimmed.starts_with('>')
        && lines[i.saturating_sub(QUOTE_PREVIEW_WINDOW)..i]
            .iter()
            .any(|l| l.trimmed.starts_with('>'));

    (after_url || after_quote).then_some((false, Reason::LinkPreview))
}

fn reject_continuation_marker(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    ctx.is_continuation_marker(i)
        .then_some((false, Reason::ContinuationMarker))
}

fn reject_split_header_tail(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    ctx.is_split_header_tail(i)
        .then_some((false, Reason::SplitHeaderTail))
}

fn strong_indicator(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    if !ctx.is_strong(i) {
        return None;
    }
    if ctx.has_start_context(i) {
        Some((true, Reason::StrongIndicator))
    } else {
        Some((false, Reason::StrongWithoutContext))
    }
}

fn known_username(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    (ctx.is_known_username_line(i) && ctx.has_start_context(i))
        .then_some((true, Reason::KnownUsername))
}

fn weak_indicator(ctx: &StartContext<'_>, i: usize) -> Option<(bool, Reason)> {
    let line = &ctx.lines[i];
    if !ctx.allow_weak
        || !line.features.starts_capital
        || line.char_len() <= WEAK_START_MIN_LEN
        || !line.context.blank_before
    {
        return None;
    }

    if let Some(p) = prev_non_blank(ctx.lines, i) {
        if ctx.is_header_like(p) {
            return None;
        }
    }

    let lo = i.saturating_sub(CONTINUATION_GUARD);
    let hi = (i + CONTINUATION_GUARD).min(ctx.lines.len() - 1);
    if (lo..=hi).any(|j| ctx.is_continuation_marker(j)) {
        return None;
    }

    if (i.saturating_sub(HEADER_GUARD)..i).any(|j| ctx.is_full_header(j)) {
        return None;
    }

    Some((true, Reason::WeakIndicator))
}
