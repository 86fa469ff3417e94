//! Pattern aggregator.
//!
//! One pass over the classified lines builds the [`DocumentProfile`]: which
//! lines could start a message, which carry timestamps, usernames or
//! metadata, plus document statistics (average message length, recurring
//! names, timestamp shapes, a format guess and a confidence score).
//!
//! The confidence is diagnostic only. Nothing downstream branches on it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::classify::LineRecord;
use super::patterns;
use super::predicate::{StartContext, StartVerdict};
use crate::config::{ParserConfig, normalize_name};

/// Share of bracketed timestamps at or above which a paste is [`FormatKind::Tagged`].
pub const TAGGED_THRESHOLD: f64 = 0.8;
/// Share of bracketed timestamps at or below which a paste is [`FormatKind::Plain`].
pub const PLAIN_THRESHOLD: f64 = 0.2;

/// Occurrences needed before a name counts as recurring.
pub const RECURRING_MIN: usize = 2;

/// Window (in lines) for start/timestamp alignment.
pub const ALIGNMENT_WINDOW: usize = 2;

const WEIGHT_RATIO: f64 = 0.3;
const WEIGHT_DIVERSITY: f64 = 0.2;
const WEIGHT_RECURRING: f64 = 0.2;
const WEIGHT_ALIGNMENT: f64 = 0.3;

/// How the transcript marks its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Headers carry bracketed times: `Alice [9:00 AM]`.
    Tagged,
    /// Times, if any, are bare.
    Plain,
    /// A bit of both.
    Mixed,
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatKind::Tagged => write!(f, "tagged"),
            FormatKind::Plain => write!(f, "plain"),
            FormatKind::Mixed => write!(f, "mixed"),
        }
    }
}

/// Document-level indices and statistics. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentProfile {
    pub line_count: usize,
    pub start_candidates: Vec<usize>,
    pub timestamp_lines: Vec<usize>,
    pub username_lines: Vec<usize>,
    pub metadata_lines: Vec<usize>,
    pub continuation_markers: Vec<usize>,
    pub split_header_names: Vec<usize>,
    /// Lines per message, estimated as lines / start candidates.
    pub avg_message_len: f64,
    /// Normalized names seen at least twice, plus configured names.
    pub recurring_usernames: BTreeSet<String>,
    /// Distinct timestamp shapes, digits replaced by `#`.
    pub timestamp_formats: BTreeSet<String>,
    pub format: FormatKind,
    pub confidence: f64,
    #[serde(skip)]
    pub verdicts: Vec<StartVerdict>,
}

impl DocumentProfile {
    /// Whether the start predicate accepted line `i`.
    pub fn is_start(&self, i: usize) -> bool {
        self.verdicts.get(i).is_some_and(|v| v.accepted)
    }

    pub fn is_continuation_marker(&self, i: usize) -> bool {
        self.continuation_markers.binary_search(&i).is_ok()
    }

    pub fn is_split_header_name(&self, i: usize) -> bool {
        self.split_header_names.binary_search(&i).is_ok()
    }

    pub fn is_username_line(&self, i: usize) -> bool {
        self.username_lines.binary_search(&i).is_ok()
    }

    pub fn is_timestamp_line(&self, i: usize) -> bool {
        self.timestamp_lines.binary_search(&i).is_ok()
    }

    /// Whether `name` is recurring or configured.
    pub fn is_recognized(&self, name: &str) -> bool {
        self.recurring_usernames.contains(&normalize_name(name))
    }

    /// Whether `text` mentions any recognized name.
    pub fn mentions_recognized(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.recurring_usernames
            .iter()
            .any(|name| name.chars().count() >= 2 && lower.contains(name.as_str()))
    }
}

/// Builds the profile for a classified document.
pub fn build_profile(lines: &[LineRecord], config: &ParserConfig) -> DocumentProfile {
    let timestamp_lines: Vec<usize> = lines
        .iter()
        .filter(|l| l.is_timestamp_line())
        .map(|l| l.index)
        .collect();
    let metadata_lines: Vec<usize> = lines
        .iter()
        .filter(|l| l.is_metadata)
        .map(|l| l.index)
        .collect();
    let username_lines: Vec<usize> = lines
        .iter()
        .filter(|l| l.username.is_some() && !l.is_metadata)
        .map(|l| l.index)
        .collect();

    let format = classify_format(lines, &timestamp_lines);
    let seen_recurring = recurring_names(lines);
    let mut recurring_usernames = seen_recurring.clone();
    recurring_usernames.extend(config.known_names());

    let ctx = StartContext::new(lines, &recurring_usernames, format != FormatKind::Tagged);
    let verdicts = ctx.evaluate_all();
    let start_candidates: Vec<usize> = verdicts
        .iter()
        .filter(|v| v.accepted)
        .map(|v| v.line)
        .collect();
    let continuation_markers: Vec<usize> = (0..lines.len())
        .filter(|&i| ctx.is_continuation_marker(i))
        .collect();
    let split_header_names: Vec<usize> = (0..lines.len())
        .filter(|&i| ctx.is_split_header_name(i))
        .collect();

    let avg_message_len = lines.len() as f64 / start_candidates.len().max(1) as f64;

    let timestamp_formats: BTreeSet<String> = lines
        .iter()
        .filter_map(|l| l.timestamp.as_ref())
        .map(|ts| patterns::timestamp_shape(&ts.text))
        .collect();

    let confidence = document_confidence(
        &start_candidates,
        &timestamp_lines,
        timestamp_formats.len(),
        !seen_recurring.is_empty(),
    );

    if config.debug {
        for v in &verdicts {
            debug!(
                target: "pastepack",
                line = v.line,
                accepted = v.accepted,
                reason = ?v.reason,
                "start verdict"
            );
        }
        debug!(
            target: "pastepack",
            lines = lines.len(),
            candidates = start_candidates.len(),
            timestamps = timestamp_lines.len(),
            markers = continuation_markers.len(),
            %format,
            confidence,
            "document profile built"
        );
    }

    DocumentProfile {
        line_count: lines.len(),
        start_candidates,
        timestamp_lines,
        username_lines,
        metadata_lines,
        continuation_markers,
        split_header_names,
        avg_message_len,
        recurring_usernames,
        timestamp_formats,
        format,
        confidence,
        verdicts,
    }
}

fn classify_format(lines: &[LineRecord], timestamp_lines: &[usize]) -> FormatKind {
    if timestamp_lines.is_empty() {
        return FormatKind::Plain;
    }
    // Loose times inside prose say nothing about the header style.
    let anchored: Vec<usize> = timestamp_lines
        .iter()
        .copied()
        .filter(|&i| lines[i].has_opening_timestamp() || lines[i].standalone_time.is_some())
        .collect();
    if anchored.is_empty() {
        return FormatKind::Plain;
    }
    let bracketed = anchored.iter().filter(|&&i| lines[i].is_bracketed()).count();
    let share = bracketed as f64 / anchored.len() as f64;
    if share >= TAGGED_THRESHOLD {
        FormatKind::Tagged
    } else if share <= PLAIN_THRESHOLD {
        FormatKind::Plain
    } else {
        FormatKind::Mixed
    }
}

/// Names from username lines and headers that appear at least twice.
fn recurring_names(lines: &[LineRecord]) -> BTreeSet<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for line in lines {
        let name = line
            .header
            .as_ref()
            .map(|h| h.author.as_str())
            .or_else(|| line.username.as_deref().filter(|_| !line.is_metadata));
        if let Some(name) = name {
            *counts.entry(normalize_name(name)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n >= RECURRING_MIN)
        .map(|(name, _)| name)
        .collect()
}

fn document_confidence(
    starts: &[usize],
    timestamps: &[usize],
    format_variants: usize,
    has_recurring: bool,
) -> f64 {
    let ratio_score = if timestamps.is_empty() {
        0.0
    } else {
        let ratio = starts.len() as f64 / timestamps.len() as f64;
        if (0.5..=2.0).contains(&ratio) {
            WEIGHT_RATIO
        } else if (0.25..=4.0).contains(&ratio) {
            WEIGHT_RATIO / 2.0
        } else {
            0.0
        }
    };

    let diversity_score = if format_variants == 0 {
        0.0
    } else {
        WEIGHT_DIVERSITY / format_variants as f64
    };

    let recurring_score = if has_recurring { WEIGHT_RECURRING } else { 0.0 };

    let alignment_score = if starts.is_empty() {
        0.0
    } else {
        let aligned = starts
            .iter()
            .filter(|&&s| {
                timestamps
                    .iter()
                    .any(|&t| s.abs_diff(t) <= ALIGNMENT_WINDOW)
            })
            .count();
        WEIGHT_ALIGNMENT * aligned as f64 / starts.len() as f64
    };

    (ratio_score + diversity_score + recurring_score + alignment_score).clamp(0.0, 1.0)
}
