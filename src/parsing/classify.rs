//! Line classifier.
//!
//! Turns each raw line into an immutable [`LineRecord`]: the trimmed text, a
//! length class, a feature set and the blank-line context around it. Each line
//! is classified on its own; no decision here looks beyond a line's immediate
//! neighbours.

use serde::Serialize;

use super::patterns::{self, HeaderMatch, TimestampKind, TimestampMatch};

/// Upper bound (exclusive, in chars) of a [`LengthClass::Short`] line.
pub const SHORT_LINE_MAX: usize = 30;
/// Upper bound (exclusive, in chars) of a [`LengthClass::Medium`] line.
pub const MEDIUM_LINE_MAX: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Empty,
    Short,
    Medium,
    Long,
}

impl LengthClass {
    pub fn of(text: &str) -> Self {
        match text.chars().count() {
            0 => LengthClass::Empty,
            n if n < SHORT_LINE_MAX => LengthClass::Short,
            n if n < MEDIUM_LINE_MAX => LengthClass::Medium,
            _ => LengthClass::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineFeatures {
    pub has_timestamp: bool,
    pub has_url: bool,
    pub has_avatar: bool,
    pub has_emoji: bool,
    pub has_reaction: bool,
    pub starts_capital: bool,
    pub is_all_caps: bool,
    pub has_digits: bool,
}

/// Neighbouring lines and blank-line adjacency.
///
/// The start of the document counts as a blank line before the first line,
/// and the end counts as a blank line after the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineContext {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub blank_before: bool,
    pub blank_after: bool,
}

/// One classified line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub index: usize,
    pub raw: String,
    pub trimmed: String,
    pub is_blank: bool,
    pub length: LengthClass,
    pub features: LineFeatures,
    pub context: LineContext,
    /// The most precise timestamp on the line.
    pub timestamp: Option<TimestampMatch>,
    /// Time text when the line is nothing but a timestamp.
    pub standalone_time: Option<String>,
    /// Same-line name + timestamp header.
    pub header: Option<HeaderMatch>,
    /// Cleaned name when the line on its own looks like a username.
    pub username: Option<String>,
    pub is_metadata: bool,
}

impl LineRecord {
    /// Classifies a single line. Context is filled in by [`classify_lines`].
    pub fn classify(index: usize, raw: &str) -> Self {
        let trimmed = trim_line(raw).to_string();
        let is_blank = trimmed.is_empty();

        if is_blank {
            return Self {
                index,
                raw: raw.to_string(),
                trimmed,
                is_blank,
                length: LengthClass::Empty,
                features: LineFeatures::default(),
                context: LineContext::default(),
                timestamp: None,
                standalone_time: None,
                header: None,
                username: None,
                is_metadata: false,
            };
        }

        let timestamp = patterns::find_timestamp(&trimmed);
        let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
        let features = LineFeatures {
            has_timestamp: timestamp.is_some(),
            has_url: patterns::has_url(&trimmed),
            has_avatar: patterns::has_avatar(&trimmed),
            has_emoji: patterns::has_emoji(&trimmed),
            has_reaction: patterns::is_reaction_line(&trimmed),
            starts_capital: trimmed.chars().next().is_some_and(char::is_uppercase),
            is_all_caps: letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()),
            has_digits: trimmed.chars().any(|c| c.is_ascii_digit()),
        };

        Self {
            index,
            raw: raw.to_string(),
            length: LengthClass::of(&trimmed),
            features,
            context: LineContext::default(),
            standalone_time: patterns::standalone_timestamp(&trimmed),
            header: patterns::name_timestamp_header(&trimmed),
            username: patterns::username_candidate(&trimmed),
            is_metadata: patterns::is_metadata(&trimmed),
            timestamp,
            is_blank,
            trimmed,
        }
    }

    pub fn is_timestamp_line(&self) -> bool {
        self.features.has_timestamp
    }

    pub fn is_bracketed(&self) -> bool {
        self.timestamp
            .as_ref()
            .is_some_and(|ts| ts.kind == TimestampKind::Bracketed)
    }

    /// A timestamp that can open a message by itself: any header, or a
    /// bracketed, relative or dated time inside the line. Loose times in
    /// prose (`moved to 10:30`, `ships Monday`) and standalone follow-up
    /// times don't count.
    pub fn has_opening_timestamp(&self) -> bool {
        if self.header.is_some() {
            return true;
        }
        self.standalone_time.is_none()
            && self
                .timestamp
                .as_ref()
                .is_some_and(|ts| ts.kind.is_high_precision())
    }

    /// Avatar markup, which opens a message rather than belonging to one.
    pub fn is_avatar(&self) -> bool {
        self.features.has_avatar
    }

    /// Metadata other than avatar markup.
    pub fn is_noise(&self) -> bool {
        self.is_metadata && !self.is_avatar()
    }

    pub fn char_len(&self) -> usize {
        self.trimmed.chars().count()
    }
}

/// Trims whitespace plus the zero-width characters web clients leave in copies.
fn trim_line(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '\u{200B}' | '\u{FEFF}' | '\u{2060}'))
}

/// Classifies every line of `text`.
///
/// `\r\n` and `\n` line endings are both accepted.
///
/// ```
/// use pastepack::parsing::classify::classify_lines;
///
/// let lines = classify_lines("Alice [9:00 AM]\n\nHello");
/// assert_eq!(lines.len(), 3);
/// assert!(lines[0].header.is_some());
/// assert!(lines[1].is_blank);
/// assert!(lines[2].context.blank_before);
/// ```
pub fn classify_lines(text: &str) -> Vec<LineRecord> {
    let raw: Vec<&str> = text.lines().collect();
    let mut records: Vec<LineRecord> = raw
        .iter()
        .enumerate()
        .map(|(i, line)| LineRecord::classify(i, line))
        .collect();

    let blanks: Vec<bool> = records.iter().map(|r| r.is_blank).collect();
    for (i, record) in records.iter_mut().enumerate() {
        record.context = LineContext {
            prev: i.checked_sub(1).map(|p| raw[p].to_string()),
            next: raw.get(i + 1).map(|n| (*n).to_string()),
            blank_before: i == 0 || blanks[i - 1],
            blank_after: i + 1 >= blanks.len() || blanks[i + 1],
        };
    }
    records
}

/// Index of the first non-blank line after `i`.
pub fn next_non_blank(lines: &[LineRecord], i: usize) -> Option<usize> {
    lines
        .iter()
        .skip(i + 1)
        .find(|l| !l.is_blank)
        .map(|l| l.index)
}

/// Index of the last non-blank line before `i`.
pub fn prev_non_blank(lines: &[LineRecord], i: usize) -> Option<usize> {
    lines[..i.min(lines.len())]
        .iter()
        .rev()
        .find(|l| !l.is_blank)
        .map(|l| l.index)
}
