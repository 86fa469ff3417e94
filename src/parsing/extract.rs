//! Message extractor.
//!
//! Builds one [`Message`] per finalized segment: find the header among the
//! first few non-blank lines, then sort the remaining lines into reactions,
//! a thread marker and body text.

use serde::Serialize;
use tracing::debug;

use super::boundary::Segment;
use super::classify::LineRecord;
use super::patterns::{self, HeaderMatch};
use super::profile::DocumentProfile;
use crate::config::ParserConfig;
use crate::message::{LineSpan, Message, Reaction, UNKNOWN_AUTHOR};

/// Non-blank lines searched for a header.
pub const HEADER_WINDOW: usize = 3;

/// Which header form matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRule {
    /// `Jane DoeJane Doe [3:00 PM]`
    DoubledName,
    /// `Alice [9:00 AM]`
    Bracketed,
    /// `Alice 9:00 AM`
    LooseTime,
    /// `Alice` then `9:00 AM` on the next line
    SplitLine,
    /// `Alice` alone, recognized or right after an avatar
    BareName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    rule: HeaderRule,
    author: String,
    timestamp: Option<String>,
    /// Line holding the header (the name line for split headers).
    line: usize,
    /// First line of the body.
    body_from: usize,
    /// Body text sharing the header line.
    rest: Option<String>,
}

impl Header {
    fn same_line(rule: HeaderRule, line: usize, m: HeaderMatch) -> Self {
        Self {
            rule,
            author: m.author,
            timestamp: Some(m.timestamp),
            line,
            body_from: line + 1,
            rest: (!m.rest.is_empty()).then_some(m.rest),
        }
    }
}

fn header_window(lines: &[LineRecord], segment: &Segment) -> Vec<usize> {
    lines[segment.start..=segment.end]
        .iter()
        .filter(|l| !l.is_blank)
        .take(HEADER_WINDOW)
        .map(|l| l.index)
        .collect()
}

fn find_header(
    lines: &[LineRecord],
    profile: &DocumentProfile,
    segment: &Segment,
    window: &[usize],
) -> Option<Header> {
    let same_line: [(HeaderRule, fn(&str) -> Option<HeaderMatch>); 3] = [
        (HeaderRule::DoubledName, patterns::doubled_name_header),
        (HeaderRule::Bracketed, patterns::bracket_header),
        (HeaderRule::LooseTime, patterns::loose_header),
    ];
    for (rule, matcher) in same_line {
        for &j in window {
            if let Some(m) = matcher(&lines[j].trimmed) {
                return Some(Header::same_line(rule, j, m));
            }
        }
    }

    for &j in window {
        let Some(name) = lines[j].username.as_deref() else {
            continue;
        };
        if j + 1 > segment.end {
            continue;
        }
        if let Some(time) = lines[j + 1].standalone_time.as_deref() {
            return Some(Header {
                rule: HeaderRule::SplitLine,
                author: name.to_string(),
                timestamp: Some(time.to_string()),
                line: j,
                body_from: j + 2,
                rest: None,
            });
        }
    }

    let first = window.iter().copied().find(|&j| !lines[j].is_metadata)?;
    let name = lines[first].username.as_deref()?;
    let after_avatar = lines[segment.start..first]
        .iter()
        .rev()
        .find(|l| !l.is_blank)
        .is_some_and(LineRecord::is_avatar);
    let timestamp_in_window = window.iter().any(|&j| lines[j].is_timestamp_line());
    if (profile.is_recognized(name) || after_avatar) && !timestamp_in_window {
        return Some(Header {
            rule: HeaderRule::BareName,
            author: name.to_string(),
            timestamp: None,
            line: first,
            body_from: first + 1,
            rest: None,
        });
    }
    None
}

/// Splits body lines into text, reactions and a thread marker.
#[derive(Debug, Default)]
struct BodyParts {
    text: Vec<String>,
    reactions: Vec<Reaction>,
    thread: Option<String>,
}

impl BodyParts {
    fn push_line(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.text.push(String::new());
            return;
        }
        if let Some(found) = patterns::parse_reaction_line(trimmed) {
            self.reactions
                .extend(found.into_iter().map(|(symbol, count)| Reaction::new(symbol, count)));
            return;
        }
        if patterns::is_thread_indicator(trimmed) {
            if self.thread.is_none() {
                self.thread = Some(trimmed.to_string());
            }
            return;
        }
        if patterns::is_metadata(trimmed) {
            return;
        }
        self.text.push(raw.trim_end().to_string());
    }

    fn body(&self) -> String {
        self.text.join("\n").trim().to_string()
    }
}

/// Extracts the message held by one segment.
pub fn extract_message(
    lines: &[LineRecord],
    profile: &DocumentProfile,
    segment: &Segment,
    config: &ParserConfig,
) -> Message {
    let window = header_window(lines, segment);
    let header = find_header(lines, profile, segment, &window);

    let mut parts = BodyParts::default();
    let body_from = match &header {
        Some(h) => {
            for line in &lines[segment.start..h.line] {
                if !line.is_blank && !line.is_metadata {
                    parts.push_line(&line.raw);
                }
            }
            if let Some(rest) = &h.rest {
                parts.push_line(rest);
            }
            h.body_from
        }
        None => segment.start,
    };
    for line in lines.iter().take(segment.end + 1).skip(body_from) {
        parts.push_line(&line.raw);
    }

    let author = match &header {
        Some(h) => config
            .canonical_name(&h.author)
            .unwrap_or(h.author.as_str())
            .to_string(),
        None => UNKNOWN_AUTHOR.to_string(),
    };

    if config.debug {
        debug!(
            target: "pastepack",
            start = segment.start,
            end = segment.end,
            rule = ?header.as_ref().map(|h| h.rule),
            author = %author,
            "extracted message"
        );
    }

    let mut message = Message::new(author, parts.body())
        .with_reactions(parts.reactions)
        .with_lines(LineSpan::new(segment.start, segment.end));
    if let Some(ts) = header
        .and_then(|h| h.timestamp)
        .filter(|ts| !ts.is_empty())
    {
        message = message.with_timestamp(ts);
    }
    if let Some(marker) = parts.thread {
        message = message.with_thread(marker);
    }
    message
}

/// Extracts one message per segment, in order.
pub fn extract_messages(
    lines: &[LineRecord],
    profile: &DocumentProfile,
    segments: &[Segment],
    config: &ParserConfig,
) -> Vec<Message> {
    segments
        .iter()
        .map(|seg| extract_message(lines, profile, seg, config))
        .collect()
}
