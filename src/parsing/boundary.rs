//! Boundary resolver.
//!
//! Turns the profile's start candidates into ordered, non-overlapping
//! [`Segment`]s:
//!
//! 1. rank candidates and drop the ones scoring zero or less
//! 2. cut the document at the surviving candidates
//! 3. score each segment ([`segment_confidence`])
//! 4. extend segments over continuation markers, merging a segment into the
//!    next when a marker near its end reaches across the boundary
//! 5. drop low-confidence segments
//! 6. fold continuation markers that trail a segment into it
//!
//! Segments live in one `Vec` and are mutated in place. Every loop draws from
//! a shared step budget ([`ParserConfig::max_iterations`]), so pathological
//! input ends the resolution early instead of running long.

use serde::Serialize;
use tracing::debug;

use super::classify::{LengthClass, LineRecord};
use super::profile::DocumentProfile;
use crate::config::ParserConfig;

/// Segments at or below this confidence are discarded.
pub const MIN_SEGMENT_CONFIDENCE: f64 = 0.3;

/// A marker this close to a segment's end may merge it with the next one.
pub const MERGE_WINDOW: usize = 5;

/// Blank runs are absorbed unless the next content is further than this
/// from the marker and could start a message.
pub const CONTINUATION_BLANK_GAP: usize = 3;

/// Within this many lines of a marker, only a full header or avatar stops it.
pub const CONTINUATION_NEAR: usize = 4;

// Ranking weights
const RANK_TIMESTAMP_NEAR: i32 = 3;
const RANK_BLANK_BEFORE: i32 = 2;
const RANK_RECURRING_NAME: i32 = 2;
const RANK_CAPITALIZED: i32 = 1;
const RANK_SHORT_LINE: i32 = 1;
const RANK_METADATA: i32 = -3;
const RANK_TYPICAL_DISTANCE: i32 = 1;

// Confidence weights
const CONF_LENGTH_FULL: f64 = 0.30;
const CONF_LENGTH_PARTIAL: f64 = 0.15;
const CONF_AUTHOR: f64 = 0.25;
const CONF_TIMESTAMP: f64 = 0.25;
const CONF_CONTENT: f64 = 0.20;

/// A contiguous line range believed to hold one message. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            confidence: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Segments always hold at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// A start candidate with its ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedStart {
    pub line: usize,
    pub score: i32,
}

/// Scores every start candidate.
///
/// The result is sorted by descending score, ties by ascending line.
pub fn rank_candidates(lines: &[LineRecord], profile: &DocumentProfile) -> Vec<RankedStart> {
    let avg = profile.avg_message_len;
    let mut prev: Option<usize> = None;
    let mut ranked: Vec<RankedStart> = profile
        .start_candidates
        .iter()
        .map(|&i| {
            let line = &lines[i];
            let mut score = 0;

            let lo = i.saturating_sub(2);
            let hi = (i + 2).min(lines.len() - 1);
            if (lo..=hi).any(|j| lines[j].is_timestamp_line()) {
                score += RANK_TIMESTAMP_NEAR;
            }
            if line.context.blank_before {
                score += RANK_BLANK_BEFORE;
            }
            if profile.mentions_recognized(&line.trimmed) {
                score += RANK_RECURRING_NAME;
            }
            if line.features.starts_capital {
                score += RANK_CAPITALIZED;
            }
            if line.length == LengthClass::Short {
                score += RANK_SHORT_LINE;
            }
            if line.is_noise() {
                score += RANK_METADATA;
            }
            if let Some(p) = prev {
                let distance = (i - p) as f64;
                if distance >= 0.5 * avg && distance <= 2.0 * avg {
                    score += RANK_TYPICAL_DISTANCE;
                }
            }
            prev = Some(i);

            RankedStart { line: i, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.line.cmp(&b.line)));
    ranked
}

/// Confidence that a segment holds a real message, in `[0, 1]`.
pub fn segment_confidence(
    lines: &[LineRecord],
    profile: &DocumentProfile,
    segment: &Segment,
) -> f64 {
    let avg = profile.avg_message_len;
    let mut score = 0.0;

    if avg > 0.0 {
        let ratio = segment.len() as f64 / avg;
        if (0.2..=3.0).contains(&ratio) {
            score += CONF_LENGTH_FULL;
        } else if (0.1..=5.0).contains(&ratio) {
            score += CONF_LENGTH_PARTIAL;
        }
    }

    let head = segment.start..=(segment.start + 1).min(segment.end);
    if head.clone().any(|j| {
        profile.is_username_line(j) || lines[j].header.is_some() || profile.is_split_header_name(j)
    }) {
        score += CONF_AUTHOR;
    }
    if head.into_iter().any(|j| profile.is_timestamp_line(j)) {
        score += CONF_TIMESTAMP;
    }
    if lines[segment.start..=segment.end]
        .iter()
        .any(|l| !l.is_blank && !l.is_metadata)
    {
        score += CONF_CONTENT;
    }

    f64::clamp(score, 0.0, 1.0)
}

/// Shared step budget for every resolution loop.
struct Budget {
    remaining: usize,
    exhausted: bool,
}

impl Budget {
    fn new(cap: usize) -> Self {
        Self {
            remaining: cap,
            exhausted: false,
        }
    }

    fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            self.exhausted = true;
            return false;
        }
        self.remaining -= 1;
        true
    }
}

struct Resolver<'a> {
    lines: &'a [LineRecord],
    profile: &'a DocumentProfile,
    next_non_blank: Vec<Option<usize>>,
    budget: Budget,
    debug: bool,
}

impl<'a> Resolver<'a> {
    fn new(lines: &'a [LineRecord], profile: &'a DocumentProfile, config: &ParserConfig) -> Self {
        let mut next_non_blank = vec![None; lines.len()];
        let mut upcoming = None;
        for i in (0..lines.len()).rev() {
            next_non_blank[i] = upcoming;
            if !lines[i].is_blank {
                upcoming = Some(i);
            }
        }
        Self {
            lines,
            profile,
            next_non_blank,
            budget: Budget::new(config.max_iterations),
            debug: config.debug,
        }
    }

    /// Last line a continuation marker at `marker` absorbs.
    fn continuation_end(&mut self, marker: usize) -> usize {
        let n = self.lines.len();
        let mut end = marker;
        let mut j = marker + 1;

        while j < n {
            if !self.budget.tick() {
                break;
            }
            let line = &self.lines[j];

            if line.is_blank {
                match self.next_non_blank[j] {
                    None => return n - 1,
                    Some(k) if k - marker > CONTINUATION_BLANK_GAP && self.profile.is_start(k) => {
                        return end;
                    }
                    Some(_) => {
                        end = j;
                        j += 1;
                        continue;
                    }
                }
            }

            if j - marker <= CONTINUATION_NEAR {
                if line.header.is_some() || line.is_avatar() || self.profile.is_split_header_name(j) {
                    return end;
                }
            } else if self.profile.is_start(j) {
                return end;
            }

            end = j;
            j += 1;
        }
        end
    }

    fn markers_in(&self, start: usize, end: usize) -> Vec<usize> {
        self.profile
            .continuation_markers
            .iter()
            .copied()
            .filter(|&m| m > start && m <= end)
            .collect()
    }

    /// Intra-segment extension and merging.
    fn extend_and_merge(&mut self, segments: &mut Vec<Segment>) {
        let n = self.lines.len();
        let mut i = 0;

        while i < segments.len() {
            if !self.budget.tick() {
                break;
            }
            let seg = segments[i];
            let next_start = segments.get(i + 1).map(|s| s.start);

            let mut reach = seg.end;
            let mut bridges = false;
            for marker in self.markers_in(seg.start, seg.end) {
                let marker_end = self.continuation_end(marker);
                if let Some(next) = next_start {
                    if marker_end >= next && seg.end - marker < MERGE_WINDOW {
                        bridges = true;
                    }
                }
                reach = reach.max(marker_end);
            }

            if bridges {
                let next = segments.remove(i + 1);
                if self.debug {
                    debug!(
                        target: "pastepack",
                        start = seg.start,
                        end = seg.end,
                        next_start = next.start,
                        next_end = next.end,
                        "merging segments bridged by continuation"
                    );
                }
                segments[i].end = next.end;
                segments[i].confidence = seg.confidence.max(next.confidence);
                continue;
            }

            let limit = next_start.map_or(n - 1, |s| s - 1);
            segments[i].end = reach.min(limit).max(seg.end);
            i += 1;
        }
    }

    /// Folds continuation markers that directly follow a segment into it.
    fn fold_trailing_markers(&mut self, segments: &mut [Segment]) {
        let n = self.lines.len();
        for i in 0..segments.len() {
            let limit = segments.get(i + 1).map_or(n, |s| s.start);
            loop {
                if !self.budget.tick() {
                    return;
                }
                let Some(k) = self.next_non_blank[segments[i].end] else {
                    break;
                };
                if k >= limit || !self.profile.is_continuation_marker(k) {
                    break;
                }
                let reach = self.continuation_end(k).min(limit - 1).max(k);
                if self.debug {
                    debug!(target: "pastepack", marker = k, start = segments[i].start, end = reach, "folding trailing continuation");
                }
                segments[i].end = reach;
            }
        }
    }
}

/// Cuts the document at `starts` (sorted ascending).
///
/// Content before the first start becomes its own segment; a document
/// without starts is one segment.
fn cut_segments(lines: &[LineRecord], starts: &[usize]) -> Vec<Segment> {
    let n = lines.len();
    let has_content = |range: &[LineRecord]| range.iter().any(|l| !l.is_blank && !l.is_noise());

    let Some(&first) = starts.first() else {
        return if has_content(lines) {
            vec![Segment::new(0, n - 1)]
        } else {
            Vec::new()
        };
    };

    let mut segments = Vec::with_capacity(starts.len() + 1);
    if first > 0 && has_content(&lines[..first]) {
        segments.push(Segment::new(0, first - 1));
    }
    for (k, &start) in starts.iter().enumerate() {
        let end = starts.get(k + 1).map_or(n - 1, |&next| next - 1);
        segments.push(Segment::new(start, end));
    }
    segments
}

/// Resolves the final, ordered, non-overlapping segments of a document.
pub fn resolve_segments(
    lines: &[LineRecord],
    profile: &DocumentProfile,
    config: &ParserConfig,
) -> Vec<Segment> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut resolver = Resolver::new(lines, profile, config);

    let ranked = rank_candidates(lines, profile);
    if config.debug {
        for r in &ranked {
            debug!(target: "pastepack", line = r.line, score = r.score, "ranked start candidate");
        }
    }
    let mut starts: Vec<usize> = ranked.iter().filter(|r| r.score > 0).map(|r| r.line).collect();
    starts.sort_unstable();

    let mut segments = cut_segments(lines, &starts);
    for seg in &mut segments {
        seg.confidence = segment_confidence(lines, profile, seg);
    }

    resolver.extend_and_merge(&mut segments);

    segments.retain(|seg| {
        let keep = seg.confidence > MIN_SEGMENT_CONFIDENCE;
        if !keep && config.debug {
            debug!(
                target: "pastepack",
                start = seg.start,
                end = seg.end,
                confidence = seg.confidence,
                "dropping low-confidence segment"
            );
        }
        keep
    });

    resolver.fold_trailing_markers(&mut segments);

    if resolver.budget.exhausted && config.debug {
        debug!(
            target: "pastepack",
            cap = config.max_iterations,
            "iteration cap reached, boundaries left as resolved so far"
        );
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::classify::classify_lines;
    use crate::parsing::profile::build_profile;

    fn resolve_with(text: &str, config: &ParserConfig) -> Vec<(usize, usize)> {
        let lines = classify_lines(text);
        let profile = build_profile(&lines, config);
        resolve_segments(&lines, &profile, config)
            .into_iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    fn resolve(text: &str) -> Vec<(usize, usize)> {
        resolve_with(text, &ParserConfig::default())
    }

    #[test]
    fn test_empty_document() {
        assert!(resolve("").is_empty());
        assert!(resolve("\n\n  \n").is_empty());
    }

    #[test]
    fn test_headerless_document_is_one_segment() {
        assert_eq!(resolve("just some text\nmore text"), vec![(0, 1)]);
    }

    #[test]
    fn test_consecutive_headers() {
        let text = "Alice [9:00 AM]\nHello\n\nBob [9:02 AM]\nHi\n\nCarol [9:03 AM]\nHey";
        assert_eq!(resolve(text), vec![(0, 2), (3, 5), (6, 7)]);
    }

    #[test]
    fn test_preamble_segment() {
        let text = "leftover from an earlier message\n\nAlice [9:00 AM]\nHello\nBob [9:01 AM]\nYo";
        let segments = resolve(text);
        assert_eq!(segments[0], (0, 1));
        assert_eq!(segments[1].0, 2);
    }

    #[test]
    fn test_continuation_stays_inside_segment() {
        let text = "Alice [9:00 AM]\n\nHello\n\n[9:01]\n\nworld";
        assert_eq!(resolve(text), vec![(0, 6)]);
    }

    #[test]
    fn test_continuation_merges_into_known_name_start() {
        // "Bob" is recognized but sits right under a continuation marker, so
        // the marker's reach swallows it.
        let text = "Alice [9:00 AM]\nHello\n\n[9:01]\nBob\nmore from alice\n\nBob [9:05 AM]\nreply";
        let segments = resolve(text);
        assert_eq!(segments, vec![(0, 6), (7, 8)]);
    }

    #[test]
    fn test_ranking_order() {
        let text = "Alice [9:00 AM]\nHello\n\nBob [9:02 AM]\nHi";
        let lines = classify_lines(text);
        let profile = build_profile(&lines, &ParserConfig::default());
        let ranked = rank_candidates(&lines, &profile);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.score > 0));
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_segment_confidence_terms() {
        let text = "Alice [9:00 AM]\nHello";
        let lines = classify_lines(text);
        let profile = build_profile(&lines, &ParserConfig::default());
        let full = segment_confidence(&lines, &profile, &Segment::new(0, 1));
        assert!((full - 1.0).abs() < 1e-9);

        let lines = classify_lines("3 replies\nView thread");
        let profile = build_profile(&lines, &ParserConfig::default());
        let noise = segment_confidence(&lines, &profile, &Segment::new(0, 1));
        assert!(noise <= MIN_SEGMENT_CONFIDENCE);
    }

    #[test]
    fn test_segments_are_ordered_and_disjoint() {
        let text = "![](https://ca.slack-edge.com/a-48)\nAlice [9:00 AM]\nfirst\n[9:01]\nsecond\n\nBob [9:02 AM]\n:+1: 2\n\n[9:03]\n";
        let segments = resolve(text);
        for pair in segments.windows(2) {
            assert!(pair[0].1 < pair[1].0);
        }
        for (s, e) in segments {
            assert!(s <= e);
        }
    }

    #[test]
    fn test_iteration_cap_is_graceful() {
        let text = "Alice [9:00 AM]\nHello\n[9:01]\n\nmore\n\nBob [9:02 AM]\nHi";
        let config = ParserConfig::new().with_max_iterations(1);
        let segments = resolve_with(text, &config);
        assert!(!segments.is_empty());
        for pair in segments.windows(2) {
            assert!(pair[0].1 < pair[1].0);
        }
    }
}
