//! Property-based tests for pastepack.
//!
//! Random pastes are assembled from realistic line fragments plus arbitrary
//! text, so the parser sees both plausible and hostile input.

use proptest::prelude::*;

use pastepack::core::merge_consecutive;
use pastepack::parser::{Parser, TranscriptParser};
use pastepack::{Message, ParserConfig, UNKNOWN_AUTHOR};

/// One line of a synthetic paste, drawn from fixed fragments.
fn arb_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice [9:00 AM]".to_string(),
        "Bob Martin [9:02 AM]".to_string(),
        "Jane DoeJane Doe [3:00 PM]".to_string(),
        "Carol Smith".to_string(),
        "9:05 AM".to_string(),
        "[9:01]".to_string(),
        "[12:00 PM".to_string(),
        "![](https://ca.slack-edge.com/T1-U2-x-48)".to_string(),
        ":tada: 3  👍 2".to_string(),
        "3 replies".to_string(),
        "View thread".to_string(),
        "PDF".to_string(),
        "https://example.com/some/link".to_string(),
        "> quoted text".to_string(),
        "Deploy finished, all green.".to_string(),
        "Here is the plan for the rollout tomorrow".to_string(),
        "lunch?".to_string(),
        "Привет мир".to_string(),
        "🎉🔥".to_string(),
        String::new(),
        "   ".to_string(),
    ])
}

fn arb_paste(max_lines: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..max_lines).prop_map(|lines| lines.join("\n"))
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop::sample::select(vec!["Alice", "Bob", "Carol", UNKNOWN_AUTHOR]),
        prop::sample::select(vec!["Hello", "Hi there!", "", "multi\nline", "🎉"]),
    )
        .prop_map(|(author, body)| Message::new(author, body))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Arbitrary text never panics.
    #[test]
    fn parse_never_panics(text in any::<String>()) {
        let _ = TranscriptParser::new().parse_str(&text).unwrap();
    }

    /// Returned line spans are in document order and never overlap.
    #[test]
    fn spans_are_ordered_and_disjoint(paste in arb_paste(40)) {
        let messages = TranscriptParser::new().parse_str(&paste).unwrap();
        let line_count = paste.lines().count();
        let spans: Vec<_> = messages.iter().filter_map(Message::lines).collect();
        prop_assert_eq!(spans.len(), messages.len());
        for span in &spans {
            prop_assert!(span.start <= span.end);
            prop_assert!(span.end < line_count);
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    /// Every kept message satisfies the validator's rules.
    #[test]
    fn kept_messages_are_valid(paste in arb_paste(40)) {
        let messages = TranscriptParser::new().parse_str(&paste).unwrap();
        for (i, msg) in messages.iter().enumerate() {
            if !msg.has_author() {
                prop_assert!(msg.body().chars().count() > 20);
            } else if msg.body().trim().is_empty() {
                // Header-only: must sit right before another author.
                prop_assert!(msg.timestamp().is_some());
                let next = messages.get(i + 1);
                prop_assert!(next.is_some_and(|n| n.has_author()
                    && n.author().to_lowercase() != msg.author().to_lowercase()));
            }
        }
    }

    /// Bodies are trimmed and carry no reaction counter lines.
    #[test]
    fn bodies_are_clean(paste in arb_paste(40)) {
        for msg in TranscriptParser::new().parse_str(&paste).unwrap() {
            prop_assert_eq!(msg.body(), msg.body().trim());
            prop_assert!(!msg.body().lines().any(|l| l.trim() == ":tada: 3  👍 2"));
            prop_assert!(!msg.body().lines().any(|l| l.trim() == "3 replies"));
        }
    }

    /// Parsing is a pure function of text and configuration.
    #[test]
    fn parse_is_deterministic(paste in arb_paste(30)) {
        let parser = TranscriptParser::new();
        prop_assert_eq!(parser.parse_str(&paste).unwrap(), parser.parse_str(&paste).unwrap());
    }

    /// A tiny iteration cap degrades output but never breaks ordering.
    #[test]
    fn iteration_cap_is_graceful(paste in arb_paste(40), cap in 1usize..50) {
        let parser = TranscriptParser::with_config(ParserConfig::new().with_max_iterations(cap)).unwrap();
        let messages = parser.parse_str(&paste).unwrap();
        let spans: Vec<_> = messages.iter().filter_map(Message::lines).collect();
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    /// Debug tracing has no effect on results.
    #[test]
    fn debug_flag_does_not_change_output(paste in arb_paste(30)) {
        let quiet = TranscriptParser::new();
        let chatty = TranscriptParser::with_config(ParserConfig::new().with_debug(true)).unwrap();
        prop_assert_eq!(quiet.parse_str(&paste).unwrap(), chatty.parse_str(&paste).unwrap());
    }

    // ============================================
    // MERGE PROPERTIES
    // ============================================

    /// Merge never increases message count.
    #[test]
    fn merge_never_increases_count(messages in prop::collection::vec(arb_message(), 0..20)) {
        let original = messages.len();
        prop_assert!(merge_consecutive(messages).len() <= original);
    }

    /// After merging, no two neighbours share an author.
    #[test]
    fn merge_leaves_no_adjacent_duplicates(messages in prop::collection::vec(arb_message(), 0..20)) {
        let merged = merge_consecutive(messages);
        for pair in merged.windows(2) {
            prop_assert_ne!(pair[0].author(), pair[1].author());
        }
    }
}
