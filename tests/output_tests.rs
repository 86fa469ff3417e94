//! Output writer tests through the public API.
//!
//! Every writer honours [`OutputConfig`]: author and body always, timestamp,
//! reactions and thread marker only when enabled.

use pastepack::core::models::OutputConfig;
use pastepack::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use pastepack::format::{OutputFormat, to_format_string, write_to_format};
use pastepack::{Message, Reaction};
use std::fs;
use tempfile::tempdir;

fn sample_messages() -> Vec<Message> {
    vec![
        Message::new("Alice", "Deploy finished, all green.")
            .with_timestamp("9:00 AM")
            .with_reaction(Reaction::new(":tada:", 3))
            .with_reaction(Reaction::new("👍", 2))
            .with_thread("3 replies"),
        Message::new("Bob Martin", "Nice! Any issues?").with_timestamp("9:02 AM"),
        Message::unattributed("picking this up again after lunch"),
    ]
}

fn parse_csv(content: &str) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_reader(content.as_bytes())
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

// ============================================================================
// JSON
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&sample_messages(), path.to_str().unwrap(), &OutputConfig::new()).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["author"], "Alice");
        assert_eq!(arr[2]["author"], "Unknown");
        for item in arr {
            let obj = item.as_object().unwrap();
            assert_eq!(obj.len(), 2, "{obj:?}");
        }
    }

    #[test]
    fn test_write_json_with_all_metadata() {
        let json = to_json(&sample_messages(), &OutputConfig::all()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["timestamp"], "9:00 AM");
        assert_eq!(parsed[0]["reactions"][1]["symbol"], "👍");
        assert_eq!(parsed[0]["reactions"][1]["count"], 2);
        assert_eq!(parsed[0]["thread"], "3 replies");

        // Absent values stay absent even when enabled.
        assert!(parsed[1].get("reactions").is_none());
        assert!(parsed[1].get("thread").is_none());
        assert!(parsed[2].get("timestamp").is_none());
    }

    #[test]
    fn test_write_json_empty_messages() {
        let json = to_json(&[], &OutputConfig::all()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_write_json_unicode() {
        let messages = vec![Message::new("Мария", "Привет 🎉 こんにちは")];
        let json = to_json(&messages, &OutputConfig::new()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["author"], "Мария");
        assert_eq!(parsed[0]["body"], "Привет 🎉 こんにちは");
    }
}

// ============================================================================
// JSONL
// ============================================================================

mod jsonl_writer_tests {
    use super::*;

    #[test]
    fn test_write_jsonl_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        write_jsonl(&sample_messages(), path.to_str().unwrap(), &OutputConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(v["author"].is_string());
        }
    }

    #[test]
    fn test_multiline_body_stays_on_one_line() {
        let messages = vec![Message::new("Alice", "first\n\nsecond")];
        let jsonl = to_jsonl(&messages, &OutputConfig::new()).unwrap();
        assert_eq!(jsonl.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(jsonl.trim_end()).unwrap();
        assert_eq!(v["body"], "first\n\nsecond");
    }

    #[test]
    fn test_write_jsonl_empty_messages() {
        assert!(to_jsonl(&[], &OutputConfig::all()).unwrap().is_empty());
    }
}

// ============================================================================
// CSV
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_header_follows_config() {
        let minimal = to_csv(&[], &OutputConfig::new()).unwrap();
        assert_eq!(minimal.trim_end(), "Author;Body");

        let full = to_csv(&[], &OutputConfig::all()).unwrap();
        assert_eq!(full.trim_end(), "Timestamp;Author;Body;Reactions;Thread");

        let threads_only = to_csv(&[], &OutputConfig::new().with_threads()).unwrap();
        assert_eq!(threads_only.trim_end(), "Author;Body;Thread");
    }

    #[test]
    fn test_all_columns_round_through_reader() {
        let csv = to_csv(&sample_messages(), &OutputConfig::all()).unwrap();
        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[1],
            vec!["9:00 AM", "Alice", "Deploy finished, all green.", ":tada: 3, 👍 2", "3 replies"]
        );
        assert_eq!(rows[2], vec!["9:02 AM", "Bob Martin", "Nice! Any issues?", "", ""]);
        assert_eq!(rows[3][1], "Unknown");
    }

    #[test]
    fn test_write_csv_escapes_delimiter_and_quotes() {
        let messages = vec![Message::new("Alice", r#"a; b "quoted" c"#)];
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&messages, path.to_str().unwrap(), &OutputConfig::new()).unwrap();

        let rows = parse_csv(&fs::read_to_string(&path).unwrap());
        assert_eq!(rows[1][1], r#"a; b "quoted" c"#);
    }

    #[test]
    fn test_write_csv_multiline_body() {
        let messages = vec![Message::new("Alice", "None so far\n\n[9:04]\n\nmore")];
        let csv = to_csv(&messages, &OutputConfig::new()).unwrap();
        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], "None so far\n\n[9:04]\n\nmore");
    }
}

// ============================================================================
// Format dispatch
// ============================================================================

mod format_dispatch_tests {
    use super::*;

    #[test]
    fn test_to_format_string_matches_direct_writers() {
        let messages = sample_messages();
        let config = OutputConfig::new().with_timestamps();
        assert_eq!(
            to_format_string(&messages, OutputFormat::Csv, &config).unwrap(),
            to_csv(&messages, &config).unwrap()
        );
        assert_eq!(
            to_format_string(&messages, OutputFormat::Json, &config).unwrap(),
            to_json(&messages, &config).unwrap()
        );
        assert_eq!(
            to_format_string(&messages, OutputFormat::Jsonl, &config).unwrap(),
            to_jsonl(&messages, &config).unwrap()
        );
    }

    #[test]
    fn test_write_to_format_every_format() {
        let dir = tempdir().unwrap();
        let messages = sample_messages();
        for &format in OutputFormat::all() {
            let path = dir.path().join(format!("out.{}", format.extension()));
            let path = path.to_str().unwrap();
            write_to_format(&messages, path, format, &OutputConfig::all()).unwrap();
            assert_eq!(OutputFormat::from_path(path).unwrap(), format);
            assert!(fs::read_to_string(path).unwrap().contains("Bob Martin"));
        }
    }

    #[test]
    fn test_write_to_unwritable_path_fails() {
        let err = write_to_format(
            &sample_messages(),
            "/nonexistent-dir/out.json",
            OutputFormat::Json,
            &OutputConfig::new(),
        )
        .unwrap_err();
        assert!(err.is_io());
    }
}
