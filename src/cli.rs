//! Command-line interface definition using clap.
//!
//! [`Args`] also knows how to turn itself into the library's
//! [`ParserConfig`] and [`OutputConfig`], so the binary stays thin.

use std::fs;

use clap::Parser;

use crate::config::{ParserConfig, load_string_map};
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::format::OutputFormat;

/// Placeholder for standard input / standard output.
pub const STDIO: &str = "-";

/// Segment a chat transcript pasted from Slack into structured messages.
#[derive(Parser, Debug, Clone)]
#[command(name = "pastepack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    pastepack paste.txt
    pbpaste | pastepack - -f jsonl -t --reactions
    pastepack paste.txt -o thread.csv --merge
    pastepack paste.txt --user-map users.json --emoji-map emoji.json
    pastepack paste.txt --report")]
pub struct Args {
    /// Transcript file, or '-' for standard input
    pub input: String,

    /// Output file (format follows --format); standard output when omitted
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Include header timestamps
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include reactions
    #[arg(long)]
    pub reactions: bool,

    /// Include thread markers
    #[arg(long)]
    pub threads: bool,

    /// Merge consecutive messages from the same author
    #[arg(long)]
    pub merge: bool,

    /// Emit boundary decisions as tracing events on stderr
    #[arg(long)]
    pub debug: bool,

    /// JSON object mapping display names to canonical names
    #[arg(long, value_name = "FILE")]
    pub user_map: Option<String>,

    /// JSON object mapping emoji codes to glyphs
    #[arg(long, value_name = "FILE")]
    pub emoji_map: Option<String>,

    /// Print the full parse report as JSON instead of messages
    #[arg(long)]
    pub report: bool,
}

impl Args {
    /// Whether input comes from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input == STDIO
    }

    /// Output file, if one was given and it is not `-`.
    pub fn output_path(&self) -> Option<&str> {
        self.output.as_deref().filter(|p| *p != STDIO)
    }

    /// Builds the parser configuration, reading the map files if given.
    ///
    /// # Errors
    ///
    /// Fails if a map file cannot be read, is not a flat JSON object of
    /// strings, or the resulting configuration does not validate.
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let mut config = ParserConfig::new().with_debug(self.debug);
        if let Some(path) = &self.user_map {
            config = config.with_user_map(load_string_map(&fs::read_to_string(path)?, "user_map")?);
        }
        if let Some(path) = &self.emoji_map {
            config =
                config.with_emoji_map(load_string_map(&fs::read_to_string(path)?, "emoji_map")?);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_timestamps: self.timestamps,
            include_reactions: self.reactions,
            include_threads: self.threads,
        }
    }
}
