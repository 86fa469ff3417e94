//! # pastepack CLI
//!
//! Command-line interface for the pastepack library.

use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use pastepack::cli::Args;
use pastepack::core::{ProcessingStats, merge_consecutive, resolve_emoji};
use pastepack::format::{OutputFormat, to_format_string, write_to_format};
use pastepack::{PastepackError, TranscriptParser};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PastepackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if args.debug {
        init_tracing();
    }

    // Progress goes to stderr so stdout stays clean for piping.
    eprintln!("📦 pastepack v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "📂 Input:   {}",
        if args.reads_stdin() { "<stdin>" } else { args.input.as_str() }
    );
    let output_path = args.output_path().map(|p| adjust_output_extension(p, args.format));
    eprintln!("💾 Output:  {}", output_path.as_deref().unwrap_or("<stdout>"));
    if args.report {
        eprintln!("📄 Format:  report (JSON)");
    } else {
        eprintln!("📄 Format:  {}", args.format);
    }
    eprintln!();

    let config = args.parser_config()?;
    let parser = TranscriptParser::with_config(config)?;

    let content = read_input(&args)?;

    eprintln!("⏳ Segmenting {} lines...", content.lines().count());
    let parse_start = Instant::now();
    let report = parser.parse_with_report(&content);
    eprintln!(
        "   Found {} messages in {} segments, format {} ({:.2}s)",
        report.messages.len(),
        report.segments.len(),
        report.profile.format,
        parse_start.elapsed().as_secs_f64()
    );

    if args.report {
        let json = serde_json::to_string_pretty(&report)?;
        emit(output_path.as_deref(), &json)?;
        eprintln!("✅ Done!");
        return Ok(());
    }

    let original_count = report.messages.len();
    let mut messages = report.messages;
    resolve_emoji(&mut messages, parser.config());

    if args.merge {
        eprintln!("🔀 Merging consecutive messages...");
        messages = merge_consecutive(messages);
        eprintln!(
            "   Compressed to {} entries ({:.1}% reduction)",
            messages.len(),
            ProcessingStats::new(original_count, messages.len()).compression_ratio()
        );
    }

    let output_config = args.output_config();
    eprintln!("💾 Writing {}...", args.format);
    match output_path.as_deref() {
        Some(path) => write_to_format(&messages, path, args.format, &output_config)?,
        None => emit(None, &to_format_string(&messages, args.format, &output_config)?)?,
    }

    eprintln!();
    eprintln!("✅ Done!");
    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Lines:     {}", report.profile.line_count);
    eprintln!("   Messages:  {}", original_count);
    eprintln!("   Final:     {} entries", messages.len());
    eprintln!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pastepack=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(args: &Args) -> Result<String, PastepackError> {
    if args.reads_stdin() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(&args.input)?)
    }
}

/// Writes text to a file, or to stdout when no path is given.
fn emit(path: Option<&str>, text: &str) -> Result<(), PastepackError> {
    match path {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Gives an extension-less output path the format's extension.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if std::path::Path::new(output).extension().is_some() {
        return output.to_string();
    }
    format!("{}.{}", output, format.extension())
}
