//! Synthetic Slack paste generator for stress testing pastepack.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [style]
//! Example: cargo run --features gen-test --bin gen_test -- 50000 heavy_paste.txt mixed
//!
//! Styles: `bracketed` (every header `Name [h:mm AM]`), `mixed` (all header
//! shapes, avatars, continuations, UI noise) and `toxic` (mixed plus
//! garbage lines, zalgo and giant bodies).

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

const ZALGO_CHARS: &[char] = &[
    '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0308}', '\u{030A}', '\u{030B}', '\u{030C}',
    '\u{0316}', '\u{0317}', '\u{031C}', '\u{0323}', '\u{0327}', '\u{0328}', '\u{0334}', '\u{0336}',
];

const AUTHORS: &[&str] = &[
    "Alice",
    "Bob Martin",
    "Carol Smith",
    "Dmitri Ivanov",
    "Mei Tanaka",
    "Omar Haddad",
    "Jane Doe",
    "Priya Patel",
];

const REACTIONS: &[&str] = &[
    ":tada:", ":+1:", ":eyes:", ":white_check_mark:", ":raised_hands:", "👍", "🎉", "🔥", "❤️",
    "😂",
];

const BODIES: &[&str] = &[
    "Deploy finished, all green.",
    "Can someone take a look at the flaky test in CI?",
    "Pushed a fix, should be good now",
    "lunch?",
    "I think we should revisit the retry policy before Friday.",
    "Here's the doc: https://docs.example.com/d/abc123/edit",
    "+1",
    "Thanks!",
    "The migration took 14 minutes on staging, so expect roughly 40 on prod.",
    "PDF",
];

const NOISE: &[&str] = &[
    "View thread",
    "(edited)",
    "Also sent to the channel",
    "Show more",
    "New messages",
    "Today",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Bracketed,
    Mixed,
    Toxic,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_paste.txt");
    let style = match args.get(3).map(|s| s.as_str()).unwrap_or("mixed") {
        "bracketed" => Style::Bracketed,
        "mixed" => Style::Mixed,
        "toxic" => Style::Toxic,
        other => {
            eprintln!("Unknown style: {}. Use 'bracketed', 'mixed' or 'toxic'", other);
            std::process::exit(1);
        }
    };

    println!("🧪 Slack Paste Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    let mut bytes_written = 0usize;

    for i in 0..count {
        let block = generate_message(&mut rng, i, style);
        bytes_written += block.len();
        writer.write_all(block.as_bytes())?;

        if style == Style::Toxic && i % 500 == 250 {
            let garbage = generate_garbage_line(&mut rng);
            bytes_written += garbage.len();
            writer.write_all(garbage.as_bytes())?;
        }

        if (i + 1) % 10_000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn clock(index: usize) -> (usize, usize, &'static str) {
    let minutes = 9 * 60 + index;
    let hour24 = (minutes / 60) % 24;
    let hour = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    let ampm = if hour24 < 12 { "AM" } else { "PM" };
    (hour, minutes % 60, ampm)
}

fn header(rng: &mut impl Rng, author: &str, index: usize, style: Style) -> String {
    let (h, m, ampm) = clock(index);
    if style == Style::Bracketed {
        return format!("{} [{}:{:02} {}]\n", author, h, m, ampm);
    }
    match rng.gen_range(0..5) {
        0 => format!("{} [{}:{:02} {}]\n", author, h, m, ampm),
        1 => format!(
            "![](https://ca.slack-edge.com/T0123-U{:04}-abc-48)\n{}{} [{}:{:02} {}](https://acme.slack.com/archives/C01/p{})\n",
            index % 10_000,
            author,
            author,
            h,
            m,
            ampm,
            1_700_000_000 + index
        ),
        2 => format!("{}  {}:{:02} {}\n", author, h, m, ampm),
        3 => format!("{}\n{}:{:02} {}\n", author, h, m, ampm),
        _ => format!(
            "![](https://ca.slack-edge.com/T0123-U{:04}-abc-48)\n{} [{}:{:02} {}]\n",
            index % 10_000,
            author,
            h,
            m,
            ampm
        ),
    }
}

fn generate_message(rng: &mut impl Rng, index: usize, style: Style) -> String {
    let author = AUTHORS.choose(rng).copied().unwrap_or("Alice");
    let mut block = header(rng, author, index, style);

    block.push_str(&generate_body(rng, index, style));
    block.push('\n');

    if style != Style::Bracketed && rng.gen_bool(0.2) {
        let (h, m, _) = clock(index);
        block.push_str(&format!("\n[{}:{:02}]\n\n", h, (m + 1) % 60));
        block.push_str(BODIES.choose(rng).copied().unwrap_or("more"));
        block.push('\n');
    }

    if rng.gen_bool(0.3) {
        let reactions: Vec<String> = (0..rng.gen_range(1..=3))
            .map(|_| {
                let symbol = REACTIONS.choose(rng).copied().unwrap_or(":+1:");
                format!("{} {}", symbol, rng.gen_range(1..=12))
            })
            .collect();
        block.push_str(&reactions.join("  "));
        block.push('\n');
    }

    if rng.gen_bool(0.1) {
        block.push_str(&format!("{} replies\n", rng.gen_range(2..=30)));
    }

    if style != Style::Bracketed && rng.gen_bool(0.1) {
        block.push_str(NOISE.choose(rng).copied().unwrap_or("View thread"));
        block.push('\n');
    }

    block.push('\n');
    block
}

fn generate_body(rng: &mut impl Rng, index: usize, style: Style) -> String {
    if style != Style::Toxic {
        return BODIES.choose(rng).copied().unwrap_or("hi").to_string();
    }
    match index % 12 {
        0..=5 => BODIES.choose(rng).copied().unwrap_or("hi").to_string(),
        6 => format!("Message with semicolons; here; and \"quotes\" #{}", index),
        7 => "first paragraph\n\nsecond paragraph after a blank line".to_string(),
        8 => generate_zalgo("This is zalgo text", rng),
        9 => format!("Giant message #{}: {}", index, "X".repeat(20_000)),
        10 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),
        _ => format!("Control chars: \x01\x02 #{}", index),
    }
}

fn generate_zalgo(text: &str, rng: &mut impl Rng) -> String {
    let mut result = String::new();
    for c in text.chars() {
        result.push(c);
        for _ in 0..rng.gen_range(1..=6) {
            result.push(ZALGO_CHARS[rng.gen_range(0..ZALGO_CHARS.len())]);
        }
    }
    result
}

fn generate_garbage_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..6) {
        0 => "This line has no header at all and just rambles on\n".to_string(),
        1 => "[12:00 PM\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        3 => "\n\n\n".to_string(),
        4 => "acme-corp/widget-factory\n".to_string(),
        _ => "a\nb\nc\nd\ne\n".to_string(),
    }
}
