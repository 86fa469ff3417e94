//! Line-level pattern probes.
//!
//! Every probe here is total: it takes a line of text and answers "match" or
//! "no match". Inputs longer than [`MAX_PROBE_LEN`] characters are refused at
//! the [`probe`] seam so a pathological paste cannot stall a regex scan.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Lines longer than this many characters are never probed.
pub const MAX_PROBE_LEN: usize = 10_000;

/// Lines longer than this many characters never carry a loose timestamp.
pub const LOOSE_TIMESTAMP_MAX_LEN: usize = 100;

/// Runs `f` on `text` unless the input is too long to probe safely.
pub fn probe<T>(text: &str, f: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    if text.len() > MAX_PROBE_LEN && text.chars().count() > MAX_PROBE_LEN {
        trace!(target: "pastepack", len = text.len(), "probe refused oversized line");
        return None;
    }
    f(text)
}

fn probe_bool(text: &str, f: impl FnOnce(&str) -> bool) -> bool {
    probe(text, |t| f(t).then_some(())).is_some()
}

// ============================================================================
// Timestamps
// ============================================================================

const AMPM: &str = r"(?:\s*[AaPp]\.?[Mm]\.?)?";
const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";
const WEEKDAY: &str = r"(?:Mon(?:day)?|Tue(?:s(?:day)?)?|Wed(?:nesday)?|Thu(?:rs(?:day)?)?|Fri(?:day)?|Sat(?:urday)?|Sun(?:day)?)";

/// `[9:41]`, `[9:41 AM]`, `[Today at 9:41 AM]`, optionally followed by a `(link)`.
static BRACKET_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\[\s*(?P<ts>(?:(?:Today|Yesterday)\s+at\s+|{MONTH}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?\s+at\s+)?\d{{1,2}}:\d{{2}}(?::\d{{2}})?{AMPM})\s*\](?:\([^)\s]*\))?"
    ))
    .expect("valid regex")
});

static RELATIVE_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:Today|Yesterday)\s+at\s+\d{{1,2}}:\d{{2}}{AMPM}"
    ))
    .expect("valid regex")
});

static DATED_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:{WEEKDAY},?\s+{MONTH}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b|{MONTH}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?\s+at\s+\d{{1,2}}:\d{{2}}{AMPM})"
    ))
    .expect("valid regex")
});

static LOOSE_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:\d{{1,2}}:\d{{2}}(?::\d{{2}})?{AMPM}|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b|{MONTH}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b)"
    ))
    .expect("valid regex")
});

/// A line holding nothing but a time, as Slack prints for a follow-up message.
static STANDALONE_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\[?\s*(?P<ts>(?:(?:Today|Yesterday)\s+at\s+)?\d{{1,2}}:\d{{2}}(?::\d{{2}})?{AMPM})\s*\]?(?:\([^)\s]*\))?$"
    ))
    .expect("valid regex")
});

/// Lowercase words that mark a line as prose rather than a header.
const NARRATIVE_WORDS: &[&str] = &[
    "the", "and", "but", "because", "would", "should", "could", "which", "that", "this",
    "with", "have", "has", "about", "think", "meet", "look", "at", "for", "from", "we",
    "you", "they", "was", "were", "will", "can", "just", "our", "your", "their", "then",
    "when", "what", "where", "there", "here", "into", "until", "before", "after", "let's",
    "to", "in", "on", "is", "by", "of", "it", "are", "be", "as", "or", "if", "so", "not",
    "tomorrow", "tonight", "please",
];

/// Which kind of timestamp a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampKind {
    /// `[9:41 AM]`
    Bracketed,
    /// `Today at 9:41 AM`
    Relative,
    /// `Monday, March 3rd` or `Mar 3 at 9:41`
    Dated,
    /// A bare `9:41` or day/month name that survived the prose check
    Loose,
}

impl TimestampKind {
    pub fn is_high_precision(self) -> bool {
        !matches!(self, TimestampKind::Loose)
    }
}

/// A timestamp found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampMatch {
    pub kind: TimestampKind,
    /// The matched text as it appears in the line.
    pub text: String,
}

/// Finds the most precise timestamp in a line.
///
/// The loose fallback only runs when no precise form matched, and is skipped
/// for long lines and lines containing narrative words.
pub fn find_timestamp(line: &str) -> Option<TimestampMatch> {
    probe(line, |line| {
        let precise = [
            (TimestampKind::Bracketed, &*BRACKET_TS),
            (TimestampKind::Relative, &*RELATIVE_TS),
            (TimestampKind::Dated, &*DATED_TS),
        ];
        for (kind, re) in precise {
            if let Some(m) = re.find(line) {
                return Some(TimestampMatch {
                    kind,
                    text: m.as_str().to_string(),
                });
            }
        }

        if line.chars().count() > LOOSE_TIMESTAMP_MAX_LEN || has_narrative_words(line) {
            return None;
        }
        LOOSE_TS.find(line).map(|m| TimestampMatch {
            kind: TimestampKind::Loose,
            text: m.as_str().to_string(),
        })
    })
}

/// Returns the time text if the whole line is a timestamp.
///
/// ```
/// use pastepack::parsing::patterns::standalone_timestamp;
///
/// assert_eq!(standalone_timestamp("[9:01]").as_deref(), Some("9:01"));
/// assert_eq!(standalone_timestamp("Today at 3:15 PM").as_deref(), Some("Today at 3:15 PM"));
/// assert_eq!(standalone_timestamp("Alice [9:01]"), None);
/// ```
pub fn standalone_timestamp(line: &str) -> Option<String> {
    probe(line.trim(), |line| {
        STANDALONE_TS
            .captures(line)
            .and_then(|caps| caps.name("ts"))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// Replaces every digit run with `#`, so `[9:41 AM]` and `[10:02 AM]` share a shape.
pub fn timestamp_shape(text: &str) -> String {
    let mut shape = String::with_capacity(text.len());
    let mut in_digits = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                shape.push('#');
            }
            in_digits = true;
        } else {
            shape.push(c);
            in_digits = false;
        }
    }
    shape
}

/// Returns `true` if the line contains a lowercase narrative word.
///
/// Capitalized tokens never count, so a name like "Will" is not prose.
pub fn has_narrative_words(line: &str) -> bool {
    line.split(|c: char| !(c.is_alphabetic() || c == '\''))
        .any(|word| NARRATIVE_WORDS.contains(&word))
}

// ============================================================================
// URLs, avatars, images
// ============================================================================

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)[^\s<>()\[\]]+").expect("valid regex"));

static IMAGE_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[(?P<alt>[^\]]*)\]\((?P<url>[^)\s]*)\)").expect("valid regex")
});

static LONE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[[^\]]*\]\([^)\s]*\)$").expect("valid regex"));

static LINK_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<text>[^\]]+)\]\((?:[^)\s]*)\)").expect("valid regex")
});

const AVATAR_URL_HINTS: &[&str] = &["slack-edge.com", "avatar", "gravatar", "/users"];

/// URL fragments that mark a link as the chat's own permalink form.
const THREAD_LINK_HINTS: &[&str] = &["slack.com", "/archives/", "/team/"];

pub fn has_url(line: &str) -> bool {
    probe_bool(line, |line| URL.is_match(line))
}

/// All URLs in a line, in order.
pub fn urls(line: &str) -> Vec<String> {
    probe(line, |line| {
        Some(URL.find_iter(line).map(|m| m.as_str().to_string()).collect())
    })
    .unwrap_or_default()
}

/// Returns `true` for the chat's own permalink / profile links.
pub fn is_thread_link(url: &str) -> bool {
    THREAD_LINK_HINTS.iter().any(|hint| url.contains(hint))
}

/// Returns `true` if the line contains profile-picture image markup.
pub fn has_avatar(line: &str) -> bool {
    probe_bool(line, |line| {
        IMAGE_MARKUP.captures_iter(line).any(|caps| {
            let alt = caps.name("alt").map_or("", |m| m.as_str()).to_lowercase();
            let url = caps.name("url").map_or("", |m| m.as_str()).to_lowercase();
            AVATAR_URL_HINTS.iter().any(|hint| url.contains(hint))
                || alt.contains("avatar")
                || alt.contains("profile")
        })
    })
}

/// Returns `true` if the line is a single image and nothing else.
pub fn is_lone_image(line: &str) -> bool {
    probe_bool(line.trim(), |line| LONE_IMAGE.is_match(line))
}

// ============================================================================
// Emoji and reactions
// ============================================================================

static EMOJI_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":[A-Za-z0-9_+\-']*[A-Za-z_][A-Za-z0-9_+\-']*:").expect("valid regex")
});

static EMOJI_CODE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:[A-Za-z0-9_+\-']*[A-Za-z_+][A-Za-z0-9_+\-']*:$").expect("valid regex")
});

/// Returns `true` for code points that render as (part of) an emoji.
pub fn is_emoji_char(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x1F000..=0x1F2FF
            | 0x1F1E6..=0x1F1FF
            | 0x2300..=0x23FF
            | 0x2B00..=0x2BFF
            | 0xFE0F
            | 0x200D
            | 0x20E3
            | 0xE0020..=0xE007F
    )
}

/// Returns `true` if the line has a Unicode emoji or a `:code:`.
pub fn has_emoji(line: &str) -> bool {
    probe_bool(line, |line| {
        line.chars().any(|c| is_emoji_char(c) && c != '\u{200D}' && c != '\u{FE0F}')
            || EMOJI_CODE.is_match(line)
    })
}

fn is_emoji_symbol(token: &str) -> bool {
    EMOJI_CODE_TOKEN.is_match(token)
        || (!token.is_empty() && token.chars().all(is_emoji_char))
}

/// Parses a reaction line such as `:tada: 3  👍 2` into `(symbol, count)` pairs.
///
/// Returns `None` unless every token on the line belongs to a reaction.
///
/// ```
/// use pastepack::parsing::patterns::parse_reaction_line;
///
/// let reactions = parse_reaction_line(":tada: 3 👍2").unwrap();
/// assert_eq!(reactions, vec![(":tada:".to_string(), 3), ("👍".to_string(), 2)]);
/// assert!(parse_reaction_line("Deployed 3 services").is_none());
/// ```
pub fn parse_reaction_line(line: &str) -> Option<Vec<(String, u32)>> {
    probe(line.trim(), |line| {
        let mut reactions = Vec::new();
        let mut pending: Option<String> = None;

        for token in line.split_whitespace() {
            if let Some(symbol) = pending.take() {
                let count = token.parse::<u32>().ok()?;
                reactions.push((symbol, count));
                continue;
            }

            if is_emoji_symbol(token) {
                pending = Some(token.to_string());
                continue;
            }

            // Symbol and count glued together: "👍3" or ":tada:3"
            let split = token
                .char_indices()
                .find(|(_, c)| c.is_ascii_digit())
                .map(|(i, _)| i)?;
            let (symbol, digits) = token.split_at(split);
            if symbol.is_empty() || !is_emoji_symbol(symbol) {
                return None;
            }
            reactions.push((symbol.to_string(), digits.parse::<u32>().ok()?));
        }

        if pending.is_some() || reactions.is_empty() {
            return None;
        }
        Some(reactions)
    })
}

pub fn is_reaction_line(line: &str) -> bool {
    parse_reaction_line(line).is_some()
}

// ============================================================================
// Metadata catalog
// ============================================================================

static REPLY_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s+repl(?:y|ies)\b").expect("valid regex"));

static LAST_REPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^last reply\b").expect("valid regex"));

static ADDED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^added by\s+\S").expect("valid regex"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-–—_*=~•·|]+$").expect("valid regex"));

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<?(?:https?://|www\.)\S+>?$").expect("valid regex")
});

static DATE_DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:Today|Yesterday|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday),?\s+{MONTH}\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?)$"
    ))
    .expect("valid regex")
});

const METADATA_PHRASES: &[&str] = &[
    "view thread",
    "view message",
    "view in channel",
    "show more",
    "show less",
    "(edited)",
    "edited",
    "also sent to the channel",
    "new messages",
    "new",
];

const THREAD_PHRASES: &[&str] = &["view thread", "thread"];

/// Maximum length of a line that can act as a thread marker.
pub const THREAD_MARKER_MAX_LEN: usize = 40;

/// Returns `true` if the line matches the metadata catalog.
///
/// Blank lines are not metadata.
pub fn is_metadata(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    probe_bool(line, |line| {
        let lower = line.to_lowercase();
        is_reaction_line(line)
            || REPLY_COUNT.is_match(line)
            || LAST_REPLY.is_match(line)
            || ADDED_BY.is_match(line)
            || SEPARATOR.is_match(line)
            || BARE_URL.is_match(line)
            || LONE_IMAGE.is_match(line)
            || DATE_DIVIDER.is_match(line)
            || METADATA_PHRASES.contains(&lower.as_str())
    })
}

/// Returns `true` for short thread indicators: `3 replies`, `View thread`, `Thread`.
pub fn is_thread_indicator(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() > THREAD_MARKER_MAX_LEN {
        return false;
    }
    probe_bool(line, |line| {
        REPLY_COUNT.is_match(line) || THREAD_PHRASES.contains(&line.to_lowercase().as_str())
    })
}

// ============================================================================
// Attachment credits
// ============================================================================

static OWNER_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.\-]+/[\w.\-]+$").expect("valid regex"));

static CREDIT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:language|languages|last updated|updated|stars|forks|added by)\b")
        .expect("valid regex")
});

/// File-type and service labels that show up as attachment cards.
const SERVICE_LABELS: &[&str] = &[
    "pdf", "zip", "png", "jpg", "jpeg", "gif", "csv", "docx", "xlsx", "pptx", "txt",
    "github", "gitlab", "google doc", "google docs", "google sheets", "google slides",
    "google drive", "dropbox", "figma", "notion", "jira", "confluence", "loom", "youtube",
    "zoom", "image", "video", "text", "markdown", "spreadsheet", "document", "link", "file",
    "binary", "snippet", "post",
];

/// Short conversational lines that are never display names.
const NON_NAME_WORDS: &[&str] = &[
    "thanks", "thank you", "thx", "yes", "no", "ok", "okay", "sure", "hi", "hello", "hey",
    "lol", "nice", "done", "great", "agreed", "same", "cool", "yep", "nope", "update",
    "edit", "note", "fyi", "bump", "today", "yesterday", "thread", "replies", "reply",
];

/// Returns `true` for lines that are an attachment label rather than a name.
pub fn is_service_label(line: &str) -> bool {
    SERVICE_LABELS.contains(&line.trim().to_lowercase().as_str())
}

/// Returns `true` for attachment-credit text: file labels, `owner/repo`,
/// reply counters, lone images, and "Language" / "Last updated" labels.
pub fn is_attachment_credit(line: &str) -> bool {
    let line = line.trim();
    probe_bool(line, |line| {
        is_service_label(line)
            || OWNER_REPO.is_match(line)
            || REPLY_COUNT.is_match(line)
            || LONE_IMAGE.is_match(line)
            || CREDIT_LABEL.is_match(line)
    })
}

// ============================================================================
// Names and headers
// ============================================================================

static NAME_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N}.'\-_]*$").expect("valid regex"));

static LOOSE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<name>[^\d\[\]()<>]{{1,60}}?)\s+(?P<ts>(?:(?:Today|Yesterday)\s+at\s+)?\d{{1,2}}:\d{{2}}{AMPM})$"
    ))
    .expect("valid regex")
});

/// Longest display name accepted.
pub const MAX_NAME_LEN: usize = 50;

/// Most words a display name may have.
pub const MAX_NAME_WORDS: usize = 4;

/// Returns `true` for text too short, too long or too label-like to be a name.
pub fn is_short_rejected(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if !(2..=MAX_NAME_LEN).contains(&len) {
        return true;
    }
    let lower = text.to_lowercase();
    if is_service_label(text) || NON_NAME_WORDS.contains(&lower.as_str()) {
        return true;
    }
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    len <= 5 && !letters.is_empty() && letters.iter().all(|c| c.is_uppercase())
}

/// Strips link wrappers, bold markers, emoji and trailing punctuation from a name.
///
/// ```
/// use pastepack::parsing::patterns::clean_name;
///
/// assert_eq!(clean_name("**Alice**"), "Alice");
/// assert_eq!(clean_name("[Jane Doe](https://acme.slack.com/team/U1) :palm_tree:"), "Jane Doe");
/// ```
pub fn clean_name(text: &str) -> String {
    let unwrapped = LINK_WRAPPER.replace_all(text, "$text");
    let no_codes = EMOJI_CODE.replace_all(&unwrapped, " ");
    let stripped: String = no_codes
        .replace("**", "")
        .chars()
        .filter(|c| !is_emoji_char(*c))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '-' | '–' | '—' | '|' | '·' | '•' | ':' | ','))
        .trim()
        .to_string()
}

/// Returns `true` if `name` is shaped like a display name: starts with a
/// letter, at most [`MAX_NAME_WORDS`] words, no URL.
pub fn is_name_like(name: &str) -> bool {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN || has_url(name) {
        return false;
    }
    if !name.chars().next().is_some_and(char::is_alphabetic) {
        return false;
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= MAX_NAME_WORDS
        && words.iter().all(|w| NAME_WORD.is_match(w))
}

/// Returns `true` if every word of the name is capitalized, as display names usually are.
pub fn is_title_case(name: &str) -> bool {
    name.split_whitespace()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}

/// Returns the cleaned name if the line on its own looks like a username.
///
/// Capitalized start, not a label, no URL, no timestamp, at most four words.
pub fn username_candidate(line: &str) -> Option<String> {
    probe(line.trim(), |line| {
        if has_url(line) || is_metadata(line) || find_timestamp(line).is_some() {
            return None;
        }
        let name = clean_name(line);
        let capital = name.chars().next().is_some_and(char::is_uppercase);
        (capital && !is_short_rejected(&name) && is_name_like(&name)).then_some(name)
    })
}

/// A header found on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub author: String,
    pub timestamp: String,
    /// Text following the header on the same line.
    pub rest: String,
}

/// Splits `text` into two equal halves (ignoring surrounding whitespace), if it is a doubled name.
fn undouble(text: &str) -> Option<String> {
    let text = text.trim();
    for (i, _) in text.char_indices().skip(1) {
        let (a, b) = text.split_at(i);
        let (a, b) = (a.trim(), b.trim());
        if a.chars().count() >= 2 && a == b {
            return Some(a.to_string());
        }
    }
    None
}

fn bracket_parts(line: &str) -> Option<(String, String, String)> {
    let caps = BRACKET_TS.captures(line)?;
    let whole = caps.get(0)?;
    let ts = caps.name("ts")?.as_str().trim().to_string();
    let prefix = line[..whole.start()].to_string();
    let rest = line[whole.end()..].trim().to_string();
    Some((prefix, ts, rest))
}

/// A display name rendered twice, then a bracketed time: `Jane DoeJane Doe [3:00 PM]`.
///
/// Emoji between or after the two copies are ignored.
///
/// ```
/// use pastepack::parsing::patterns::doubled_name_header;
///
/// let header = doubled_name_header("Jane DoeJane Doe [3:00 PM]").unwrap();
/// assert_eq!(header.author, "Jane Doe");
/// assert_eq!(header.timestamp, "3:00 PM");
/// ```
pub fn doubled_name_header(line: &str) -> Option<HeaderMatch> {
    probe(line.trim(), |line| {
        let (prefix, timestamp, rest) = bracket_parts(line)?;
        let author = undouble(&clean_name(&prefix))?;
        is_name_like(&author).then_some(HeaderMatch {
            author,
            timestamp,
            rest,
        })
    })
}

/// A single name then a bracketed time: `Alice [9:00 AM]`.
///
/// Rejected when the line carries a URL other than the chat's own permalinks.
pub fn bracket_header(line: &str) -> Option<HeaderMatch> {
    probe(line.trim(), |line| {
        let (prefix, timestamp, rest) = bracket_parts(line)?;
        let foreign_url = urls(&prefix)
            .iter()
            .chain(urls(&rest).iter())
            .any(|url| !is_thread_link(url));
        if foreign_url {
            return None;
        }
        let author = clean_name(&prefix);
        is_name_like(&author).then_some(HeaderMatch {
            author,
            timestamp,
            rest,
        })
    })
}

/// A name then a bare time filling the rest of the line: `Alice 9:00 AM`.
pub fn loose_header(line: &str) -> Option<HeaderMatch> {
    probe(line.trim(), |line| {
        let caps = LOOSE_HEADER.captures(line)?;
        let author = clean_name(caps.name("name")?.as_str());
        let timestamp = caps.name("ts")?.as_str().trim().to_string();
        (is_name_like(&author) && !has_narrative_words(&author)).then_some(HeaderMatch {
            author,
            timestamp,
            rest: String::new(),
        })
    })
}

/// Tries every same-line header form, most specific first.
pub fn name_timestamp_header(line: &str) -> Option<HeaderMatch> {
    doubled_name_header(line)
        .or_else(|| bracket_header(line))
        .or_else(|| loose_header(line))
}
