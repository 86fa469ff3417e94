//! Configuration for the transcript parser.
//!
//! The parser is stateless apart from one read-only [`ParserConfig`] value,
//! supplied by the caller and never mutated mid-parse. It carries:
//!
//! - a debug flag that turns on the `tracing` decision trace
//! - a display-name → canonical-name map (used to recognize and normalize authors)
//! - an emoji-code → glyph map (exposed to downstream renderers)
//! - a defensive iteration cap for the boundary loops
//!
//! A malformed configuration is the only condition the parser rejects; call
//! [`ParserConfig::validate`] (or construct a
//! [`TranscriptParser`](crate::parser::TranscriptParser) with it) to check it
//! before parsing.
//!
//! # Example
//!
//! ```rust
//! use pastepack::config::ParserConfig;
//!
//! let config = ParserConfig::new()
//!     .with_debug(true)
//!     .with_user("Jane D.", "Jane Doe")
//!     .with_emoji(":tada:", "🎉");
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.canonical_name("jane d."), Some("Jane Doe"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PastepackError, Result};

/// Default cap on boundary-loop steps per parse.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Configuration for transcript parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Emit classification and boundary decisions through `tracing` (default: false)
    pub debug: bool,

    /// Display name → canonical author name
    pub user_map: BTreeMap<String, String>,

    /// Emoji code (`:tada:` or `tada`) → glyph
    pub emoji_map: BTreeMap<String, String>,

    /// Upper bound on boundary-loop steps per parse (default: 1,000,000)
    pub max_iterations: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            debug: false,
            user_map: BTreeMap::new(),
            emoji_map: BTreeMap::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the debug trace.
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Replaces the display-name map.
    #[must_use]
    pub fn with_user_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.user_map = map;
        self
    }

    /// Adds one display-name mapping.
    #[must_use]
    pub fn with_user(mut self, display: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.user_map.insert(display.into(), canonical.into());
        self
    }

    /// Replaces the emoji-code map.
    #[must_use]
    pub fn with_emoji_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.emoji_map = map;
        self
    }

    /// Adds one emoji-code mapping.
    #[must_use]
    pub fn with_emoji(mut self, code: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.emoji_map.insert(code.into(), glyph.into());
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = cap;
        self
    }

    /// Checks the configuration shape.
    ///
    /// # Errors
    ///
    /// Returns [`PastepackError::InvalidConfig`] when:
    /// - a user-map entry has an empty display or canonical name
    /// - an emoji-map key is not a `:code:` (letters, digits, `_`, `+`, `-`, `'`)
    ///   or maps to an empty glyph
    /// - `max_iterations` is zero
    pub fn validate(&self) -> Result<()> {
        for (display, canonical) in &self.user_map {
            if display.trim().is_empty() {
                return Err(PastepackError::invalid_config(
                    "user_map",
                    "display name must not be empty",
                ));
            }
            if canonical.trim().is_empty() {
                return Err(PastepackError::invalid_config(
                    "user_map",
                    format!("canonical name for '{display}' must not be empty"),
                ));
            }
        }

        for (code, glyph) in &self.emoji_map {
            if !is_valid_emoji_code(code) {
                return Err(PastepackError::invalid_config(
                    "emoji_map",
                    format!("'{code}' is not a valid emoji code"),
                ));
            }
            if glyph.trim().is_empty() {
                return Err(PastepackError::invalid_config(
                    "emoji_map",
                    format!("glyph for '{code}' must not be empty"),
                ));
            }
        }

        if self.max_iterations == 0 {
            return Err(PastepackError::invalid_config(
                "max_iterations",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Resolves a display name to its canonical form.
    ///
    /// Exact matches win; otherwise the lookup is case-insensitive with
    /// collapsed whitespace.
    pub fn canonical_name(&self, display: &str) -> Option<&str> {
        if let Some(canonical) = self.user_map.get(display) {
            return Some(canonical.as_str());
        }
        let wanted = normalize_name(display);
        self.user_map
            .iter()
            .find(|(key, _)| normalize_name(key) == wanted)
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Looks up the glyph for an emoji code, with or without surrounding colons.
    pub fn emoji_glyph(&self, code: &str) -> Option<&str> {
        let bare = code.trim().trim_matches(':');
        self.emoji_map
            .iter()
            .find(|(key, _)| key.trim().trim_matches(':') == bare)
            .map(|(_, glyph)| glyph.as_str())
    }

    /// Every name the map knows about (display and canonical), normalized.
    pub fn known_names(&self) -> impl Iterator<Item = String> + '_ {
        self.user_map
            .iter()
            .flat_map(|(display, canonical)| [normalize_name(display), normalize_name(canonical)])
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// # #[cfg(feature = "json-output")]
    /// # fn main() -> pastepack::Result<()> {
    /// use pastepack::config::ParserConfig;
    ///
    /// let config = ParserConfig::from_json_str(r#"{"debug": true, "user_map": {"jd": "Jane Doe"}}"#)?;
    /// assert!(config.debug);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "json-output"))]
    /// # fn main() {}
    /// ```
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PastepackError::invalid_config("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Parses a flat JSON object of strings, as used for the name and emoji maps.
///
/// Any other JSON shape is a configuration error attributed to `field`.
#[cfg(feature = "json-output")]
pub fn load_string_map(json: &str, field: &'static str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str::<BTreeMap<String, String>>(json).map_err(|e| {
        PastepackError::invalid_config(field, format!("expected an object of strings: {e}"))
    })
}

/// Lowercases and collapses whitespace so names compare loosely.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_valid_emoji_code(code: &str) -> bool {
    let bare = code.trim().trim_matches(':');
    !bare.is_empty()
        && bare
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '+' | '-' | '\''))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ParserConfig::default();
        assert!(!config.debug);
        assert!(config.user_map.is_empty());
        assert!(config.emoji_map.is_empty());
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ParserConfig::new()
            .with_debug(true)
            .with_user("jd", "Jane Doe")
            .with_emoji("tada", "🎉")
            .with_max_iterations(10);

        assert!(config.debug);
        assert_eq!(config.user_map.len(), 1);
        assert_eq!(config.emoji_map.len(), 1);
        assert_eq!(config.max_iterations, 10);
    }

    #[test]
    fn test_validate_rejects_empty_display_name() {
        let err = ParserConfig::new().with_user("  ", "Jane").validate().unwrap_err();
        assert!(err.is_invalid_config());
        assert!(err.to_string().contains("user_map"));
    }

    #[test]
    fn test_validate_rejects_empty_canonical_name() {
        let err = ParserConfig::new().with_user("jd", "").validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_validate_rejects_bad_emoji_code() {
        let err = ParserConfig::new()
            .with_emoji("not an emoji", "x")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("emoji_map"));

        let err = ParserConfig::new().with_emoji("::", "x").validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_validate_rejects_empty_glyph() {
        let err = ParserConfig::new().with_emoji(":tada:", " ").validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let err = ParserConfig::new().with_max_iterations(0).validate().unwrap_err();
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn test_canonical_name_lookup() {
        let config = ParserConfig::new().with_user("Jane  D.", "Jane Doe");
        assert_eq!(config.canonical_name("Jane  D."), Some("Jane Doe"));
        assert_eq!(config.canonical_name("jane d."), Some("Jane Doe"));
        assert_eq!(config.canonical_name("Bob"), None);
    }

    #[test]
    fn test_emoji_glyph_lookup() {
        let config = ParserConfig::new().with_emoji("tada", "🎉");
        assert_eq!(config.emoji_glyph(":tada:"), Some("🎉"));
        assert_eq!(config.emoji_glyph("tada"), Some("🎉"));
        assert_eq!(config.emoji_glyph(":wave:"), None);
    }

    #[test]
    fn test_known_names_are_normalized() {
        let config = ParserConfig::new().with_user("JD", "Jane  Doe");
        let names: Vec<String> = config.known_names().collect();
        assert!(names.contains(&"jd".to_string()));
        assert!(names.contains(&"jane doe".to_string()));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jane   Doe "), "jane doe");
        assert_eq!(normalize_name("ALICE"), "alice");
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_str() {
        let config =
            ParserConfig::from_json_str(r#"{"debug": true, "emoji_map": {":wave:": "👋"}}"#)
                .unwrap();
        assert!(config.debug);
        assert_eq!(config.emoji_glyph("wave"), Some("👋"));
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_str_rejects_bad_shape() {
        let err = ParserConfig::from_json_str(r#"{"user_map": ["not", "a", "map"]}"#).unwrap_err();
        assert!(err.is_invalid_config());

        let err = ParserConfig::from_json_str(r#"{"max_iterations": 0}"#).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_load_string_map() {
        let map = load_string_map(r#"{"jd": "Jane Doe"}"#, "user_map").unwrap();
        assert_eq!(map.get("jd").map(String::as_str), Some("Jane Doe"));

        let err = load_string_map(r#"{"jd": 42}"#, "user_map").unwrap_err();
        assert!(err.to_string().contains("user_map"));
    }
}
