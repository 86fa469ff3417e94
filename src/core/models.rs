//! Output configuration.

use serde::{Deserialize, Serialize};

/// Controls which optional message fields the writers emit.
///
/// Author and body are always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include header timestamp text
    pub include_timestamps: bool,
    /// Include parsed reactions
    pub include_reactions: bool,
    /// Include thread markers
    pub include_threads: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything on.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_reactions: true,
            include_threads: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_reactions(mut self) -> Self {
        self.include_reactions = true;
        self
    }

    #[must_use]
    pub fn with_threads(mut self) -> Self {
        self.include_threads = true;
        self
    }
}
