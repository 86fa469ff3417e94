//! Post-processing and output for parsed messages.
//!
//! - [`models`] - output configuration
//! - [`processor`] - message merging, emoji resolution and statistics
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use pastepack::core::{
//!     Message, OutputConfig, merge_consecutive,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod models;
pub mod output;
pub mod processor;

pub use models::OutputConfig;

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::{ProcessingStats, merge_consecutive, resolve_emoji};
