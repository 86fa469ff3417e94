//! The segmentation engine.
//!
//! Stages, in pipeline order:
//!
//! - [`classify`] - one [`LineRecord`] per raw line
//! - [`profile`] - document-wide indices and statistics ([`DocumentProfile`])
//! - [`predicate`] - the rule chain deciding whether a line may start a message
//! - [`boundary`] - ranking, segmentation, continuation extension and merging
//! - [`extract`] - header, body, reactions and thread marker per segment
//! - [`validate`] - drops pseudo-messages
//!
//! All pattern matching goes through [`patterns`], whose probes never fail.

pub mod boundary;
pub mod classify;
pub mod extract;
pub mod patterns;
pub mod predicate;
pub mod profile;
pub mod validate;

pub use boundary::{MIN_SEGMENT_CONFIDENCE, Segment, resolve_segments};
pub use classify::{LineRecord, classify_lines};
pub use extract::extract_messages;
pub use predicate::{Reason, StartVerdict};
pub use profile::{DocumentProfile, FormatKind, build_profile};
pub use validate::validate_messages;
