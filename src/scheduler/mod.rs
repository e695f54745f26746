//! The dose-occurrence scheduler.
//!
//! Two pure, stateless pieces:
//! - `generate` expands one schedule's recurrence rule into the concrete
//!   occurrences falling inside a time window, and
//! - `classify` reconciles occurrences against recorded taken doses and
//!   sorts each one into a time bucket relative to "now".
//!
//! "Now" is always an explicit argument; nothing in this module reads a
//! system clock, so every computation is deterministic and replayable.

pub mod classify;
pub mod generate;

pub use classify::{classify, Bucket, ClassifiedDose, DUE_NOW_WINDOW_MS};
pub use generate::{generate, Occurrence};
