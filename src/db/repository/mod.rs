//! Repository layer — one module per collection.
//!
//! Collections are independent (no cross-table foreign keys) and queries
//! are full-collection scans, which is all the occurrence scheduler needs.

pub mod medication;
pub mod schedule;
pub mod taken;

pub use medication::*;
pub use schedule::*;
pub use taken::*;
