//! Typed records for the three persisted collections.
//!
//! All coercion from storage (JSON-array day lists, RFC 3339 timestamp
//! columns) happens once, in `db::repository` — these types never carry
//! half-parsed values.

pub mod medication;
pub mod schedule;
pub mod taken;

pub use medication::Medication;
pub use schedule::Schedule;
pub use taken::TakenDose;
