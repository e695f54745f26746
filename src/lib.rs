//! MedWrangler — a self-hosted medication tracker.
//!
//! Three flat collections (medications, schedules, taken doses) stored in
//! SQLite, a deterministic dose-occurrence scheduler over them, and an
//! axum HTTP API with demo bearer-token auth on top.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod scheduler;
