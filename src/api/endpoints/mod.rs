pub mod auth;
pub mod doses;
pub mod health;
pub mod meds;
pub mod schedules;
pub mod taken;
