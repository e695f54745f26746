//! HTTP API: router, endpoints, bearer-token middleware and shared state.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;
