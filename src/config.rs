use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedWrangler";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Demo credentials for the local login check. This is a convenience gate
/// for a self-hosted instance, not a security boundary.
pub const DEMO_EMAIL: &str = "demo@medwrangler.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Demo User";

/// Get the application data directory
/// ~/MedWrangler/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEDWRANGLER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MedWrangler")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("medwrangler.db")
}

/// Default tracing filter when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "medwrangler=info,tower_http=info"
}

/// Address the HTTP server binds to (`MEDWRANGLER_ADDR`, default loopback)
pub fn bind_addr() -> SocketAddr {
    std::env::var("MEDWRANGLER_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)))
}
