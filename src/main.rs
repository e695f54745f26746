use std::io;

use tracing_subscriber::EnvFilter;

use medwrangler::api::server;
use medwrangler::api::types::ApiContext;
use medwrangler::config;
use medwrangler::db::open_database;

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let conn = open_database(&config::database_path())
        .map_err(|e| io::Error::other(format!("Database setup failed: {e}")))?;
    let ctx = ApiContext::new(conn);

    let (listener, addr) = server::bind(config::bind_addr()).await?;
    tracing::info!(%addr, "Listening");

    server::serve(listener, ctx).await
}
