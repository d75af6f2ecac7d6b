use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Opens the corpus database read-only and returns a connection pool.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening corpus database...");

    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("Corpus database pool established");
    Ok(pool)
}
