use super::DbPool;
use anyhow::{Result, anyhow};
use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;

/// Builds the r2d2 pool the repositories are constructed with at startup.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    diesel::r2d2::Pool::builder()
        .max_size(5)
        .build(manager)
        .map_err(|e| anyhow!("Failed to create database pool: {}", e))
}
