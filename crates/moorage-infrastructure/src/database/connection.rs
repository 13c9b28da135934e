//! Database connection pool
//!
//! Each logical operation acquires its own pooled connection; a single
//! process-wide shared connection would serialize requests without
//! transaction isolation.

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(url)
        .await
}
