use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use std::time::Duration;
use tracing::warn;

use crate::schemas::AppState;

/// How long a computed synthesis report stays in the cache.
const SYNTHESIS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Initialize application state against an explicit database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(SYNTHESIS_CACHE_TTL)
        .build();

    let admin_token = get_admin_token();

    Ok(AppState {
        db,
        cache,
        admin_token,
    })
}

/// Token required by the admin-only endpoints (the synthesis report).
/// Callers present it in the `X-Admin-Token` header.
pub fn get_admin_token() -> String {
    std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| {
        warn!("ADMIN_TOKEN not set; using the insecure default token");
        "change-me".to_string()
    })
}
