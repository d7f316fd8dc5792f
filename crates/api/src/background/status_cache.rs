//! Seeding and periodic resync of the dashboard status cache.
//!
//! Change events keep the cache current between resyncs; the resync only
//! repairs drift from writes made outside this process or events dropped
//! while a receiver lagged.

use std::sync::Arc;
use std::time::Duration;

use hopelink_core::workflow::EntityType;
use hopelink_db::repositories::StatusRepo;
use hopelink_events::StatusCache;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Load every entity type's statuses into the cache.
pub async fn seed(pool: &PgPool, cache: &StatusCache) -> Result<(), sqlx::Error> {
    for entity_type in EntityType::ALL {
        let snapshot = StatusRepo::snapshot(pool, entity_type).await?;
        let count = snapshot.rows.len();
        cache.seed(entity_type, snapshot.rows, snapshot.taken_at).await;
        tracing::info!(entity_type = %entity_type, count, "Status cache seeded");
    }
    Ok(())
}

/// Re-read every table into the cache once.
///
/// Snapshots are stamped with the database clock, like change events, so
/// the cache can tell which of the two is newer.
pub async fn resync(pool: &PgPool, cache: &StatusCache) -> Result<(), sqlx::Error> {
    for entity_type in EntityType::ALL {
        let snapshot = StatusRepo::snapshot(pool, entity_type).await?;
        cache
            .resync(entity_type, snapshot.rows, snapshot.taken_at)
            .await;
    }
    Ok(())
}

/// Resync the cache every `interval` until `cancel` is triggered.
///
/// `interval` must be non-zero; [`ServerConfig`](crate::config::ServerConfig)
/// rejects a zero `CACHE_RESYNC_SECS` at startup.
pub async fn run(
    pool: PgPool,
    cache: Arc<StatusCache>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_ms = interval.as_millis() as u64, "Status cache resync job started");

    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; startup already seeded.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Status cache resync job stopping");
                break;
            }
            _ = ticker.tick() => {
                match resync(&pool, &cache).await {
                    Ok(()) => tracing::debug!("Status cache resynced"),
                    Err(e) => tracing::error!(error = %e, "Status cache resync failed"),
                }
            }
        }
    }
}
