//! Incremental status cache keyed by entity id.
//!
//! [`StatusCache`] is seeded once at startup and then patched by
//! [`StatusCache::run`] from the event bus, one entry per change event.
//! Dashboard reads come from here instead of re-querying whole tables.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hopelink_core::types::DbId;
use hopelink_core::workflow::{EntityType, StatusBreakdown};
use tokio::sync::{broadcast, RwLock};

use crate::bus::ChangeEvent;

/// Last known status of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedStatus {
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// Thread-safe map of `(entity_type, id)` to the entity's current status.
///
/// Designed to be wrapped in `Arc` and shared across the application.
pub struct StatusCache {
    entries: RwLock<HashMap<(EntityType, DbId), CachedStatus>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Bulk-load `(id, status)` rows for one entity type, read at
    /// `snapshot_at`.
    pub async fn seed<I>(&self, entity_type: EntityType, rows: I, snapshot_at: DateTime<Utc>)
    where
        I: IntoIterator<Item = (DbId, String)>,
    {
        let mut entries = self.entries.write().await;
        for (id, status) in rows {
            entries.insert(
                (entity_type, id),
                CachedStatus {
                    status,
                    updated_at: snapshot_at,
                },
            );
        }
    }

    /// Replace every entry of one entity type with a fresh table snapshot.
    ///
    /// `snapshot_at` is when the snapshot query started; entries patched by
    /// events after that instant are kept over the snapshot values.
    pub async fn resync<I>(&self, entity_type: EntityType, rows: I, snapshot_at: DateTime<Utc>)
    where
        I: IntoIterator<Item = (DbId, String)>,
    {
        let mut entries = self.entries.write().await;
        let newer: HashMap<DbId, CachedStatus> = entries
            .iter()
            .filter(|((t, _), cached)| *t == entity_type && cached.updated_at > snapshot_at)
            .map(|((_, id), cached)| (*id, cached.clone()))
            .collect();

        entries.retain(|(t, _), _| *t != entity_type);
        for (id, status) in rows {
            entries.insert(
                (entity_type, id),
                CachedStatus {
                    status,
                    updated_at: snapshot_at,
                },
            );
        }
        for (id, cached) in newer {
            entries.insert((entity_type, id), cached);
        }
    }

    /// Apply one change event.
    ///
    /// Events are ordered by their commit timestamp, not by arrival, so a
    /// change published late never overwrites one committed after it.
    /// Returns `false` when the cache already holds a newer entry for the
    /// entity, in which case the event is ignored.
    pub async fn apply(&self, event: &ChangeEvent) -> bool {
        let key = (event.entity_type, event.entity_id);
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(&key) {
            if existing.updated_at > event.timestamp {
                return false;
            }
        }
        entries.insert(
            key,
            CachedStatus {
                status: event.new_status().to_string(),
                updated_at: event.timestamp,
            },
        );
        true
    }

    pub async fn get(&self, entity_type: EntityType, id: DbId) -> Option<CachedStatus> {
        self.entries.read().await.get(&(entity_type, id)).cloned()
    }

    /// Number of cached entities of one type.
    pub async fn count(&self, entity_type: EntityType) -> usize {
        self.entries
            .read()
            .await
            .keys()
            .filter(|(t, _)| *t == entity_type)
            .count()
    }

    /// Status breakdown computed from the cached values.
    pub async fn breakdown(&self, entity_type: EntityType) -> StatusBreakdown {
        let entries = self.entries.read().await;
        StatusBreakdown::from_statuses(
            entity_type,
            entries
                .iter()
                .filter(|((t, _), _)| *t == entity_type)
                .map(|(_, cached)| Some(cached.status.as_str())),
        )
    }

    /// Patch the cache from the bus until the channel closes.
    pub async fn run(&self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if !self.apply(&event).await {
                        tracing::debug!(
                            event = %event.name(),
                            entity_id = event.entity_id,
                            "Ignored out-of-order change event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Status cache lagged, some changes were not applied"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, status cache updater shutting down");
                    break;
                }
            }
        }
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}
