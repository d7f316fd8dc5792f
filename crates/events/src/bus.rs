//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`ChangeEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use hopelink_core::types::DbId;
use hopelink_core::workflow::{Actor, EntityType};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// What happened to the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    /// The entity was inserted at its initial stage.
    Created { status: String },
    /// The entity's status was overwritten.
    StatusChanged { from: String, to: String },
}

/// A change to one workflow entity.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub entity_type: EntityType,
    pub entity_id: DbId,
    pub change: ChangeKind,
    /// Role that caused the change.
    pub actor: Actor,
    /// When the change was committed (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn created(
        entity_type: EntityType,
        entity_id: DbId,
        status: impl Into<String>,
        actor: Actor,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            change: ChangeKind::Created {
                status: status.into(),
            },
            actor,
            timestamp: Utc::now(),
        }
    }

    pub fn status_changed(
        entity_type: EntityType,
        entity_id: DbId,
        from: impl Into<String>,
        to: impl Into<String>,
        actor: Actor,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            change: ChangeKind::StatusChanged {
                from: from.into(),
                to: to.into(),
            },
            actor,
            timestamp: Utc::now(),
        }
    }

    /// Override the timestamp, e.g. with the committed `changed_at`.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Status the entity holds after this change.
    pub fn new_status(&self) -> &str {
        match &self.change {
            ChangeKind::Created { status } => status,
            ChangeKind::StatusChanged { to, .. } => to,
        }
    }

    /// Dot-separated event name, e.g. `"donation.status_changed"`.
    pub fn name(&self) -> String {
        let suffix = match self.change {
            ChangeKind::Created { .. } => "created",
            ChangeKind::StatusChanged { .. } => "status_changed",
        };
        format!("{}.{suffix}", self.entity_type)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ChangeEvent`].
///
/// # Usage
///
/// ```rust
/// use hopelink_core::workflow::{Actor, EntityType};
/// use hopelink_events::bus::{ChangeEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::created(EntityType::Donation, 1, "available", Actor::Donor));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            event = %event.name(),
            entity_id = event.entity_id,
            status = %event.new_status(),
            "Publishing change event"
        );
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to every event published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to events for one entity type only.
    pub fn subscribe_to(&self, entity_type: EntityType) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            entity_type: Some(entity_type),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A bus receiver that skips events for other entity types.
pub struct Subscription {
    receiver: broadcast::Receiver<ChangeEvent>,
    entity_type: Option<EntityType>,
}

impl Subscription {
    /// Wait for the next matching event.
    ///
    /// Errors are the underlying channel's: `Lagged` when events were
    /// dropped, `Closed` once the bus is gone.
    pub async fn recv(&mut self) -> Result<ChangeEvent, broadcast::error::RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.entity_type.map_or(true, |t| t == event.entity_type) {
                return Ok(event);
            }
        }
    }
}

impl From<broadcast::Receiver<ChangeEvent>> for Subscription {
    fn from(receiver: broadcast::Receiver<ChangeEvent>) -> Self {
        Self {
            receiver,
            entity_type: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
