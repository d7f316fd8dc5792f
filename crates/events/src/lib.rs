//! HopeLink change-notification infrastructure.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`]: emitted whenever a donation, request or delivery is
//!   created or changes status.
//! - [`Subscription`]: a receiver optionally filtered to one entity type.
//! - [`StatusCache`]: per-entity status map patched incrementally from the
//!   bus instead of reloading whole collections.

pub mod bus;
pub mod cache;

pub use bus::{ChangeEvent, ChangeKind, EventBus, Subscription};
pub use cache::{CachedStatus, StatusCache};
