//! Workflow status vocabulary for donations, requests and deliveries.
//!
//! Every stage list, icon key and color key lives here once. Callers go
//! through [`EntityType`] to reach the table for a given record kind, so a
//! `claimed` donation and a `claimed` request are never confused: stage
//! values are always qualified by the entity type they belong to.
//!
//! - [`lookup`](lookup::lookup) maps a raw `status` column value to a
//!   [`StatusView`] and never fails.
//! - [`compute_progress`](progress::compute_progress) turns an ordinal into
//!   a percentage plus a per-stage classification.
//! - [`allowed_transitions`](transitions::allowed_transitions) and
//!   [`validate_transition`](transitions::validate_transition) are the
//!   authoritative transition rules consulted before every status write.
//! - [`StatusBreakdown`](breakdown::StatusBreakdown) aggregates status
//!   counts for dashboard charts.

pub mod breakdown;
pub mod entity;
pub mod lookup;
pub mod progress;
pub mod stage;
pub mod tables;
pub mod transitions;

pub use breakdown::{StatusBreakdown, StatusCount};
pub use entity::EntityType;
pub use lookup::{find_stage, lookup, StatusView};
pub use progress::{compute_progress, percentage, progress_for, Progress, StepState};
pub use stage::{Actor, Stage, TerminalStatus};
pub use transitions::{
    allowed_transitions, validate_transition, TransitionKind, TransitionOption,
};
