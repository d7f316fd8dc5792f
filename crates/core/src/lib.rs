//! HopeLink domain core.
//!
//! Pure, I/O-free building blocks shared by the database, event and API
//! crates: the workflow status vocabulary (stage tables, lookup, progress,
//! transition rules), status breakdowns for dashboards, pagination clamps,
//! display placeholders, payload validation and the domain error type.

pub mod display;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
pub mod workflow;
