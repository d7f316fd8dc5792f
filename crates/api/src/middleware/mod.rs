//! Request extractors shared by mutating handlers.
//!
//! - [`actor::DeclaredActor`]: the caller's role from the `x-actor-role` header.

pub mod actor;
