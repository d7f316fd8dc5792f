//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any `PgExecutor` when they must join a transaction)
//! as the first argument.

pub mod delivery_repo;
pub mod donation_repo;
pub mod profile_repo;
pub mod request_repo;
pub mod status_change_repo;
pub mod status_repo;

pub use delivery_repo::DeliveryRepo;
pub use donation_repo::DonationRepo;
pub use profile_repo::ProfileRepo;
pub use request_repo::RequestRepo;
pub use status_change_repo::StatusChangeRepo;
pub use status_repo::{StatusRepo, StatusSnapshot, StatusWrite};
