pub mod dashboard;
pub mod delivery;
pub mod donation;
pub mod profile;
pub mod request;
pub mod status;
pub mod workflow;
