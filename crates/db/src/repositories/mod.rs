//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept the request's `&mut PgConnection` as the first argument.

pub mod incident_repo;
pub mod user_repo;

pub use incident_repo::IncidentRepo;
pub use user_repo::UserRepo;
