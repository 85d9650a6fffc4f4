//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Read paths take `&PgPool`; writes that seeding also runs inside a
//! transaction accept any Postgres executor.

pub mod camera_repo;
pub mod incident_repo;

pub use camera_repo::CameraRepo;
pub use incident_repo::IncidentRepo;
