//! Domain building blocks shared by the database layer, the HTTP server and
//! the dashboard client. No I/O lives here.

pub mod error;
pub mod generation;
pub mod incident_type;
pub mod types;
