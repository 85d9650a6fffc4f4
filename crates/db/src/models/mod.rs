//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the input DTOs its repository accepts. Field names
//! serialize in camelCase to match the JSON the dashboard consumes.

pub mod camera;
pub mod incident;
