//! Camera entity model and DTOs.

use mandlacx_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A camera row from the `cameras` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Camera {
    pub id: DbId,
    pub name: String,
    pub location: String,
}

/// DTO for creating a camera. Only the seeding tool creates cameras.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCamera {
    pub name: String,
    pub location: String,
}
