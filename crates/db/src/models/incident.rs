//! Incident entity model and DTOs.

use mandlacx_core::incident_type::{icon_for_label, IconSpec, IncidentType};
use mandlacx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::camera::Camera;

/// An incident row from the `incidents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: DbId,
    /// Display label of the incident type, e.g. `"Fire Hazard"`.
    #[serde(rename = "type")]
    pub incident_type: String,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub camera_id: DbId,
}

impl Incident {
    /// The typed vocabulary entry, or `None` for labels outside it.
    pub fn kind(&self) -> Option<IncidentType> {
        IncidentType::from_label(&self.incident_type)
    }

    pub fn icon(&self) -> IconSpec {
        icon_for_label(&self.incident_type)
    }
}

/// An incident with its owning camera embedded, as served by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentWithCamera {
    #[serde(flatten)]
    pub incident: Incident,
    pub camera: Camera,
}

/// Flat row produced by the `incidents JOIN cameras` query.
#[derive(Debug, FromRow)]
pub(crate) struct IncidentCameraRow {
    pub id: DbId,
    pub incident_type: String,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub camera_id: DbId,
    pub camera_name: String,
    pub camera_location: String,
}

impl From<IncidentCameraRow> for IncidentWithCamera {
    fn from(row: IncidentCameraRow) -> Self {
        Self {
            camera: Camera {
                id: row.camera_id,
                name: row.camera_name,
                location: row.camera_location,
            },
            incident: Incident {
                id: row.id,
                incident_type: row.incident_type,
                ts_start: row.ts_start,
                ts_end: row.ts_end,
                thumbnail_url: row.thumbnail_url,
                resolved: row.resolved,
                camera_id: row.camera_id,
            },
        }
    }
}

/// Response body of the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBatch {
    pub success: bool,
    pub count: u64,
}
