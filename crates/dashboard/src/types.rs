//! Wire types returned by the HTTP API.

use mandlacx_core::incident_type::{icon_for_label, IconSpec, IncidentType};
use mandlacx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: DbId,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: DbId,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub camera_id: DbId,
}

impl Incident {
    pub fn kind(&self) -> Option<IncidentType> {
        IncidentType::from_label(&self.incident_type)
    }

    pub fn icon(&self) -> IconSpec {
        icon_for_label(&self.incident_type)
    }
}

/// One entry of the unresolved feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentWithCamera {
    #[serde(flatten)]
    pub incident: Incident,
    pub camera: Camera,
}

impl IncidentWithCamera {
    pub fn id(&self) -> DbId {
        self.incident.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBatch {
    pub success: bool,
    pub count: u64,
}
