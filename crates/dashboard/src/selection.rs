use mandlacx_core::types::DbId;

use crate::types::{Camera, IncidentWithCamera};

/// What the player is focused on.
///
/// Normally an incident. A camera with no incident in the feed can still be
/// picked from the player's camera strip, in which case the bare camera is
/// selected.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionKind {
    Incident(IncidentWithCamera),
    Camera(Camera),
}

impl SelectionKind {
    /// Id of the selected incident. `None` for a bare camera.
    pub fn incident_id(&self) -> Option<DbId> {
        match self {
            SelectionKind::Incident(item) => Some(item.id()),
            SelectionKind::Camera(_) => None,
        }
    }

    pub fn as_incident(&self) -> Option<&IncidentWithCamera> {
        match self {
            SelectionKind::Incident(item) => Some(item),
            SelectionKind::Camera(_) => None,
        }
    }

    /// The camera in view, for either variant.
    pub fn camera(&self) -> &Camera {
        match self {
            SelectionKind::Incident(item) => &item.camera,
            SelectionKind::Camera(camera) => camera,
        }
    }

    pub fn is_incident(&self, id: DbId) -> bool {
        self.incident_id() == Some(id)
    }
}

impl From<IncidentWithCamera> for SelectionKind {
    fn from(item: IncidentWithCamera) -> Self {
        SelectionKind::Incident(item)
    }
}

impl From<Camera> for SelectionKind {
    fn from(camera: Camera) -> Self {
        SelectionKind::Camera(camera)
    }
}
