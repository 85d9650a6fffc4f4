//! The closed vocabulary of incident types and their icon mapping.
//!
//! Incident types are persisted as their display label (e.g. `"Gun Threat"`)
//! so the JSON the API emits matches what operators see. Rows carrying a
//! label outside this vocabulary are still readable; they simply fall back
//! to the default icon.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// IncidentType
// ---------------------------------------------------------------------------

/// Kind of security event raised against a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    #[serde(rename = "Unauthorised Access")]
    UnauthorisedAccess,
    #[serde(rename = "Gun Threat")]
    GunThreat,
    #[serde(rename = "Face Recognised")]
    FaceRecognised,
    #[serde(rename = "Fire Hazard")]
    FireHazard,
}

impl IncidentType {
    /// Every variant, in display order. Synthetic generation draws from this.
    pub const ALL: [IncidentType; 4] = [
        IncidentType::UnauthorisedAccess,
        IncidentType::GunThreat,
        IncidentType::FaceRecognised,
        IncidentType::FireHazard,
    ];

    /// The label stored in the `incidents.incident_type` column.
    pub fn label(self) -> &'static str {
        match self {
            IncidentType::UnauthorisedAccess => "Unauthorised Access",
            IncidentType::GunThreat => "Gun Threat",
            IncidentType::FaceRecognised => "Face Recognised",
            IncidentType::FireHazard => "Fire Hazard",
        }
    }

    /// Look up a type by its stored label. Exact match only.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn icon(self) -> IconSpec {
        match self {
            IncidentType::UnauthorisedAccess => IconSpec::new(Glyph::Users, Tone::Orange),
            IncidentType::GunThreat => IconSpec::new(Glyph::TriangleAlert, Tone::Red),
            IncidentType::FaceRecognised => IconSpec::new(Glyph::Users, Tone::Blue),
            IncidentType::FireHazard => IconSpec::new(Glyph::FireExtinguisher, Tone::Amber),
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IncidentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| CoreError::Validation(format!("unknown incident type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Icon shape shown next to an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Users,
    TriangleAlert,
    FireExtinguisher,
    Clapperboard,
}

/// Colour family applied to a [`Glyph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Orange,
    Red,
    Blue,
    Amber,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    pub glyph: Glyph,
    pub tone: Tone,
}

impl IconSpec {
    pub const fn new(glyph: Glyph, tone: Tone) -> Self {
        Self { glyph, tone }
    }
}

/// Icon used for labels outside the known vocabulary.
pub const DEFAULT_ICON: IconSpec = IconSpec::new(Glyph::Clapperboard, Tone::Gray);

/// Resolve the icon for a stored label, falling back to [`DEFAULT_ICON`].
pub fn icon_for_label(label: &str) -> IconSpec {
    match IncidentType::from_label(label) {
        Some(kind) => kind.icon(),
        None => DEFAULT_ICON,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
