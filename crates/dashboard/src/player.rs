//! Incident player view model.
//!
//! Shows the selected incident's still frame with its timestamp and camera,
//! a strip of the other cameras, and optionally the day [`Timeline`].

use chrono::FixedOffset;

use crate::selection::SelectionKind;
use crate::timeline::Timeline;
use crate::types::{Camera, IncidentWithCamera};
use crate::view::DashboardState;

pub const LOADING_TEXT: &str = "Loading Player...";
pub const EMPTY_TEXT: &str = "No Incidents Found.";
pub const NO_RECENT_TEXT: &str = "No Recent Incidents";

/// Other cameras shown beside the shrunken frame when the timeline is open.
pub const MAX_THUMBNAILS_WITH_TIMELINE: usize = 2;

/// `"{name} - {location}"`
pub fn camera_caption(camera: &Camera) -> String {
    format!("{} - {}", camera.name, camera.location)
}

/// Another camera in the strip. Shows that camera's first incident in the
/// feed, or a camera-off placeholder when it has none.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraThumbnail<'a> {
    pub camera: &'a Camera,
    pub preview: Option<&'a IncidentWithCamera>,
}

impl CameraThumbnail<'_> {
    pub fn image_url(&self) -> Option<&str> {
        self.preview.map(|item| item.incident.thumbnail_url.as_str())
    }

    pub fn is_camera_off(&self) -> bool {
        self.preview.is_none()
    }

    /// What clicking the thumbnail selects.
    pub fn on_select(&self) -> SelectionKind {
        match self.preview {
            Some(item) => SelectionKind::Incident(item.clone()),
            None => SelectionKind::Camera(self.camera.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentScene<'a> {
    pub incident: &'a IncidentWithCamera,
    pub image_url: &'a str,
    /// `"Sunday 18 October 2026 at 14:03:12"`
    pub timestamp: String,
    pub caption: String,
    pub other_cameras: Vec<CameraThumbnail<'a>>,
    /// Set when the timeline is open; the frame is shrunk beside it.
    pub timeline: Option<&'a Timeline>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerScene<'a> {
    Loading,
    Empty,
    /// A bare camera is selected.
    NoIncident { camera: &'a Camera, caption: String },
    Incident(IncidentScene<'a>),
}

impl PlayerScene<'_> {
    /// Placeholder text, for the scenes that have one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PlayerScene::Loading => Some(LOADING_TEXT),
            PlayerScene::Empty => Some(EMPTY_TEXT),
            PlayerScene::NoIncident { .. } => Some(NO_RECENT_TEXT),
            PlayerScene::Incident(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    timeline_visible: bool,
    timeline: Timeline,
}

impl Player {
    /// Starts with the timeline hidden.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline_visible: false,
            timeline,
        }
    }

    pub fn is_timeline_visible(&self) -> bool {
        self.timeline_visible
    }

    pub fn toggle_timeline(&mut self) {
        self.timeline_visible = !self.timeline_visible;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.timeline_visible {
            "Hide Timeline"
        } else {
            "Show Timeline"
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn scene<'a>(&'a self, state: &'a DashboardState, offset: &FixedOffset) -> PlayerScene<'a> {
        if state.is_loading() {
            return PlayerScene::Loading;
        }

        let incident = match state.selection() {
            None => return PlayerScene::Empty,
            Some(SelectionKind::Camera(camera)) => {
                return PlayerScene::NoIncident {
                    camera,
                    caption: camera_caption(camera),
                }
            }
            Some(SelectionKind::Incident(item)) => item,
        };

        let feed = state.all_incidents();
        let limit = if self.timeline_visible {
            MAX_THUMBNAILS_WITH_TIMELINE
        } else {
            usize::MAX
        };
        let other_cameras = state
            .cameras()
            .iter()
            .filter(|camera| camera.id != incident.camera.id)
            .take(limit)
            .map(|camera| CameraThumbnail {
                camera,
                preview: feed
                    .iter()
                    .find(|item| item.incident.camera_id == camera.id),
            })
            .collect();

        let start = incident.incident.ts_start.with_timezone(offset);
        PlayerScene::Incident(IncidentScene {
            incident,
            image_url: &incident.incident.thumbnail_url,
            timestamp: start.format("%A %-d %B %Y at %H:%M:%S").to_string(),
            caption: camera_caption(&incident.camera),
            other_cameras,
            timeline: self.timeline_visible.then_some(&self.timeline),
        })
    }
}
