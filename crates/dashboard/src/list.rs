//! Incident list view model.

use chrono::FixedOffset;
use mandlacx_core::incident_type::IconSpec;
use mandlacx_core::types::DbId;

use crate::types::IncidentWithCamera;
use crate::view::DashboardState;

/// Placeholder rows shown while loading, and appended while refilling.
pub const SKELETON_ROWS: usize = 5;

pub const LOADING_MORE_BADGE: &str = "Loading more...";

pub const RESOLVE_ACTION: &str = "Resolve \u{203a}";

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRow<'a> {
    pub id: DbId,
    pub icon: IconSpec,
    pub type_label: &'a str,
    pub location: &'a str,
    /// `"14:03 on 18 Oct 2026"`
    pub time: String,
    pub thumbnail_url: &'a str,
    pub selected: bool,
    /// Label of the row's resolve button.
    pub resolve_label: &'static str,
}

impl<'a> IncidentRow<'a> {
    fn new(item: &'a IncidentWithCamera, offset: &FixedOffset, selected: Option<DbId>) -> Self {
        let start = item.incident.ts_start.with_timezone(offset);
        Self {
            id: item.id(),
            icon: item.incident.icon(),
            type_label: &item.incident.incident_type,
            location: &item.camera.location,
            time: start.format("%H:%M on %d %b %Y").to_string(),
            thumbnail_url: &item.incident.thumbnail_url,
            selected: selected == Some(item.id()),
            resolve_label: RESOLVE_ACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<'a> {
    /// Initial load in progress.
    Skeleton(usize),
    Rows {
        rows: Vec<IncidentRow<'a>>,
        /// Placeholder rows after the real ones while a refill runs.
        trailing_skeletons: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentListView<'a> {
    /// `"{n} Unresolved Incidents"`
    pub heading: String,
    /// [`LOADING_MORE_BADGE`] while a refill runs.
    pub badge: Option<&'static str>,
    pub body: ListBody<'a>,
}

impl<'a> IncidentListView<'a> {
    pub fn build(state: &'a DashboardState, offset: &FixedOffset) -> Self {
        let incidents = state.incidents();
        let refilling = state.is_refilling();

        let body = if state.is_loading() {
            ListBody::Skeleton(SKELETON_ROWS)
        } else {
            let selected = state.selected_incident_id();
            ListBody::Rows {
                rows: incidents
                    .iter()
                    .map(|item| IncidentRow::new(item, offset, selected))
                    .collect(),
                trailing_skeletons: if refilling { SKELETON_ROWS } else { 0 },
            }
        };

        Self {
            heading: format!("{} Unresolved Incidents", incidents.len()),
            badge: refilling.then_some(LOADING_MORE_BADGE),
            body,
        }
    }

    pub fn rows(&self) -> &[IncidentRow<'a>] {
        match &self.body {
            ListBody::Rows { rows, .. } => rows,
            ListBody::Skeleton(_) => &[],
        }
    }
}
