//! Dashboard state machine.
//!
//! [`DashboardState`] holds the screen's data and applies each transition
//! synchronously. [`Dashboard`] drives it against an [`IncidentApi`]: the
//! initial load, fire-and-forget resolves, and the low-water-mark refill
//! that keeps the demo feed populated.

use std::sync::Arc;

use chrono::FixedOffset;
use futures::future::join_all;
use mandlacx_core::types::DbId;
use tokio::task::JoinHandle;

use crate::client::IncidentApi;
use crate::config::DashboardConfig;
use crate::error::ClientError;
use crate::list::IncidentListView;
use crate::player::{Player, PlayerScene};
use crate::selection::SelectionKind;
use crate::timeline::{PointerGeometry, Timeline};
use crate::types::{Camera, IncidentWithCamera};

// ---------------------------------------------------------------------------
// DashboardState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    phase: Phase,
    refilling: bool,
    low_water_mark: usize,
    cameras: Vec<Camera>,
    /// Feed as last fetched. Drives the player and the timeline.
    all_incidents: Vec<IncidentWithCamera>,
    /// Feed minus incidents resolved since the last fetch. Drives the list.
    incidents: Vec<IncidentWithCamera>,
    selection: Option<SelectionKind>,
}

impl DashboardState {
    pub fn new(low_water_mark: usize) -> Self {
        Self {
            phase: Phase::Loading,
            refilling: false,
            low_water_mark,
            cameras: Vec::new(),
            all_incidents: Vec::new(),
            incidents: Vec::new(),
            selection: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_refilling(&self) -> bool {
        self.refilling
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn all_incidents(&self) -> &[IncidentWithCamera] {
        &self.all_incidents
    }

    /// Unresolved incidents still shown in the list.
    pub fn incidents(&self) -> &[IncidentWithCamera] {
        &self.incidents
    }

    pub fn selection(&self) -> Option<&SelectionKind> {
        self.selection.as_ref()
    }

    pub fn selected_incident_id(&self) -> Option<DbId> {
        self.selection.as_ref().and_then(SelectionKind::incident_id)
    }

    /// Initial fetch completed. Selects the newest incident, if any.
    pub fn finish_loading(&mut self, cameras: Vec<Camera>, incidents: Vec<IncidentWithCamera>) {
        self.selection = incidents.first().cloned().map(SelectionKind::Incident);
        self.cameras = cameras;
        self.all_incidents = incidents.clone();
        self.incidents = incidents;
        self.phase = Phase::Ready;
    }

    /// Initial fetch failed. The screen leaves loading with nothing to show.
    pub fn fail_loading(&mut self) {
        self.phase = Phase::Ready;
    }

    pub fn select(&mut self, selection: SelectionKind) {
        self.selection = Some(selection);
    }

    /// Drop `id` from the list. If it was selected, the new first entry is
    /// selected instead. Returns `true` when the list is now at or below the
    /// low-water mark and a refill is due.
    pub fn apply_resolve(&mut self, id: DbId) -> bool {
        self.incidents.retain(|item| item.id() != id);

        if self.selection.as_ref().is_some_and(|s| s.is_incident(id)) {
            self.selection = self.incidents.first().cloned().map(SelectionKind::Incident);
        }

        self.incidents.len() <= self.low_water_mark
    }

    /// Enter refilling. Returns `false`, changing nothing, if a refill is
    /// already running or the initial load has not finished.
    pub fn begin_refill(&mut self) -> bool {
        if self.refilling || self.phase != Phase::Ready {
            return false;
        }
        self.refilling = true;
        true
    }

    /// Leave refilling. On success both lists are replaced by the fresh feed
    /// and, if nothing is selected, its first entry is selected.
    pub fn finish_refill(&mut self, refreshed: Option<Vec<IncidentWithCamera>>) {
        self.refilling = false;
        let Some(incidents) = refreshed else {
            return;
        };

        if self.selection.is_none() {
            self.selection = incidents.first().cloned().map(SelectionKind::Incident);
        }
        self.all_incidents = incidents.clone();
        self.incidents = incidents;
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Drives [`DashboardState`] against the API.
pub struct Dashboard<A: IncidentApi + 'static> {
    api: Arc<A>,
    state: DashboardState,
    player: Player,
    offset: FixedOffset,
    in_flight: Vec<JoinHandle<()>>,
}

impl<A: IncidentApi + 'static> Dashboard<A> {
    pub fn new(api: A, config: &DashboardConfig) -> Self {
        let offset = config.utc_offset();
        Self {
            api: Arc::new(api),
            state: DashboardState::new(config.low_water_mark),
            player: Player::new(Timeline::new(offset)),
            offset,
            in_flight: Vec::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch cameras and incidents concurrently and leave the loading state.
    pub async fn load(&mut self) {
        let fetched = tokio::try_join!(self.api.list_cameras(), self.api.list_incidents());

        match fetched {
            Ok((cameras, incidents)) => {
                tracing::info!(
                    cameras = cameras.len(),
                    incidents = incidents.len(),
                    "Dashboard loaded"
                );
                self.state.finish_loading(cameras, incidents);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch initial data");
                self.state.fail_loading();
            }
        }
        self.sync_timeline();
    }

    pub fn select(&mut self, selection: SelectionKind) {
        self.state.select(selection);
    }

    /// Resolve an incident. The API call runs in the background; the list is
    /// updated immediately and never rolled back. Refills if the list has
    /// dropped to the low-water mark.
    pub async fn resolve(&mut self, id: DbId) {
        let api = Arc::clone(&self.api);
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.push(tokio::spawn(async move {
            if let Err(e) = api.resolve_incident(id).await {
                tracing::error!(incident_id = id, error = %e, "Failed to resolve incident");
            }
        }));

        if self.state.apply_resolve(id) {
            self.refill().await;
        }
    }

    /// Generate fresh incidents and re-fetch the feed. Does nothing if a
    /// refill is already running.
    ///
    /// Pending resolves are awaited first so the re-fetched feed cannot
    /// bring back an incident this dashboard already resolved.
    pub async fn refill(&mut self) {
        if !self.state.begin_refill() {
            return;
        }
        self.flush().await;

        match self.fetch_refill().await {
            Ok(incidents) => {
                tracing::info!(incidents = incidents.len(), "Feed refilled");
                self.state.finish_refill(Some(incidents));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refill incidents");
                self.state.finish_refill(None);
            }
        }
        self.sync_timeline();
    }

    /// Wait for every background resolve call to finish.
    pub async fn flush(&mut self) {
        for result in join_all(self.in_flight.drain(..)).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Resolve task failed");
            }
        }
    }

    async fn fetch_refill(&self) -> Result<Vec<IncidentWithCamera>, ClientError> {
        let batch = self.api.generate_incidents(None).await?;
        tracing::debug!(count = batch.count, "Generated incidents");
        self.api.list_incidents().await
    }

    fn sync_timeline(&mut self) {
        self.player.timeline_mut().set_incidents(self.state.all_incidents());
    }

    // ---- views ----

    pub fn list_view(&self) -> IncidentListView<'_> {
        IncidentListView::build(&self.state, &self.offset)
    }

    pub fn player_view(&self) -> PlayerScene<'_> {
        self.player.scene(&self.state, &self.offset)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn toggle_timeline(&mut self) {
        self.player.toggle_timeline();
    }

    // ---- timeline input ----

    pub fn timeline_pointer_down(&mut self, geometry: &PointerGeometry, client_x: f64) {
        self.player.timeline_mut().pointer_down(geometry, client_x);
    }

    pub fn timeline_pointer_move(&mut self, geometry: &PointerGeometry, client_x: f64) {
        self.player.timeline_mut().pointer_move(geometry, client_x);
    }

    pub fn timeline_pointer_up(&mut self) {
        if let Some(selection) = self.player.timeline_mut().pointer_up() {
            self.state.select(selection);
        }
    }

    pub fn timeline_pointer_leave(&mut self) {
        if let Some(selection) = self.player.timeline_mut().pointer_leave() {
            self.state.select(selection);
        }
    }

    pub fn timeline_click(&mut self, id: DbId) {
        if let Some(selection) = self.player.timeline().click(id) {
            self.state.select(selection);
        }
    }
}
