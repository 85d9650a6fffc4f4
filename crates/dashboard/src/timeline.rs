//! Interactive day timeline.
//!
//! Maps wall-clock time of day onto `[0, 100]` percent of the track width.
//! Each incident is a bar from its start to its end position; dragging moves
//! a scrubber and releasing it selects the incident whose start is nearest.
//!
//! Derived entries are rebuilt only when the incident set changes and the
//! nearest match only when the scrubber moves, so pointer moves never
//! rescan more than once.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use mandlacx_core::types::DbId;

use crate::config::utc;
use crate::selection::SelectionKind;
use crate::types::IncidentWithCamera;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Half-hour grid lines from 00:00 to 24:00 inclusive.
pub const TICK_COUNT: usize = 49;

/// Narrowest bar drawn, in percent, so zero-length incidents stay clickable.
pub const MIN_BAR_WIDTH: f64 = 0.2;

/// Scrubber position before the operator first touches the timeline.
pub const INITIAL_SCRUBBER: f64 = 50.0;

// ---------------------------------------------------------------------------
// Position mapping
// ---------------------------------------------------------------------------

/// Position of a wall-clock time within its day, in percent.
///
/// `00:00:00` maps to `0.0` and `23:59:59` to just under `100.0`.
/// Sub-second precision is ignored.
pub fn time_to_percentage<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    let secs = time.hour() * 3600 + time.minute() * 60 + time.second();
    f64::from(secs) / SECONDS_PER_DAY * 100.0
}

/// `"HH:MM"` label for a percentage position. `100.0` reads `"24:00"`.
pub fn percentage_to_label(percent: f64) -> String {
    let total_secs = percent / 100.0 * SECONDS_PER_DAY;
    let hours = (total_secs / 3600.0).floor() as u32;
    let minutes = ((total_secs % 3600.0) / 60.0).floor() as u32;
    format!("{hours:02}:{minutes:02}")
}

/// A grid line on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    /// Hour label on whole hours (`"07:00"`), `None` on half hours.
    pub label: Option<String>,
}

impl Tick {
    pub fn is_hour(&self) -> bool {
        self.label.is_some()
    }
}

pub fn ticks() -> Vec<Tick> {
    (0..TICK_COUNT)
        .map(|i| Tick {
            position: i as f64 / (TICK_COUNT - 1) as f64 * 100.0,
            label: (i % 2 == 0).then(|| format!("{:02}:00", i / 2)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pointer geometry
// ---------------------------------------------------------------------------

/// Layout of the scrollable track at the time of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGeometry {
    /// Left edge of the visible container, in client coordinates.
    pub left: f64,
    /// Horizontal scroll offset of the container.
    pub scroll_left: f64,
    /// Full scrollable width of the track.
    pub scroll_width: f64,
}

impl PointerGeometry {
    /// Track position under `client_x`, clamped to `[0, 100]`.
    pub fn percent_at(&self, client_x: f64) -> f64 {
        if self.scroll_width <= 0.0 {
            return 0.0;
        }
        let x = client_x - self.left + self.scroll_left;
        (x / self.scroll_width * 100.0).clamp(0.0, 100.0)
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// An incident placed on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub incident: IncidentWithCamera,
    pub start: f64,
    pub end: f64,
}

impl TimelineEntry {
    /// Drawn width, never below [`MIN_BAR_WIDTH`].
    pub fn width(&self) -> f64 {
        (self.end - self.start).max(MIN_BAR_WIDTH)
    }
}

/// Render data for one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar<'a> {
    pub entry: &'a TimelineEntry,
    pub x: f64,
    pub width: f64,
    pub selected: bool,
    /// Highlighted as the snap target while dragging.
    pub closest: bool,
    /// `"14:03:12 - 14:03:52"` in the timeline's wall clock.
    pub time_range: String,
}

/// Incident identity and time span, used to detect changes to the set.
type Fingerprint = Vec<(DbId, i64, i64)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    offset: FixedOffset,
    fingerprint: Fingerprint,
    entries: Vec<TimelineEntry>,
    scrubber: f64,
    closest: Option<usize>,
    dragging: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(utc())
    }
}

impl Timeline {
    /// An empty timeline laid out in the wall clock at `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            fingerprint: Vec::new(),
            entries: Vec::new(),
            scrubber: INITIAL_SCRUBBER,
            closest: None,
            dragging: false,
        }
    }

    /// Replace the incident set. Entries are rebuilt only if the set differs
    /// from the previous one. Returns whether a rebuild happened.
    pub fn set_incidents(&mut self, incidents: &[IncidentWithCamera]) -> bool {
        let fingerprint: Fingerprint = incidents
            .iter()
            .map(|item| {
                (
                    item.id(),
                    item.incident.ts_start.timestamp_millis(),
                    item.incident.ts_end.timestamp_millis(),
                )
            })
            .collect();
        if fingerprint == self.fingerprint {
            return false;
        }

        let mut entries: Vec<TimelineEntry> = incidents
            .iter()
            .map(|item| TimelineEntry {
                start: time_to_percentage(&item.incident.ts_start.with_timezone(&self.offset)),
                end: time_to_percentage(&item.incident.ts_end.with_timezone(&self.offset)),
                incident: item.clone(),
            })
            .collect();
        // Stable, so equal starts keep feed order.
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));

        self.entries = entries;
        self.fingerprint = fingerprint;
        self.closest = nearest(&self.entries, self.scrubber);
        true
    }

    /// Entries in ascending start order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn scrubber(&self) -> f64 {
        self.scrubber
    }

    pub fn scrubber_label(&self) -> String {
        percentage_to_label(self.scrubber)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Incident whose start is nearest the scrubber. Ties go to the
    /// earliest entry.
    pub fn closest(&self) -> Option<&TimelineEntry> {
        self.closest.and_then(|i| self.entries.get(i))
    }

    /// Move the scrubber, recomputing the nearest match if it changed.
    pub fn set_scrubber(&mut self, percent: f64) {
        let percent = percent.clamp(0.0, 100.0);
        if percent == self.scrubber {
            return;
        }
        self.scrubber = percent;
        self.closest = nearest(&self.entries, percent);
    }

    pub fn pointer_down(&mut self, geometry: &PointerGeometry, client_x: f64) {
        self.dragging = true;
        self.set_scrubber(geometry.percent_at(client_x));
    }

    /// Ignored unless a drag is in progress.
    pub fn pointer_move(&mut self, geometry: &PointerGeometry, client_x: f64) {
        if self.dragging {
            self.set_scrubber(geometry.percent_at(client_x));
        }
    }

    /// End a drag. Returns the incident to select, if a drag was in
    /// progress and the timeline is not empty.
    pub fn pointer_up(&mut self) -> Option<SelectionKind> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.closest()
            .map(|entry| SelectionKind::Incident(entry.incident.clone()))
    }

    /// Leaving the track ends a drag exactly like releasing the pointer.
    pub fn pointer_leave(&mut self) -> Option<SelectionKind> {
        self.pointer_up()
    }

    /// Clicking a bar selects its incident directly.
    pub fn click(&self, id: DbId) -> Option<SelectionKind> {
        self.entries
            .iter()
            .find(|entry| entry.incident.id() == id)
            .map(|entry| SelectionKind::Incident(entry.incident.clone()))
    }

    pub fn bars(&self, selected: Option<DbId>) -> Vec<Bar<'_>> {
        let closest_id = if self.dragging {
            self.closest().map(|entry| entry.incident.id())
        } else {
            None
        };

        self.entries
            .iter()
            .map(|entry| {
                let id = entry.incident.id();
                Bar {
                    entry,
                    x: entry.start,
                    width: entry.width(),
                    selected: selected == Some(id),
                    closest: closest_id == Some(id),
                    time_range: self.time_range(&entry.incident),
                }
            })
            .collect()
    }

    fn time_range(&self, item: &IncidentWithCamera) -> String {
        let start = item.incident.ts_start.with_timezone(&self.offset);
        let end = item.incident.ts_end.with_timezone(&self.offset);
        format!("{} - {}", start.format("%H:%M:%S"), end.format("%H:%M:%S"))
    }
}

/// Linear scan for the entry whose start is nearest `position`. Only a
/// strictly closer entry replaces the current best.
fn nearest(entries: &[TimelineEntry], position: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, entry) in entries.iter().enumerate() {
        let distance = (entry.start - position).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
