//! Synthetic incident drafting.
//!
//! Used by the refill endpoint to keep the demo feed populated and by the
//! seeding tool to build a fresh dataset. Drafts carry everything needed for
//! an insert; persistence belongs to the repository layer.

use chrono::TimeDelta;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::CoreError;
use crate::incident_type::IncidentType;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of incidents added by one refill when the caller does not say.
pub const DEFAULT_GENERATION_COUNT: usize = 5;

/// Upper bound on a single generation request.
pub const MAX_GENERATION_COUNT: usize = 50;

/// Placeholder image service used for thumbnails.
pub const THUMBNAIL_BASE_URL: &str = "https://picsum.photos/seed";

// ---------------------------------------------------------------------------
// GenerationWindow
// ---------------------------------------------------------------------------

/// Bounds for the timestamps of drafted incidents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    /// Start times fall in `[now - lookback, now]`.
    pub lookback_ms: i64,
    /// Durations fall in `[0, max_duration)`.
    pub max_duration_ms: i64,
}

/// Fresh incidents for the live feed: started within the last minute,
/// lasting under two minutes.
pub const LIVE_WINDOW: GenerationWindow = GenerationWindow {
    lookback_ms: 60 * 1000,
    max_duration_ms: 120 * 1000,
};

/// Seed data: spread over the last day, lasting under five minutes.
pub const SEED_WINDOW: GenerationWindow = GenerationWindow {
    lookback_ms: 24 * 60 * 60 * 1000,
    max_duration_ms: 5 * 60 * 1000,
};

// ---------------------------------------------------------------------------
// IncidentDraft
// ---------------------------------------------------------------------------

/// An incident ready to be inserted. Always unresolved on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDraft {
    pub camera_id: DbId,
    pub incident_type: IncidentType,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
}

/// Build a placeholder thumbnail URL for the given seed.
pub fn thumbnail_url(seed: f64) -> String {
    format!("{THUMBNAIL_BASE_URL}/{seed}/300/200")
}

/// Draft `count` incidents against uniformly chosen cameras and types.
///
/// Fails without drafting anything when `camera_ids` is empty.
pub fn draft_incidents<R: Rng + ?Sized>(
    rng: &mut R,
    camera_ids: &[DbId],
    count: usize,
    now: Timestamp,
    window: GenerationWindow,
) -> Result<Vec<IncidentDraft>, CoreError> {
    if camera_ids.is_empty() {
        return Err(CoreError::Internal("No cameras found".to_string()));
    }

    let mut drafts = Vec::with_capacity(count);
    for i in 0..count {
        let camera_id = *camera_ids
            .choose(rng)
            .ok_or_else(|| CoreError::Internal("No cameras found".to_string()))?;
        let incident_type = *IncidentType::ALL
            .choose(rng)
            .ok_or_else(|| CoreError::Internal("Empty incident vocabulary".to_string()))?;

        let ts_start = now - TimeDelta::milliseconds(below(rng, window.lookback_ms));
        let ts_end = ts_start + TimeDelta::milliseconds(below(rng, window.max_duration_ms));
        let seed = i as f64 + rng.random::<f64>();

        drafts.push(IncidentDraft {
            camera_id,
            incident_type,
            ts_start,
            ts_end,
            thumbnail_url: thumbnail_url(seed),
        });
    }
    Ok(drafts)
}

/// Uniform integer in `[0, bound)`, or 0 for an empty range.
fn below<R: Rng + ?Sized>(rng: &mut R, bound: i64) -> i64 {
    if bound <= 0 {
        0
    } else {
        rng.random_range(0..bound)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
