use chrono::{FixedOffset, Offset, Utc};

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the HTTP API, without a trailing slash.
    pub api_url: String,
    /// Refill once the visible list shrinks to this many incidents or fewer.
    pub low_water_mark: usize,
    /// Offset of the operator's wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            low_water_mark: 4,
            utc_offset_minutes: 0,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                       |
    /// |--------------------------------|-------------------------------|
    /// | `DASHBOARD_API_URL`            | `http://localhost:3000/api`   |
    /// | `DASHBOARD_LOW_WATER_MARK`     | `4`                           |
    /// | `DASHBOARD_UTC_OFFSET_MINUTES` | `0`                           |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, filling gaps with defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("DASHBOARD_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let low_water_mark: usize = lookup("DASHBOARD_LOW_WATER_MARK")
            .map(|v| {
                v.parse()
                    .expect("DASHBOARD_LOW_WATER_MARK must be a valid usize")
            })
            .unwrap_or(defaults.low_water_mark);

        let utc_offset_minutes: i32 = lookup("DASHBOARD_UTC_OFFSET_MINUTES")
            .map(|v| {
                v.parse()
                    .expect("DASHBOARD_UTC_OFFSET_MINUTES must be a valid i32")
            })
            .unwrap_or(defaults.utc_offset_minutes);

        Self {
            api_url,
            low_water_mark,
            utc_offset_minutes,
        }
    }

    /// The wall clock incidents are displayed in. Out-of-range offsets
    /// (beyond a day) fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(utc())
    }
}

pub(crate) fn utc() -> FixedOffset {
    Utc.fix()
}
