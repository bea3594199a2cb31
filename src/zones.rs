//! Supported timezones and the offset oracle behind them

use crate::types::{CivilTime, Instant};
use chrono::{Offset, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Answers "what does the wall clock show at this instant?" for one zone.
///
/// The projector only ever talks to this trait; the rules behind the answer
/// (DST transitions, historical offsets) belong to whoever implements it.
pub trait ZoneOracle {
    /// IANA identifier of the zone
    fn name(&self) -> &'static str;

    /// Civil time shown at `instant`
    fn civil_at(&self, instant: Instant) -> CivilTime;

    /// Offset from UTC in minutes at `instant`
    fn offset_minutes_at(&self, instant: Instant) -> i32;
}

/// The closed set of zones the picker can be configured with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    #[default]
    Utc,
    NewYork,
    LosAngeles,
    London,
    Tokyo,
    Sydney,
    Kolkata,
}

impl Zone {
    pub const ALL: [Zone; 7] = [
        Zone::Utc,
        Zone::NewYork,
        Zone::LosAngeles,
        Zone::London,
        Zone::Tokyo,
        Zone::Sydney,
        Zone::Kolkata,
    ];

    pub fn tz(&self) -> Tz {
        match self {
            Zone::Utc => chrono_tz::UTC,
            Zone::NewYork => chrono_tz::America::New_York,
            Zone::LosAngeles => chrono_tz::America::Los_Angeles,
            Zone::London => chrono_tz::Europe::London,
            Zone::Tokyo => chrono_tz::Asia::Tokyo,
            Zone::Sydney => chrono_tz::Australia::Sydney,
            Zone::Kolkata => chrono_tz::Asia::Kolkata,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Zone::Utc => "UTC",
            Zone::NewYork => "America/New_York",
            Zone::LosAngeles => "America/Los_Angeles",
            Zone::London => "Europe/London",
            Zone::Tokyo => "Asia/Tokyo",
            Zone::Sydney => "Australia/Sydney",
            Zone::Kolkata => "Asia/Kolkata",
        }
    }
}

impl ZoneOracle for Zone {
    fn name(&self) -> &'static str {
        self.id()
    }

    fn civil_at(&self, instant: Instant) -> CivilTime {
        CivilTime::from_naive(instant.with_timezone(&self.tz()).naive_local())
    }

    fn offset_minutes_at(&self, instant: Instant) -> i32 {
        instant
            .with_timezone(&self.tz())
            .offset()
            .fix()
            .local_minus_utc()
            / 60
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An identifier outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported timezone '{0}' (run `tzrange zones` for the supported list)")]
pub struct UnsupportedZone(pub String);

static ZONES_BY_ID: Lazy<HashMap<&'static str, Zone>> =
    Lazy::new(|| Zone::ALL.iter().map(|z| (z.id(), *z)).collect());

impl FromStr for Zone {
    type Err = UnsupportedZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZONES_BY_ID
            .get(s.trim())
            .copied()
            .ok_or_else(|| UnsupportedZone(s.to_string()))
    }
}

/// Format an offset in minutes as "+05:30" / "-04:00"
pub fn format_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Current offset of every supported zone, for listings
pub fn current_offsets() -> Vec<(Zone, i32)> {
    let now = Utc::now();
    Zone::ALL
        .iter()
        .map(|z| (*z, z.offset_minutes_at(now)))
        .collect()
}
