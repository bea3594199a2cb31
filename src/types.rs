//! Core types for tzrange

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// An absolute point in time. Millisecond precision is the smallest unit
/// the crate produces (see presets).
pub type Instant = DateTime<Utc>;

/// Error returned when civil time components are out of range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid civil time {year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}")]
pub struct CivilTimeError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Year/month/day/hour/minute as displayed on a wall clock in some zone.
///
/// Only meaningful next to a [`Zone`](crate::zones::Zone). Always valid:
/// the only way to build one is through [`CivilTime::new`] or by projecting
/// an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    inner: NaiveDateTime,
}

impl CivilTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, CivilTimeError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(|inner| Self { inner })
            .ok_or(CivilTimeError {
                year,
                month,
                day,
                hour,
                minute,
            })
    }

    /// Midnight of the given civil date
    pub fn midnight(date: NaiveDate) -> Self {
        Self {
            inner: date.and_time(chrono::NaiveTime::MIN),
        }
    }

    /// Truncate a naive wall-clock value to minute granularity
    pub(crate) fn from_naive(naive: NaiveDateTime) -> Self {
        let truncated = naive
            .with_second(0)
            .and_then(|n| n.with_nanosecond(0))
            .unwrap_or(naive);
        Self { inner: truncated }
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn date(&self) -> NaiveDate {
        self.inner.date()
    }

    /// Minutes elapsed since local midnight
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }

    pub(crate) fn naive(&self) -> NaiveDateTime {
        self.inner
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%dT%H:%M"))
    }
}

/// Read-only view of the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Instant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Instant>,
}

impl SelectionRange {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, time: Instant) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => time >= start && time <= end,
            (Some(start), None) => time == start,
            _ => false,
        }
    }
}

/// Why a pick was rejected. Returned as data, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("date is before the earliest allowed date")]
    MinDate,
    #[error("date is after the latest allowed date")]
    MaxDate,
    #[error("date is not available")]
    Blackout,
    #[error("range is longer than the maximum allowed duration")]
    MaxDuration,
    #[error("end date cannot be before start date")]
    InvalidRange,
}

impl ValidationError {
    /// Stable tag used in machine-readable output
    pub fn tag(&self) -> &'static str {
        match self {
            ValidationError::MinDate => "MIN_DATE",
            ValidationError::MaxDate => "MAX_DATE",
            ValidationError::Blackout => "BLACKOUT",
            ValidationError::MaxDuration => "MAX_DURATION",
            ValidationError::InvalidRange => "INVALID_RANGE",
        }
    }
}

/// Caller-supplied selection limits. Never mutated by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConstraints {
    pub min_date: Option<Instant>,
    pub max_date: Option<Instant>,
    /// Day-start instants of disallowed days
    pub blackout_dates: BTreeSet<Instant>,
    pub max_duration_days: Option<u32>,
    /// Also reject ranges that contain a blackout day strictly inside them
    pub scan_interior_blackouts: bool,
    /// Also run the end pick through the bounds and blackout checks
    pub check_end_date: bool,
}

impl ValidationConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, min: Instant) -> Self {
        self.min_date = Some(min);
        self
    }

    pub fn with_max_date(mut self, max: Instant) -> Self {
        self.max_date = Some(max);
        self
    }

    pub fn with_blackout(mut self, day: Instant) -> Self {
        self.blackout_dates.insert(day);
        self
    }

    pub fn with_max_duration_days(mut self, days: u32) -> Self {
        self.max_duration_days = Some(days);
        self
    }

    pub fn with_interior_blackout_scan(mut self, enabled: bool) -> Self {
        self.scan_interior_blackouts = enabled;
        self
    }

    pub fn with_end_date_check(mut self, enabled: bool) -> Self {
        self.check_end_date = enabled;
        self
    }
}

/// Display styles for [`format_instant`](crate::projector::format_instant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatStyle {
    /// "March 29, 2026"
    #[default]
    Date,
    /// "3:30 PM"
    Time,
    /// "March 29, 2026, 3:30 PM"
    DateTime,
    /// RFC 3339 with the zone's offset
    Iso,
}

/// CLI output format
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}
