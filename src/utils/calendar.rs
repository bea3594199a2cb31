//! Calendar month helpers for the viewed-month grid

use crate::projector::civil_to_instant;
use crate::types::{CivilTime, Instant};
use crate::zones::ZoneOracle;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A calendar month in zone-local terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ViewMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl ViewMonth {
    /// Month containing the civil date `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month shown by the wall clock in `zone` at `instant`
    pub fn at<Z: ZoneOracle + ?Sized>(instant: Instant, zone: &Z) -> Self {
        Self::containing(zone.civil_at(instant).date())
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Move by `delta` calendar months (negative goes back)
    pub fn shift(&self, delta: i32) -> Self {
        let first = self.first_day();
        let moved = if delta >= 0 {
            first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        moved.map(Self::containing).unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Blank cells before day 1 in a Sunday-first week grid
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Civil dates of every day in the month
    pub fn dates(&self) -> Vec<NaiveDate> {
        let first = self.first_day();
        first.iter_days().take(self.days_in_month() as usize).collect()
    }

    /// Zone-local day start of every day in the month
    pub fn day_starts<Z: ZoneOracle + ?Sized>(&self, zone: &Z) -> Vec<Instant> {
        self.dates()
            .into_iter()
            .map(|date| civil_to_instant(&CivilTime::midnight(date), zone))
            .collect()
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}
