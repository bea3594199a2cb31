//! Canned ranges built from zone-local day starts
//!
//! Presets are trusted: they skip validation. Callers that need them checked
//! can pass the result through [`validate_range`](crate::validation::validate_range).

use crate::projector::start_of_day_in_zone;
use crate::types::{Instant, SelectionRange};
use crate::zones::ZoneOracle;
use chrono::Duration;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("a preset must cover at least one day")]
    ZeroLength,
}

/// Named presets offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Today,
    NextWeek,
    NextDays(u32),
}

impl Preset {
    pub fn days(&self) -> u32 {
        match self {
            Preset::Today => 1,
            Preset::NextWeek => 7,
            Preset::NextDays(n) => *n,
        }
    }

    pub fn resolve<Z: ZoneOracle + ?Sized>(
        &self,
        now: Instant,
        zone: &Z,
    ) -> Result<SelectionRange, PresetError> {
        preset_next_n_days(self.days(), now, zone)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Today => write!(f, "Today"),
            Preset::NextWeek => write!(f, "Next 7 days"),
            Preset::NextDays(n) => write!(f, "Next {} days", n),
        }
    }
}

/// Today in `zone`: from local midnight to one millisecond before the next
/// 24 hours elapse.
pub fn preset_today<Z: ZoneOracle + ?Sized>(now: Instant, zone: &Z) -> SelectionRange {
    let start = start_of_day_in_zone(now, zone);
    SelectionRange {
        start: Some(start),
        end: Some(start + Duration::days(1) - Duration::milliseconds(1)),
    }
}

/// `n` days starting today in `zone`, end inclusive
pub fn preset_next_n_days<Z: ZoneOracle + ?Sized>(
    n: u32,
    now: Instant,
    zone: &Z,
) -> Result<SelectionRange, PresetError> {
    if n == 0 {
        return Err(PresetError::ZeroLength);
    }
    let start = start_of_day_in_zone(now, zone);
    Ok(SelectionRange {
        start: Some(start),
        end: Some(start + Duration::days(i64::from(n)) - Duration::milliseconds(1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::instant_to_civil;
    use crate::zones::Zone;
    use chrono::{TimeZone, Utc};

    #[test]
    fn today_in_tokyo() {
        let now = Utc.with_ymd_and_hms(2026, 5, 20, 18, 0, 0).unwrap(); // May 21, 03:00 JST
        let range = preset_today(now, &Zone::Tokyo);
        let (start, end) = (range.start.unwrap(), range.end.unwrap());
        assert_eq!(end - start, Duration::hours(24) - Duration::milliseconds(1));
        let s = instant_to_civil(start, &Zone::Tokyo);
        let e = instant_to_civil(end, &Zone::Tokyo);
        assert_eq!(s.date(), e.date());
        assert_eq!(s.day(), 21);
    }

    #[test]
    fn next_week_spans_seven_days() {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        let range = Preset::NextWeek.resolve(now, &Zone::Utc).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap()));
        assert_eq!(
            range.end,
            Some(Utc.with_ymd_and_hms(2026, 1, 17, 0, 0, 0).unwrap() - Duration::milliseconds(1))
        );
    }

    #[test]
    fn today_matches_one_day_preset() {
        let now = Utc.with_ymd_and_hms(2026, 3, 29, 12, 0, 0).unwrap();
        assert_eq!(
            Ok(preset_today(now, &Zone::London)),
            preset_next_n_days(1, now, &Zone::London)
        );
    }

    #[test]
    fn zero_days_is_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(preset_next_n_days(0, now, &Zone::Utc), Err(PresetError::ZeroLength));
    }
}
