//! Conversion between instants and civil time in a zone, and zone-local day
//! boundaries built on top of it.
//!
//! Going from an instant to civil time is a direct lookup. Going back is not:
//! the offset to apply depends on the very instant being searched for, so
//! [`civil_to_instant`] refines a guess until the wall clock at the guess
//! shows the requested value.

use crate::types::{CivilTime, CivilTimeError, FormatStyle, Instant};
use crate::zones::{Zone, ZoneOracle};
use chrono::{Duration, SecondsFormat};
use log::debug;

/// Upper bound on refinement steps. Offsets stay under 15 hours, so two
/// steps are enough everywhere except inside a DST gap.
pub const MAX_ITERATIONS: usize = 5;

/// Signed distance in minutes from `target` to `shown`
fn minute_difference(shown: &CivilTime, target: &CivilTime) -> i64 {
    let day_delta = (shown.date() - target.date()).num_days();
    day_delta * 1440 + shown.minute_of_day() - target.minute_of_day()
}

/// Find the instant at which the wall clock in `zone` shows `civil`.
///
/// When `civil` falls into a DST gap there is no such instant; the loop then
/// stops after [`MAX_ITERATIONS`] and returns its last guess, whatever the
/// zone reports for it.
pub fn civil_to_instant<Z: ZoneOracle + ?Sized>(civil: &CivilTime, zone: &Z) -> Instant {
    let mut guess = civil.naive().and_utc();

    for iteration in 0..MAX_ITERATIONS {
        let shown = zone.civil_at(guess);
        let diff = minute_difference(&shown, civil);
        if diff == 0 {
            return guess;
        }
        debug!(
            "{}: guess {} shows {}, off by {} min (iteration {})",
            zone.name(),
            guess,
            shown,
            diff,
            iteration + 1
        );
        guess -= Duration::minutes(diff);
    }

    debug!(
        "{}: {} did not converge after {} iterations, using {}",
        zone.name(),
        civil,
        MAX_ITERATIONS,
        guess
    );
    guess
}

/// Civil time shown in `zone` at `instant`
pub fn instant_to_civil<Z: ZoneOracle + ?Sized>(instant: Instant, zone: &Z) -> CivilTime {
    zone.civil_at(instant)
}

/// The instant at which the day containing `instant` starts in `zone`
pub fn start_of_day_in_zone<Z: ZoneOracle + ?Sized>(instant: Instant, zone: &Z) -> Instant {
    let civil = zone.civil_at(instant);
    civil_to_instant(&CivilTime::midnight(civil.date()), zone)
}

/// Keep the civil date of `instant` in `zone` but move it to `hour:minute`
pub fn set_time_of_day<Z: ZoneOracle + ?Sized>(
    instant: Instant,
    hour: u32,
    minute: u32,
    zone: &Z,
) -> Result<Instant, CivilTimeError> {
    let shown = zone.civil_at(instant);
    let target = CivilTime::new(shown.year(), shown.month(), shown.day(), hour, minute)?;
    Ok(civil_to_instant(&target, zone))
}

/// Render `instant` as wall-clock text in `zone`
pub fn format_instant(instant: Instant, zone: Zone, style: FormatStyle) -> String {
    let local = instant.with_timezone(&zone.tz());
    match style {
        FormatStyle::Date => local.format("%B %-d, %Y").to_string(),
        FormatStyle::Time => local.format("%-I:%M %p").to_string(),
        FormatStyle::DateTime => local.format("%B %-d, %Y, %-I:%M %p").to_string(),
        FormatStyle::Iso => local.to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
        CivilTime::new(y, mo, d, h, mi).unwrap()
    }

    #[test]
    fn utc_is_identity() {
        let c = civil(2026, 6, 1, 13, 45);
        let instant = civil_to_instant(&c, &Zone::Utc);
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 6, 1, 13, 45, 0).unwrap());
    }

    #[test]
    fn converges_for_positive_and_negative_offsets() {
        let tokyo = civil_to_instant(&civil(2026, 1, 1, 0, 30), &Zone::Tokyo);
        assert_eq!(tokyo, Utc.with_ymd_and_hms(2025, 12, 31, 15, 30, 0).unwrap());

        let kolkata = civil_to_instant(&civil(2026, 1, 1, 0, 0), &Zone::Kolkata);
        assert_eq!(kolkata, Utc.with_ymd_and_hms(2025, 12, 31, 18, 30, 0).unwrap());

        let la = civil_to_instant(&civil(2026, 7, 4, 21, 0), &Zone::LosAngeles);
        assert_eq!(la, Utc.with_ymd_and_hms(2026, 7, 5, 4, 0, 0).unwrap());
    }

    #[test]
    fn crosses_month_boundaries() {
        // The naive UTC guess shows Feb 28 in New York.
        let ny = civil_to_instant(&civil(2026, 3, 1, 0, 0), &Zone::NewYork);
        assert_eq!(ny, Utc.with_ymd_and_hms(2026, 3, 1, 5, 0, 0).unwrap());

        let sydney = civil_to_instant(&civil(2026, 12, 31, 23, 0), &Zone::Sydney);
        assert_eq!(sydney, Utc.with_ymd_and_hms(2026, 12, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn round_trips_outside_dst_gaps() {
        let samples = [
            civil(2026, 3, 29, 0, 0),
            civil(2026, 3, 29, 2, 30),
            civil(2026, 10, 25, 12, 0),
            civil(2024, 2, 29, 23, 59),
            civil(2026, 4, 5, 1, 15),
        ];
        for zone in Zone::ALL {
            for c in &samples {
                let instant = civil_to_instant(c, &zone);
                assert_eq!(instant_to_civil(instant, &zone), *c, "{} {}", zone, c);
            }
        }
    }

    #[test]
    fn fall_back_overlap_resolves_to_a_matching_instant() {
        // 01:30 happens twice: London on 2026-10-25, New York on 2026-11-01.
        for (zone, c) in [
            (Zone::London, civil(2026, 10, 25, 1, 30)),
            (Zone::NewYork, civil(2026, 11, 1, 1, 30)),
        ] {
            let instant = civil_to_instant(&c, &zone);
            let shown = instant_to_civil(instant, &zone);
            assert_eq!(shown, c, "{}", zone);
            assert_eq!(shown.date(), c.date(), "{}", zone);
        }
    }

    #[test]
    fn dst_gap_stays_on_the_requested_day() {
        // 01:30 does not exist in London on 2026-03-29.
        let c = civil(2026, 3, 29, 1, 30);
        let instant = civil_to_instant(&c, &Zone::London);
        let shown = instant_to_civil(instant, &Zone::London);
        assert_eq!(shown.date(), c.date());
    }

    #[test]
    fn start_of_day_on_london_spring_forward() {
        let noon = Utc.with_ymd_and_hms(2026, 3, 29, 12, 0, 0).unwrap();
        let start = start_of_day_in_zone(noon, &Zone::London);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 29, 0, 0, 0).unwrap());
        let shown = instant_to_civil(start, &Zone::London);
        assert_eq!((shown.day(), shown.hour(), shown.minute()), (29, 0, 0));
    }

    #[test]
    fn start_of_day_is_idempotent() {
        let mut t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        while t < end {
            for zone in Zone::ALL {
                let once = start_of_day_in_zone(t, &zone);
                assert_eq!(start_of_day_in_zone(once, &zone), once, "{} {}", zone, t);
                let shown = instant_to_civil(once, &zone);
                assert_eq!(shown.minute_of_day(), 0);
            }
            t += Duration::hours(7) + Duration::minutes(13);
        }
    }

    #[test]
    fn start_of_day_uses_the_zone_date() {
        // 20:00 UTC on Jan 1 is already Jan 2 in Tokyo.
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 20, 0, 0).unwrap();
        let start = start_of_day_in_zone(t, &Zone::Tokyo);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 1, 15, 0, 0).unwrap());
    }

    #[test]
    fn set_time_keeps_the_zone_date() {
        let t = Utc.with_ymd_and_hms(2026, 8, 10, 2, 0, 0).unwrap(); // Aug 9, 22:00 in New York
        let moved = set_time_of_day(t, 9, 15, &Zone::NewYork).unwrap();
        assert_eq!(instant_to_civil(moved, &Zone::NewYork), civil(2026, 8, 9, 9, 15));
        assert!(set_time_of_day(t, 24, 0, &Zone::NewYork).is_err());
    }

    #[test]
    fn formats_in_zone() {
        let t = Utc.with_ymd_and_hms(2026, 3, 29, 14, 30, 0).unwrap();
        assert_eq!(format_instant(t, Zone::London, FormatStyle::Date), "March 29, 2026");
        assert_eq!(format_instant(t, Zone::London, FormatStyle::Time), "3:30 PM");
        assert_eq!(
            format_instant(t, Zone::Tokyo, FormatStyle::DateTime),
            "March 29, 2026, 11:30 PM"
        );
        assert_eq!(
            format_instant(t, Zone::Kolkata, FormatStyle::Iso),
            "2026-03-29T20:00:00+05:30"
        );
    }
}
