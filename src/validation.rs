//! Range validation against caller constraints
//!
//! Validators are total: they return the first rule a value breaks, or
//! `Ok(())`. They never look at a timezone; instants are expected to be
//! zone-local day starts already, produced in the same zone as the
//! constraints.

use crate::types::{Instant, ValidationConstraints, ValidationError};
use std::ops::Bound;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Day-granularity equality. Two day starts from the same zone fall on the
/// same zone-local day exactly when they fall on the same UTC date.
fn same_day(a: Instant, b: Instant) -> bool {
    a.date_naive() == b.date_naive()
}

fn is_blackout(date: Instant, constraints: &ValidationConstraints) -> bool {
    constraints
        .blackout_dates
        .iter()
        .any(|&blocked| same_day(blocked, date))
}

/// Check a single picked day. First violated rule wins: bounds, then blackout.
pub fn validate_date(date: Instant, constraints: &ValidationConstraints) -> Result<(), ValidationError> {
    if constraints.min_date.is_some_and(|min| date < min) {
        return Err(ValidationError::MinDate);
    }
    if constraints.max_date.is_some_and(|max| date > max) {
        return Err(ValidationError::MaxDate);
    }
    if is_blackout(date, constraints) {
        return Err(ValidationError::Blackout);
    }
    Ok(())
}

/// Whole days covered by `start..=end`, rounded up
pub fn span_days(start: Instant, end: Instant) -> i64 {
    let millis = (end - start).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Check a start/end pair. Endpoints are assumed to have passed
/// [`validate_date`] already; interior days are only scanned for blackouts
/// when `scan_interior_blackouts` is set.
pub fn validate_range(
    start: Instant,
    end: Instant,
    constraints: &ValidationConstraints,
) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::InvalidRange);
    }

    if let Some(max_days) = constraints.max_duration_days {
        if span_days(start, end) > i64::from(max_days) {
            return Err(ValidationError::MaxDuration);
        }
    }

    if constraints.scan_interior_blackouts && start < end {
        let interior = constraints
            .blackout_dates
            .range((Bound::Excluded(start), Bound::Excluded(end)))
            .any(|&blocked| !same_day(blocked, start) && !same_day(blocked, end));
        if interior {
            return Err(ValidationError::Blackout);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> Instant {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn unconstrained_accepts_everything() {
        let c = ValidationConstraints::new();
        assert_eq!(validate_date(day(1999, 1, 1), &c), Ok(()));
        assert_eq!(validate_range(day(2000, 1, 1), day(2030, 1, 1), &c), Ok(()));
    }

    #[test]
    fn bounds_are_inclusive() {
        let c = ValidationConstraints::new()
            .with_min_date(day(2025, 1, 1))
            .with_max_date(day(2025, 12, 31));
        assert_eq!(validate_date(day(2024, 12, 31), &c), Err(ValidationError::MinDate));
        assert_eq!(validate_date(day(2025, 1, 1), &c), Ok(()));
        assert_eq!(validate_date(day(2025, 12, 31), &c), Ok(()));
        assert_eq!(validate_date(day(2026, 1, 1), &c), Err(ValidationError::MaxDate));
    }

    #[test]
    fn first_violation_wins() {
        // Blacked out and below the minimum: the minimum is reported.
        let c = ValidationConstraints::new()
            .with_min_date(day(2025, 6, 1))
            .with_blackout(day(2025, 5, 1));
        assert_eq!(validate_date(day(2025, 5, 1), &c), Err(ValidationError::MinDate));
    }

    #[test]
    fn blackout_matches_whole_day() {
        let c = ValidationConstraints::new().with_blackout(day(2025, 12, 25));
        assert_eq!(validate_date(day(2025, 12, 25), &c), Err(ValidationError::Blackout));
        let later_same_day = day(2025, 12, 25) + Duration::hours(9);
        assert_eq!(validate_date(later_same_day, &c), Err(ValidationError::Blackout));
        assert_eq!(validate_date(day(2025, 12, 26), &c), Ok(()));
    }

    #[test]
    fn range_rejects_reversed_endpoints() {
        let c = ValidationConstraints::new();
        assert_eq!(
            validate_range(day(2025, 3, 10), day(2025, 3, 5), &c),
            Err(ValidationError::InvalidRange)
        );
        assert_eq!(validate_range(day(2025, 3, 5), day(2025, 3, 5), &c), Ok(()));
    }

    #[test]
    fn duration_uses_ceiling_of_day_span() {
        let c = ValidationConstraints::new().with_max_duration_days(14);
        assert_eq!(validate_range(day(2025, 1, 1), day(2025, 1, 15), &c), Ok(()));
        assert_eq!(
            validate_range(day(2025, 1, 1), day(2025, 1, 20), &c),
            Err(ValidationError::MaxDuration)
        );
        // 14 days and one hour rounds up to 15.
        let end = day(2025, 1, 15) + Duration::hours(1);
        assert_eq!(span_days(day(2025, 1, 1), end), 15);
        assert_eq!(validate_range(day(2025, 1, 1), end, &c), Err(ValidationError::MaxDuration));
    }

    #[test]
    fn interior_blackouts_only_when_enabled() {
        let endpoint_only = ValidationConstraints::new().with_blackout(day(2025, 7, 4));
        assert_eq!(validate_range(day(2025, 7, 1), day(2025, 7, 10), &endpoint_only), Ok(()));

        let scanning = endpoint_only.clone().with_interior_blackout_scan(true);
        assert_eq!(
            validate_range(day(2025, 7, 1), day(2025, 7, 10), &scanning),
            Err(ValidationError::Blackout)
        );
        assert_eq!(validate_range(day(2025, 7, 5), day(2025, 7, 10), &scanning), Ok(()));
        assert_eq!(validate_range(day(2025, 7, 4), day(2025, 7, 4), &scanning), Ok(()));
    }
}
