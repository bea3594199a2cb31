//! Configuration loading
//!
//! The embedding application supplies the zone and the validation
//! constraints once, from a TOML file. Anything wrong in that file is a
//! [`ConfigError`]; it never turns into a per-pick validation error.

use crate::projector::{civil_to_instant, instant_to_civil};
use crate::types::{CivilTime, Instant, ValidationConstraints};
use crate::zones::{UnsupportedZone, Zone};
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    UnsupportedZone(#[from] UnsupportedZone),
    #[error("invalid date '{value}' for {field} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    timezone: Option<String>,
    #[serde(default)]
    constraints: RawConstraints,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConstraints {
    min_date: Option<String>,
    max_date: Option<String>,
    #[serde(default)]
    blackout_dates: Vec<String>,
    max_duration_days: Option<u32>,
    #[serde(default)]
    scan_interior_blackouts: bool,
    #[serde(default)]
    check_end_date: bool,
}

/// Resolved configuration: a supported zone and constraints expressed as
/// day starts in that zone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub zone: Zone,
    pub constraints: ValidationConstraints,
}

impl Config {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {:?}", path);
        Self::resolve(raw, None)
    }

    /// Parse configuration text, optionally overriding its zone
    pub fn from_toml(content: &str, zone_override: Option<Zone>) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::resolve(raw, zone_override)
    }

    /// Re-anchor the constraint days in another zone, keeping their civil dates
    pub fn with_zone(self, zone: Zone) -> Self {
        if zone == self.zone {
            return self;
        }
        let from = self.zone;
        let move_day = |instant: Instant| day_start(instant_to_civil(instant, &from).date(), zone);
        let constraints = ValidationConstraints {
            min_date: self.constraints.min_date.map(move_day),
            max_date: self.constraints.max_date.map(move_day),
            blackout_dates: self.constraints.blackout_dates.iter().map(|d| move_day(*d)).collect(),
            max_duration_days: self.constraints.max_duration_days,
            scan_interior_blackouts: self.constraints.scan_interior_blackouts,
            check_end_date: self.constraints.check_end_date,
        };
        Self { zone, constraints }
    }

    fn resolve(raw: RawConfig, zone_override: Option<Zone>) -> Result<Self, ConfigError> {
        let zone = match (zone_override, raw.timezone) {
            (Some(zone), _) => zone,
            (None, Some(id)) => id.parse::<Zone>()?,
            (None, None) => Zone::default(),
        };

        let c = raw.constraints;
        let mut constraints = ValidationConstraints::new()
            .with_interior_blackout_scan(c.scan_interior_blackouts)
            .with_end_date_check(c.check_end_date);
        if let Some(ref v) = c.min_date {
            constraints = constraints.with_min_date(parse_day("min_date", v, zone)?);
        }
        if let Some(ref v) = c.max_date {
            constraints = constraints.with_max_date(parse_day("max_date", v, zone)?);
        }
        for v in &c.blackout_dates {
            constraints = constraints.with_blackout(parse_day("blackout_dates", v, zone)?);
        }
        if let Some(days) = c.max_duration_days {
            constraints = constraints.with_max_duration_days(days);
        }

        Ok(Self { zone, constraints })
    }
}

fn day_start(date: NaiveDate, zone: Zone) -> Instant {
    civil_to_instant(&CivilTime::midnight(date), &zone)
}

/// Parse a `YYYY-MM-DD` civil day into its day start in `zone`
pub fn parse_day(field: &'static str, value: &str, zone: Zone) -> Result<Instant, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| day_start(date, zone))
        .map_err(|_| ConfigError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
timezone = "Asia/Tokyo"

[constraints]
min_date = "2025-01-01"
max_date = "2026-12-31"
blackout_dates = ["2025-12-25", "2026-01-01"]
max_duration_days = 14
"#;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.zone, Zone::Utc);
    }

    #[test]
    fn loads_constraints_as_zone_day_starts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.zone, Zone::Tokyo);
        assert_eq!(config.constraints.max_duration_days, Some(14));
        assert_eq!(config.constraints.blackout_dates.len(), 2);
        let min = config.constraints.min_date.unwrap();
        let civil = instant_to_civil(min, &Zone::Tokyo);
        assert_eq!(civil, CivilTime::new(2025, 1, 1, 0, 0).unwrap());
        assert!(!config.constraints.scan_interior_blackouts);
    }

    #[test]
    fn end_date_check_defaults_off() {
        let config = Config::from_toml(SAMPLE, None).unwrap();
        assert!(!config.constraints.check_end_date);
        let config = Config::from_toml("[constraints]\ncheck_end_date = true", None).unwrap();
        assert!(config.constraints.check_end_date);
        assert!(config.with_zone(Zone::Tokyo).constraints.check_end_date);
    }

    #[test]
    fn unsupported_zone_is_a_config_error() {
        let err = Config::from_toml("timezone = \"Europe/Paris\"", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedZone(_)));
    }

    #[test]
    fn zone_override_wins() {
        let config = Config::from_toml(SAMPLE, Some(Zone::London)).unwrap();
        assert_eq!(config.zone, Zone::London);
        let min = config.constraints.min_date.unwrap();
        assert_eq!(instant_to_civil(min, &Zone::London).date(), min.date_naive());
    }

    #[test]
    fn rejects_bad_dates_and_unknown_keys() {
        let err = Config::from_toml("[constraints]\nmin_date = \"2025-02-30\"", None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { field: "min_date", .. }));
        let err = Config::from_toml("[constraints]\nweekends = true", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rezoning_keeps_civil_dates() {
        let tokyo = Config::from_toml(SAMPLE, None).unwrap();
        let ny = tokyo.with_zone(Zone::NewYork);
        let min = ny.constraints.min_date.unwrap();
        assert_eq!(
            instant_to_civil(min, &Zone::NewYork),
            CivilTime::new(2025, 1, 1, 0, 0).unwrap()
        );
        assert_eq!(ny.constraints.blackout_dates.len(), 2);
    }
}
