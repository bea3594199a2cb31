//! tzrange - timezone-aware date range selection
//!
//! Converts between instants and wall-clock time in a fixed set of IANA
//! zones, finds zone-local day boundaries (DST transition days included),
//! and runs a small state machine that turns day picks into a validated
//! start/end range.
//!
//! ```no_run
//! use chrono::Utc;
//! use tzrange::{Picker, ValidationConstraints, Zone};
//!
//! let mut picker = Picker::new(Zone::London, ValidationConstraints::new(), Utc::now());
//! picker.pick(Utc::now()).unwrap();
//! ```

pub mod config;
pub mod presets;
pub mod projector;
pub mod selection;
pub mod types;
pub mod utils;
pub mod validation;
pub mod zones;

pub use config::{Config, ConfigError};
pub use presets::{preset_next_n_days, preset_today, Preset, PresetError};
pub use projector::{
    civil_to_instant, format_instant, instant_to_civil, set_time_of_day, start_of_day_in_zone,
};
pub use selection::{Direction, Picker, Selection};
pub use types::{
    CivilTime, CivilTimeError, FormatStyle, Instant, OutputFormat, SelectionRange,
    ValidationConstraints, ValidationError,
};
pub use utils::calendar::ViewMonth;
pub use validation::{validate_date, validate_range};
pub use zones::{UnsupportedZone, Zone, ZoneOracle};
