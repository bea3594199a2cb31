//! Range selection state machine

use crate::projector::start_of_day_in_zone;
use crate::types::{Instant, SelectionRange, ValidationConstraints, ValidationError};
use crate::utils::calendar::ViewMonth;
use crate::validation::{validate_date, validate_range};
use crate::zones::Zone;
use log::{debug, info, warn};

/// Progress of a selection. Each variant carries exactly the fields that are
/// set in that state, so an end without a start cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    Pending { start: Instant },
    Complete { start: Instant, end: Instant },
}

impl Selection {
    pub fn range(&self) -> SelectionRange {
        match *self {
            Selection::Empty => SelectionRange::empty(),
            Selection::Pending { start } => SelectionRange {
                start: Some(start),
                end: None,
            },
            Selection::Complete { start, end } => SelectionRange {
                start: Some(start),
                end: Some(end),
            },
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Selection::Empty => "EMPTY",
            Selection::Pending { .. } => "PENDING",
            Selection::Complete { .. } => "COMPLETE",
        }
    }
}

/// Direction for month navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Owns the in-progress selection for one zone and constraint set.
///
/// Every state change comes from exactly one call; a rejected pick leaves
/// the selection untouched and records the error.
#[derive(Debug, Clone)]
pub struct Picker {
    zone: Zone,
    constraints: ValidationConstraints,
    selection: Selection,
    error: Option<ValidationError>,
    view: ViewMonth,
}

impl Picker {
    /// `now` only seeds the viewed month.
    pub fn new(zone: Zone, constraints: ValidationConstraints, now: Instant) -> Self {
        Self {
            zone,
            constraints,
            selection: Selection::Empty,
            error: None,
            view: ViewMonth::at(now, &zone),
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn constraints(&self) -> &ValidationConstraints {
        &self.constraints
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn range(&self) -> SelectionRange {
        self.selection.range()
    }

    /// Error reported by the most recent pick, if it was rejected
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    /// Apply a pick. `picked` must already be a zone-local day start.
    pub fn select(&mut self, picked: Instant) -> Result<SelectionRange, ValidationError> {
        let outcome = self.transition(picked);
        match outcome {
            Ok(next) => {
                info!(
                    "{} -> {} ({})",
                    self.selection.state_name(),
                    next.state_name(),
                    picked
                );
                self.selection = next;
                self.error = None;
                Ok(self.range())
            }
            Err(err) => {
                warn!(
                    "rejected {} in state {}: {}",
                    picked,
                    self.selection.state_name(),
                    err.tag()
                );
                self.error = Some(err);
                Err(err)
            }
        }
    }

    fn transition(&self, picked: Instant) -> Result<Selection, ValidationError> {
        match self.selection {
            Selection::Empty | Selection::Complete { .. } => {
                validate_date(picked, &self.constraints)?;
                Ok(Selection::Pending { start: picked })
            }
            Selection::Pending { start } => {
                if picked < start {
                    return Err(ValidationError::InvalidRange);
                }
                if self.constraints.check_end_date {
                    validate_date(picked, &self.constraints)?;
                }
                validate_range(start, picked, &self.constraints)?;
                Ok(Selection::Complete { start, end: picked })
            }
        }
    }

    /// Normalize a raw instant to its day start in the picker's zone, then
    /// select it.
    pub fn pick(&mut self, raw: Instant) -> Result<SelectionRange, ValidationError> {
        let day = start_of_day_in_zone(raw, &self.zone);
        debug!("normalized {} to day start {} in {}", raw, day, self.zone);
        self.select(day)
    }

    /// Install a trusted range (a preset). Constraints are not checked, but
    /// the range must have both ends in order.
    pub fn apply_range(&mut self, range: SelectionRange) -> Result<SelectionRange, ValidationError> {
        match (range.start, range.end) {
            (Some(start), Some(end)) if start <= end => {
                self.selection = Selection::Complete { start, end };
                self.error = None;
                Ok(self.range())
            }
            _ => {
                warn!("rejected preset range {:?}", range);
                self.error = Some(ValidationError::InvalidRange);
                Err(ValidationError::InvalidRange)
            }
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Empty;
        self.error = None;
    }

    /// Switch zones. The selection is dropped because its day starts belong
    /// to the old zone.
    pub fn set_zone(&mut self, zone: Zone, now: Instant) {
        if zone == self.zone {
            return;
        }
        info!("zone changed {} -> {}, clearing selection", self.zone, zone);
        self.zone = zone;
        self.view = ViewMonth::at(now, &zone);
        self.clear();
    }

    /// Move the viewed month. Does not touch the selection.
    pub fn navigate(&mut self, direction: Direction) -> ViewMonth {
        let delta = match direction {
            Direction::Prev => -1,
            Direction::Next => 1,
        };
        self.view = self.view.shift(delta);
        self.view
    }

    /// Day starts of every day in the viewed month
    pub fn visible_days(&self) -> Vec<Instant> {
        self.view.day_starts(&self.zone)
    }
}
