//! Supporting utilities: calendar math, output formatting, paths

pub mod calendar;
pub mod format;
pub mod paths;
