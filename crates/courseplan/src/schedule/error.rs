//! Error types for the schedule subsystem.

use thiserror::Error;

/// Errors that can occur while building schedule values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A period must start strictly before it ends, within a single day
    #[error("Invalid period: {start}..{end} (need start < end <= 1440)")]
    InvalidPeriod { start: u16, end: u16 },

    /// A time string did not look like "9:30 am"
    #[error("Invalid time string: {input:?}")]
    InvalidTime { input: String },

    /// A weekday code outside the known vocabulary
    #[error("Unknown weekday code: {code:?}")]
    UnknownWeekday { code: String },

    /// A one-time meeting date that could not be resolved to a weekday
    #[error("Invalid meeting date: {input:?}")]
    InvalidDate { input: String },
}
