//! Weekly meeting patterns and the conflict check between sections.

mod conflict;
mod error;
mod time;
mod types;
#[cfg(feature = "webweg")]
mod webreg;

pub use conflict::{find_conflicts, has_conflict};
pub(crate) use conflict::{find_conflicts_on, has_conflict_on};
pub use error::ScheduleError;
pub use time::{format_period, format_time, format_time_short, parse_period, parse_time, TBA};
pub use types::*;
pub(crate) use types::schedule_type_matches;
