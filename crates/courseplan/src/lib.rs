//! Course-planning utilities: schedule-conflict detection between sections,
//! natural-language rendering of prerequisite trees, and the small
//! time and text formatters that go with them.
//!
//! Everything here is pure and synchronous. Inputs are read-only values
//! produced by a catalog loader; outputs are freshly allocated strings and
//! booleans.

pub mod config;
pub mod prereq;
pub mod schedule;
pub mod term;
pub mod text;

pub use config::{ConfigError, ScheduleConfig, Week};
pub use prereq::{serialize, ClauseError, CourseRef, Operator, PrerequisiteClause, RenderCache};
pub use schedule::{
    find_conflicts, has_conflict, DaySet, Meeting, Period, ScheduleError, Section, Weekday,
};
