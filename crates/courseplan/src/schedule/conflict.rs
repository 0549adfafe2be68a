//! Detection of overlapping meeting times between sections.

use super::types::{DaySet, Meeting, Section};
use tracing::trace;

/// Returns true if any meeting of `a` shares a weekday and an overlapping
/// time with any meeting of `b`.
///
/// Meetings without a period (TBA) never conflict, and back-to-back meetings
/// that only touch at an endpoint are allowed. The check is symmetric.
pub fn has_conflict(a: &Section, b: &Section) -> bool {
    has_conflict_on(a, b, DaySet::ALL)
}

/// Same as [`has_conflict`], but only days in `week` are considered.
pub(crate) fn has_conflict_on(a: &Section, b: &Section, week: DaySet) -> bool {
    let hit = a.meetings.iter().enumerate().find_map(|(i, m1)| {
        b.meetings
            .iter()
            .position(|m2| meetings_conflict(m1, m2, week))
            .map(|j| (i, j))
    });

    match hit {
        Some((i, j)) => {
            trace!(
                "Sections {} and {} conflict (meeting {} vs meeting {})",
                a.label(),
                b.label(),
                i,
                j
            );
            true
        }
        None => false,
    }
}

/// Returns every pair of indices `(i, j)`, `i < j`, whose sections conflict.
///
/// Pairs come out in ascending order. An empty result means the sections
/// can all be taken together.
pub fn find_conflicts(sections: &[Section]) -> Vec<(usize, usize)> {
    find_conflicts_on(sections, DaySet::ALL)
}

pub(crate) fn find_conflicts_on(sections: &[Section], week: DaySet) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in sections.iter().enumerate() {
        for (j, b) in sections.iter().enumerate().skip(i + 1) {
            if has_conflict_on(a, b, week) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn meetings_conflict(m1: &Meeting, m2: &Meeting, week: DaySet) -> bool {
    match (m1.period, m2.period) {
        (Some(p1), Some(p2)) => {
            m1.days.intersection(m2.days).intersects(week) && p1.overlaps(&p2)
        }
        _ => false,
    }
}

impl Meeting {
    /// Returns true if both meetings are scheduled on a common day at
    /// overlapping times.
    pub fn conflicts_with(&self, other: &Meeting) -> bool {
        meetings_conflict(self, other, DaySet::ALL)
    }
}

impl Section {
    /// See [`has_conflict`].
    pub fn conflicts_with(&self, other: &Section) -> bool {
        has_conflict(self, other)
    }
}
