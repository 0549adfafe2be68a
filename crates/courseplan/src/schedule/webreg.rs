/// Conversion from WebReg section data into schedule values
use super::error::ScheduleError;
use super::types::{DaySet, Meeting, Period, Section, Weekday};
use ::webweg::types::{CourseSection, Meeting as WebRegMeeting, MeetingDay};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

impl TryFrom<&CourseSection> for Section {
    type Error = ScheduleError;

    /// Builds a section from WebReg data.
    ///
    /// The schedule type comes from the first meeting's type code. Meetings
    /// with no days or a zero-length time become TBA meetings.
    fn try_from(section: &CourseSection) -> Result<Self, Self::Error> {
        let meetings = section
            .meetings
            .iter()
            .map(convert_meeting)
            .collect::<Result<Vec<_>, _>>()?;

        let schedule_type = section
            .meetings
            .first()
            .map(|m| schedule_type_name(&m.meeting_type))
            .unwrap_or_default();

        Ok(Section {
            section_id: Some(section.section_id.clone()),
            schedule_type,
            meetings,
        })
    }
}

fn convert_meeting(meeting: &WebRegMeeting) -> Result<Meeting, ScheduleError> {
    let days = match &meeting.meeting_days {
        MeetingDay::Repeated(codes) => codes
            .iter()
            .map(|code| code.parse::<Weekday>())
            .collect::<Result<DaySet, _>>()?,
        MeetingDay::OneTime(date) => DaySet::single(one_time_weekday(date)?),
        MeetingDay::None => return Ok(Meeting::tba(DaySet::EMPTY)),
    };

    let start = clock_minutes(i64::from(meeting.start_hr), i64::from(meeting.start_min));
    let end = clock_minutes(i64::from(meeting.end_hr), i64::from(meeting.end_min));
    let period = match (start, end) {
        (Some(start), Some(end)) if start < end => Some(Period::new(start, end)?),
        _ => {
            debug!(
                "Treating {} meeting on {} as TBA (no usable time)",
                meeting.meeting_type, days
            );
            None
        }
    };

    Ok(Meeting { days, period })
}

/// Resolves a one-time meeting date (`YYYY-MM-DD`) to its weekday.
fn one_time_weekday(date: &str) -> Result<Weekday, ScheduleError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| Weekday::from(d.weekday()))
        .map_err(|_| ScheduleError::InvalidDate {
            input: date.to_string(),
        })
}

fn clock_minutes(hour: i64, minute: i64) -> Option<u16> {
    if (0..24).contains(&hour) && (0..60).contains(&minute) {
        u16::try_from(hour * 60 + minute).ok()
    } else {
        None
    }
}

/// Expands WebReg's two-letter meeting type codes.
fn schedule_type_name(code: &str) -> String {
    match code.trim() {
        "LE" => "Lecture",
        "LA" => "Lab",
        "DI" => "Discussion",
        "SE" => "Seminar",
        "ST" => "Studio",
        other => other,
    }
    .to_string()
}
