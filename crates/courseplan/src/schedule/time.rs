//! Conversions between minutes-since-midnight and 12-hour clock strings.

use super::error::ScheduleError;
use super::types::Period;
use regex::Regex;
use std::sync::LazyLock;

static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}):(\d{2}) ([ap])m").unwrap());

/// Placeholder shown for meetings without an announced time.
pub const TBA: &str = "TBA";

/// Parses a catalog time such as `"9:30 am"` or `"12:05 pm"` into minutes
/// since midnight.
///
/// The first `h:mm am|pm` occurrence in the input is used, so strings like
/// `"9:30 am - 10:45 am"` yield the start time.
pub fn parse_time(input: &str) -> Result<u16, ScheduleError> {
    let invalid = || ScheduleError::InvalidTime {
        input: input.to_string(),
    };

    let caps = TIME_REGEX.captures(input).ok_or_else(invalid)?;
    let hour: u16 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u16 = caps[2].parse().map_err(|_| invalid())?;
    if hour > 12 || minute >= 60 {
        return Err(invalid());
    }

    let offset = if &caps[3] == "p" { 12 } else { 0 };
    Ok((offset + hour % 12) * 60 + minute)
}

/// Parses a `"start - end"` range such as `"9:30 - 10:45 am"` or
/// `"11:00 am - 12:15 pm"`.
///
/// A start without its own meridiem borrows the end's, moving back to the
/// morning when that would put it after the end (`"11:00 - 12:15 pm"`).
pub fn parse_period(input: &str) -> Result<Period, ScheduleError> {
    let invalid = || ScheduleError::InvalidTime {
        input: input.to_string(),
    };

    let (start_text, end_text) = input.split_once('-').ok_or_else(invalid)?;
    let end = parse_time(end_text.trim())?;
    let start_text = start_text.trim();
    let start = match parse_time(start_text) {
        Ok(start) => start,
        Err(_) => {
            let meridiem = if end >= 12 * 60 { "pm" } else { "am" };
            let start = parse_time(&format!("{start_text} {meridiem}"))?;
            if start >= end && meridiem == "pm" {
                parse_time(&format!("{start_text} am"))?
            } else {
                start
            }
        }
    };

    Period::new(start, end)
}

/// Formats minutes since midnight as `"9:05 am"`, or `"9:05"` without the
/// meridiem.
pub fn format_time(time: u16, meridiem: bool) -> String {
    let hour = time / 60;
    let minute = time % 60;
    let clock = format!("{}:{:02}", twelve_hour(hour), minute);
    if meridiem {
        format!("{clock} {}", meridiem_suffix(hour))
    } else {
        clock
    }
}

/// Formats minutes since midnight as an hour label such as `"9am"`.
pub fn format_time_short(time: u16) -> String {
    let hour = time / 60;
    format!("{}{}", twelve_hour(hour), meridiem_suffix(hour))
}

/// Formats a period as `"9:30 - 10:45 am"`, or [`TBA`] when absent.
pub fn format_period(period: Option<&Period>) -> String {
    match period {
        Some(period) => format!(
            "{} - {}",
            format_time(period.start(), false),
            format_time(period.end(), true)
        ),
        None => TBA.to_string(),
    }
}

// Midnight hour stays 0 and noon stays 12; only afternoon hours shift.
fn twelve_hour(hour: u16) -> u16 {
    if hour > 12 {
        hour - 12
    } else {
        hour
    }
}

fn meridiem_suffix(hour: u16) -> &'static str {
    if hour < 12 {
        "am"
    } else {
        "pm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_morning_and_afternoon() {
        assert_eq!(parse_time("9:30 am"), Ok(570));
        assert_eq!(parse_time("1:15 pm"), Ok(795));
        assert_eq!(parse_time("12:00 pm"), Ok(720));
        assert_eq!(parse_time("12:30 am"), Ok(30));
    }

    #[test]
    fn test_parse_time_finds_first_occurrence() {
        assert_eq!(parse_time("MWF 8:00 am - 8:50 am"), Ok(480));
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(matches!(
            parse_time("TBA"),
            Err(ScheduleError::InvalidTime { .. })
        ));
        assert!(parse_time("9:30").is_err());
        assert!(parse_time("13:00 pm").is_err());
        assert!(parse_time("9:75 am").is_err());
    }

    #[test]
    fn test_parse_period() {
        let period = parse_period("9:30 - 10:45 am").unwrap();
        assert_eq!((period.start(), period.end()), (570, 645));

        let crosses_noon = parse_period("11:00 am - 12:15 pm").unwrap();
        assert_eq!((crosses_noon.start(), crosses_noon.end()), (660, 735));

        let borrowed = parse_period("11:00 - 12:15 pm").unwrap();
        assert_eq!(borrowed.start(), 660);

        let afternoon = parse_period("3:00 - 4:15 pm").unwrap();
        assert_eq!(afternoon.start(), 900);

        assert!(parse_period("TBA").is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(570, true), "9:30 am");
        assert_eq!(format_time(570, false), "9:30");
        assert_eq!(format_time(720, true), "12:00 pm");
        assert_eq!(format_time(795, true), "1:15 pm");
        assert_eq!(format_time(30, true), "0:30 am");
        assert_eq!(format_time(605, true), "10:05 am");
    }

    #[test]
    fn test_format_time_short() {
        assert_eq!(format_time_short(540), "9am");
        assert_eq!(format_time_short(720), "12pm");
        assert_eq!(format_time_short(810), "1pm");
    }

    #[test]
    fn test_format_period() {
        let period = Period::new(570, 645).unwrap();
        assert_eq!(format_period(Some(&period)), "9:30 - 10:45 am");
        assert_eq!(period.to_string(), "9:30 - 10:45 am");
        assert_eq!(format_period(None), "TBA");
    }

    #[test]
    fn test_round_trip_through_strings() {
        for minutes in [60, 480, 570, 720, 795, 1200] {
            assert_eq!(parse_time(&format_time(minutes, true)), Ok(minutes));
        }
    }
}
