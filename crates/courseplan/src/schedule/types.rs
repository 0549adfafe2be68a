/// Value types for weekly meeting patterns
use super::error::ScheduleError;
use super::time::format_period;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of minutes in a day; the exclusive upper bound for a period end.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Schedule-type keywords that mark a section as lab-like.
pub const DEFAULT_LAB_TYPES: [&str; 2] = ["Lab", "Studio"];

/// Schedule-type keywords that mark a section as a lecture.
pub const DEFAULT_LECTURE_TYPES: [&str; 1] = ["Lecture"];

/// Day of the week a meeting can occur on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every day, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday through Friday.
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Returns the WebReg day code (e.g., "M", "Tu", "Th").
    pub const fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "Th",
            Weekday::Friday => "F",
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Su",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    /// Accepts WebReg codes, the single-letter registrar codes (`T`, `R`,
    /// `S`, `U`) and English day names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim() {
            "M" | "Mon" | "Monday" => Weekday::Monday,
            "T" | "Tu" | "Tue" | "Tuesday" => Weekday::Tuesday,
            "W" | "Wed" | "Wednesday" => Weekday::Wednesday,
            "R" | "Th" | "Thu" | "Thursday" => Weekday::Thursday,
            "F" | "Fri" | "Friday" => Weekday::Friday,
            "S" | "Sa" | "Sat" | "Saturday" => Weekday::Saturday,
            "U" | "Su" | "Sun" | "Sunday" => Weekday::Sunday,
            other => {
                return Err(ScheduleError::UnknownWeekday {
                    code: other.to_string(),
                })
            }
        };
        Ok(day)
    }
}

impl TryFrom<String> for Weekday {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for &'static str {
    fn from(day: Weekday) -> Self {
        day.code()
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// A set of weekdays packed into a single byte.
///
/// Intersection and membership are single bit operations, so checking two
/// meetings for a shared day costs the same no matter how many days they
/// cover.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);
    pub const ALL: DaySet = DaySet(0b0111_1111);
    pub const WEEKDAYS: DaySet = DaySet(0b0001_1111);

    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub const fn single(day: Weekday) -> Self {
        DaySet(day.bit())
    }

    /// Returns a copy of this set with `day` added.
    pub const fn with(self, day: Weekday) -> Self {
        DaySet(self.0 | day.bit())
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// Returns true if at least one day is in both sets.
    pub const fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn intersection(self, other: DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the days in the set, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }

    /// Parses concatenated day codes such as `"MWF"`, `"TuTh"` or `"TR"`.
    ///
    /// Two-letter codes are matched before single letters, so `"TTh"` reads
    /// as Tuesday and Thursday. Whitespace and commas between codes are
    /// ignored.
    pub fn parse_codes(input: &str) -> Result<Self, ScheduleError> {
        let mut days = DaySet::EMPTY;
        let mut rest = input.trim();
        while !rest.is_empty() {
            if let Some(stripped) = rest.strip_prefix([',', ' ']) {
                rest = stripped;
                continue;
            }
            let two = rest.get(..2).and_then(|code| code.parse::<Weekday>().ok());
            let (day, width) = match two {
                Some(day) => (day, 2),
                None => {
                    let width = rest.chars().next().map_or(1, char::len_utf8);
                    (rest[..width].parse::<Weekday>()?, width)
                }
            };
            days.insert(day);
            rest = &rest[width..];
        }
        Ok(days)
    }
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            f.write_str(day.code())?;
        }
        Ok(())
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = DaySet::EMPTY;
        days.extend(iter);
        days
    }
}

impl Extend<Weekday> for DaySet {
    fn extend<I: IntoIterator<Item = Weekday>>(&mut self, iter: I) {
        for day in iter {
            self.insert(day);
        }
    }
}

impl From<Weekday> for DaySet {
    fn from(day: Weekday) -> Self {
        DaySet::single(day)
    }
}

impl Serialize for DaySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for day in self.iter() {
            seq.serialize_element(&day)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DaySetVisitor;

        impl<'de> Visitor<'de> for DaySetVisitor {
            type Value = DaySet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of weekday codes or a string like \"MWF\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DaySet, E> {
                DaySet::parse_codes(v).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DaySet, A::Error> {
                let mut days = DaySet::EMPTY;
                while let Some(day) = seq.next_element::<Weekday>()? {
                    days.insert(day);
                }
                Ok(days)
            }
        }

        deserializer.deserialize_any(DaySetVisitor)
    }
}

/// Half-open time-of-day interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    start: u16,
    end: u16,
}

impl Period {
    /// Creates a period, rejecting empty, inverted, or past-midnight ranges.
    pub fn new(start: u16, end: u16) -> Result<Self, ScheduleError> {
        if start < end && end <= MINUTES_PER_DAY {
            Ok(Self { start, end })
        } else {
            Err(ScheduleError::InvalidPeriod { start, end })
        }
    }

    pub const fn start(&self) -> u16 {
        self.start
    }

    pub const fn end(&self) -> u16 {
        self.end
    }

    pub const fn duration(&self) -> u16 {
        self.end - self.start
    }

    /// Returns true if `minute` falls in `[start, end)`.
    pub const fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Half-open overlap: back-to-back periods (`a.end == b.start`) do not
    /// overlap.
    pub const fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_period(Some(self)))
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: u16,
            end: u16,
        }

        let raw = Raw::deserialize(deserializer)?;
        Period::new(raw.start, raw.end).map_err(de::Error::custom)
    }
}

/// One weekly occurrence pattern of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeting {
    pub days: DaySet,
    /// `None` when the meeting time is still to be announced
    #[serde(default)]
    pub period: Option<Period>,
}

impl Meeting {
    pub fn new(days: DaySet, period: Period) -> Self {
        Self {
            days,
            period: Some(period),
        }
    }

    /// Creates a meeting with no announced time.
    pub fn tba(days: DaySet) -> Self {
        Self { days, period: None }
    }

    pub fn is_tba(&self) -> bool {
        self.period.is_none()
    }
}

/// One offering of a course with its own meeting pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Registrar identifier, used only for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub schedule_type: String,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

impl Section {
    pub fn new(schedule_type: impl Into<String>, meetings: Vec<Meeting>) -> Self {
        Self {
            section_id: None,
            schedule_type: schedule_type.into(),
            meetings,
        }
    }

    pub fn with_id(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    /// Returns true if the schedule type names a lab or studio.
    pub fn is_lab(&self) -> bool {
        schedule_type_matches(&self.schedule_type, &DEFAULT_LAB_TYPES)
    }

    /// Returns true if the schedule type names a lecture.
    pub fn is_lecture(&self) -> bool {
        schedule_type_matches(&self.schedule_type, &DEFAULT_LECTURE_TYPES)
    }

    /// Returns true if every meeting is still to be announced.
    pub fn is_tba(&self) -> bool {
        self.meetings.iter().all(Meeting::is_tba)
    }

    /// Short label for log messages.
    pub(crate) fn label(&self) -> &str {
        self.section_id.as_deref().unwrap_or(&self.schedule_type)
    }
}

/// Substring match of a schedule type against a keyword vocabulary.
pub(crate) fn schedule_type_matches<S: AsRef<str>>(schedule_type: &str, keywords: &[S]) -> bool {
    keywords
        .iter()
        .any(|keyword| schedule_type.contains(keyword.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_codes() {
        assert_eq!("Tu".parse::<Weekday>(), Ok(Weekday::Tuesday));
        assert_eq!("R".parse::<Weekday>(), Ok(Weekday::Thursday));
        assert_eq!("Sunday".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert!(matches!(
            "X".parse::<Weekday>(),
            Err(ScheduleError::UnknownWeekday { .. })
        ));
    }

    #[test]
    fn test_weekday_chrono_interop() {
        for day in Weekday::ALL {
            let chrono_day: chrono::Weekday = day.into();
            assert_eq!(Weekday::from(chrono_day), day);
        }
    }

    #[test]
    fn test_day_set_operations() {
        let mwf: DaySet = [Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
            .into_iter()
            .collect();
        let tth = DaySet::single(Weekday::Tuesday).with(Weekday::Thursday);

        assert_eq!(mwf.len(), 3);
        assert!(mwf.contains(Weekday::Wednesday));
        assert!(!mwf.intersects(tth));
        assert!(mwf.intersects(DaySet::single(Weekday::Friday)));
        assert_eq!(
            mwf.intersection(DaySet::WEEKDAYS),
            mwf,
            "MWF is within Mon-Fri"
        );
        assert!(DaySet::EMPTY.is_empty());
        assert!(!DaySet::EMPTY.intersects(DaySet::ALL));
    }

    #[test]
    fn test_day_set_parse_codes() {
        let parsed = DaySet::parse_codes("TuTh").unwrap();
        assert_eq!(parsed, DaySet::single(Weekday::Tuesday).with(Weekday::Thursday));

        let registrar = DaySet::parse_codes("MTWRF").unwrap();
        assert_eq!(registrar, DaySet::WEEKDAYS);

        let mixed = DaySet::parse_codes("TTh").unwrap();
        assert_eq!(mixed.len(), 2);

        assert_eq!(DaySet::parse_codes("").unwrap(), DaySet::EMPTY);
        assert!(DaySet::parse_codes("MXF").is_err());
    }

    #[test]
    fn test_day_set_display() {
        let days = DaySet::single(Weekday::Thursday).with(Weekday::Tuesday);
        assert_eq!(days.to_string(), "TuTh");
    }

    #[test]
    fn test_day_set_serde() {
        let days = DaySet::single(Weekday::Monday).with(Weekday::Friday);
        let json = serde_json::to_string(&days).unwrap();
        assert_eq!(json, r#"["M","F"]"#);

        let back: DaySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, days);

        let from_string: DaySet = serde_json::from_str(r#""MWF""#).unwrap();
        assert_eq!(from_string.len(), 3);
    }

    #[test]
    fn test_period_validation() {
        assert!(Period::new(540, 600).is_ok());
        assert_eq!(
            Period::new(600, 600),
            Err(ScheduleError::InvalidPeriod { start: 600, end: 600 })
        );
        assert!(Period::new(700, 600).is_err());
        assert!(Period::new(1400, MINUTES_PER_DAY + 1).is_err());
        assert!(Period::new(0, MINUTES_PER_DAY).is_ok());
    }

    #[test]
    fn test_period_overlaps_half_open() {
        let morning = Period::new(540, 600).unwrap();
        let late_morning = Period::new(590, 650).unwrap();
        let back_to_back = Period::new(600, 650).unwrap();

        assert!(morning.overlaps(&late_morning));
        assert!(late_morning.overlaps(&morning));
        assert!(!morning.overlaps(&back_to_back));
        assert!(!back_to_back.overlaps(&morning));
        assert!(morning.contains(540));
        assert!(!morning.contains(600));
        assert_eq!(morning.duration(), 60);
    }

    #[test]
    fn test_period_deserialize_rejects_inverted() {
        let ok: Period = serde_json::from_str(r#"{"start":540,"end":600}"#).unwrap();
        assert_eq!(ok.start(), 540);
        assert!(serde_json::from_str::<Period>(r#"{"start":600,"end":540}"#).is_err());
    }

    #[test]
    fn test_section_classification() {
        let lab = Section::new("Lab", vec![]);
        let studio = Section::new("Studio", vec![]);
        let lecture = Section::new("Lecture", vec![]);
        let combined = Section::new("Lecture*/Lab", vec![]);

        assert!(lab.is_lab());
        assert!(studio.is_lab());
        assert!(!lecture.is_lab());
        assert!(lecture.is_lecture());
        assert!(combined.is_lab() && combined.is_lecture());
        assert!(!Section::new("Recitation", vec![]).is_lecture());
    }

    #[test]
    fn test_section_deserialize_camel_case() {
        let json = r#"{
            "scheduleType": "Lecture",
            "meetings": [
                {"days": ["M", "W"], "period": {"start": 600, "end": 650}},
                {"days": "F"}
            ]
        }"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert!(section.is_lecture());
        assert_eq!(section.meetings.len(), 2);
        assert!(section.meetings[1].is_tba());
        assert!(!section.is_tba());
    }
}
