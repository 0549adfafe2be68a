/// Configuration for section classification and conflict checks
use crate::schedule::{self, DaySet, Section, DEFAULT_LAB_TYPES, DEFAULT_LECTURE_TYPES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading a [`ScheduleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which days of the week conflict checks look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Week {
    /// Monday through Friday only; weekend meetings never conflict
    Weekdays,
    #[default]
    FullWeek,
}

impl Week {
    pub fn days(self) -> DaySet {
        match self {
            Week::Weekdays => DaySet::WEEKDAYS,
            Week::FullWeek => DaySet::ALL,
        }
    }
}

/// Top-level schedule configuration
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Schedule-type keywords that make a section lab-like
    pub lab_types: Vec<String>,
    /// Schedule-type keywords that make a section a lecture
    pub lecture_types: Vec<String>,
    pub week: Week,
}

impl ScheduleConfig {
    /// Loads a configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(ScheduleConfig)` - Loaded configuration, defaults filled in
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!(
            "Loaded schedule config from {} ({} lab types, {} lecture types, {:?})",
            path.display(),
            config.lab_types.len(),
            config.lecture_types.len(),
            config.week
        );
        Ok(config)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Returns true if the section's schedule type matches a lab keyword.
    pub fn is_lab(&self, section: &Section) -> bool {
        schedule::schedule_type_matches(&section.schedule_type, &self.lab_types)
    }

    /// Returns true if the section's schedule type matches a lecture keyword.
    pub fn is_lecture(&self, section: &Section) -> bool {
        schedule::schedule_type_matches(&section.schedule_type, &self.lecture_types)
    }

    /// Conflict check restricted to the configured week.
    pub fn has_conflict(&self, a: &Section, b: &Section) -> bool {
        schedule::has_conflict_on(a, b, self.week.days())
    }

    /// Conflicting index pairs, restricted to the configured week.
    pub fn find_conflicts(&self, sections: &[Section]) -> Vec<(usize, usize)> {
        schedule::find_conflicts_on(sections, self.week.days())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            lab_types: DEFAULT_LAB_TYPES.iter().map(|s| s.to_string()).collect(),
            lecture_types: DEFAULT_LECTURE_TYPES.iter().map(|s| s.to_string()).collect(),
            week: Week::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Meeting, Period, Weekday};

    #[test]
    fn test_defaults_match_builtin_vocabulary() {
        let config = ScheduleConfig::default();
        let studio = Section::new("Studio", vec![]);
        let lecture = Section::new("Lecture", vec![]);

        assert_eq!(config.is_lab(&studio), studio.is_lab());
        assert_eq!(config.is_lecture(&lecture), lecture.is_lecture());
        assert_eq!(config.week, Week::FullWeek);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ScheduleConfig::from_json(r#"{"lab_types": ["Lab", "Practicum"]}"#).unwrap();
        assert!(config.is_lab(&Section::new("Practicum", vec![])));
        assert!(!config.is_lab(&Section::new("Studio", vec![])));
        assert_eq!(config.lecture_types, vec!["Lecture".to_string()]);
        assert_eq!(config.week, Week::FullWeek);
    }

    #[test]
    fn test_weekdays_week_ignores_weekend() {
        let config = ScheduleConfig::from_json(r#"{"week": "weekdays"}"#).unwrap();
        let saturday = DaySet::single(Weekday::Saturday);
        let a = Section::new("Lab", vec![Meeting::new(saturday, Period::new(600, 700).unwrap())]);
        let b = Section::new("Lab", vec![Meeting::new(saturday, Period::new(650, 750).unwrap())]);

        assert!(!config.has_conflict(&a, &b));
        assert!(ScheduleConfig::default().has_conflict(&a, &b));
        assert!(config.find_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "courseplan-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"lecture_types": ["Lecture", "Seminar"], "week": "full_week"}"#)
            .unwrap();

        let config = ScheduleConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(config.is_lecture(&Section::new("Seminar", vec![])));
        assert_eq!(config.lab_types.len(), 2);
    }

    #[test]
    fn test_load_errors() {
        let missing = ScheduleConfig::load_from_file(Path::new("/nonexistent/courseplan.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let malformed = ScheduleConfig::from_json(r#"{"week": "sometimes"}"#);
        assert!(matches!(malformed, Err(ConfigError::Json(_))));
    }
}
