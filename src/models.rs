//models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTarget {
    pub name: String,
    #[serde(rename = "weight")]
    pub target_weight: f64,
    #[serde(rename = "reps")]
    pub target_reps: u32,
    #[serde(rename = "sets")]
    pub target_sets: u32,
    #[serde(default)]
    pub note: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub day: String,
    pub exercises: Vec<ExerciseTarget>,
}

impl TrainingDay {
    pub fn exercise(&self, name: &str) -> Option<&ExerciseTarget> {
        self.exercises.iter().find(|e| e.name == name)
    }

    pub fn planned_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.target_sets).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub days: Vec<TrainingDay>,
}

/// One row of the workout log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Date", with = "log_date")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Exercise")]
    pub exercise: String,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Reps")]
    pub reps: u32,
    /// Absent in logs written before sets were counted.
    #[serde(rename = "Set_Number", alias = "Sets_Completed", default)]
    pub set_number: Option<u32>,
    #[serde(rename = "1RM")]
    pub one_rep_max: f64,
}

/// Column order of the log file.
pub const LOG_HEADER: [&str; 7] = ["Date", "Day", "Exercise", "Weight", "Reps", "Set_Number", "1RM"];

/// Columns of logs written before sets were counted.
pub const LEGACY_LOG_HEADER: [&str; 6] = ["Date", "Day", "Exercise", "Weight", "Reps", "1RM"];

/// Dates are written with minute precision. Older date-only rows read as midnight.
pub(crate) mod log_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M";
    const DATE_ONLY: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, FORMAT) {
            return Ok(ts);
        }
        NaiveDate::parse_from_str(raw, DATE_ONLY)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| de::Error::custom(format!("unrecognised date {raw:?}")))
    }
}
