//! Read-side views over the workout log for the history table and charts.

use chrono::NaiveDateTime;

use crate::models::LogRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    OneRepMax,
    Weight,
    Reps,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::OneRepMax, Metric::Weight, Metric::Reps];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::OneRepMax => "Estimated 1RM (kg)",
            Metric::Weight => "Weight (kg)",
            Metric::Reps => "Reps",
        }
    }

    fn value(&self, record: &LogRecord) -> f64 {
        match self {
            Metric::OneRepMax => record.one_rep_max,
            Metric::Weight => record.weight,
            Metric::Reps => record.reps as f64,
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    records: Vec<LogRecord>,
}

impl History {
    pub fn new(records: Vec<LogRecord>) -> Self {
        History { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[LogRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Distinct exercise names in the order they were first logged.
    pub fn exercises(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.exercise.as_str()) {
                names.push(&record.exercise);
            }
        }
        names
    }

    pub fn series(&self, exercise: &str, metric: Metric) -> Vec<(NaiveDateTime, f64)> {
        self.records
            .iter()
            .filter(|r| r.exercise == exercise)
            .map(|r| (r.timestamp, metric.value(r)))
            .collect()
    }

    pub fn best_one_rep_max(&self, exercise: &str) -> Option<f64> {
        self.records
            .iter()
            .filter(|r| r.exercise == exercise)
            .map(|r| r.one_rep_max)
            .fold(None, |best, v| Some(best.map_or(v, |b: f64| b.max(v))))
    }
}
