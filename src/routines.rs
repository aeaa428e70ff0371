use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::Weekday;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{ExerciseTarget, Program, TrainingDay};

const BUILTIN_PROGRAM: &str = include_str!("../program.json");

impl Program {
    /// The Monday / Wednesday / Friday program shipped with the app.
    pub fn builtin() -> Result<Program> {
        Program::from_json(BUILTIN_PROGRAM)
    }

    pub fn load(path: &Path) -> Result<Program> {
        let json = fs::read_to_string(path)?;
        let program = Program::from_json(&json)?;
        info!(path = %path.display(), days = program.days.len(), "loaded training program");
        Ok(program)
    }

    pub fn from_json(json: &str) -> Result<Program> {
        let program: Program = serde_json::from_str(json)?;
        program.validate()?;
        Ok(program)
    }

    fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(Error::InvalidProgram("no training days".into()));
        }
        let mut days = HashSet::new();
        for day in &self.days {
            if !days.insert(day.day.as_str()) {
                return Err(Error::InvalidProgram(format!("{} is listed twice", day.day)));
            }
            let mut names = HashSet::new();
            for ex in &day.exercises {
                if !names.insert(ex.name.as_str()) {
                    return Err(Error::InvalidProgram(format!(
                        "{} appears twice on {}",
                        ex.name, day.day
                    )));
                }
                if ex.target_sets == 0 {
                    return Err(Error::InvalidProgram(format!(
                        "{} on {} needs at least one set",
                        ex.name, day.day
                    )));
                }
                if !ex.target_weight.is_finite() || ex.target_weight < 0.0 {
                    return Err(Error::InvalidProgram(format!(
                        "{} on {} has weight {}",
                        ex.name, day.day, ex.target_weight
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn day_names(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.day.as_str()).collect()
    }

    pub fn day(&self, name: &str) -> Result<&TrainingDay> {
        self.days
            .iter()
            .find(|d| d.day == name)
            .ok_or_else(|| Error::UnknownDay(name.to_string()))
    }

    pub fn target(&self, day: &str, exercise: &str) -> Result<&ExerciseTarget> {
        self.day(day)?
            .exercise(exercise)
            .ok_or_else(|| Error::UnknownExercise {
                day: day.to_string(),
                exercise: exercise.to_string(),
            })
    }

    /// Today's training day if one is scheduled, otherwise the first day of the
    /// week plan. `None` only for a program with no days.
    pub fn default_day(&self, today: Weekday) -> Option<&TrainingDay> {
        self.days
            .iter()
            .find(|d| d.day.parse::<Weekday>().ok() == Some(today))
            .or_else(|| self.days.first())
    }
}
