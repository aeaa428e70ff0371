use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::log_store::LogStore;
use crate::models::{ExerciseTarget, LogRecord};
use crate::progress::SessionProgress;
use crate::rest_timer::RestTimer;

/// Weight and reps typed into an exercise's inputs, seeded from its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetDraft {
    pub weight: f64,
    pub reps: u32,
}

impl From<&ExerciseTarget> for SetDraft {
    fn from(target: &ExerciseTarget) -> Self {
        SetDraft { weight: target.target_weight, reps: target.target_reps }
    }
}

/// Everything the interactive session owns. Lives as long as the window.
#[derive(Debug)]
pub struct Session {
    pub day: String,
    pub progress: SessionProgress,
    pub rest_timer: RestTimer,
    pub start_rest_after_set: bool,
    pub status: Option<String>,
    drafts: HashMap<String, SetDraft>,
}

impl Session {
    pub fn new(day: &str, config: &AppConfig) -> Self {
        Session {
            day: day.to_string(),
            progress: SessionProgress::default(),
            rest_timer: RestTimer::new(config.rest_duration()),
            start_rest_after_set: true,
            status: None,
            drafts: HashMap::new(),
        }
    }

    pub fn select_day(&mut self, day: &str) {
        if self.day != day {
            info!(day, "switched training day");
            self.day = day.to_string();
        }
    }

    pub fn draft(&mut self, target: &ExerciseTarget) -> &mut SetDraft {
        self.drafts
            .entry(target.name.clone())
            .or_insert_with(|| SetDraft::from(target))
    }

    /// Logs the drafted set for `target` on the selected day.
    ///
    /// Rejected once every target set is done. The counter only moves after
    /// the record is on disk.
    pub fn log_set(&mut self, store: &LogStore, target: &ExerciseTarget) -> Result<LogRecord> {
        let set_number = match self.progress.counter(&self.day, target).next_set() {
            Some(n) => n,
            None => {
                warn!(exercise = %target.name, "set rejected, target already reached");
                return Err(Error::SetsComplete {
                    exercise: target.name.clone(),
                    sets: target.target_sets,
                });
            }
        };
        let draft = *self.draft(target);
        let record = store.log_set(&self.day, &target.name, draft.weight, draft.reps, Some(set_number))?;
        self.progress.counter(&self.day, target).record_set();
        if self.start_rest_after_set {
            self.rest_timer.start(Instant::now());
        }
        self.status = Some(format!(
            "Saved: {} set {} @ {}kg x {} (1RM {})",
            record.exercise, set_number, record.weight, record.reps, record.one_rep_max
        ));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LogStore, Program) {
        let dir = TempDir::new().unwrap();
        let store = LogStore::open(dir.path().join("workout_logs.csv")).unwrap();
        (dir, store, Program::builtin().unwrap())
    }

    #[test]
    fn drafts_start_at_target() {
        let (_dir, _store, program) = setup();
        let mut session = Session::new("Monday", &AppConfig::default());
        let target = program.target("Monday", "Deadlift").unwrap();
        assert_eq!(*session.draft(target), SetDraft { weight: 80.0, reps: 10 });

        session.draft(target).weight = 85.0;
        assert_eq!(session.draft(target).weight, 85.0);
    }

    #[test]
    fn logs_until_target_then_rejects() {
        let (_dir, store, program) = setup();
        let mut session = Session::new("Monday", &AppConfig::default());
        let target = program.target("Monday", "Deadlift").unwrap();

        for expected in 1..=target.target_sets {
            let record = session.log_set(&store, target).unwrap();
            assert_eq!(record.set_number, Some(expected));
            assert_eq!(record.one_rep_max, 106.7);
        }
        assert!(session.progress.is_complete("Monday", target));

        let rows_before = fs::read_to_string(store.path()).unwrap();
        assert!(matches!(
            session.log_set(&store, target),
            Err(Error::SetsComplete { sets: 3, .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), rows_before);
        assert_eq!(session.progress.completed("Monday", "Deadlift"), 3);
        assert_eq!(store.read_all().unwrap().len(), 3);
    }

    #[test]
    fn logging_starts_rest_timer() {
        let (_dir, store, program) = setup();
        let mut session = Session::new("Monday", &AppConfig::default());
        let target = program.target("Monday", "Barbell Row").unwrap();
        session.log_set(&store, target).unwrap();
        assert!(session.rest_timer.is_running(Instant::now()));
        assert!(session.status.as_deref().unwrap().starts_with("Saved: Barbell Row set 1"));

        session.rest_timer.cancel();
        session.start_rest_after_set = false;
        session.log_set(&store, target).unwrap();
        assert!(!session.rest_timer.is_running(Instant::now()));
    }

    #[test]
    fn failed_append_keeps_counter() {
        let (dir, store, program) = setup();
        let mut session = Session::new("Monday", &AppConfig::default());
        let target = program.target("Monday", "Deadlift").unwrap();

        // a directory where the log file should be makes every append fail
        let path = dir.path().join("broken.csv");
        let broken = LogStore::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        assert!(session.log_set(&broken, target).is_err());
        assert_eq!(session.progress.completed("Monday", "Deadlift"), 0);

        session.log_set(&store, target).unwrap();
        assert_eq!(session.progress.completed("Monday", "Deadlift"), 1);
    }

    #[test]
    fn day_switch_keeps_progress() {
        let (_dir, store, program) = setup();
        let mut session = Session::new("Monday", &AppConfig::default());
        let target = program.target("Monday", "Deadlift").unwrap();
        session.log_set(&store, target).unwrap();

        session.select_day("Friday");
        assert_eq!(session.day, "Friday");
        assert_eq!(session.progress.completed("Monday", "Deadlift"), 1);
        assert_eq!(session.progress.completed("Friday", "Deadlift"), 0);
        let rdl = program.target("Friday", "RDL").unwrap();
        assert_eq!(session.log_set(&store, rdl).unwrap().day, "Friday");
        assert_eq!(session.progress.completed("Friday", "RDL"), 1);
    }
}
