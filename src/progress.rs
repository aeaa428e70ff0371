use std::collections::HashMap;

use crate::models::{ExerciseTarget, TrainingDay};

/// Completed sets of one exercise, saturating at the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetCounter {
    completed: u32,
    target: u32,
}

impl SetCounter {
    pub fn new(target: u32) -> Self {
        SetCounter { completed: 0, target: target.max(1) }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn remaining(&self) -> u32 {
        self.target - self.completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.target
    }

    /// Share of the target done, for progress bars.
    pub fn fraction(&self) -> f32 {
        self.completed as f32 / self.target as f32
    }

    /// The number of the set after the completed ones, if any is left.
    pub fn next_set(&self) -> Option<u32> {
        (!self.is_complete()).then_some(self.completed + 1)
    }

    /// Counts one more set. Returns the new count, or `None` once the target is reached.
    pub fn record_set(&mut self) -> Option<u32> {
        let next = self.next_set()?;
        self.completed = next;
        Some(next)
    }
}

/// Per-exercise counters for the running session, kept apart per training
/// day so the same exercise can carry different set targets on different days.
/// Nothing here is persisted.
#[derive(Debug, Default)]
pub struct SessionProgress {
    counters: HashMap<(String, String), SetCounter>,
}

impl SessionProgress {
    pub fn counter(&mut self, day: &str, target: &ExerciseTarget) -> &mut SetCounter {
        self.counters
            .entry((day.to_string(), target.name.clone()))
            .or_insert_with(|| SetCounter::new(target.target_sets))
    }

    pub fn completed(&self, day: &str, exercise: &str) -> u32 {
        self.counters
            .get(&(day.to_string(), exercise.to_string()))
            .map_or(0, |c| c.completed())
    }

    pub fn is_complete(&self, day: &str, target: &ExerciseTarget) -> bool {
        self.completed(day, &target.name) >= target.target_sets
    }

    /// Sets done and sets planned across a whole training day.
    pub fn day_summary(&self, day: &TrainingDay) -> (u32, u32) {
        let done = day
            .exercises
            .iter()
            .map(|e| self.completed(&day.day, &e.name).min(e.target_sets))
            .sum();
        (done, day.planned_sets())
    }

    pub fn clear(&mut self) {
        self.counters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, sets: u32) -> ExerciseTarget {
        ExerciseTarget {
            name: name.to_string(),
            target_weight: 80.0,
            target_reps: 10,
            target_sets: sets,
            note: String::new(),
        }
    }

    #[test]
    fn saturates_at_target() {
        let mut counter = SetCounter::new(3);
        assert_eq!(counter.completed(), 0);
        assert_eq!(counter.record_set(), Some(1));
        assert_eq!(counter.record_set(), Some(2));
        assert_eq!(counter.record_set(), Some(3));
        assert!(counter.is_complete());
        assert_eq!(counter.record_set(), None);
        assert_eq!(counter.completed(), 3);
        assert_eq!(counter.remaining(), 0);
    }

    #[test]
    fn fraction_and_next_set() {
        let mut counter = SetCounter::new(4);
        assert_eq!(counter.next_set(), Some(1));
        counter.record_set();
        assert_eq!(counter.fraction(), 0.25);
        assert_eq!(counter.next_set(), Some(2));
        assert_eq!(counter.remaining(), 3);
    }

    #[test]
    fn counters_are_lazy_and_independent() {
        let deadlift = target("Deadlift", 3);
        let row = target("Barbell Row", 2);
        let mut progress = SessionProgress::default();
        assert_eq!(progress.completed("Monday", "Deadlift"), 0);

        progress.counter("Monday", &deadlift).record_set();
        progress.counter("Monday", &deadlift).record_set();
        progress.counter("Monday", &row).record_set();
        assert_eq!(progress.completed("Monday", "Deadlift"), 2);
        assert_eq!(progress.completed("Monday", "Barbell Row"), 1);
        assert!(!progress.is_complete("Monday", &deadlift));

        progress.counter("Monday", &row).record_set();
        assert!(progress.is_complete("Monday", &row));
    }

    #[test]
    fn same_exercise_on_two_days_keeps_its_own_target() {
        let monday_squat = target("Back Squat", 2);
        let friday_squat = target("Back Squat", 5);
        let mut progress = SessionProgress::default();

        progress.counter("Monday", &monday_squat).record_set();
        progress.counter("Monday", &monday_squat).record_set();
        assert!(progress.is_complete("Monday", &monday_squat));
        assert!(progress.counter("Monday", &monday_squat).is_complete());

        let friday = progress.counter("Friday", &friday_squat);
        assert_eq!(friday.target(), 5);
        assert_eq!(friday.completed(), 0);
        assert!(!progress.is_complete("Friday", &friday_squat));

        let day = TrainingDay { day: "Friday".into(), exercises: vec![friday_squat] };
        assert_eq!(progress.day_summary(&day), (0, 5));
    }

    #[test]
    fn day_summary_counts_sets() {
        let day = TrainingDay {
            day: "Monday".into(),
            exercises: vec![target("Deadlift", 3), target("Barbell Row", 2)],
        };
        let mut progress = SessionProgress::default();
        assert_eq!(progress.day_summary(&day), (0, 5));
        progress.counter("Monday", &day.exercises[0]).record_set();
        progress.counter("Monday", &day.exercises[1]).record_set();
        assert_eq!(progress.day_summary(&day), (2, 5));

        progress.clear();
        assert_eq!(progress.day_summary(&day), (0, 5));
    }
}
