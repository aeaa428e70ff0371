use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid program: {0}")]
    InvalidProgram(String),

    #[error("unsupported log columns: {0}")]
    UnsupportedLog(String),

    #[error("no training scheduled for {0}")]
    UnknownDay(String),

    #[error("{exercise} is not part of the {day} program")]
    UnknownExercise { day: String, exercise: String },

    #[error("all {sets} sets of {exercise} are already logged")]
    SetsComplete { exercise: String, sets: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
