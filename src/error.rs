use thiserror::Error;

/// Fatal errors. Anything here stops the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid course snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single source row that could not become (or extend) a course.
/// The row is dropped, the batch goes on.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("title is \"null\", not a course")]
    NullTitle,

    #[error("no schedule could be read from {0:?}")]
    UnparseableSchedule(String),

    #[error("continuation row with no course before it")]
    OrphanContinuation,

    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),
}

/// A course that is missing one of the fields every output row needs.
/// `line` is the row as it would have been written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Skipped {line} (missing {})", .missing.join(", "))]
pub struct IncompleteCourse {
    pub crn_number: String,
    pub missing: Vec<&'static str>,
    pub line: String,
}
