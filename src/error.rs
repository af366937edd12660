use thiserror::Error;

/// Failures while building question items. These are programming errors in a
/// generator and abort bank construction.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("could not find 4 distinct choices for {correct} after {draws} draws (got {found})")]
    ChoicesExhausted {
        correct: String,
        draws: usize,
        found: usize,
    },
    #[error("correct choice {0:?} is missing from the choice list")]
    MissingAnswer(String),
    #[error("no candidates to pick from: {0}")]
    EmptyCandidates(&'static str),
}

/// Failures of the key-value persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store json error: {0}")]
    Json(#[from] serde_json::Error),
}
