use thiserror::Error;

/// Errors raised at the edges of the library: decoding rows, reading
/// configuration and talking to a store. The calculators themselves never fail.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid points rule: {0}")]
    InvalidRule(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, LeagueError>;

#[cfg(feature = "python")]
impl From<LeagueError> for pyo3::PyErr {
    fn from(err: LeagueError) -> Self {
        match err {
            LeagueError::Io(e) => pyo3::exceptions::PyIOError::new_err(e.to_string()),
            other => pyo3::exceptions::PyValueError::new_err(other.to_string()),
        }
    }
}
