use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in the todo manager
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Cannot open database at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("A task with the description \"{0}\" already exists")]
    DuplicateDescription(String),

    #[error("Input stream closed")]
    InputClosed,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Errors the command loop reports and then carries on from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TodoError::DuplicateDescription(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TodoError>;
