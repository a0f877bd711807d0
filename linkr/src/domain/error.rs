// linkr/src/domain/error.rs
use crate::domain::link::LinkBuilderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed link line (expected 5 '|'-separated fields): '{line}'")]
    Format { line: String },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", index_message(.index, .len))]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot open '{url}': {reason}")]
    Open { url: String, reason: String },

    #[error("Other error: {0}")]
    Other(String),
}

fn index_message(index: &i64, len: &usize) -> String {
    if *len == 0 {
        format!("Index {} is invalid: the link list is empty.", index)
    } else {
        format!(
            "Index {} is invalid. Enter a value in the range [0, {}].",
            index,
            len - 1
        )
    }
}

impl DomainError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DomainError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::Validation(msg) => {
                DomainError::Validation(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            err => err,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<LinkBuilderError> for DomainError {
    fn from(e: LinkBuilderError) -> Self {
        DomainError::Validation(e.to_string())
    }
}
