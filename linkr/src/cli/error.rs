// linkr/src/cli/error.rs
use crate::cli::command::COMMAND_NAMES;
use crate::domain::error::DomainError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown command: '{0}'. Valid commands: {valid}", valid = COMMAND_NAMES.join(", "))]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input ended")]
    InputClosed,

    #[error("Operation aborted by user")]
    OperationAborted,

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::InvalidArgument(msg) => {
                CliError::InvalidArgument(format!("{}: {}", context.into(), msg))
            }
            CliError::Domain(err) => CliError::Domain(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
