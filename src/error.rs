use std::fmt;

use thiserror::Error;

use crate::validation::ValidationError;

/// Which string selector failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Discipline,
    PricingStrategy,
    TicketClass,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectorKind::Discipline => "scheduling discipline",
            SelectorKind::PricingStrategy => "pricing strategy",
            SelectorKind::TicketClass => "ticket class",
        })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown {kind}: '{value}'")]
    UnknownSelector { kind: SelectorKind, value: String },

    #[error("Invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes for the command-line front end.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

impl Error {
    pub(crate) fn unknown(kind: SelectorKind, value: &str) -> Self {
        Error::UnknownSelector {
            kind,
            value: value.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownSelector { .. } | Error::Validation(_) => exit_code::INVALID_INPUT,
            Error::InvalidConfig(_) | Error::Toml(_) => exit_code::CONFIG_ERROR,
            Error::Io(_) => exit_code::GENERAL_ERROR,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
