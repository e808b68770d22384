use thiserror::Error;

use crate::quiz::contact::FieldErrors;
use crate::quiz::session::Screen;

/// Rejected session transition. Never fatal: the session is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("`{operation}` is not available on the {screen:?} screen")]
    WrongScreen {
        operation: &'static str,
        screen: Screen,
    },

    #[error("question {question_id} has not been answered yet")]
    Unanswered { question_id: u32 },

    #[error("question {question_id} has no option with value {value}")]
    UnknownOption { question_id: u32, value: u8 },

    #[error("contact form has {} invalid field(s)", .0.len())]
    Validation(FieldErrors),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} is empty")]
    Empty(&'static str),
}

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
