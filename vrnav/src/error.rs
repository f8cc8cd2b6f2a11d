use thiserror::Error;

/// Errors raised while configuring or driving the navigation technique.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("navigation input `{input}` was not provided")]
    MissingInput { input: &'static str },

    #[error("navigation technique used before its inputs were set")]
    NotConfigured,

    #[error("invalid teleport config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown transition mode `{0}`, expected `instant` or `animated`")]
    UnknownTransitionMode(String),
}

pub type NavigationResult<T> = Result<T, NavigationError>;
