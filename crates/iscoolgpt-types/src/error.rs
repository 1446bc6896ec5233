use thiserror::Error;

/// Errors from validating an incoming ask request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("question must be at most {max} characters, got {actual}")]
    QuestionTooLong { max: usize, actual: usize },

    #[error("max_tokens must be a positive integer")]
    InvalidMaxTokens,
}

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },
}
