use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("invalid_input: {0}")]
    Validation(#[from] ValidationError),
    #[error("authentication_failed: {message}")]
    AuthenticationFailed { message: String },
    #[error("unreachable: {message}")]
    Unreachable { message: String },
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("user_exists: {username}@{database}")]
    UserExists { username: String, database: String },
    #[error("command_failed: {code_name} ({code}): {message}")]
    Command {
        code: i32,
        code_name: String,
        message: String,
    },
    #[error("driver_error: {message}")]
    Driver { message: String },
}

impl ProvisionError {
    /// Stable identifier used as the `reason` field of log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_input",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::Unreachable { .. } => "unreachable",
            Self::Unauthorized { .. } => "unauthorized",
            Self::UserExists { .. } => "user_exists",
            Self::Command { .. } => "command_failed",
            Self::Driver { .. } => "driver_error",
        }
    }
}
