//! Application-level errors

use thiserror::Error;

/// Application errors cover everything around the scoring core, which itself
/// cannot fail.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApplicationError::Config { .. } | ApplicationError::InvalidSetting { .. } => {
                crate::exitcode::CONFIG
            }
        }
    }
}
