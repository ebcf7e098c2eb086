use crate::registry::command::CommandRecord;
use crate::registry::Decimal;

/// Top-level error type for batch processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors during `CommandRecord` -> `Command` conversion (hard errors).
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(CommandRecord),
}

/// Errors returned by registry operations.
///
/// A failing operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("User {username} not found")]
    UserNotFound { username: String },

    #[error("Invalid amount {amount}: must be non-negative with at most 4 decimal places")]
    InvalidAmount { amount: Decimal },

    #[error("Insufficient funds: user {username} has {available}, requested {requested}")]
    InsufficientFunds {
        username: String,
        available: Decimal,
        requested: Decimal,
    },

    #[error("Balance overflow: crediting {username} would exceed the registry limit")]
    Overflow { username: String },

    #[error("User {username} already exists")]
    AlreadyExists { username: String },

    #[error("Username must not be empty")]
    InvalidUsername,
}

impl RegistryError {
    pub(super) fn user_not_found(username: &str) -> Self {
        RegistryError::UserNotFound {
            username: username.to_owned(),
        }
    }
}
