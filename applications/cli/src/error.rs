/// CLI error types
use expensify_core::ExpensifyError;
use expensify_remote::RemoteClientError;
use expensify_sync::SyncError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteClientError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Expensify(#[from] ExpensifyError),

    #[error("Expense state stopped before observing the change")]
    StateClosed,
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
