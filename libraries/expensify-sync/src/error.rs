use expensify_core::ExpensifyError;
use std::fmt;
use thiserror::Error;

/// Which sync operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    Create,
    Update,
    Delete,
    BulkLoad,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOperation::Create => "create",
            SyncOperation::Update => "update",
            SyncOperation::Delete => "delete",
            SyncOperation::BulkLoad => "bulk load",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Insert, update or delete was not acknowledged
    #[error("Remote write failed during {operation}: {source}")]
    RemoteWrite {
        operation: SyncOperation,
        #[source]
        source: ExpensifyError,
    },

    /// Bulk load could not read the partition
    #[error("Remote read failed: {0}")]
    RemoteRead(#[source] ExpensifyError),
}

impl SyncError {
    pub(crate) fn write(operation: SyncOperation, source: impl Into<ExpensifyError>) -> Self {
        Self::RemoteWrite {
            operation,
            source: source.into(),
        }
    }

    pub(crate) fn read(source: impl Into<ExpensifyError>) -> Self {
        Self::RemoteRead(source.into())
    }

    pub fn operation(&self) -> SyncOperation {
        match self {
            SyncError::RemoteWrite { operation, .. } => *operation,
            SyncError::RemoteRead(_) => SyncOperation::BulkLoad,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, SyncError::RemoteWrite { .. })
    }

    pub fn is_read(&self) -> bool {
        matches!(self, SyncError::RemoteRead(_))
    }

    /// The store-level error behind this failure
    pub fn remote_error(&self) -> &ExpensifyError {
        match self {
            SyncError::RemoteWrite { source, .. } | SyncError::RemoteRead(source) => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
