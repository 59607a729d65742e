use thiserror::Error;

use crate::types::ShardId;

/// Convenience alias for `Result<T, PrismError>`.
pub type PrismResult<T> = Result<T, PrismError>;

/// Error classification for reporting decisions.
///
/// - `UserError`   : bad request, unknown schema, misuse of the transaction
///   state machine; reported to the client, nothing to page about
/// - `Transient`   : a backend connection failed mid-flight; client MAY retry
/// - `InternalBug` : broken invariant (catalog inconsistency, cursor misuse);
///   should never happen, logged at error level before leaving the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserError,
    Transient,
    InternalBug,
}

/// Top-level error type that all subsystem errors convert into.
#[derive(Error, Debug)]
pub enum PrismError {
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("Transaction error: {0}")]
    Txn(#[from] TxnError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result-merging errors.
#[derive(Error, Debug)]
pub enum MergeError {
    /// `value()` was called with no current row: either before the first
    /// successful `next()` or after the cursor reported exhaustion.
    #[error("No current row: value() called outside a positioned row")]
    NoCurrentRow,

    #[error("Column index {0} out of bounds for current row")]
    ColumnOutOfBounds(usize),

    /// A logical table survived filtering but has no catalog entry. The
    /// metadata catalog and the sharding rule disagree about which tables
    /// exist: an invariant violation in the external catalog, never skipped.
    #[error("No metadata entry for logical table '{table}'")]
    MetadataMissing { table: String },

    #[error("Invalid catalog filter pattern '{pattern}': {reason}")]
    BadPattern { pattern: String, reason: String },
}

/// Transaction coordination errors.
#[derive(Error, Debug)]
pub enum TxnError {
    /// A single backend connection failed to acquire or respond.
    #[error("Backend connection failure on {shard}: {reason}")]
    Connection { shard: ShardId, reason: String },

    /// COMMIT did not reach every backend connection.
    #[error("Commit failed on {failed} of {total} backend connections: {first}")]
    CommitFailed {
        failed: usize,
        total: usize,
        first: String,
    },

    /// ROLLBACK did not reach every backend connection.
    #[error("Rollback failed on {failed} of {total} backend connections: {first}")]
    RollbackFailed {
        failed: usize,
        total: usize,
        first: String,
    },

    /// COMMIT issued while the session transaction is in the failed state.
    /// Only ROLLBACK leaves that state.
    #[error("Transaction is in a failed state and can only be rolled back")]
    TransactionFailed,
}

/// Client-request errors raised before any cursor is constructed.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("No database selected")]
    NoDatabaseSelected,

    #[error("Unknown database '{0}'")]
    UnknownDatabase(String),
}

// ── PrismError classification & helpers ─────────────────────────────────────

impl PrismError {
    /// Classify this error for reporting decisions.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrismError::Backend(_) => ErrorKind::UserError,
            PrismError::Merge(MergeError::BadPattern { .. }) => ErrorKind::UserError,
            PrismError::Txn(TxnError::TransactionFailed) => ErrorKind::UserError,

            PrismError::Txn(TxnError::Connection { .. }) => ErrorKind::Transient,
            PrismError::Txn(TxnError::CommitFailed { .. }) => ErrorKind::Transient,
            PrismError::Txn(TxnError::RollbackFailed { .. }) => ErrorKind::Transient,

            PrismError::Merge(_) => ErrorKind::InternalBug,
            PrismError::Internal(_) => ErrorKind::InternalBug,
        }
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::UserError)
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transient)
    }

    pub fn is_internal_bug(&self) -> bool {
        matches!(self.kind(), ErrorKind::InternalBug)
    }

    /// MySQL error number for the error packet.
    pub fn error_code(&self) -> u16 {
        match self {
            PrismError::Backend(BackendError::NoDatabaseSelected) => 1046,
            PrismError::Backend(BackendError::UnknownDatabase(_)) => 1049,
            PrismError::Merge(MergeError::BadPattern { .. }) => 1139,
            PrismError::Txn(TxnError::CommitFailed { .. }) => 1180,
            PrismError::Txn(TxnError::RollbackFailed { .. }) => 1181,
            PrismError::Txn(TxnError::TransactionFailed) => 1180,
            PrismError::Txn(TxnError::Connection { .. }) => 1105,
            PrismError::Merge(_) => 1105,
            PrismError::Internal(_) => 1105,
        }
    }

    /// SQLSTATE for the error packet.
    pub fn sql_state(&self) -> &'static str {
        match self {
            PrismError::Backend(BackendError::NoDatabaseSelected) => "3D000",
            PrismError::Backend(BackendError::UnknownDatabase(_)) => "42000",
            PrismError::Merge(MergeError::BadPattern { .. }) => "42000",
            PrismError::Txn(TxnError::TransactionFailed) => "25000",
            _ => "HY000",
        }
    }

    /// Emit a structured log entry for internal-bug errors. Must be called
    /// before an internal error is turned into a client response.
    pub fn log_if_internal(&self) {
        if self.is_internal_bug() {
            tracing::error!(
                error_code = self.error_code(),
                sql_state = self.sql_state(),
                "internal invariant violation: {}",
                self
            );
        }
    }
}
