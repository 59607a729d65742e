//! Pluggable commit/rollback strategies.
//!
//! The state machine decides *when* a transaction boundary happens; a
//! strategy decides *how* the decision reaches the backends. The in-tree
//! [`LocalTransactionStrategy`] drives each backend connection directly.
//! XA and BASE managers implement the same trait out of tree.

use prism_common::TxnError;

use crate::connection::SessionConnections;
use crate::engine::{TclKind, TransactionState};

pub trait TransactionStrategy {
    /// Whether this strategy acts on `kind` while the session is in `state`.
    /// An unavailable statement is not an error; it falls through to normal
    /// backend dispatch.
    fn is_available(&self, kind: TclKind, state: TransactionState) -> bool;

    /// Apply `kind` across the session's backend connections. A failure must
    /// propagate; the caller reconciles session state with the outcome.
    fn execute(&self, kind: TclKind, conns: &mut SessionConnections) -> Result<(), TxnError>;
}

/// Drives commit/rollback across every backend connection opened during the
/// transaction, one by one. A failure on one connection never stops the
/// remaining connections from being driven, and is never masked by their
/// success: the first failure is reported after all connections have been
/// flushed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTransactionStrategy;

impl LocalTransactionStrategy {
    fn drive_all(
        kind: TclKind,
        conns: &mut SessionConnections,
    ) -> Result<(), TxnError> {
        let total = conns.len();
        let mut failed = 0usize;
        let mut first_error: Option<TxnError> = None;

        for conn in conns.iter_mut() {
            let outcome = match kind {
                TclKind::Commit => conn.commit(),
                TclKind::Rollback => conn.rollback(),
                TclKind::Begin => Ok(()),
            };
            if let Err(e) = outcome {
                tracing::warn!(
                    shard = %conn.shard_id(),
                    kind = ?kind,
                    "backend connection failed during transaction flush: {}",
                    e
                );
                failed += 1;
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            None => Ok(()),
            Some(first) => Err(match kind {
                TclKind::Rollback => TxnError::RollbackFailed {
                    failed,
                    total,
                    first: first.to_string(),
                },
                _ => TxnError::CommitFailed {
                    failed,
                    total,
                    first: first.to_string(),
                },
            }),
        }
    }
}

impl TransactionStrategy for LocalTransactionStrategy {
    fn is_available(&self, kind: TclKind, state: TransactionState) -> bool {
        match kind {
            TclKind::Begin => state == TransactionState::NotInTransaction,
            TclKind::Commit => state == TransactionState::InTransaction,
            TclKind::Rollback => {
                state == TransactionState::InTransaction || state == TransactionState::Failed
            }
        }
    }

    fn execute(&self, kind: TclKind, conns: &mut SessionConnections) -> Result<(), TxnError> {
        match kind {
            // Local transactions begin lazily: the boundary is recorded in
            // the session, connections join as statements touch shards.
            TclKind::Begin => Ok(()),
            TclKind::Commit | TclKind::Rollback => Self::drive_all(kind, conns),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use prism_common::ShardId;

    use crate::connection::BackendConnection;

    use super::*;

    struct RecordingConnection {
        shard: ShardId,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
        fail_commit: bool,
    }

    impl RecordingConnection {
        fn boxed(
            shard: u64,
            commits: &Arc<AtomicUsize>,
            rollbacks: &Arc<AtomicUsize>,
            fail_commit: bool,
        ) -> Box<dyn BackendConnection> {
            Box::new(Self {
                shard: ShardId(shard),
                commits: commits.clone(),
                rollbacks: rollbacks.clone(),
                fail_commit,
            })
        }
    }

    impl BackendConnection for RecordingConnection {
        fn shard_id(&self) -> ShardId {
            self.shard
        }
        fn commit(&mut self) -> Result<(), TxnError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            if self.fail_commit {
                Err(TxnError::Connection {
                    shard: self.shard,
                    reason: "broken pipe".into(),
                })
            } else {
                Ok(())
            }
        }
        fn rollback(&mut self) -> Result<(), TxnError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn counters() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)))
    }

    #[test]
    fn test_commit_reaches_every_connection() {
        let (commits, rollbacks) = counters();
        let mut conns = SessionConnections::new();
        for shard in 0..3 {
            conns.register(RecordingConnection::boxed(shard, &commits, &rollbacks, false));
        }
        LocalTransactionStrategy
            .execute(TclKind::Commit, &mut conns)
            .unwrap();
        assert_eq!(commits.load(Ordering::SeqCst), 3);
        assert_eq!(rollbacks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_partial_commit_failure_still_drives_rest() {
        let (commits, rollbacks) = counters();
        let mut conns = SessionConnections::new();
        conns.register(RecordingConnection::boxed(0, &commits, &rollbacks, false));
        conns.register(RecordingConnection::boxed(1, &commits, &rollbacks, true));
        conns.register(RecordingConnection::boxed(2, &commits, &rollbacks, false));

        let err = LocalTransactionStrategy
            .execute(TclKind::Commit, &mut conns)
            .unwrap_err();
        // Every connection was driven despite the shard-1 failure.
        assert_eq!(commits.load(Ordering::SeqCst), 3);
        match err {
            TxnError::CommitFailed { failed, total, .. } => {
                assert_eq!(failed, 1);
                assert_eq!(total, 3);
            }
            other => panic!("expected CommitFailed, got {other}"),
        }
    }

    #[test]
    fn test_rollback_reaches_every_connection() {
        let (commits, rollbacks) = counters();
        let mut conns = SessionConnections::new();
        for shard in 0..2 {
            conns.register(RecordingConnection::boxed(shard, &commits, &rollbacks, false));
        }
        LocalTransactionStrategy
            .execute(TclKind::Rollback, &mut conns)
            .unwrap();
        assert_eq!(rollbacks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_begin_is_a_lazy_no_op() {
        let mut conns = SessionConnections::new();
        LocalTransactionStrategy
            .execute(TclKind::Begin, &mut conns)
            .unwrap();
        assert!(conns.is_empty());
    }

    #[test]
    fn test_availability_matrix() {
        let strategy = LocalTransactionStrategy;
        use TransactionState::*;
        assert!(strategy.is_available(TclKind::Begin, NotInTransaction));
        assert!(!strategy.is_available(TclKind::Begin, InTransaction));
        assert!(strategy.is_available(TclKind::Commit, InTransaction));
        assert!(!strategy.is_available(TclKind::Commit, NotInTransaction));
        assert!(strategy.is_available(TclKind::Rollback, InTransaction));
        assert!(strategy.is_available(TclKind::Rollback, Failed));
        assert!(!strategy.is_available(TclKind::Rollback, NotInTransaction));
    }
}
