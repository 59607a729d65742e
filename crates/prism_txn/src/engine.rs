//! The per-session transaction state machine.

use prism_common::{PrismResult, TxnError};

use crate::connection::SessionConnections;
use crate::strategy::TransactionStrategy;

/// Transaction-control statement kind, derived purely from the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TclKind {
    Begin,
    Commit,
    Rollback,
}

impl TclKind {
    /// Recognize transaction-control text by case-insensitive exact match.
    /// This is string matching, not parsing: anything that is not exactly
    /// one of the fixed forms is not TCL.
    pub fn classify(sql: &str) -> Option<TclKind> {
        match sql.trim().to_uppercase().as_str() {
            "BEGIN" | "START TRANSACTION" | "SET AUTOCOMMIT=0" => Some(TclKind::Begin),
            "COMMIT" => Some(TclKind::Commit),
            "ROLLBACK" => Some(TclKind::Rollback),
            _ => None,
        }
    }
}

/// Session transaction state.
///
/// `Failed` is entered when a commit/rollback strategy execution fails after
/// the decision was made: the session is neither cleanly inside nor outside
/// a transaction, and only a ROLLBACK (retried through the strategy) leaves
/// the state. It is never silently reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    NotInTransaction,
    InTransaction,
    Failed,
}

/// What the caller should do with the statement after offering it to the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnDecision {
    /// Consumed by the transaction engine; do not forward to routing.
    Handled,
    /// Not a transaction boundary for this session; dispatch normally.
    Dispatch,
}

/// One instance per client session. Drives the
/// `NotInTransaction ⇄ InTransaction` state machine (plus the `Failed`
/// escape hatch) and delegates the actual boundary work to the strategy.
#[derive(Default)]
pub struct SessionTransaction {
    state: TransactionState,
    needs_backend_dispatch: bool,
}

impl SessionTransaction {
    pub fn new() -> Self {
        Self {
            state: TransactionState::NotInTransaction,
            needs_backend_dispatch: true,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn in_transaction(&self) -> bool {
        self.state != TransactionState::NotInTransaction
    }

    /// Whether the most recent statement still needs normal backend
    /// execution (false once the engine consumed it).
    pub fn needs_backend_dispatch(&self) -> bool {
        self.needs_backend_dispatch
    }

    /// Offer one statement to the engine.
    ///
    /// Non-TCL text never changes transaction state and always dispatches.
    /// TCL text the strategy reports unavailable for the current state also
    /// falls through to normal dispatch. Available TCL is consumed: the
    /// strategy runs, the state machine transitions, and `Handled` comes
    /// back.
    ///
    /// A strategy failure propagates to the caller. For COMMIT/ROLLBACK the
    /// session lands in [`TransactionState::Failed`]: the transition is not
    /// rolled back and not silently completed. For BEGIN the session stays
    /// outside any transaction.
    pub fn on_statement(
        &mut self,
        sql: &str,
        strategy: &dyn TransactionStrategy,
        conns: &mut SessionConnections,
    ) -> PrismResult<TxnDecision> {
        self.needs_backend_dispatch = true;

        let Some(kind) = TclKind::classify(sql) else {
            return Ok(TxnDecision::Dispatch);
        };

        if self.state == TransactionState::Failed && kind != TclKind::Rollback {
            // The failed transaction must be resolved before anything else.
            self.needs_backend_dispatch = false;
            return Err(TxnError::TransactionFailed.into());
        }

        if !strategy.is_available(kind, self.state) {
            tracing::debug!(
                ?kind,
                state = ?self.state,
                "tcl statement unavailable in current state; dispatching normally"
            );
            return Ok(TxnDecision::Dispatch);
        }

        match strategy.execute(kind, conns) {
            Ok(()) => {
                self.needs_backend_dispatch = false;
                match kind {
                    TclKind::Begin => self.state = TransactionState::InTransaction,
                    TclKind::Commit | TclKind::Rollback => {
                        self.state = TransactionState::NotInTransaction;
                        conns.release_all();
                    }
                }
                Ok(TxnDecision::Handled)
            }
            Err(e) => {
                self.needs_backend_dispatch = false;
                if matches!(kind, TclKind::Commit | TclKind::Rollback) {
                    tracing::error!(
                        ?kind,
                        "transaction strategy failed after decision; session marked failed: {}",
                        e
                    );
                    self.state = TransactionState::Failed;
                }
                Err(e.into())
            }
        }
    }
}
