//! The uniform handler surface the proxy loop drives, plus the transaction
//! handler that short-circuits TCL statements.

use prism_common::{MergeError, PrismResult};
use prism_txn::{SessionConnections, SessionTransaction, TransactionStrategy, TxnDecision};

use crate::response::{BackendResponse, QueryData};

/// A handler for one text-protocol statement: `execute()` once, then pull
/// rows with `next()` / `query_data()` if the response advertised headers.
pub trait TextBackendHandler {
    fn execute(&mut self) -> PrismResult<BackendResponse>;

    fn next(&mut self) -> PrismResult<bool>;

    fn query_data(&self) -> PrismResult<QueryData>;
}

/// Handler for statements the transaction engine recognized as TCL. Produces
/// no rows; the interesting outcome is the session-state transition and
/// whether the statement still needs normal dispatch.
pub struct TransactionHandler<'a> {
    sql: &'a str,
    txn: &'a mut SessionTransaction,
    connections: &'a mut SessionConnections,
    strategy: &'a dyn TransactionStrategy,
}

impl<'a> TransactionHandler<'a> {
    pub fn new(
        sql: &'a str,
        txn: &'a mut SessionTransaction,
        connections: &'a mut SessionConnections,
        strategy: &'a dyn TransactionStrategy,
    ) -> Self {
        Self {
            sql,
            txn,
            connections,
            strategy,
        }
    }
}

impl TextBackendHandler for TransactionHandler<'_> {
    fn execute(&mut self) -> PrismResult<BackendResponse> {
        match self
            .txn
            .on_statement(self.sql, self.strategy, self.connections)?
        {
            TxnDecision::Handled => Ok(BackendResponse::Ok),
            TxnDecision::Dispatch => Ok(BackendResponse::Dispatch),
        }
    }

    fn next(&mut self) -> PrismResult<bool> {
        Ok(false)
    }

    fn query_data(&self) -> PrismResult<QueryData> {
        Err(MergeError::NoCurrentRow.into())
    }
}
