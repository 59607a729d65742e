//! Statement → handler selection.
//!
//! Every incoming statement text is offered to the transaction engine first;
//! recognized TCL short-circuits into the transaction handler and never
//! reaches routing. Recognized DAL statements get the catalog handler.
//! Everything else belongs to the routing layer, which is outside this core.

use std::sync::Arc;

use prism_common::{Authentication, DalStatement, MergeError, PrismResult, ProxyConfig, SchemaRegistry};
use prism_merge::MergeDispatcher;
use prism_txn::{TclKind, TransactionStrategy};

use crate::admin::ShowTablesHandler;
use crate::handler::{TextBackendHandler, TransactionHandler};
use crate::response::{BackendResponse, QueryData};
use crate::session::Session;

/// Builds the right handler for each statement a session receives.
/// One factory per proxy, shared by every session.
pub struct BackendHandlerFactory {
    registry: Arc<SchemaRegistry>,
    auth: Arc<Authentication>,
    dispatcher: MergeDispatcher,
    strategy: Arc<dyn TransactionStrategy + Send + Sync>,
}

impl BackendHandlerFactory {
    pub fn new(
        config: &ProxyConfig,
        registry: Arc<SchemaRegistry>,
        auth: Arc<Authentication>,
        strategy: Arc<dyn TransactionStrategy + Send + Sync>,
    ) -> Self {
        Self {
            registry,
            auth,
            dispatcher: MergeDispatcher::new(config.catalog.clone()),
            strategy,
        }
    }

    /// Select a handler. `dal` carries the parsed statement when the
    /// (external) parser recognized a DAL form; TCL recognition works on the
    /// raw text and always wins.
    pub fn create<'a>(
        &'a self,
        sql: &'a str,
        dal: Option<DalStatement>,
        session: &'a mut Session,
    ) -> StatementHandler<'a> {
        if TclKind::classify(sql).is_some() {
            tracing::debug!(session = %session.id, "statement recognized as transaction control");
            let Session {
                txn, connections, ..
            } = session;
            return StatementHandler::Transaction(TransactionHandler::new(
                sql,
                txn,
                connections,
                self.strategy.as_ref(),
            ));
        }
        match dal {
            Some(DalStatement::ShowTables(stmt)) => StatementHandler::ShowTables(Box::new(
                ShowTablesHandler::new(
                    stmt,
                    session,
                    self.registry.clone(),
                    self.auth.clone(),
                    self.dispatcher.clone(),
                ),
            )),
            None => StatementHandler::Route,
        }
    }
}

/// The closed set of handlers the factory produces.
pub enum StatementHandler<'a> {
    Transaction(TransactionHandler<'a>),
    ShowTables(Box<ShowTablesHandler>),
    /// DML/DQL: handled by the routing layer, not this core.
    Route,
}

impl TextBackendHandler for StatementHandler<'_> {
    fn execute(&mut self) -> PrismResult<BackendResponse> {
        match self {
            StatementHandler::Transaction(h) => h.execute(),
            StatementHandler::ShowTables(h) => h.execute(),
            StatementHandler::Route => Ok(BackendResponse::Dispatch),
        }
    }

    fn next(&mut self) -> PrismResult<bool> {
        match self {
            StatementHandler::Transaction(h) => h.next(),
            StatementHandler::ShowTables(h) => h.next(),
            StatementHandler::Route => Ok(false),
        }
    }

    fn query_data(&self) -> PrismResult<QueryData> {
        match self {
            StatementHandler::Transaction(h) => h.query_data(),
            StatementHandler::ShowTables(h) => h.query_data(),
            StatementHandler::Route => Err(MergeError::NoCurrentRow.into()),
        }
    }
}
