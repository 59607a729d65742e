//! Catalog-listing backend handler (`SHOW [FULL] TABLES`).

use std::sync::Arc;

use prism_common::{
    Authentication, BackendError, ColumnType, DalStatement, MergeError, PrismResult,
    SchemaRegistry, ShowTablesStatement,
};
use prism_merge::{MergeDispatcher, MergedResult};

use crate::handler::TextBackendHandler;
use crate::response::{BackendResponse, QueryData, QueryHeader, QueryResponse};
use crate::session::Session;

/// Executes `SHOW [FULL] TABLES` against cluster metadata.
///
/// Resolves the acting schema (statement schema first, session default
/// second), validates registration and authorization, then builds the query
/// headers and the locally computed cursor. Both client errors (no schema
/// selected, unknown or unauthorized schema) surface before any cursor
/// exists; an empty table list is a successful empty result, never an error.
pub struct ShowTablesHandler {
    stmt: ShowTablesStatement,
    user: String,
    default_schema: Option<String>,
    registry: Arc<SchemaRegistry>,
    auth: Arc<Authentication>,
    dispatcher: MergeDispatcher,
    merged: Option<Box<dyn MergedResult>>,
}

impl ShowTablesHandler {
    pub fn new(
        stmt: ShowTablesStatement,
        session: &Session,
        registry: Arc<SchemaRegistry>,
        auth: Arc<Authentication>,
        dispatcher: MergeDispatcher,
    ) -> Self {
        Self {
            stmt,
            user: session.user.clone(),
            default_schema: session.schema_name().map(str::to_string),
            registry,
            auth,
            dispatcher,
            merged: None,
        }
    }

    fn resolve_schema_name(&self) -> PrismResult<String> {
        self.stmt
            .exact_schema()
            .or_else(|| self.default_schema.clone())
            .ok_or_else(|| BackendError::NoDatabaseSelected.into())
    }

    fn query_headers(&self, schema_name: &str) -> Vec<QueryHeader> {
        let mut column_label = format!("Tables_in_{schema_name}");
        if self.stmt.full {
            if let Some(pattern) = self.stmt.exact_pattern() {
                column_label.push_str(&format!(" ({pattern})"));
            }
        }
        let mut headers = Vec::with_capacity(if self.stmt.full { 2 } else { 1 });
        headers.push(QueryHeader::new(
            "information_schema",
            "SCHEMATA",
            column_label,
            "TABLE_NAME",
            100,
            ColumnType::VarString,
            0,
        ));
        if self.stmt.full {
            headers.push(QueryHeader::new(
                "information_schema",
                "SCHEMATA",
                "Table_type",
                "TABLE_TYPE",
                100,
                ColumnType::VarString,
                0,
            ));
        }
        headers
    }
}

impl TextBackendHandler for ShowTablesHandler {
    fn execute(&mut self) -> PrismResult<BackendResponse> {
        let schema_name = self.resolve_schema_name()?;
        let Some(schema) = self.registry.get(&schema_name) else {
            return Err(BackendError::UnknownDatabase(schema_name).into());
        };
        if !self.auth.is_authorized(&self.user, &schema_name) {
            // Unauthorized schemas are indistinguishable from absent ones.
            return Err(BackendError::UnknownDatabase(schema_name).into());
        }

        tracing::debug!(
            schema = %schema_name,
            full = self.stmt.full,
            pattern = self.stmt.pattern.as_deref().unwrap_or(""),
            "building show-tables cursor"
        );
        let stmt = DalStatement::ShowTables(self.stmt.clone());
        self.merged = Some(self.dispatcher.dispatch_dal(&stmt, &schema)?);
        Ok(BackendResponse::Query(QueryResponse {
            headers: self.query_headers(&schema_name),
        }))
    }

    fn next(&mut self) -> PrismResult<bool> {
        match self.merged.as_mut() {
            Some(merged) => merged.next(),
            None => Ok(false),
        }
    }

    fn query_data(&self) -> PrismResult<QueryData> {
        let merged = self.merged.as_ref().ok_or(MergeError::NoCurrentRow)?;
        if self.stmt.full {
            Ok(QueryData {
                column_types: vec![ColumnType::VarString, ColumnType::VarString],
                values: vec![merged.value(1)?, merged.value(2)?],
            })
        } else {
            Ok(QueryData {
                column_types: vec![ColumnType::VarString],
                values: vec![merged.value(1)?],
            })
        }
    }
}
