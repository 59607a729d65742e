use prism_common::{ColumnType, Datum};

/// Description of one output column, produced once per statement before any
/// row is pulled. The count and order never vary per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHeader {
    pub schema: String,
    pub table: String,
    pub column_label: String,
    pub column_name: String,
    pub column_length: u32,
    pub column_type: ColumnType,
    pub decimals: u8,
}

impl QueryHeader {
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        column_label: impl Into<String>,
        column_name: impl Into<String>,
        column_length: u32,
        column_type: ColumnType,
        decimals: u8,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            column_label: column_label.into(),
            column_name: column_name.into(),
            column_length,
            column_type,
            decimals,
        }
    }
}

/// Header sequence for a row-returning statement. Rows follow through the
/// handler's `next()` / `query_data()` surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub headers: Vec<QueryHeader>,
}

/// One merged row as handed to the wire layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryData {
    pub column_types: Vec<ColumnType>,
    pub values: Vec<Datum>,
}

/// Outcome of executing one statement in the backend layer.
#[derive(Debug)]
pub enum BackendResponse {
    /// Row-returning statement: headers now, rows via `next()`.
    Query(QueryResponse),
    /// Consumed without result rows (transaction boundaries).
    Ok,
    /// Not handled by the execution core; forward to the routing layer.
    Dispatch,
}
