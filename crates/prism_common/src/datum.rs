use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ColumnType;

/// A single scalar cell value in a merged row.
///
/// The merge layer only ever materializes catalog strings and counters, so
/// the variant set is deliberately small. A cursor's `value()` returns a
/// `Datum` by value: rows are superseded on every advance, so cells are
/// handed out as owned data rather than borrows into the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
}

impl Datum {
    /// The column type this value would be advertised as. `None` for SQL NULL.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Datum::Null => None,
            Datum::Boolean(_) => Some(ColumnType::Long),
            Datum::Int64(_) => Some(ColumnType::LongLong),
            Datum::Float64(_) => Some(ColumnType::Double),
            Datum::Text(_) => Some(ColumnType::VarString),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// Borrow the text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Datum::Int64(v) => Some(*v),
            Datum::Boolean(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => write!(f, "NULL"),
            Datum::Boolean(b) => write!(f, "{}", b),
            Datum::Int64(v) => write!(f, "{}", v),
            Datum::Float64(v) => write!(f, "{}", v),
            Datum::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Text(s)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int64(v)
    }
}
