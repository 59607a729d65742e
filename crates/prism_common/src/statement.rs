use serde::{Deserialize, Serialize};

/// A parsed `SHOW [FULL] TABLES [FROM <schema>] [LIKE <pattern>]` statement.
///
/// Produced by the (external) SQL parser; the execution core only consumes
/// it. `schema` and `pattern` arrive as written by the client and are
/// normalized with [`exact_value`] before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowTablesStatement {
    pub schema: Option<String>,
    pub pattern: Option<String>,
    pub full: bool,
}

impl ShowTablesStatement {
    /// Schema name with identifier quoting stripped; `None` when absent or
    /// quoted-empty.
    pub fn exact_schema(&self) -> Option<String> {
        self.schema.as_deref().and_then(exact_value)
    }

    /// Filter pattern with literal quoting stripped; `None` when absent or
    /// quoted-empty.
    pub fn exact_pattern(&self) -> Option<String> {
        self.pattern.as_deref().and_then(exact_value)
    }
}

/// The DAL (data-administration) statements the merge dispatcher recognizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DalStatement {
    ShowTables(ShowTablesStatement),
}

/// Strip one layer of identifier/literal quoting (backticks, single or
/// double quotes) and surrounding whitespace. Returns `None` when nothing
/// remains; callers treat a quoted empty string the same as absent.
pub fn exact_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = match trimmed.as_bytes() {
        [b'`', .., b'`'] | [b'\'', .., b'\''] | [b'"', .., b'"'] if trimmed.len() >= 2 => {
            &trimmed[1..trimmed.len() - 1]
        }
        _ => trimmed,
    };
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}
