use serde::{Deserialize, Serialize};

/// Top-level proxy configuration for the execution core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub catalog: CatalogFilterConfig,
    #[serde(default)]
    pub txn: TxnConfig,
}

/// Catalog filter-pattern dialect.
///
/// `%` always matches any run of characters. The single-character wildcard
/// marker varies between dialects (SQL `LIKE` uses `_`; some catalog filters
/// use `?`), so it is configurable rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFilterConfig {
    #[serde(default = "default_single_char_wildcard")]
    pub single_char_wildcard: char,
}

fn default_single_char_wildcard() -> char {
    '_'
}

impl Default for CatalogFilterConfig {
    fn default() -> Self {
        Self {
            single_char_wildcard: default_single_char_wildcard(),
        }
    }
}

/// Which transaction strategy the proxy binds to each session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnStrategyKind {
    /// Drive commit/rollback across the session's backend connections
    /// directly. The in-tree strategy.
    #[default]
    Local,
    /// XA-style distributed transaction manager (out-of-tree strategy).
    Xa,
    /// BASE/saga-style eventual-consistency manager (out-of-tree strategy).
    Base,
}

/// Transaction coordination configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnConfig {
    #[serde(default)]
    pub strategy: TxnStrategyKind,
}
