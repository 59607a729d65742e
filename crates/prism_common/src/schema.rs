use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Catalog metadata for one logical table.
///
/// `table_type` is the raw catalog type string, an open set. Recognized
/// values are `"TABLE"`, `"VIEW"` and `"INFORMATION_SCHEMA"`; anything else
/// is carried through untouched and classified at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub table_type: String,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>, table_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_type: table_type.into(),
        }
    }
}

/// The cluster-wide metadata catalog for one logical schema: logical table
/// name → metadata. Populated by the (external) metadata loader, read-only
/// to the execution core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableMetadataMap {
    entries: HashMap<String, TableMetadata>,
}

impl TableMetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, meta: TableMetadata) {
        self.entries.insert(meta.name.clone(), meta);
    }

    pub fn get(&self, name: &str) -> Option<&TableMetadata> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TableMetadata> for TableMetadataMap {
    fn from_iter<I: IntoIterator<Item = TableMetadata>>(iter: I) -> Self {
        let mut map = Self::new();
        for meta in iter {
            map.insert(meta);
        }
        map
    }
}

/// One client-visible schema: the ordered set of logical table names the
/// sharding rule exposes, plus the metadata catalog for them.
///
/// `logic_tables` preserves rule-registration order; that order is what
/// catalog-listing cursors iterate in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicSchema {
    pub name: String,
    logic_tables: Vec<String>,
    metadata: TableMetadataMap,
}

impl LogicSchema {
    pub fn new(
        name: impl Into<String>,
        logic_tables: Vec<String>,
        metadata: TableMetadataMap,
    ) -> Self {
        Self {
            name: name.into(),
            logic_tables,
            metadata,
        }
    }

    /// Logical table names in rule-registration order.
    pub fn logic_table_names(&self) -> &[String] {
        &self.logic_tables
    }

    pub fn metadata(&self) -> &TableMetadataMap {
        &self.metadata
    }
}

/// Registry of all logical schemas the proxy serves.
///
/// Read-mostly: populated at startup, swapped wholesale on reconfiguration,
/// and read concurrently by every session. Readers take an `Arc` snapshot of
/// one schema and hold it for the duration of a single statement; writers go
/// through `reconfigure()`. There is no other mutation path.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<LogicSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full schema set. Sessions that already hold a snapshot
    /// keep iterating their old view; new statements see the new one.
    pub fn reconfigure(&self, schemas: Vec<LogicSchema>) {
        let next: HashMap<String, Arc<LogicSchema>> = schemas
            .into_iter()
            .map(|s| (s.name.clone(), Arc::new(s)))
            .collect();
        tracing::info!(schema_count = next.len(), "schema registry reconfigured");
        *self.schemas.write() = next;
    }

    /// Snapshot of one schema for the duration of a statement.
    pub fn get(&self, name: &str) -> Option<Arc<LogicSchema>> {
        self.schemas.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    pub fn schema_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema(name: &str) -> LogicSchema {
        let metadata: TableMetadataMap = [
            TableMetadata::new("t_order", "TABLE"),
            TableMetadata::new("t_user", "VIEW"),
        ]
        .into_iter()
        .collect();
        LogicSchema::new(name, vec!["t_order".into(), "t_user".into()], metadata)
    }

    #[test]
    fn test_metadata_lookup() {
        let schema = sample_schema("sharding_db");
        assert_eq!(
            schema.metadata().get("t_order").map(|m| m.table_type.as_str()),
            Some("TABLE")
        );
        assert!(schema.metadata().get("t_missing").is_none());
    }

    #[test]
    fn test_logic_table_order_preserved() {
        let schema = sample_schema("sharding_db");
        assert_eq!(schema.logic_table_names(), &["t_order", "t_user"]);
    }

    #[test]
    fn test_registry_get_and_contains() {
        let registry = SchemaRegistry::new();
        registry.reconfigure(vec![sample_schema("sharding_db")]);
        assert!(registry.contains("sharding_db"));
        assert!(!registry.contains("other_db"));
        let snap = registry.get("sharding_db").unwrap();
        assert_eq!(snap.name, "sharding_db");
    }

    #[test]
    fn test_reconfigure_swaps_wholesale() {
        let registry = SchemaRegistry::new();
        registry.reconfigure(vec![sample_schema("old_db")]);
        let old_snap = registry.get("old_db").unwrap();

        registry.reconfigure(vec![sample_schema("new_db")]);
        assert!(!registry.contains("old_db"));
        assert!(registry.contains("new_db"));

        // A snapshot taken before the swap stays readable.
        assert_eq!(old_snap.logic_table_names().len(), 2);
    }

    #[test]
    fn test_schema_names_sorted() {
        let registry = SchemaRegistry::new();
        registry.reconfigure(vec![sample_schema("b_db"), sample_schema("a_db")]);
        assert_eq!(registry.schema_names(), vec!["a_db", "b_db"]);
    }
}
