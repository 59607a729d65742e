//! Locally computed merge for catalog-listing statements.
//!
//! `SHOW TABLES` never touches a shard: every row is synthesized from the
//! cluster metadata the proxy already holds. The full result set is
//! materialized at construction time (its size is bounded by the logical
//! table count of one schema, not by any physical row count) and then
//! drained through the ordinary cursor contract.

use std::collections::HashSet;

use prism_common::{
    CatalogFilterConfig, Datum, LogicSchema, MergeError, PrismResult, ShowTablesStatement,
};

use crate::merged_result::MergedResult;
use crate::pattern;
use crate::table_type::classify_table_type;

/// Merged result for `SHOW [FULL] TABLES`.
///
/// Rows are `(logical name, raw catalog type)` pairs in filtering order,
/// deduplicated by name (first occurrence wins). Column 1 is the name;
/// column 2 is the classified table type and is only requested for the FULL
/// form.
#[derive(Debug)]
pub struct ShowTablesMergedResult {
    rows: Vec<(String, String)>,
    /// Rows consumed so far; `rows[index - 1]` is the current row.
    index: usize,
    positioned: bool,
}

impl ShowTablesMergedResult {
    pub fn new(
        schema: &LogicSchema,
        stmt: &ShowTablesStatement,
        config: &CatalogFilterConfig,
    ) -> PrismResult<Self> {
        let pattern = stmt.exact_pattern();
        let filtered = pattern::filter(schema.logic_table_names(), pattern.as_deref(), config)?;

        let mut rows = Vec::with_capacity(filtered.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(filtered.len());
        for name in &filtered {
            if !seen.insert(name) {
                continue;
            }
            let Some(meta) = schema.metadata().get(name) else {
                // The sharding rule exposes this table but the catalog has
                // no entry for it: the two views of the cluster disagree.
                tracing::error!(
                    schema = %schema.name,
                    table = %name,
                    "logical table missing from metadata catalog"
                );
                return Err(MergeError::MetadataMissing {
                    table: name.clone(),
                }
                .into());
            };
            rows.push((name.clone(), meta.table_type.clone()));
        }

        Ok(Self {
            rows,
            index: 0,
            positioned: false,
        })
    }

    fn current(&self) -> PrismResult<&(String, String)> {
        if !self.positioned {
            return Err(MergeError::NoCurrentRow.into());
        }
        Ok(&self.rows[self.index - 1])
    }
}

impl MergedResult for ShowTablesMergedResult {
    fn next(&mut self) -> PrismResult<bool> {
        if self.index < self.rows.len() {
            self.index += 1;
            self.positioned = true;
            Ok(true)
        } else {
            self.positioned = false;
            Ok(false)
        }
    }

    fn value(&self, column_index: usize) -> PrismResult<Datum> {
        let (name, raw_type) = self.current()?;
        match column_index {
            1 => Ok(Datum::Text(name.clone())),
            2 => Ok(Datum::Text(
                classify_table_type(Some(raw_type)).to_string(),
            )),
            other => Err(MergeError::ColumnOutOfBounds(other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use prism_common::{TableMetadata, TableMetadataMap};

    use super::*;

    fn table_metas() -> TableMetadataMap {
        [
            TableMetadata::new("t_order", "TABLE"),
            TableMetadata::new("t_order_item", "VIEW"),
            TableMetadata::new("t_user", "INFORMATION_SCHEMA"),
            TableMetadata::new("t_unknown", "UNKNOWN"),
        ]
        .into_iter()
        .collect()
    }

    fn sharding_schema() -> LogicSchema {
        LogicSchema::new(
            "sharding_db",
            vec![
                "t_order".into(),
                "t_order_item".into(),
                "t_user".into(),
                "t_unknown".into(),
            ],
            table_metas(),
        )
    }

    fn show_tables(pattern: Option<&str>, full: bool) -> ShowTablesStatement {
        ShowTablesStatement {
            schema: Some("sharding_db".into()),
            pattern: pattern.map(|p| p.to_string()),
            full,
        }
    }

    fn assert_row(result: &mut ShowTablesMergedResult, name: &str, table_type: &str) {
        assert!(result.next().unwrap());
        assert_eq!(result.value(1).unwrap(), Datum::from(name));
        assert_eq!(result.value(2).unwrap(), Datum::from(table_type));
    }

    #[test]
    fn test_filtered_full_result() {
        let schema = sharding_schema();
        let stmt = show_tables(Some("t_order%"), true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert_row(&mut result, "t_order", "BASE TABLE");
        assert_row(&mut result, "t_order_item", "VIEW");
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_all_rows_without_pattern() {
        let schema = sharding_schema();
        let stmt = show_tables(None, true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert_row(&mut result, "t_order", "BASE TABLE");
        assert_row(&mut result, "t_order_item", "VIEW");
        assert_row(&mut result, "t_user", "SYSTEM VIEW");
        assert_row(&mut result, "t_unknown", "UNKNOWN TABLE TYPE");
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_pattern_matching_nothing_is_empty() {
        let schema = sharding_schema();
        let stmt = show_tables(Some("PATTERN"), true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_simple_form_only_needs_column_one() {
        let schema = sharding_schema();
        let stmt = show_tables(Some("t_order%"), false);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(result.next().unwrap());
        assert_eq!(result.value(1).unwrap(), Datum::from("t_order"));
        assert!(result.next().unwrap());
        assert_eq!(result.value(1).unwrap(), Datum::from("t_order_item"));
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_duplicate_names_deduplicated_first_wins() {
        let schema = LogicSchema::new(
            "sharding_db",
            vec!["t_order".into(), "t_user".into(), "t_order".into()],
            table_metas(),
        );
        let stmt = show_tables(None, true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert_row(&mut result, "t_order", "BASE TABLE");
        assert_row(&mut result, "t_user", "SYSTEM VIEW");
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_empty_table_set_is_empty_result() {
        let schema = LogicSchema::new("empty_db", vec![], TableMetadataMap::new());
        let stmt = show_tables(None, true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(!result.next().unwrap());
    }

    #[test]
    fn test_metadata_miss_fails_construction() {
        let schema = LogicSchema::new(
            "sharding_db",
            vec!["t_phantom".into()],
            table_metas(),
        );
        let stmt = show_tables(None, true);
        let err = ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default())
            .unwrap_err();
        assert!(err.is_internal_bug());
        assert!(err.to_string().contains("t_phantom"));
    }

    #[test]
    fn test_value_before_first_next_is_error() {
        let schema = sharding_schema();
        let stmt = show_tables(None, true);
        let result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(result.value(1).is_err());
    }

    #[test]
    fn test_exhaustion_is_idempotent() {
        let schema = sharding_schema();
        let stmt = show_tables(Some("t_user"), true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(result.next().unwrap());
        assert!(!result.next().unwrap());
        assert!(!result.next().unwrap());
        assert!(!result.next().unwrap());
        // After exhaustion the cursor has no current row.
        assert!(result.value(1).is_err());
    }

    #[test]
    fn test_column_out_of_bounds() {
        let schema = sharding_schema();
        let stmt = show_tables(None, true);
        let mut result =
            ShowTablesMergedResult::new(&schema, &stmt, &CatalogFilterConfig::default()).unwrap();
        assert!(result.next().unwrap());
        assert!(result.value(3).is_err());
    }
}
