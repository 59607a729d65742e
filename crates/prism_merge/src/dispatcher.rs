//! Cursor-variant selection.
//!
//! Call sites program against [`MergedResult`] only; this is the one place
//! that knows which concrete variant answers which statement shape. Pure
//! selection: the dispatcher owns nothing beyond the cursor it hands back.

use prism_common::{CatalogFilterConfig, DalStatement, LogicSchema, PrismResult};

use crate::local::ShowTablesMergedResult;
use crate::merged_result::MergedResult;
use crate::stream::{IteratorStreamMergedResult, Limit, LimitPaginatedMergedResult, ShardQueryResult};

#[derive(Debug, Clone, Default)]
pub struct MergeDispatcher {
    catalog_config: CatalogFilterConfig,
}

impl MergeDispatcher {
    pub fn new(catalog_config: CatalogFilterConfig) -> Self {
        Self { catalog_config }
    }

    /// Cursor for a recognized DAL statement, computed from cluster metadata
    /// without any shard round trip.
    pub fn dispatch_dal(
        &self,
        stmt: &DalStatement,
        schema: &LogicSchema,
    ) -> PrismResult<Box<dyn MergedResult>> {
        match stmt {
            DalStatement::ShowTables(show_tables) => Ok(Box::new(ShowTablesMergedResult::new(
                schema,
                show_tables,
                &self.catalog_config,
            )?)),
        }
    }

    /// Cursor over open per-shard result streams, optionally paginated.
    pub fn dispatch_streams(
        &self,
        shard_results: Vec<Box<dyn ShardQueryResult>>,
        limit: Option<Limit>,
    ) -> PrismResult<Box<dyn MergedResult>> {
        let merged: Box<dyn MergedResult> = Box::new(IteratorStreamMergedResult::new(shard_results));
        match limit {
            Some(limit) => Ok(Box::new(LimitPaginatedMergedResult::new(merged, limit)?)),
            None => Ok(merged),
        }
    }
}

#[cfg(test)]
mod tests {
    use prism_common::{Datum, ShowTablesStatement, TableMetadata, TableMetadataMap};

    use crate::stream::MemoryQueryResult;

    use super::*;

    fn schema() -> LogicSchema {
        let metadata: TableMetadataMap = [TableMetadata::new("t_order", "TABLE")]
            .into_iter()
            .collect();
        LogicSchema::new("sharding_db", vec!["t_order".into()], metadata)
    }

    #[test]
    fn test_dispatch_show_tables_selects_local_variant() {
        let dispatcher = MergeDispatcher::default();
        let stmt = DalStatement::ShowTables(ShowTablesStatement {
            schema: Some("sharding_db".into()),
            pattern: None,
            full: true,
        });
        let mut merged = dispatcher.dispatch_dal(&stmt, &schema()).unwrap();
        assert!(merged.next().unwrap());
        assert_eq!(merged.value(1).unwrap(), Datum::from("t_order"));
        assert_eq!(merged.value(2).unwrap(), Datum::from("BASE TABLE"));
        assert!(!merged.next().unwrap());
    }

    #[test]
    fn test_dispatch_streams_with_limit() {
        let dispatcher = MergeDispatcher::default();
        let shard: Box<dyn ShardQueryResult> = Box::new(MemoryQueryResult::new(vec![
            vec![Datum::Int64(1)],
            vec![Datum::Int64(2)],
            vec![Datum::Int64(3)],
        ]));
        let mut merged = dispatcher
            .dispatch_streams(
                vec![shard],
                Some(Limit {
                    offset: 1,
                    row_count: Some(1),
                }),
            )
            .unwrap();
        assert!(merged.next().unwrap());
        assert_eq!(merged.value(1).unwrap(), Datum::Int64(2));
        assert!(!merged.next().unwrap());
    }
}
