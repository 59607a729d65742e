//! Result-merge engine for the prism sharding proxy.
//!
//! Every statement the proxy answers with rows goes through one
//! [`MergedResult`] cursor. The variant is picked at construction time by the
//! [`dispatcher::MergeDispatcher`] (locally computed for catalog statements,
//! streaming over per-shard result sets for routed queries), and the proxy
//! loop drives whichever variant it got through the same `next()`/`value()`
//! contract.

pub mod dispatcher;
pub mod local;
pub mod merged_result;
pub mod pattern;
pub mod stream;
pub mod table_type;

pub use dispatcher::MergeDispatcher;
pub use local::ShowTablesMergedResult;
pub use merged_result::MergedResult;
pub use stream::{
    IteratorStreamMergedResult, Limit, LimitPaginatedMergedResult, MemoryQueryResult,
    ShardQueryResult,
};
pub use table_type::classify_table_type;
