//! Foundation crate for the prism sharding proxy: shared identifier and value
//! types, the layered error taxonomy, the logical-schema registry, the
//! authentication model, and proxy configuration.
//!
//! Everything here is read by the merge, transaction, and backend crates;
//! nothing here depends on them.

pub mod config;
pub mod datum;
pub mod error;
pub mod schema;
pub mod security;
pub mod statement;
pub mod types;

pub use config::{CatalogFilterConfig, ProxyConfig, TxnConfig, TxnStrategyKind};
pub use datum::Datum;
pub use error::{BackendError, ErrorKind, MergeError, PrismError, PrismResult, TxnError};
pub use schema::{LogicSchema, SchemaRegistry, TableMetadata, TableMetadataMap};
pub use security::{Authentication, ProxyUser};
pub use statement::{exact_value, DalStatement, ShowTablesStatement};
pub use types::{ColumnType, SessionId, ShardId};
