//! Backend execution layer for the prism sharding proxy.
//!
//! Glue between the wire protocol (out of scope) and the execution core:
//! per-connection [`Session`] state, query headers, the catalog-listing
//! handler, and the factory that offers every incoming statement to the
//! transaction engine before anything else sees it.

pub mod admin;
pub mod factory;
pub mod handler;
pub mod response;
pub mod session;

pub use admin::ShowTablesHandler;
pub use factory::{BackendHandlerFactory, StatementHandler};
pub use handler::{TextBackendHandler, TransactionHandler};
pub use response::{BackendResponse, QueryData, QueryHeader, QueryResponse};
pub use session::Session;
