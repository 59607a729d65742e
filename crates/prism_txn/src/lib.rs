//! Transaction coordination for the prism sharding proxy.
//!
//! Every statement a session receives is first offered to the
//! [`SessionTransaction`] state machine. Recognized transaction-control text
//! (`BEGIN`, `COMMIT`, `ROLLBACK`, …) is consumed here and driven through a
//! pluggable [`TransactionStrategy`]; everything else falls through to normal
//! backend dispatch untouched.

pub mod connection;
pub mod engine;
pub mod strategy;

pub use connection::{BackendConnection, BackendConnectionProvider, SessionConnections};
pub use engine::{SessionTransaction, TclKind, TransactionState, TxnDecision};
pub use strategy::{LocalTransactionStrategy, TransactionStrategy};
