//! The fixed contract to the (external) backend connection pool.

use prism_common::{ShardId, TxnError};

/// One physical connection to a backend shard, checked out for the duration
/// of a transaction. The pool behind it is out of scope; the transaction
/// strategies only ever drive commit/rollback through this surface.
pub trait BackendConnection {
    fn shard_id(&self) -> ShardId;

    fn commit(&mut self) -> Result<(), TxnError>;

    fn rollback(&mut self) -> Result<(), TxnError>;
}

/// Hands out per-shard connections. Implemented by the connection pool.
pub trait BackendConnectionProvider {
    fn acquire(&self, shard: ShardId) -> Result<Box<dyn BackendConnection>, TxnError>;
}

/// The backend connections a session has opened during the current
/// transaction. One per shard; releasing them (dropping the boxes) returns
/// them to the pool.
#[derive(Default)]
pub struct SessionConnections {
    connections: Vec<Box<dyn BackendConnection>>,
}

impl SessionConnections {
    pub fn new() -> Self {
        Self::default()
    }

    /// The connection for `shard`, opening one through `provider` on first
    /// use within the transaction.
    pub fn acquire(
        &mut self,
        provider: &dyn BackendConnectionProvider,
        shard: ShardId,
    ) -> Result<&mut dyn BackendConnection, TxnError> {
        if let Some(pos) = self.connections.iter().position(|c| c.shard_id() == shard) {
            return Ok(self.connections[pos].as_mut());
        }
        let conn = provider.acquire(shard)?;
        self.connections.push(conn);
        let last = self.connections.len() - 1;
        Ok(self.connections[last].as_mut())
    }

    /// Register an already-open connection (used by strategies' callers that
    /// manage checkout themselves).
    pub fn register(&mut self, conn: Box<dyn BackendConnection>) {
        self.connections.push(conn);
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn BackendConnection>> {
        self.connections.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Release every connection back to the pool.
    pub fn release_all(&mut self) {
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubConnection(ShardId);

    impl BackendConnection for StubConnection {
        fn shard_id(&self) -> ShardId {
            self.0
        }
        fn commit(&mut self) -> Result<(), TxnError> {
            Ok(())
        }
        fn rollback(&mut self) -> Result<(), TxnError> {
            Ok(())
        }
    }

    struct StubProvider;

    impl BackendConnectionProvider for StubProvider {
        fn acquire(&self, shard: ShardId) -> Result<Box<dyn BackendConnection>, TxnError> {
            Ok(Box::new(StubConnection(shard)))
        }
    }

    #[test]
    fn test_acquire_caches_per_shard() {
        let mut conns = SessionConnections::new();
        conns.acquire(&StubProvider, ShardId(0)).unwrap();
        conns.acquire(&StubProvider, ShardId(1)).unwrap();
        conns.acquire(&StubProvider, ShardId(0)).unwrap();
        assert_eq!(conns.len(), 2);
    }

    #[test]
    fn test_release_all() {
        let mut conns = SessionConnections::new();
        conns.register(Box::new(StubConnection(ShardId(7))));
        assert!(!conns.is_empty());
        conns.release_all();
        assert!(conns.is_empty());
    }
}
