use prism_common::SessionId;
use prism_txn::{SessionConnections, SessionTransaction};

/// Per-connection session state.
///
/// One session per client connection, driven by exactly one logical thread
/// of control: the transaction state machine and the backend connections it
/// governs are never shared across sessions.
pub struct Session {
    pub id: SessionId,
    pub user: String,
    /// Schema selected with `USE <schema>`; `None` until the client picks one.
    schema: Option<String>,
    pub autocommit: bool,
    pub txn: SessionTransaction,
    pub connections: SessionConnections,
}

impl Session {
    pub fn new(id: SessionId, user: impl Into<String>) -> Self {
        Self {
            id,
            user: user.into(),
            schema: None,
            autocommit: true,
            txn: SessionTransaction::new(),
            connections: SessionConnections::new(),
        }
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn set_schema(&mut self, schema: impl Into<String>) {
        self.schema = Some(schema.into());
    }

    pub fn in_transaction(&self) -> bool {
        self.txn.in_transaction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(SessionId(1), "root");
        assert_eq!(session.schema_name(), None);
        assert!(session.autocommit);
        assert!(!session.in_transaction());
        assert!(session.connections.is_empty());
    }

    #[test]
    fn test_set_schema() {
        let mut session = Session::new(SessionId(1), "root");
        session.set_schema("sharding_db");
        assert_eq!(session.schema_name(), Some("sharding_db"));
    }
}
