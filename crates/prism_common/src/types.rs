use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one physical shard (a backend database instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId(pub u64);

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shard-{}", self.0)
    }
}

/// Identifies one client session (connection) on the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column type advertised in a query header, with its MySQL protocol type
/// code. Closed set: the proxy only ever advertises these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Decimal,
    Long,
    Float,
    Double,
    Null,
    Timestamp,
    LongLong,
    VarString,
    String,
}

impl ColumnType {
    /// Wire-protocol type code.
    pub fn code(self) -> u8 {
        match self {
            ColumnType::Decimal => 0x00,
            ColumnType::Long => 0x03,
            ColumnType::Float => 0x04,
            ColumnType::Double => 0x05,
            ColumnType::Null => 0x06,
            ColumnType::Timestamp => 0x07,
            ColumnType::LongLong => 0x08,
            ColumnType::VarString => 0xfd,
            ColumnType::String => 0xfe,
        }
    }
}
