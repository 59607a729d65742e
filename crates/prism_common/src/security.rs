use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One proxy user and the schemas it may touch.
///
/// An empty `authorized_schemas` list means the user is authorized for every
/// schema the registry serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyUser {
    pub name: String,
    #[serde(default)]
    pub authorized_schemas: Vec<String>,
}

impl ProxyUser {
    pub fn new(name: impl Into<String>, authorized_schemas: Vec<String>) -> Self {
        Self {
            name: name.into(),
            authorized_schemas,
        }
    }
}

/// Proxy-wide authentication state: user name → user record.
///
/// Loaded from configuration at startup; read-only afterwards. Schema
/// authorization is checked per statement, before any cursor is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authentication {
    users: HashMap<String, ProxyUser>,
}

impl Authentication {
    pub fn new(users: Vec<ProxyUser>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.name.clone(), u)).collect(),
        }
    }

    pub fn user(&self, name: &str) -> Option<&ProxyUser> {
        self.users.get(name)
    }

    /// Whether `user` may act on `schema`. Unknown users are authorized for
    /// nothing; a user with an empty authorization list may act on anything.
    pub fn is_authorized(&self, user: &str, schema: &str) -> bool {
        match self.users.get(user) {
            Some(u) => {
                u.authorized_schemas.is_empty()
                    || u.authorized_schemas.iter().any(|s| s == schema)
            }
            None => false,
        }
    }
}
