//! Session-backed storage for state surviving the login/logout boundary.

use crate::error::OAuth2Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Session key under which the ID token of the last successful login is kept
/// for later logout-URL generation.
pub const FC_TOKEN_ID: &str = "fc_token_id";

/// Key/value session storage owned by the host application.
///
/// The provider only reads and writes through this interface; concurrency
/// discipline per session is the caller's responsibility.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, key: &str, value: String) -> OAuth2Result<()>;

    async fn get(&self, key: &str) -> OAuth2Result<Option<String>>;
}

/// In-memory implementation of [`SessionStore`]
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, key: &str, value: String) -> OAuth2Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> OAuth2Result<Option<String>> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_session_store() {
        let store = InMemorySessionStore::new();

        assert_eq!(store.get(FC_TOKEN_ID).await.unwrap(), None);

        store.put(FC_TOKEN_ID, "IDT1".to_string()).await.unwrap();
        assert_eq!(
            store.get(FC_TOKEN_ID).await.unwrap(),
            Some("IDT1".to_string())
        );

        // Later writes overwrite the stored value
        store.put(FC_TOKEN_ID, "IDT2".to_string()).await.unwrap();
        assert_eq!(
            store.get(FC_TOKEN_ID).await.unwrap(),
            Some("IDT2".to_string())
        );
    }
}
