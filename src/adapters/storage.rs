use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_store_key;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().await;
        entries.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_store_key(key)?;
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_store_key(key)?;
        Ok(self.get(key).await)
    }
}
