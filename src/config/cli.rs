use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_store_key;
use std::path::{Path, PathBuf};

/// One file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_path: String,
}

impl LocalStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        validate_store_key(key)?;
        Ok(Path::new(&self.base_path).join(key))
    }
}

impl KeyValueStore for LocalStore {
    async fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        let full_path = self.resolve(key)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, value).await?;
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.resolve(key)?;

        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
