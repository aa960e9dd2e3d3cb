//! Client session storage
//!
//! Small string key/value store that survives page reloads in the browser
//! client. Here it is either process-local or backed by a JSON file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use crate::config::SessionConfig;
use crate::utils::errors::Result;

/// Key under which the last signed-in email is kept
pub const USER_EMAIL_KEY: &str = "user_email";

/// Key/value session storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    path: Option<PathBuf>,
}

impl SessionStorage {
    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Storage persisted to a JSON file, loading any existing entries
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding corrupted session file");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Session storage opened");
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path: Some(path),
        })
    }

    /// Build storage from configuration
    pub async fn from_config(config: &SessionConfig) -> Result<Self> {
        match config.storage_path.as_deref() {
            Some(path) if !path.is_empty() => Self::open(path).await,
            _ => Ok(Self::in_memory()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Entries change in memory only once the file write has succeeded
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::in_memory()
    }
}
