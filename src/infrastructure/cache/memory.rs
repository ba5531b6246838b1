//! 프로세스 내 메모리 캐시.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::ResponseCache;
use crate::error::DisqusError;

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn load(&self, key: &str) -> Result<Option<Value>, DisqusError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DisqusError::Cache("memory cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), DisqusError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DisqusError::Cache("memory cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
