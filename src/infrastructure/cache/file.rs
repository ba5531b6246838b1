//! JSON 파일 캐시. `<root>/<namespace>/<key>.json` 하나가 항목 하나다.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::application::ports::ResponseCache;
use crate::error::DisqusError;

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// namespace는 디렉터리 이름으로 쓰이므로 경로 구분자를 허용하지 않는다.
    pub fn new(root: &Path, namespace: &str) -> Result<Self, DisqusError> {
        let valid = !namespace.is_empty()
            && namespace != "."
            && namespace != ".."
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(DisqusError::Cache(format!(
                "invalid cache namespace '{namespace}'"
            )));
        }

        Ok(Self {
            dir: root.join(namespace),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, DisqusError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DisqusError::Cache(format!("invalid cache key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl ResponseCache for FileCache {
    async fn load(&self, key: &str) -> Result<Option<Value>, DisqusError> {
        let path = self.entry_path(key)?;
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DisqusError::Cache(format!(
                    "failed to read {}: {err}",
                    path.display()
                )));
            }
        };

        // 손상된 항목은 miss로 취급해 다음 저장에서 덮어쓴다.
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring corrupt cache entry");
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), DisqusError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.dir).await.map_err(|err| {
            DisqusError::Cache(format!("failed to create {}: {err}", self.dir.display()))
        })?;

        let rendered = serde_json::to_string(value)
            .map_err(|err| DisqusError::Cache(format!("failed to encode cache entry: {err}")))?;
        fs::write(&path, rendered).await.map_err(|err| {
            DisqusError::Cache(format!("failed to write {}: {err}", path.display()))
        })?;

        debug!(path = %path.display(), "cache entry written");
        Ok(())
    }
}
