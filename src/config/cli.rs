use crate::core::Storage;
use crate::utils::error::{QrisError, Result};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`. Absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }

    /// 讀取付款字串檔，去掉前後空白與換行
    pub async fn read_payload(&self, path: &str) -> Result<String> {
        let data = self.read_file(path).await?;
        let text = String::from_utf8(data).map_err(|e| QrisError::InvalidConfigValueError {
            field: "base_file".to_string(),
            value: path.to_string(),
            reason: format!("payload file is not UTF-8: {}", e),
        })?;
        Ok(text.trim().to_string())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!(path = %full_path.display(), bytes = data.len(), "Wrote file");
        Ok(())
    }
}
