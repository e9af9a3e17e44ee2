use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use sha2::{Digest, Sha256};

use super::{image_extension, ImageStore, StorageError};

/// Images on the local filesystem, served by the router under `public_path`.
///
/// Files are named by the SHA-256 of their content, so re-uploading the same
/// image reuses the existing file.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_path: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_path: &str) -> Self {
        Self {
            root: root.into(),
            public_path: public_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    fn file_name_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let name = url.strip_prefix(&self.public_path)?.strip_prefix('/')?;
        let plain = !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.');
        plain.then_some(name)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn ensure_ready(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    async fn put(&self, file_name: &str, bytes: Bytes) -> Result<String, StorageError> {
        let ext = image_extension(file_name).ok_or_else(|| {
            StorageError::Rejected(format!("Unsupported image file: {}", file_name))
        })?;
        if bytes.is_empty() {
            return Err(StorageError::Rejected("Image file is empty".into()));
        }

        let digest = Sha256::digest(&bytes);
        let stored_name = format!("{:x}.{}", digest, ext);

        self.ensure_ready().await?;
        let path = self.root.join(&stored_name);
        if tokio::fs::try_exists(&path).await? {
            tracing::debug!("Image {} already stored", stored_name);
        } else {
            tokio::fs::write(&path, &bytes).await?;
            tracing::info!("Stored image {} ({} bytes)", stored_name, bytes.len());
        }

        Ok(format!("{}/{}", self.public_path, stored_name))
    }

    async fn remove(&self, url: &str) -> Result<(), StorageError> {
        let Some(name) = self.file_name_from_url(url) else {
            tracing::warn!("Not a local image URL, nothing removed: {}", url);
            return Ok(());
        };
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
