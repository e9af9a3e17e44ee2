//! Product image storage
//!
//! The catalog only keeps the public URL of an image; the bytes live in an
//! [`ImageStore`].

pub mod local;

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

pub use local::LocalImageStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rejected upload: {0}")]
    Rejected(String),
}

impl From<StorageError> for crate::shared::error::AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Rejected(msg) => Self::Validation(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Prepare the backing store (create bucket / directory). Idempotent.
    async fn ensure_ready(&self) -> Result<(), StorageError>;

    /// Store an image and return the URL to persist on the product
    async fn put(&self, file_name: &str, bytes: Bytes) -> Result<String, StorageError>;

    /// Remove a previously stored image by its URL. Unknown URLs are ignored.
    async fn remove(&self, url: &str) -> Result<(), StorageError>;
}

/// Extensions accepted for product images
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Lower-cased extension of an uploaded file name, if it is an allowed one
pub fn image_extension(file_name: &str) -> Option<String> {
    let ext = std::path::Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
