//! Blob storage for uploaded recipe images. The rest of the crate only ever sees the
//! returned public path.

mod local;

pub use local::LocalBlobStore;

use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under a fresh name in `namespace`, keeping the extension of
    /// `original_name`. Returns the public path of the stored blob.
    async fn put(&self, namespace: &str, original_name: &str, data: &[u8]) -> AppResult<String>;

    /// Remove a blob by the public path `put` returned. Removing a missing blob is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;
}

pub type SharedBlobStore = Arc<dyn BlobStore>;
