use super::BlobStore;
use crate::{
    config::upload::UploadConfig,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const PUBLIC_PREFIX: &str = "/uploads/";

/// Writes blobs below `root`; they are served back under `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(&config.upload_dir, config.max_bytes)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lower-cased extension of `name`, if it has an allowed one.
fn allowed_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Maps a public `/uploads/...` path back below `root`. Anything that could escape it is refused.
fn local_path(root: &Path, public_path: &str) -> Option<PathBuf> {
    let relative = Path::new(public_path.strip_prefix(PUBLIC_PREFIX)?);
    if relative.as_os_str().is_empty()
        || !relative.components().all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, namespace: &str, original_name: &str, data: &[u8]) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if data.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge);
        }

        let ext = allowed_extension(original_name).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported file type: {}. Allowed: {}",
                original_name,
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        let dir = self.root.join(namespace);

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;

        fs::write(dir.join(&filename), data)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write file: {}", e))?;

        Ok(format!("{}{}/{}", PUBLIC_PREFIX, namespace, filename))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let target = local_path(&self.root, path)
            .ok_or_else(|| AppError::Validation(format!("Not a stored upload: {}", path)))?;

        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove file: {}", e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(max_bytes: usize) -> LocalBlobStore {
        let root = std::env::temp_dir().join(format!("recipehub-blob-{}", Uuid::new_v4()));
        LocalBlobStore::new(root, max_bytes)
    }

    #[test]
    fn extension_allowlist() {
        assert_eq!(allowed_extension("Cake.JPG").as_deref(), Some("jpg"));
        assert_eq!(allowed_extension("a.b.webp").as_deref(), Some("webp"));
        assert_eq!(allowed_extension("script.sh"), None);
        assert_eq!(allowed_extension("noext"), None);
    }

    #[tokio::test]
    async fn stores_under_random_name_keeping_extension() {
        let store = temp_store(1024);
        let path = store.put("recipes", "soup.png", b"not really a png").await.unwrap();

        assert!(path.starts_with("/uploads/recipes/"));
        assert!(path.ends_with(".png"));
        assert!(!path.contains("soup"));

        let filename = path.rsplit('/').next().unwrap();
        let written = fs::read(store.root().join("recipes").join(filename)).await.unwrap();
        assert_eq!(written, b"not really a png");

        let _ = fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn delete_removes_blob_and_tolerates_missing() {
        let store = temp_store(1024);
        let path = store.put("recipes", "pie.jpg", b"crust").await.unwrap();
        let filename = path.rsplit('/').next().unwrap().to_string();
        let on_disk = store.root().join("recipes").join(&filename);
        assert!(fs::try_exists(&on_disk).await.unwrap());

        store.delete(&path).await.unwrap();
        assert!(!fs::try_exists(&on_disk).await.unwrap());

        // second delete is a no-op
        store.delete(&path).await.unwrap();

        let _ = fs::remove_dir_all(store.root()).await;
    }

    #[test]
    fn paths_outside_uploads_are_refused() {
        let root = Path::new("/srv/uploads");
        assert_eq!(
            local_path(root, "/uploads/recipes/a.png"),
            Some(root.join("recipes/a.png"))
        );
        assert_eq!(local_path(root, "/uploads/../etc/passwd"), None);
        assert_eq!(local_path(root, "/uploads//etc/passwd"), None);
        assert_eq!(local_path(root, "/static/a.png"), None);
        assert_eq!(local_path(root, "/uploads/"), None);
    }

    #[tokio::test]
    async fn oversized_upload_rejected() {
        let store = temp_store(4);
        let err = store.put("recipes", "a.jpg", b"12345").await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge));
    }

    #[tokio::test]
    async fn disallowed_extension_rejected() {
        let store = temp_store(1024);
        let err = store.put("recipes", "a.exe", b"MZ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
