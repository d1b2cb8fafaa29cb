use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Generic JSON file-backed ordered list store.
///
/// Keeps a `Vec<T>` in memory and rewrites the whole file (pretty-printed)
/// after every mutation. Order of the vector is the order on disk.
pub struct JsonListStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Load the store from a path. Creates the file with an empty list if missing.
    ///
    /// A file that exists but cannot be parsed is an error: the caller is not
    /// expected to continue with an empty store.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Io(e.to_string()))?;
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| ServiceError::Corrupt {
                path: file_path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: Vec<T> = Vec::new();
                write_pretty(&file_path, &empty).await?;
                info!(path = %file_path.display(), "created empty store file");
                empty
            }
            Err(e) => return Err(ServiceError::Io(e.to_string())),
        };

        info!(path = %file_path.display(), count = items.len(), "store loaded");
        Ok(Arc::new(Self { inner: RwLock::new(items), file_path }))
    }

    /// Snapshot of every item in stored order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// First item matching the predicate.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner.read().await.iter().find(|item| pred(item)).cloned()
    }

    /// Apply a mutation to the underlying list and persist it.
    ///
    /// The write lock is held until the file has been rewritten. When `f`
    /// fails nothing is written.
    pub async fn update_list<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let out = f(&mut *items)?;
        write_pretty(&self.file_path, &items[..]).await?;
        debug!(path = %self.file_path.display(), count = items.len(), "store persisted");
        Ok(out)
    }

    pub fn file_path(&self) -> &std::path::Path {
        &self.file_path
    }
}

// No rename-on-write: a crash mid-write can leave a truncated file.
async fn write_pretty<T: serde::Serialize>(path: &std::path::Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::Serialize(e.to_string()))?;
    fs::write(path, data).await.map_err(|e| ServiceError::Io(e.to_string()))
}
