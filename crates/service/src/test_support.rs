#![cfg(test)]
use std::path::PathBuf;

/// Unique temp file path so concurrent tests never share a store file.
pub fn temp_store_path(prefix: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{}_{}", prefix, uuid::Uuid::new_v4()))
        .join("bd.json")
}

pub async fn cleanup(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}
