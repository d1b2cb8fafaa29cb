use std::sync::Arc;

use tracing::{debug, info};

use crate::directory::record::{self, record_id, Record};
use crate::directory::repository::DirectoryRepository;
use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

const ENTITY: &str = "directory";

/// Directory records persisted as a JSON array on disk.
#[derive(Clone)]
pub struct DirectoryStore {
    store: Arc<JsonListStore<Record>>,
}

impl DirectoryStore {
    /// Load the records from `path`, creating the file with `[]` if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Record>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn file_path(&self) -> &std::path::Path {
        self.store.file_path()
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<Record> {
        self.store.list().await
    }

    /// First record whose `id` equals `id`.
    pub async fn get(&self, id: i64) -> Result<Record, ServiceError> {
        self.store
            .find(|r| record_id(r) == Some(id))
            .await
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Assign the next id onto `body`, append it and persist.
    pub async fn create(&self, body: Record) -> Result<Record, ServiceError> {
        let created = self
            .store
            .update_list(|records| {
                let id = record::next_id(records);
                let rec = record::with_id(id, body);
                records.push(rec.clone());
                Ok(rec)
            })
            .await?;
        info!(id = ?record_id(&created), "directory created");
        Ok(created)
    }

    /// Replace the record entirely with `{id} ∪ body`.
    pub async fn replace(&self, id: i64, body: Record) -> Result<Record, ServiceError> {
        self.store
            .update_list(|records| {
                let slot = find_mut(records, id)?;
                *slot = record::with_id(id, body);
                Ok(slot.clone())
            })
            .await
            .inspect(|_| debug!(id, "directory replaced"))
    }

    /// Shallow-merge `body` onto the stored record.
    pub async fn patch(&self, id: i64, body: Record) -> Result<Record, ServiceError> {
        self.store
            .update_list(|records| {
                let slot = find_mut(records, id)?;
                *slot = record::merge(std::mem::take(slot), body);
                Ok(slot.clone())
            })
            .await
            .inspect(|_| debug!(id, "directory patched"))
    }

    /// Remove the record and return it as it was.
    pub async fn remove(&self, id: i64) -> Result<Record, ServiceError> {
        self.store
            .update_list(|records| {
                let idx = records
                    .iter()
                    .position(|r| record_id(r) == Some(id))
                    .ok_or_else(|| ServiceError::not_found(ENTITY))?;
                Ok(records.remove(idx))
            })
            .await
            .inspect(|_| info!(id, "directory removed"))
    }
}

fn find_mut(records: &mut [Record], id: i64) -> Result<&mut Record, ServiceError> {
    records
        .iter_mut()
        .find(|r| record_id(r) == Some(id))
        .ok_or_else(|| ServiceError::not_found(ENTITY))
}

#[async_trait::async_trait]
impl DirectoryRepository for DirectoryStore {
    async fn list(&self) -> Vec<Record> { self.list().await }
    async fn get(&self, id: i64) -> Result<Record, ServiceError> { self.get(id).await }
    async fn create(&self, body: Record) -> Result<Record, ServiceError> { self.create(body).await }
    async fn replace(&self, id: i64, body: Record) -> Result<Record, ServiceError> { self.replace(id, body).await }
    async fn patch(&self, id: i64, body: Record) -> Result<Record, ServiceError> { self.patch(id, body).await }
    async fn remove(&self, id: i64) -> Result<Record, ServiceError> { self.remove(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::test_support::{cleanup, temp_store_path};
    use serde_json::{json, Value};

    fn body(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            other => panic!("not an object: {other}"),
        }
    }

    #[tokio::test]
    async fn create_on_empty_store_assigns_id_one() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_create");
        let store = DirectoryStore::new(&path).await?;
        let created = store.create(body(json!({"name": "A", "emails": "a@x.com"}))).await?;
        assert_eq!(Value::Object(created.clone()), json!({"id": 1, "name": "A", "emails": "a@x.com"}));
        assert_eq!(store.get(1).await?, created);
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_follow_the_maximum_and_are_not_reused() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_ids");
        let store = DirectoryStore::new(&path).await?;
        for name in ["a", "b", "c"] {
            store.create(body(json!({"name": name}))).await?;
        }
        store.remove(2).await?;
        let d = store.create(body(json!({"name": "d", "id": 100}))).await?;
        assert_eq!(record_id(&d), Some(4));
        let ids: Vec<_> = store.list().await.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn replace_drops_fields_and_keeps_path_id() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_replace");
        let store = DirectoryStore::new(&path).await?;
        store.create(body(json!({"name": "A", "emails": "a@x.com", "phone": "1"}))).await?;
        let replaced = store.replace(1, body(json!({"id": 9, "name": "B"}))).await?;
        assert_eq!(Value::Object(replaced), json!({"id": 1, "name": "B"}));
        assert_eq!(Value::Object(store.get(1).await?), json!({"id": 1, "name": "B"}));
        assert!(matches!(store.replace(2, Record::new()).await, Err(ServiceError::NotFound(_))));
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn patch_merges_and_empty_patch_is_identity() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_patch");
        let store = DirectoryStore::new(&path).await?;
        let created = store.create(body(json!({"name": "A", "emails": "a@x.com"}))).await?;
        assert_eq!(store.patch(1, Record::new()).await?, created);

        let patched = store.patch(1, body(json!({"emails": "b@x.com", "tags": ["x"]}))).await?;
        assert_eq!(
            Value::Object(patched),
            json!({"id": 1, "name": "A", "emails": "b@x.com", "tags": ["x"]})
        );
        assert!(matches!(store.patch(5, Record::new()).await, Err(ServiceError::NotFound(_))));
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn remove_returns_previous_state() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_remove");
        let store = DirectoryStore::new(&path).await?;
        store.create(body(json!({"name": "A"}))).await?;
        let before = store.get(1).await?;
        assert_eq!(store.remove(1).await?, before);
        assert!(matches!(store.get(1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.remove(1).await, Err(ServiceError::NotFound(_))));
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn mutations_survive_reload() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_reload");
        let store = DirectoryStore::new(&path).await?;
        store.create(body(json!({"name": "A"}))).await?;
        store.create(body(json!({"name": "B"}))).await?;
        store.patch(2, body(json!({"emails": "b@x.com"}))).await?;

        let reloaded = DirectoryStore::new(&path).await?;
        assert_eq!(reloaded.list().await, store.list().await);
        let text = tokio::fs::read_to_string(&path).await?;
        assert!(text.starts_with("[\n  {\n    \"id\": 1,"));
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_that_is_not_an_array_of_objects_is_corrupt() -> Result<(), anyhow::Error> {
        for contents in ["{}", "[1]", "[{\"id\": 1}, \"x\"]"] {
            let path = temp_store_path("directory_shape");
            tokio::fs::create_dir_all(path.parent().unwrap()).await?;
            tokio::fs::write(&path, contents).await?;
            let res = DirectoryStore::new(&path).await;
            assert!(matches!(res, Err(ServiceError::Corrupt { .. })), "contents {contents}");
            cleanup(&path).await;
        }
        Ok(())
    }

    #[tokio::test]
    async fn write_failure_surfaces_as_io_error() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_write_fail");
        let store = DirectoryStore::new(&path).await?;
        // a directory where the file was makes every rewrite fail
        tokio::fs::remove_file(&path).await?;
        tokio::fs::create_dir(&path).await?;
        let res = store.create(body(json!({"name": "A"}))).await;
        assert!(matches!(res, Err(ServiceError::Io(_))));
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn paginates_through_the_trait() -> Result<(), anyhow::Error> {
        let path = temp_store_path("directory_page");
        let store = DirectoryStore::new(&path).await?;
        for i in 1..=7 {
            store.create(body(json!({"name": format!("n{i}")}))).await?;
        }
        let repo: Arc<dyn DirectoryRepository> = store;
        let page = repo.page(Pagination { page: 2, page_size: 3 }).await;
        let ids: Vec<_> = page.results.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!((page.count, page.total_pages, page.next, page.previous), (3, 3, Some(3), Some(1)));
        cleanup(&path).await;
        Ok(())
    }
}
