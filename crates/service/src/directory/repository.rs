use async_trait::async_trait;

use crate::directory::Record;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Storage abstraction for directory records, consumed by the HTTP layer.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn list(&self) -> Vec<Record>;
    async fn get(&self, id: i64) -> Result<Record, ServiceError>;
    async fn create(&self, body: Record) -> Result<Record, ServiceError>;
    async fn replace(&self, id: i64, body: Record) -> Result<Record, ServiceError>;
    async fn patch(&self, id: i64, body: Record) -> Result<Record, ServiceError>;
    async fn remove(&self, id: i64) -> Result<Record, ServiceError>;

    async fn page(&self, pagination: Pagination) -> Page<Record> {
        let all = self.list().await;
        pagination.paginate(&all)
    }
}
