use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// A remote hierarchical key-value store addressed by slash-delimited paths.
///
/// Absent paths read as `None`. Writing `null` removes a path, and parents
/// that become empty disappear with it.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Atomically adds `delta` to the integer at `path` (absent counts as 0)
    /// and returns the new value.
    async fn increment(&self, path: &str, delta: i64) -> Result<i64, StoreError>;

    /// Cheap round trip used by the health endpoints.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub fn child_path(parent: &str, key: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), key)
}

pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
