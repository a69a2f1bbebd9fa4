use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::database::store::{segments, Store};
use crate::error::StoreError;

/// In-process store with the same path semantics as the remote database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    root: Arc<Mutex<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full snapshot of the tree, `null` when empty.
    pub async fn snapshot(&self) -> Value {
        self.root.lock().await.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let root = self.root.lock().await;
        Ok(lookup(&root, &segments(path)).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut root = self.root.lock().await;
        let segs = segments(path);
        if is_empty(&value) {
            remove(&mut root, &segs);
        } else {
            insert(&mut root, &segs, value);
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut root = self.root.lock().await;
        remove(&mut root, &segments(path));
        Ok(())
    }

    async fn increment(&self, path: &str, delta: i64) -> Result<i64, StoreError> {
        let mut root = self.root.lock().await;
        let segs = segments(path);

        let current = match lookup(&root, &segs) {
            None => 0,
            Some(value) => value.as_i64().ok_or_else(|| StoreError::Decode {
                path: path.to_string(),
                message: format!("expected an integer, found {value}"),
            })?,
        };
        let next = current.checked_add(delta).ok_or_else(|| StoreError::Decode {
            path: path.to_string(),
            message: "integer overflow".to_string(),
        })?;

        insert(&mut root, &segs, Value::from(next));
        Ok(next)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn lookup<'a>(root: &'a Value, segs: &[&str]) -> Option<&'a Value> {
    let mut node = root;
    for seg in segs {
        node = node.get(*seg)?;
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

fn insert(node: &mut Value, segs: &[&str], value: Value) {
    match segs.split_first() {
        None => *node = value,
        Some((head, rest)) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                let child = map.entry(head.to_string()).or_insert(Value::Null);
                insert(child, rest, value);
            }
        }
    }
}

fn remove(node: &mut Value, segs: &[&str]) {
    let Some((head, rest)) = segs.split_first() else {
        *node = Value::Null;
        return;
    };

    let mut now_empty = false;
    if let Value::Object(map) = node {
        if let Some(child) = map.get_mut(*head) {
            remove(child, rest);
            if is_empty(child) {
                map.remove(*head);
            }
        }
        now_empty = map.is_empty();
    }
    if now_empty {
        *node = Value::Null;
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
