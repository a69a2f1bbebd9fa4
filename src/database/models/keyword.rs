use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::store::{child_path, Store};
use crate::error::StoreError;

pub const KEYWORDS: &str = "keywords";

/// Counter stored at `keywords/<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub key: String,
    pub count: i64,
}

impl Keyword {
    pub fn path(key: &str) -> String {
        child_path(KEYWORDS, key)
    }

    pub async fn find_by_key(store: &dyn Store, key: &str) -> Result<Option<Self>, StoreError> {
        let path = Self::path(key);
        match store.get(&path).await? {
            None => Ok(None),
            Some(value) => Ok(Some(Self {
                key: key.to_string(),
                count: decode_count(&path, &value)?,
            })),
        }
    }

    pub async fn set(store: &dyn Store, key: &str, count: i64) -> Result<Self, StoreError> {
        store.set(&Self::path(key), Value::from(count)).await?;
        Ok(Self {
            key: key.to_string(),
            count,
        })
    }

    pub async fn increment(store: &dyn Store, key: &str) -> Result<Self, StoreError> {
        let count = store.increment(&Self::path(key), 1).await?;
        Ok(Self {
            key: key.to_string(),
            count,
        })
    }

    pub async fn delete(store: &dyn Store, key: &str) -> Result<(), StoreError> {
        store.delete(&Self::path(key)).await
    }
}

fn decode_count(path: &str, value: &Value) -> Result<i64, StoreError> {
    value.as_i64().ok_or_else(|| StoreError::Decode {
        path: path.to_string(),
        message: format!("expected an integer, found {value}"),
    })
}
