use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::database::store::{child_path, Store};
use crate::error::StoreError;

pub const USERS: &str = "users";

/// Interest profile stored at `users/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn new(interests: Vec<String>) -> Self {
        Self { interests }
    }

    pub fn path(user_id: &str) -> String {
        child_path(USERS, user_id)
    }

    /// Replaces whatever was stored for `user_id`.
    pub async fn save(&self, store: &dyn Store, user_id: &str) -> Result<(), StoreError> {
        store
            .set(&Self::path(user_id), serde_json::to_value(self)?)
            .await
    }

    pub async fn find_by_id(store: &dyn Store, user_id: &str) -> Result<Option<Self>, StoreError> {
        match store.get(&Self::path(user_id)).await? {
            None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Reads the whole `users` collection. Entries that do not look like a
    /// profile are skipped.
    pub async fn all(store: &dyn Store) -> Result<BTreeMap<String, Self>, StoreError> {
        let entries: Vec<(String, Value)> = match store.get(USERS).await? {
            None => Vec::new(),
            Some(Value::Object(map)) => map.into_iter().collect(),
            // Numeric ids come back as a sparse array.
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            Some(other) => {
                return Err(StoreError::Decode {
                    path: USERS.to_string(),
                    message: format!("expected a collection, found {other}"),
                })
            }
        };

        let mut profiles = BTreeMap::new();
        for (user_id, value) in entries {
            match serde_json::from_value::<Self>(value) {
                Ok(profile) => {
                    profiles.insert(user_id, profile);
                }
                Err(e) => tracing::warn!("Skipping malformed profile users/{}: {}", user_id, e),
            }
        }
        Ok(profiles)
    }
}
