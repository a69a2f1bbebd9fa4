use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::auth::ServiceAccountAuth;
use crate::database::store::{segments, Store};
use crate::error::StoreError;
use crate::utils::logging::{log_store_error, log_store_operation};

/// Realtime Database client speaking the `<path>.json` REST protocol.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: Url,
    auth: Option<Arc<ServiceAccountAuth>>,
}

impl FirebaseStore {
    /// `auth` is `None` for emulators and databases with open rules.
    pub fn new(database_url: &str, auth: Option<ServiceAccountAuth>) -> Result<Self, StoreError> {
        let base_url = Url::parse(database_url.trim())
            .map_err(|e| StoreError::InvalidUrl(format!("{database_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(database_url.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            auth: auth.map(Arc::new),
        })
    }

    pub fn url_for(&self, path: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.base_url.to_string()))?;
            segs.pop_if_empty();
            let parts = segments(path);
            match parts.split_last() {
                None => {
                    segs.push(".json");
                }
                Some((last, parents)) => {
                    segs.extend(parents);
                    segs.push(&format!("{last}.json"));
                }
            }
        }
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, StoreError> {
        let mut url = self.url_for(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        if let Some(auth) = &self.auth {
            let token = auth.access_token(&self.client).await?;
            url.query_pairs_mut().append_pair("access_token", &token);
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        log_store_operation(method.as_str(), path, None);

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            log_store_error(method.as_str(), path, &e.to_string(), None);
            StoreError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = error_message(&text);
            log_store_error(method.as_str(), path, &message, Some(status.as_str()));
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl Store for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let value = self.request(Method::GET, path, &[], None).await?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.request(Method::PUT, path, &[], Some(&value)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.request(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    async fn increment(&self, path: &str, delta: i64) -> Result<i64, StoreError> {
        let body = json!({ ".sv": { "increment": delta } });
        let written = self.request(Method::PUT, path, &[], Some(&body)).await?;
        if let Some(value) = written.as_i64() {
            return Ok(value);
        }

        // Server values are resolved on write; read back if the echo was not numeric.
        match self.get(path).await? {
            Some(value) => value.as_i64().ok_or_else(|| StoreError::Decode {
                path: path.to_string(),
                message: format!("expected an integer, found {value}"),
            }),
            None => Err(StoreError::Decode {
                path: path.to_string(),
                message: "value missing after increment".to_string(),
            }),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.request(Method::GET, "", &[("shallow", "true")], None)
            .await
            .map(|_| ())
    }
}
