//! Hosted document database backend.
//!
//! Speaks the database's REST document API:
//!
//! | operation | request |
//! |---|---|
//! | list   | `GET    /_api/database/{db}/collection/{coll}/documents` |
//! | get    | `GET    /_api/database/{db}/document/{coll}/{key}` |
//! | insert | `POST   /_api/database/{db}/document/{coll}` |
//! | update | `PUT    /_api/database/{db}/document/{coll}/{key}` |
//! | delete | `DELETE /_api/database/{db}/collection/{coll}/document/{key}` |
//!
//! Every path segment is percent-encoded, so a key can never address a
//! different document or smuggle in a query. Documents carry their key in
//! `_key`; other `_`-prefixed attributes are store metadata and are
//! stripped before handing the document out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde_json::{json, Value};

use crate::{Document, Fields, RecordStore, ServiceAccount, StoreError};

const KEY_FIELD: &str = "_key";

pub struct RemoteStore {
    base_url: Url,
    account: ServiceAccount,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(endpoint: &str, account: ServiceAccount) -> Result<Self, StoreError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| StoreError::Unavailable(format!("invalid endpoint '{endpoint}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unavailable(format!(
                "endpoint '{endpoint}' cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            base_url,
            account,
            client,
        })
    }

    /// `{endpoint}/_api/database/{db}/{segments...}`, each segment encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects endpoints that cannot be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["_api", "database", self.account.database.as_str()])
                .extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .bearer_auth(self.account.token())
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("request failed: {e}")))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Credentials(
                format!("database answered {}", response.status()),
            )),
            _ => Ok(response),
        }
    }

    async fn expect_success(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(StoreError::Protocol(format!("HTTP {status}: {body}")))
    }

    async fn read_json(response: Response) -> Result<Value, StoreError> {
        response
            .json()
            .await
            .map_err(|e| StoreError::Protocol(format!("failed to parse response: {e}")))
    }
}

/// Keys `.` and `..` are dropped by URL path normalization; no document
/// can have them.
fn addressable(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// Split a raw document into its key and its user fields.
fn into_document(value: Value) -> Result<Document, StoreError> {
    let Value::Object(mut object) = value else {
        return Err(StoreError::Protocol("document is not an object".to_string()));
    };

    let id = match object.remove(KEY_FIELD) {
        Some(Value::String(key)) => key,
        _ => return Err(StoreError::Protocol("document has no `_key`".to_string())),
    };

    object.retain(|name, _| !name.starts_with('_'));
    Ok(Document::new(id, object))
}

#[async_trait]
impl RecordStore for RemoteStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.url(&["collection", collection, "documents"]);
        let response = self.send(self.client.get(url)).await?;
        let body = Self::read_json(Self::expect_success(response).await?).await?;

        match body.get("documents") {
            Some(Value::Array(documents)) => {
                documents.iter().cloned().map(into_document).collect()
            }
            Some(_) => Err(StoreError::Protocol(
                "`documents` is not an array".to_string(),
            )),
            None => Ok(Vec::new()),
        }
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        if !addressable(id) {
            return Ok(None);
        }

        let url = self.url(&["document", collection, id]);
        let response = self.send(self.client.get(url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = Self::read_json(Self::expect_success(response).await?).await?;
        into_document(body).map(Some)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = self.url(&["document", collection]);
        let response = self.send(self.client.post(url).json(&fields)).await?;
        let body = Self::read_json(Self::expect_success(response).await?).await?;

        body.get(KEY_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Protocol("insert response has no `_key`".to_string()))
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        if !addressable(id) {
            return Err(StoreError::not_found(collection, id));
        }

        let url = self.url(&["document", collection, id]);
        let payload = json!({
            "document": fields,
            "merge": true,
        });
        let response = self.send(self.client.put(url).json(&payload)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }

        Self::expect_success(response).await.map(|_| ())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if !addressable(id) {
            return Err(StoreError::not_found(collection, id));
        }

        let url = self.url(&["collection", collection, "document", id]);
        let response = self.send(self.client.delete(url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::not_found(collection, id));
        }

        Self::expect_success(response).await.map(|_| ())
    }
}
