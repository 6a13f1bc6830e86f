//! HTTP document store client.
//!
//! Wire format (all bodies JSON):
//!
//! | Operation | Request | Success |
//! |-----------|---------|---------|
//! | create | `POST /v1/{collection}` | `{"id": "..."}` |
//! | replace | `PUT /v1/{collection}/{id}` | any |
//! | merge | `PATCH /v1/{collection}/{id}` | any |
//! | read | `GET /v1/{collection}/{id}` | the document, 404 if absent |
//! | list | `GET /v1/{collection}` | `{"documents": [{"id", "data"}]}` |
//! | delete | `DELETE /v1/{collection}/{id}` | any, 404 if absent |
//!
//! A 404 on create, replace or merge means the service has no such
//! collection or document and surfaces as
//! [`VitaError::DocumentNotFound`](mdvita_core::VitaError::DocumentNotFound).

use std::time::Duration;

use async_trait::async_trait;
use mdvita_core::config::RemoteConfig;
use mdvita_core::error::{Result, VitaError};
use mdvita_core::store::DocumentStore;
use mdvita_core::types::DocumentId;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RemoteError;

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    documents: Vec<ListedDocument>,
}

#[derive(Debug, Deserialize)]
struct ListedDocument {
    id: String,
    data: Value,
}

/// [`DocumentStore`] backed by a remote JSON document service.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    base_url: Url,
    api_key: Option<String>,
    http: Client,
    timeout_ms: u64,
    max_retries: u32,
}

impl RemoteStore {
    /// Build a client from configuration. No request is made.
    ///
    /// # Errors
    /// Returns [`RemoteError::ConfigError`] if the base URL does not parse
    /// or cannot carry a path.
    pub fn new(config: &RemoteConfig) -> std::result::Result<Self, RemoteError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RemoteError::ConfigError(format!("invalid base URL {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::ConfigError(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RemoteError::ConfigError(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            http,
            timeout_ms: config.timeout_ms,
            max_retries: config.max_retries,
        })
    }

    /// Service root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for a collection, or a document within it. Segments are
    /// percent-encoded.
    #[must_use]
    pub fn endpoint(&self, collection: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("v1").push(collection);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Sort a transport failure into timeout, unreachable, or other.
    fn transport_error(&self, err: &reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(self.timeout_ms)
        } else if err.is_connect() {
            RemoteError::Unavailable(err.to_string())
        } else {
            RemoteError::RequestFailed(err.to_string())
        }
    }

    /// Send with retries. Transport failures and 5xx responses are retried;
    /// 404 yields `Ok(None)`; any other non-success status fails at once.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> std::result::Result<Option<Response>, RemoteError> {
        let mut last_error = RemoteError::RequestFailed("no attempt made".into());
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retrying remote call (attempt {}/{})", attempt + 1, self.max_retries + 1);
            }

            let mut builder = self.request(method.clone(), url.clone());
            if let Some(body) = body {
                builder = builder.json(body);
            }

            last_error = match builder.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(Some(resp)),
                Ok(resp) if resp.status() == StatusCode::NOT_FOUND => return Ok(None),
                Ok(resp) if resp.status().is_server_error() => {
                    RemoteError::RequestFailed(format!("HTTP {}", resp.status()))
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(RemoteError::Rejected { status, body });
                }
                Err(e) => self.transport_error(&e),
            };
            warn!(%method, %url, "{last_error}");
        }

        Err(RemoteError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error: last_error.to_string(),
        })
    }

    /// Like [`send`](Self::send), for calls that must land on an existing
    /// target. A 404 becomes [`VitaError::DocumentNotFound`].
    async fn send_expecting(
        &self,
        method: Method,
        collection: &str,
        id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Response> {
        self.send(method, self.endpoint(collection, id), body)
            .await?
            .ok_or_else(|| VitaError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.unwrap_or_default().to_string(),
            })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> std::result::Result<T, RemoteError> {
    resp.json().await.map_err(|e| RemoteError::ParseError(e.to_string()))
}

#[async_trait]
impl DocumentStore for RemoteStore {
    async fn write(&self, collection: &str, id: Option<&str>, data: Value) -> Result<DocumentId> {
        if let Some(id) = id {
            self.send_expecting(Method::PUT, collection, Some(id), Some(&data)).await?;
            debug!(collection, id, "Replaced remote document");
            return Ok(DocumentId::from(id));
        }

        let resp = self.send_expecting(Method::POST, collection, None, Some(&data)).await?;
        let created: Created = decode(resp).await?;
        debug!(collection, id = %created.id, "Created remote document");
        Ok(DocumentId(created.id))
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        match self.send(Method::GET, self.endpoint(collection, Some(id)), None).await? {
            Some(resp) => Ok(Some(decode(resp).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<(DocumentId, Value)>> {
        let Some(resp) = self.send(Method::GET, self.endpoint(collection, None), None).await? else {
            return Ok(Vec::new());
        };
        let listing: Listing = decode(resp).await?;
        Ok(listing
            .documents
            .into_iter()
            .map(|d| (DocumentId(d.id), d.data))
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let deleted = self
            .send(Method::DELETE, self.endpoint(collection, Some(id)), None)
            .await?
            .is_some();
        Ok(deleted)
    }

    async fn merge(&self, collection: &str, id: &str, patch: Value) -> Result<()> {
        self.send_expecting(Method::PATCH, collection, Some(id), Some(&patch)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.into(),
            ..RemoteConfig::default()
        }
    }

    #[test]
    fn endpoints_append_to_the_base_path() {
        let store = RemoteStore::new(&config("http://localhost:8080/api/")).expect("valid url");
        assert_eq!(
            store.endpoint("moods", Some("doc_1")).as_str(),
            "http://localhost:8080/api/v1/moods/doc_1"
        );
        assert_eq!(store.endpoint("journal", None).as_str(), "http://localhost:8080/api/v1/journal");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let store = RemoteStore::new(&config("http://localhost:8080")).expect("valid url");
        assert_eq!(
            store.endpoint("users", Some("a/b c")).as_str(),
            "http://localhost:8080/v1/users/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(RemoteStore::new(&config("not a url")), Err(RemoteError::ConfigError(_))));
        assert!(matches!(
            RemoteStore::new(&config("mailto:someone@example.com")),
            Err(RemoteError::ConfigError(_))
        ));
    }
}
