//! `reqwest` implementation of [`RemoteStore`].

use std::time::Duration;

use async_trait::async_trait;
use bay_config::RemoteConfig;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::error::RemoteError;
use crate::query::{Filter, SelectQuery, encode_filters};
use crate::store::RemoteStore;

/// HTTP client for the REST query layer.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    bearer: String,
    schema: String,
}

impl RestClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the remote section is incomplete or the
    /// HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        if !config.is_configured() {
            return Err(RemoteError::new(
                "remote store is not configured (set remote.url and remote.anon_key)",
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent("bayline/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::transport(&e))?;
        Ok(Self {
            http,
            endpoint: config.rest_endpoint(),
            api_key: config.anon_key.clone(),
            bearer: config.bearer_token().to_string(),
            schema: config.schema.clone(),
        })
    }

    /// Replace the bearer token (e.g. after sign-in).
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.bearer = token.into();
        self
    }

    fn url(&self, table: &str, query: &str) -> String {
        let base = format!("{}/{}", self.endpoint, urlencoding::encode(table));
        if query.is_empty() {
            base
        } else {
            format!("{base}?{query}")
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let profile_header = if method == Method::GET {
            "Accept-Profile"
        } else {
            "Content-Profile"
        };
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.bearer))
            .header(profile_header, &self.schema)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<Value>, RemoteError> {
        let resp = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "remote transport failure");
            RemoteError::transport(&e)
        })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| RemoteError::transport(&e))?;

        if !status.is_success() {
            let error = RemoteError::from_response(status.as_u16(), &body);
            tracing::debug!(
                status = status.as_u16(),
                code = error.code.as_deref().unwrap_or(""),
                message = %error.message,
                "remote call rejected"
            );
            return Err(error);
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(row) => Ok(vec![row]),
            Err(e) => Err(RemoteError::new(format!("invalid response body: {e}"))
                .with_status(status.as_u16())),
        }
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        let url = self.url(&query.table, &query.to_query_string());
        self.send(self.request(Method::GET, &url)).await
    }

    async fn insert(&self, table: &str, rows: &[Value]) -> Result<Vec<Value>, RemoteError> {
        let url = self.url(table, "");
        let request = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(rows);
        self.send(request).await
    }

    async fn update(
        &self,
        table: &str,
        patch: &Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, RemoteError> {
        let url = self.url(table, &encode_filters(filters));
        let request = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(patch);
        self.send(request).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, RemoteError> {
        let url = self.url(table, &encode_filters(filters));
        let request = self
            .request(Method::DELETE, &url)
            .header("Prefer", "return=representation");
        self.send(request).await
    }
}
