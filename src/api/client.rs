//! Thin HTTP wrapper over `reqwest`.
//!
//! [`HttpClient`] is responsible for the concerns every endpoint shares:
//! URL construction against the configured base, dropping empty query
//! parameters, unwrapping the response envelope, normalizing failures into
//! [`crate::domain::Error`] and tracking in-flight requests through the
//! client's [`LoadingCounter`].
//!
//! Endpoint-specific paths and payloads live in [`crate::api::backend`].

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::envelope::Envelope;
use crate::api::loading::LoadingCounter;
use crate::domain::{Error, Result};
use crate::Config;

/// Message shown for any failure that never reached the server.
const TRANSPORT_MESSAGE: &str = "the server could not be reached";

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    loading: LoadingCounter,
}

impl HttpClient {
    /// Builds a client from configuration.
    ///
    /// The base URL must be absolute. A missing trailing slash is added so
    /// that relative paths join under it instead of replacing its last
    /// segment.
    pub fn new(config: &Config) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| Error::Config(format!("invalid base URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            loading: LoadingCounter::new(),
        })
    }

    /// Counter of requests this client currently has in flight.
    #[must_use]
    pub fn loading(&self) -> LoadingCounter {
        self.loading.clone()
    }

    /// GET a payload.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    /// POST a body, returning the created payload.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a body, returning the updated payload.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// DELETE, expecting an acknowledgement envelope with no payload.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let (status, envelope) = self
            .dispatch(Method::DELETE, path, &[], None::<&()>)
            .await?;
        envelope.expect_success(status)
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T> {
        let (status, envelope) = self.dispatch(method, path, query, body).await?;
        let data = envelope.into_data(status)?;
        serde_json::from_value(data)
            .map_err(|e| Error::Unknown(format!("invalid response body: {e}")))
    }

    /// Sends one request and parses the envelope.
    ///
    /// Empty or whitespace-only query values are dropped before the URL is
    /// built. Non-2xx responses still attempt an envelope parse so the
    /// server's own error message survives; an unparseable body falls back
    /// to a status-derived message.
    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(u16, Envelope<serde_json::Value>)> {
        let _guard = self.loading.begin();

        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid request path {path:?}: {e}")))?;

        let mut request = self.http.request(method.clone(), url.clone());
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, params = pairs.len(), "dispatching request");

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%url, error = %e, "transport failure");
            Error::Transport(TRANSPORT_MESSAGE.to_string())
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::debug!(%url, error = %e, "failed to read response body");
            Error::Transport(TRANSPORT_MESSAGE.to_string())
        })?;

        match serde_json::from_slice::<Envelope<serde_json::Value>>(&bytes) {
            Ok(envelope) => Ok((status, envelope)),
            Err(_) if !(200..300).contains(&status) => Err(Error::Server {
                status: Some(status),
                message: format!("request failed with status {status}"),
            }),
            Err(e) => Err(Error::Unknown(format!("invalid response body: {e}"))),
        }
    }
}
