//! Authenticated HTTP dispatch.
//!
//! [`ApiClient`] is bound to one verified credential. Every request carries
//! `Authorization: Bearer <token>` and targets the credential's base URL;
//! non-success statuses are normalized into
//! [`Error::RequestFailed`](corpora_core::Error::RequestFailed) with a
//! best-effort textual body. The client never mutates connection state —
//! tearing a session down on failure is the caller's policy.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use corpora_core::{Error, ParsedCredential, Result};

/// HTTP client bound to a verified session credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    credential: ParsedCredential,
}

impl ApiClient {
    pub fn new(http: Client, credential: ParsedCredential) -> Self {
        Self { http, credential }
    }

    pub fn base_url(&self) -> &str {
        &self.credential.base_url
    }

    /// Start a request against `base_url + path` without authentication.
    ///
    /// Callers may attach their own headers; [`execute`](Self::execute)
    /// applies the bearer token last, so a caller-supplied Authorization
    /// header never survives.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.credential.base_url, path);
        self.http.request(method, url)
    }

    /// Send a prepared request and normalize the outcome.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .bearer_auth(&self.credential.token)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            debug!(status = status.as_u16(), body = %body, "request failed");
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// `GET path`, success status required; body left unread.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// `GET path` and deserialize the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        let value = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(value)
    }

    /// `POST path` with a JSON body, deserialize the JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        let value = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(value)
    }

    /// `POST path` with a multipart body, success status required.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        self.execute(self.request(Method::POST, path).multipart(form))
            .await
    }
}
