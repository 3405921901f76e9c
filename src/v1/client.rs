/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::errors::GooglePhotosError;
use crate::v1::routing::RequestPlan;
use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

// Root Google Photos Library API
pub const API_ORIGIN: &str = "https://photoslibrary.googleapis.com";

/// OAuth2 credentials for the Google Photos Library API.
///
/// Holds a caller-supplied bearer access token. Acquiring and refreshing the
/// token is up to the consumer of this library.
#[derive(Default, Clone)]
pub struct Creds {
    access_token: String,
}

impl Creds {
    /// Creates credentials from an already-acquired OAuth2 access token
    pub fn from_access_token(access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("access_token", &"xxx")
            .finish()
    }
}

/// Directly communicates with the API. Cheap to clone; all clones share one
/// connection pool.
#[derive(Clone, Default)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    creds: Creds,
    https_client: reqwest::Client,
    origin: String,
}

impl Default for ClientInner {
    fn default() -> Self {
        Self {
            creds: Creds::default(),
            https_client: reqwest::Client::new(),
            origin: API_ORIGIN.to_string(),
        }
    }
}

impl Client {
    /// Creates a new Google Photos client instance from the provided
    /// credentials
    pub fn new(creds: Creds) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                creds,
                ..ClientInner::default()
            }),
        }
    }

    /// Points the client at a different API origin. Intended for tests that
    /// run against a local mock server.
    pub fn with_origin(creds: Creds, origin: &str) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                creds,
                https_client: reqwest::Client::new(),
                origin: origin.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Dispatches a resolved plan and deserializes the JSON response.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        plan: RequestPlan,
    ) -> Result<T, GooglePhotosError> {
        let resp = self.dispatch(plan).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Dispatches a plan whose success response carries no payload of
    /// interest (the API answers with an empty JSON object).
    pub(crate) async fn send_no_content(
        &self,
        plan: RequestPlan,
    ) -> Result<(), GooglePhotosError> {
        self.dispatch(plan).await?;
        Ok(())
    }

    async fn dispatch(&self, plan: RequestPlan) -> Result<reqwest::Response, GooglePhotosError> {
        let mut req_url = url::Url::parse(&self.inner.origin)?.join(&plan.path)?;
        if !plan.query.is_empty() {
            req_url.query_pairs_mut().extend_pairs(plan.query.iter());
        }
        log::debug!("{} {}", plan.method, req_url);

        let mut req = self
            .inner
            .https_client
            .request(plan.method.clone(), req_url)
            .bearer_auth(&self.inner.creds.access_token)
            .header("Accept", "application/json");
        if let Some(body) = &plan.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(status, body));
        }
        Ok(resp)
    }

    /// Sends raw bytes to the upload endpoint and returns the response body,
    /// which the API documents as an opaque upload token in plain text.
    pub(crate) async fn upload(
        &self,
        data: Bytes,
        mime_type: &str,
    ) -> Result<String, GooglePhotosError> {
        let req_url = url::Url::parse(&self.inner.origin)?.join("/v1/uploads")?;
        log::debug!("POST {} ({} bytes, {})", req_url, data.len(), mime_type);
        let resp = self
            .inner
            .https_client
            .post(req_url)
            .bearer_auth(&self.inner.creds.access_token)
            .header("Content-Type", "application/octet-stream")
            .header("X-Goog-Upload-Content-Type", mime_type)
            .header("X-Goog-Upload-Protocol", "raw")
            .body(data)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status, body));
        }
        Ok(body)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish()
    }
}

// Pulls the human-readable message out of a Google error body, falling back
// to the raw text when the body is not the documented shape.
fn api_error(status: reqwest::StatusCode, body: String) -> GooglePhotosError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    log::warn!("API error {}: {}", status.as_u16(), message);
    GooglePhotosError::ApiResponse(status.as_u16(), message)
}

// Error envelope returned by Google APIs on non-2xx responses
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}
