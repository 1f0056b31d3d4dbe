//! REST implementations of the session collaborators.

use crate::collaborators::{
    AudioFetcher, DeletionService, TitleService, UploadOutcome, UploadRequest, Uploader,
};
use crate::error::{Result, SessionError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use review_core::{GroupKey, ItemId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Collaborators backed by a single REST server.
///
/// Routes, relative to the base URL:
/// - `GET <url>` (absolute, or relative to the base) for raw audio
/// - `POST api/recordings` (multipart) for uploads
/// - `PUT api/groups/{group}/title` (JSON) for renames
/// - `DELETE api/recordings/{id}` for deletions
pub struct HttpCollaborators {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct TitleUpdate<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct TitleResponse {
    title: String,
}

impl HttpCollaborators {
    /// Create collaborators for `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| SessionError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SessionError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        // Url::join treats a base without a trailing slash as a file
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ClipReview/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: None,
        })
    }

    /// Send `token` as a bearer token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Base URL with a trailing slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SessionError::InvalidUrl(format!("{path}: {e}")))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SessionError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Map 401/403 to `Unauthorized` and other failures to `Collaborator`.
async fn check(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SessionError::Unauthorized(format!("{what}: {status}")));
    }
    let message = response.text().await.unwrap_or_default();
    Err(SessionError::Collaborator(format!("{what} failed ({status}): {message}")))
}

#[async_trait]
impl AudioFetcher for HttpCollaborators {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(url)?;
        debug!(url = %url, "Fetching audio");

        let response = self.authorize(self.http.get(url)).send().await?;
        let response = check(response, "fetch").await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Uploader for HttpCollaborators {
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome> {
        let url = self.endpoint(&["api", "recordings"])?;
        let size = request.bytes.len();

        let part = Part::bytes(request.bytes)
            .file_name(request.filename.clone())
            .mime_str(&request.mime)?;
        let form = Form::new()
            .part("audio", part)
            .text("item_id", request.item_id.to_string())
            .text("type_tag", request.type_tag);

        let response = self.authorize(self.http.post(url)).multipart(form).send().await?;
        let response = check(response, "upload").await?;
        let outcome: UploadOutcome = response.json().await?;

        info!(
            item = %request.item_id,
            file = %request.filename,
            size,
            success = outcome.success,
            "Uploaded clip"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl TitleService for HttpCollaborators {
    async fn update_title(&self, group: &GroupKey, title: &str) -> Result<String> {
        let url = self.endpoint(&["api", "groups", group.as_str(), "title"])?;
        let response = self
            .authorize(self.http.put(url))
            .json(&TitleUpdate { title })
            .send()
            .await?;
        let response = check(response, "title update").await?;
        let body: TitleResponse = response.json().await?;
        Ok(body.title)
    }
}

#[async_trait]
impl DeletionService for HttpCollaborators {
    async fn delete(&self, id: &ItemId) -> Result<bool> {
        let url = self.endpoint(&["api", "recordings", id.as_str()])?;
        let response = self.authorize(self.http.delete(url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response, "delete").await?;
        Ok(true)
    }
}
