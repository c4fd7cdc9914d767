//! HTTP client for the Ketryx build API
//!
//! # Example
//!
//! ```no_run
//! use ketryx_report::config::{MapInputs, RunInputs};
//! use ketryx_report::upload::{ArtifactType, BuildReporter, KetryxClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = MapInputs::new()
//!     .with_input("api-key", "KXK1")
//!     .with_input("project", "KXPRJ1");
//! let inputs = RunInputs::read(&source);
//! let input = inputs.action_input(&inputs.credential_pairs()?[0])?;
//!
//! let client = KetryxClient::new()?;
//! let id = client
//!     .upload_build_artifact(&input, Path::new("junit.xml"), ArtifactType::JunitXml.content_type())
//!     .await?;
//! println!("Uploaded {}", id);
//! # Ok(())
//! # }
//! ```

use super::error::{UploadError, UploadResult};
use super::types::{ArtifactData, ArtifactUploadResponse, BuildData, BuildRequest};
use crate::config::ActionInput;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, RequestBuilder, Response};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout for API calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Calls the step makes against the build-reporting service
#[async_trait]
pub trait BuildReporter: Send + Sync {
    /// Uploads one file and returns the identifier the service assigned to it
    async fn upload_build_artifact(
        &self,
        input: &ActionInput,
        file_path: &Path,
        content_type: Option<&str>,
    ) -> UploadResult<String>;

    /// Registers a build referencing previously uploaded artifacts
    async fn upload_build(
        &self,
        input: &ActionInput,
        artifacts: &[ArtifactData],
    ) -> UploadResult<BuildData>;
}

/// reqwest-backed [`BuildReporter`]
///
/// Endpoint and credentials come from the [`ActionInput`] of each call, so a
/// single client serves every credential/project pair.
#[derive(Clone)]
pub struct KetryxClient {
    http_client: Client,
    timeout: Duration,
}

impl KetryxClient {
    pub fn new() -> UploadResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> UploadResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    fn authorize(&self, request: RequestBuilder, input: &ActionInput) -> RequestBuilder {
        request.header(header::AUTHORIZATION, format!("Bearer {}", input.api_key))
    }

    async fn send(&self, request: RequestBuilder) -> UploadResult<Response> {
        request.send().await.map_err(|e| {
            debug!("Request failed: {}", e);
            if e.is_timeout() {
                UploadError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
            } else {
                UploadError::Http(e)
            }
        })
    }
}

#[async_trait]
impl BuildReporter for KetryxClient {
    async fn upload_build_artifact(
        &self,
        input: &ActionInput,
        file_path: &Path,
        content_type: Option<&str>,
    ) -> UploadResult<String> {
        let url = format!("{}/api/v1/build-artifacts", input.settings.api_url);

        let contents = tokio::fs::read(file_path)
            .await
            .map_err(|source| UploadError::Io {
                path: file_path.to_path_buf(),
                source,
            })?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        debug!(
            "Uploading {} ({} bytes, content type {:?}) to {}",
            file_path.display(),
            contents.len(),
            content_type,
            url
        );

        let mut part = Part::bytes(contents).file_name(file_name);
        if let Some(mime) = content_type {
            part = part.mime_str(mime)?;
        }
        let form = Form::new().part("file", part);

        let request = self
            .http_client
            .post(&url)
            .query(&[("project", input.project.as_str())])
            .multipart(form);
        let response = self.send(self.authorize(request, input)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Artifact upload failed with status {}: {}", status, body);
            return Err(UploadError::api_error(status.as_u16(), body));
        }

        let uploaded: ArtifactUploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        info!("Uploaded {} as {}", file_path.display(), uploaded.id);
        Ok(uploaded.id)
    }

    async fn upload_build(
        &self,
        input: &ActionInput,
        artifacts: &[ArtifactData],
    ) -> UploadResult<BuildData> {
        let url = format!("{}/api/v1/builds", input.settings.api_url);
        let settings = &input.settings;

        let body = BuildRequest {
            project: &input.project,
            version: settings.version.as_deref(),
            commit_sha: settings.commit_sha.as_deref(),
            build_name: settings.build_name.as_deref(),
            repository_urls: settings.repository_url.as_deref().map(|url| vec![url]),
            source_url: settings.source_url.as_deref(),
            artifacts,
            check_dependencies_status: settings.check_dependencies_status,
            check_change_request_item_association: settings.check_changes_status,
            check_release_status: settings.check_release_status,
        };

        debug!(
            "Submitting build for project {} with {} artifacts to {}",
            input.project,
            artifacts.len(),
            url
        );

        let request = self.http_client.post(&url).json(&body);
        let response = self.send(self.authorize(request, input)).await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| UploadError::InvalidResponse(format!("{} (body: {})", e, text)));
        }

        debug!("Build submission failed with status {}: {}", status, text);
        // Error bodies usually carry the same {ok, error} shape.
        match serde_json::from_str::<BuildData>(&text) {
            Ok(data) if !data.ok => Ok(data),
            _ => Ok(BuildData::failure(format!("HTTP {}: {}", status.as_u16(), text))),
        }
    }
}
