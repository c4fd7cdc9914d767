//! Wire types exchanged with the Ketryx build API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category an uploaded file is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    Artifact,
    CucumberJson,
    JunitXml,
    SpdxJson,
}

impl ArtifactType {
    /// Categories in the order a pass processes them
    pub const ALL: [ArtifactType; 4] = [
        ArtifactType::Artifact,
        ArtifactType::CucumberJson,
        ArtifactType::JunitXml,
        ArtifactType::SpdxJson,
    ];

    /// Content type attached to the multipart upload.
    ///
    /// `None` leaves the part untyped and lets the service pick its default.
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            ArtifactType::Artifact => Some("application/octet-stream"),
            ArtifactType::JunitXml => Some("application/xml"),
            ArtifactType::CucumberJson | ArtifactType::SpdxJson => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactType::Artifact => "artifact",
            ArtifactType::CucumberJson => "cucumber-json",
            ArtifactType::JunitXml => "junit-xml",
            ArtifactType::SpdxJson => "spdx-json",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an uploaded file inside a build submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactData {
    pub id: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
}

impl ArtifactData {
    pub fn new(id: impl Into<String>, artifact_type: ArtifactType) -> Self {
        Self {
            id: id.into(),
            artifact_type,
        }
    }
}

/// Outcome of a build submission as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildData {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BuildData {
    pub fn success(build_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            build_id: Some(build_id.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            build_id: None,
            error: Some(error.into()),
        }
    }
}

/// Response body of the artifact upload endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ArtifactUploadResponse {
    pub id: String,
}

/// JSON body of the build submission endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BuildRequest<'a> {
    pub project: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_urls: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<&'a str>,
    pub artifacts: &'a [ArtifactData],
    pub check_dependencies_status: bool,
    pub check_change_request_item_association: bool,
    pub check_release_status: bool,
}
