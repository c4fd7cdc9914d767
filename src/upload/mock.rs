use super::client::BuildReporter;
use super::error::{UploadError, UploadResult};
use super::types::{ArtifactData, BuildData};
use crate::config::ActionInput;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A recorded `upload_build_artifact` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub project: String,
    pub api_key: String,
    pub file_path: PathBuf,
    pub content_type: Option<String>,
}

/// A recorded `upload_build` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCall {
    pub project: String,
    pub api_key: String,
    pub artifacts: Vec<ArtifactData>,
}

/// In-memory [`BuildReporter`] that records every call.
///
/// Uploads succeed with sequential ids (`artifact-1`, `artifact-2`, ...)
/// unless the file name was registered with [`MockReporter::fail_upload_of`]
/// or the project with [`MockReporter::fail_uploads_for`].
/// Build submissions pop scripted responses, falling back to a success.
pub struct MockReporter {
    uploads: Mutex<Vec<UploadCall>>,
    builds: Mutex<Vec<BuildCall>>,
    failing_files: Mutex<HashSet<String>>,
    failing_projects: Mutex<HashSet<String>>,
    build_responses: Mutex<VecDeque<UploadResult<BuildData>>>,
}

impl MockReporter {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            builds: Mutex::new(Vec::new()),
            failing_files: Mutex::new(HashSet::new()),
            failing_projects: Mutex::new(HashSet::new()),
            build_responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Makes every upload of a file with this name fail with a 500
    pub fn fail_upload_of(&self, file_name: impl Into<String>) {
        self.failing_files.lock().unwrap().insert(file_name.into());
    }

    /// Makes every upload made for this project fail with a 500
    pub fn fail_uploads_for(&self, project: impl Into<String>) {
        self.failing_projects.lock().unwrap().insert(project.into());
    }

    pub fn add_build_response(&self, response: UploadResult<BuildData>) {
        self.build_responses.lock().unwrap().push_back(response);
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn builds(&self) -> Vec<BuildCall> {
        self.builds.lock().unwrap().clone()
    }
}

impl Default for MockReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildReporter for MockReporter {
    async fn upload_build_artifact(
        &self,
        input: &ActionInput,
        file_path: &Path,
        content_type: Option<&str>,
    ) -> UploadResult<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(UploadCall {
            project: input.project.clone(),
            api_key: input.api_key.clone(),
            file_path: file_path.to_path_buf(),
            content_type: content_type.map(String::from),
        });

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing_files.lock().unwrap().contains(&file_name)
            || self.failing_projects.lock().unwrap().contains(&input.project)
        {
            return Err(UploadError::api_error(
                500,
                format!("upload of {} rejected", file_name),
            ));
        }

        Ok(format!("artifact-{}", uploads.len()))
    }

    async fn upload_build(
        &self,
        input: &ActionInput,
        artifacts: &[ArtifactData],
    ) -> UploadResult<BuildData> {
        let mut builds = self.builds.lock().unwrap();
        builds.push(BuildCall {
            project: input.project.clone(),
            api_key: input.api_key.clone(),
            artifacts: artifacts.to_vec(),
        });

        let scripted = self.build_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(BuildData::success(format!("build-{}", builds.len()))))
    }
}
