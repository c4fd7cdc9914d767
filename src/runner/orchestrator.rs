use super::outcome::{PassError, PassOutcome, RunSummary};
use crate::actions::Host;
use crate::config::{ActionInput, Credentials, InputSource, RunInputs};
use crate::discovery::expand_pattern;
use crate::upload::{ArtifactData, ArtifactType, BuildData, BuildReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

pub const OUTPUT_OK: &str = "ok";
pub const OUTPUT_ERROR: &str = "error";
pub const OUTPUT_BUILD_ID: &str = "build-id";

/// Runs one upload-and-report pass per credential/project pair.
///
/// Passes run strictly one after another and a failing pass never stops the
/// ones after it. Each pass gets its own [`ActionInput`].
pub struct Orchestrator {
    reporter: Arc<dyn BuildReporter>,
    host: Arc<dyn Host>,
    base_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(
        reporter: Arc<dyn BuildReporter>,
        host: Arc<dyn Host>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reporter,
            host,
            base_dir: base_dir.into(),
        }
    }

    /// Reads the inputs from `source` and runs every pass
    pub async fn run_from_source(&self, source: &dyn InputSource) -> RunSummary {
        self.run(&RunInputs::read(source)).await
    }

    pub async fn run(&self, inputs: &RunInputs) -> RunSummary {
        let pairs = match inputs.credential_pairs() {
            Ok(pairs) => pairs,
            Err(e) => return self.fail_run(e.to_string()),
        };
        self.host.debug(&format!("Projects: {:?}", inputs.projects));
        if inputs.patterns.is_empty() {
            warn!("No path patterns configured, builds will reference no artifacts");
        }

        let mut summary = RunSummary::default();
        for (index, credentials) in pairs.iter().enumerate() {
            let span = info_span!("pass", index, project = %credentials.project);
            let result = self
                .run_pass(inputs, credentials)
                .instrument(span)
                .await;
            self.report(&credentials.project, &result);
            summary.passes.push(PassOutcome {
                project: credentials.project.clone(),
                result,
            });
        }

        info!(
            "Reported {} project(s), {} failed",
            summary.passes.len(),
            summary.failed_passes()
        );
        summary
    }

    fn fail_run(&self, message: String) -> RunSummary {
        debug!("Run aborted: {}", message);
        self.host.debug(&format!("Encountered error {}", message));
        self.host.set_failed(&message);
        RunSummary::fatal(message)
    }

    async fn run_pass(
        &self,
        inputs: &RunInputs,
        credentials: &Credentials,
    ) -> Result<BuildData, PassError> {
        let input = inputs.action_input(credentials)?;
        self.host.debug(&format!("Input: {:?}", input));

        let artifacts = self.upload_artifacts(&input).await?;
        info!(
            "Submitting build for {} with {} artifact(s)",
            input.project,
            artifacts.len()
        );
        let build = self.reporter.upload_build(&input, &artifacts).await?;
        Ok(build)
    }

    /// Uploads every matched file, category by category, in pattern order
    async fn upload_artifacts(&self, input: &ActionInput) -> Result<Vec<ArtifactData>, PassError> {
        let mut artifacts = Vec::new();

        for artifact_type in ArtifactType::ALL {
            for pattern in input.patterns.for_type(artifact_type) {
                for file_path in expand_pattern(&self.base_dir, pattern)? {
                    debug!("Uploading {} as {}", file_path.display(), artifact_type);
                    let id = self
                        .reporter
                        .upload_build_artifact(input, &file_path, artifact_type.content_type())
                        .await?;
                    artifacts.push(ArtifactData::new(id, artifact_type));
                }
            }
        }

        Ok(artifacts)
    }

    fn report(&self, project: &str, result: &Result<BuildData, PassError>) {
        match result {
            Ok(build) => {
                let build_id = build.build_id.as_deref().unwrap_or_default();
                let error = build.error.as_deref().unwrap_or_default();
                if build.ok {
                    self.host
                        .info(&format!("Reported build to Ketryx: {}", build_id));
                } else {
                    debug!("Build rejected: {}", error);
                    self.host
                        .set_failed(&format!("Failure reporting build to Ketryx: {}", error));
                }
                self.set_outputs(build.ok, error, build_id);
            }
            Err(e) => {
                if matches!(e, PassError::Upload(upload) if upload.is_auth_error()) {
                    self.host
                        .debug(&format!("API key rejected for project {}", project));
                }
                let message = e.to_string();
                debug!("Pass failed: {}", message);
                self.host.debug(&format!("Encountered error {}", message));
                self.host.set_failed(&message);
                self.set_outputs(false, &message, "");
            }
        }
    }

    fn set_outputs(&self, ok: bool, error: &str, build_id: &str) {
        self.host.set_output(OUTPUT_OK, if ok { "true" } else { "false" });
        self.host.set_output(OUTPUT_ERROR, error);
        self.host.set_output(OUTPUT_BUILD_ID, build_id);
    }
}
