use crate::config::ConfigError;
use crate::discovery::DiscoveryError;
use crate::upload::{BuildData, UploadError};
use thiserror::Error;

/// Anything that aborts a single credential/project pass
#[derive(Debug, Error)]
pub enum PassError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Result of one pass
#[derive(Debug)]
pub struct PassOutcome {
    pub project: String,
    pub result: Result<BuildData, PassError>,
}

impl PassOutcome {
    /// True only when the service accepted the build
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(build) if build.ok)
    }

    pub fn build_id(&self) -> Option<&str> {
        self.result.as_ref().ok().and_then(|b| b.build_id.as_deref())
    }

    /// Error text reported for a failed pass
    pub fn error_message(&self) -> Option<String> {
        match &self.result {
            Ok(build) if build.ok => None,
            Ok(build) => Some(build.error.clone().unwrap_or_default()),
            Err(e) => Some(e.to_string()),
        }
    }
}

/// Aggregate of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Set when the run stopped before the first pass
    pub fatal: Option<String>,
    pub passes: Vec<PassOutcome>,
}

impl RunSummary {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            fatal: Some(message.into()),
            passes: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.fatal.is_none() && self.passes.iter().all(PassOutcome::succeeded)
    }

    pub fn failed_passes(&self) -> usize {
        self.passes.iter().filter(|p| !p.succeeded()).count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: Result<BuildData, PassError>) -> PassOutcome {
        PassOutcome {
            project: "KXPRJ1".to_string(),
            result,
        }
    }

    #[test]
    fn test_pass_outcome_states() {
        let ok = outcome(Ok(BuildData::success("b-1")));
        assert!(ok.succeeded());
        assert_eq!(ok.build_id(), Some("b-1"));
        assert_eq!(ok.error_message(), None);

        let rejected = outcome(Ok(BuildData::failure("Unknown version")));
        assert!(!rejected.succeeded());
        assert_eq!(rejected.error_message().as_deref(), Some("Unknown version"));

        let errored = outcome(Err(UploadError::api_error(500, "boom").into()));
        assert!(!errored.succeeded());
        assert_eq!(
            errored.error_message().as_deref(),
            Some("API error (500): boom")
        );
    }

    #[test]
    fn test_run_summary_exit_code() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.exit_code(), 0);

        summary.passes.push(outcome(Ok(BuildData::success("b-1"))));
        assert_eq!(summary.exit_code(), 0);

        summary.passes.push(outcome(Ok(BuildData::failure("nope"))));
        assert_eq!(summary.failed_passes(), 1);
        assert_eq!(summary.exit_code(), 1);

        assert_eq!(RunSummary::fatal("mismatch").exit_code(), 1);
    }
}
