//! ketryx-report - report CI builds to Ketryx
//!
//! This library implements a CI step that finds build artifacts and test
//! reports through glob patterns, uploads each file to Ketryx and registers a
//! build referencing all of them. Several API keys and projects can be given as
//! parallel comma-separated lists; each pair gets its own independent pass.
//!
//! # Example Usage
//!
//! ```no_run
//! use ketryx_report::actions::GitHubActions;
//! use ketryx_report::config::EnvInputs;
//! use ketryx_report::runner::Orchestrator;
//! use ketryx_report::upload::KetryxClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(
//!     Arc::new(KetryxClient::new()?),
//!     Arc::new(GitHubActions::from_env()),
//!     std::env::current_dir()?,
//! );
//!
//! let summary = orchestrator.run_from_source(&EnvInputs).await;
//! println!("{} pass(es), {} failed", summary.passes.len(), summary.failed_passes());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`config`]: step inputs and their validation
//! - [`discovery`]: glob expansion
//! - [`upload`]: the build API client and its mock
//! - [`actions`]: CI host integration (workflow commands, outputs)
//! - [`runner`]: per-pass orchestration and reporting

pub mod actions;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod runner;
pub mod upload;
pub mod util;

pub use actions::{GitHubActions, Host, RecordingHost};
pub use config::{ActionInput, ConfigError, EnvInputs, InputSource, MapInputs, RunInputs};
pub use runner::{Orchestrator, PassError, PassOutcome, RunSummary};
pub use upload::{
    ArtifactData, ArtifactType, BuildData, BuildReporter, KetryxClient, MockReporter, UploadError,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
