//! Host CI platform integration
//!
//! The step reports through a [`Host`]: debug and info lines, a failure
//! signal, and named outputs. [`GitHubActions`] speaks the GitHub workflow
//! command protocol; [`RecordingHost`] keeps everything in memory.

pub mod github;
pub mod recording;

pub use github::GitHubActions;
pub use recording::{HostEvent, RecordingHost};

/// Observable effects of the step on its CI host
pub trait Host: Send + Sync {
    /// Line shown only when step debugging is enabled
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    /// Reports an error and marks the step as failed
    fn set_failed(&self, message: &str);

    fn set_output(&self, name: &str, value: &str);

    /// Whether `set_failed` has been called
    fn failed(&self) -> bool;
}
