//! Run orchestration: credential/project passes, uploads and reporting

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::{Orchestrator, OUTPUT_BUILD_ID, OUTPUT_ERROR, OUTPUT_OK};
pub use outcome::{PassError, PassOutcome, RunSummary};
