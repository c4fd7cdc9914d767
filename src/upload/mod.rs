//! Ketryx build API integration
//!
//! The [`BuildReporter`] trait is the seam between the orchestration and the
//! service. [`KetryxClient`] talks HTTP; [`MockReporter`] records calls in memory.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{BuildReporter, KetryxClient, DEFAULT_TIMEOUT_SECS};
pub use error::{UploadError, UploadResult};
pub use mock::{BuildCall, MockReporter, UploadCall};
pub use types::{ArtifactData, ArtifactType, BuildData};
