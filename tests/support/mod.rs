use ketryx_report::actions::RecordingHost;
use ketryx_report::config::MapInputs;
use ketryx_report::runner::Orchestrator;
use ketryx_report::upload::MockReporter;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Workspace laid out like a typical build output directory
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Workspace with two binaries, two JUnit reports, one Cucumber report and one SBOM
    pub fn with_build_outputs() -> Self {
        let workspace = Self::new();
        workspace.write("dist/app-linux.tar.gz", "binary");
        workspace.write("dist/app-macos.tar.gz", "binary");
        workspace.write("reports/junit/unit.xml", "<testsuite/>");
        workspace.write("reports/junit/integration.xml", "<testsuite/>");
        workspace.write("reports/cucumber.json", "[]");
        workspace.write("sbom.spdx.json", "{}");
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent dir");
        fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }
}

/// Inputs matching every file of [`Workspace::with_build_outputs`]
#[allow(dead_code)]
pub fn build_output_inputs(api_keys: &str, projects: &str) -> MapInputs {
    MapInputs::new()
        .with_input("api-key", api_keys)
        .with_input("project", projects)
        .with_input("artifact-path", "dist/*.tar.gz")
        .with_input("test-cucumber-path", "reports/*.json")
        .with_input("test-junit-path", "reports/junit/*.xml")
        .with_input("spdx-json-path", "*.spdx.json")
}

#[allow(dead_code)]
pub struct Harness {
    pub reporter: Arc<MockReporter>,
    pub host: Arc<RecordingHost>,
    pub orchestrator: Orchestrator,
}

#[allow(dead_code)]
pub fn harness(workspace: &Workspace) -> Harness {
    let reporter = Arc::new(MockReporter::new());
    let host = Arc::new(RecordingHost::new());
    let orchestrator = Orchestrator::new(reporter.clone(), host.clone(), workspace.path());
    Harness {
        reporter,
        host,
        orchestrator,
    }
}
