//! GitHub Actions workflow commands

use super::Host;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

/// [`Host`] for GitHub-hosted and self-hosted Actions runners.
///
/// Commands go to the wrapped writer (stdout by default). Outputs are appended
/// to the `GITHUB_OUTPUT` file when the runner provides one, otherwise they
/// are emitted as the legacy `set-output` command.
pub struct GitHubActions {
    writer: Mutex<Box<dyn Write + Send>>,
    output_file: Option<PathBuf>,
    failed: AtomicBool,
}

impl GitHubActions {
    pub fn new(writer: Box<dyn Write + Send>, output_file: Option<PathBuf>) -> Self {
        Self {
            writer: Mutex::new(writer),
            output_file,
            failed: AtomicBool::new(false),
        }
    }

    pub fn from_env() -> Self {
        let output_file = env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(Box::new(io::stdout()), output_file)
    }

    fn issue(&self, line: &str) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Failed to write workflow command: {}", e);
        }
    }

    fn append_output_file(&self, path: &Path, name: &str, value: &str) -> io::Result<()> {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        let mut file = OpenOptions::new().append(true).open(path)?;
        write!(file, "{}", file_command(name, value, &delimiter))
    }
}

impl Host for GitHubActions {
    fn debug(&self, message: &str) {
        self.issue(&format!("::debug::{}", escape_data(message)));
    }

    fn info(&self, message: &str) {
        self.issue(message);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.issue(&format!("::error::{}", escape_data(message)));
    }

    fn set_output(&self, name: &str, value: &str) {
        if let Some(path) = &self.output_file {
            match self.append_output_file(path, name, value) {
                Ok(()) => return,
                Err(e) => warn!(
                    "Failed to write output '{}' to {}: {}",
                    name,
                    path.display(),
                    e
                ),
            }
        }
        self.issue(&format!(
            "::set-output name={}::{}",
            escape_property(name),
            escape_data(value)
        ));
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Heredoc-style entry understood by the runner's file commands
pub fn file_command(name: &str, value: &str, delimiter: &str) -> String {
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
