use crate::upload::DEFAULT_TIMEOUT_SECS;
use clap::Parser;
use std::path::PathBuf;

/// Uploads build artifacts and test reports to Ketryx and records the build
#[derive(Parser, Debug)]
#[command(
    name = "ketryx-report",
    about = "Uploads build artifacts and test reports to Ketryx and records the build",
    version,
    author,
    long_about = "ketryx-report runs as a GitHub Actions step. It reads the step inputs \
                  (api-key, project, artifact-path, test-junit-path, test-cucumber-path, \
                  spdx-json-path, ...) from INPUT_* environment variables, uploads every \
                  matching file and registers one build per api-key/project pair.\n\n\
                  Examples:\n  \
                  INPUT_API-KEY=KXK1 INPUT_PROJECT=KXPRJ1 ketryx-report\n  \
                  ketryx-report --working-directory ./build --timeout 120"
)]
pub struct CliArgs {
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        help = "Directory glob patterns are resolved against (defaults to GITHUB_WORKSPACE, then the current directory)"
    )]
    pub working_directory: Option<PathBuf>,

    #[arg(
        long,
        value_name = "SECONDS",
        env = "KETRYX_REQUEST_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error log output"
    )]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["ketryx-report"]);
        assert!(args.working_directory.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_with_options() {
        let args = CliArgs::parse_from([
            "ketryx-report",
            "--working-directory",
            "/tmp/build",
            "--timeout",
            "120",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.working_directory, Some(PathBuf::from("/tmp/build")));
        assert_eq!(args.timeout, 120);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["ketryx-report", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let args = CliArgs::parse_from(["ketryx-report", "-q", "-C", "out"]);
        assert!(args.quiet);
        assert_eq!(args.working_directory, Some(PathBuf::from("out")));
    }
}
