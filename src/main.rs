use ketryx_report::actions::{GitHubActions, Host};
use ketryx_report::cli::CliArgs;
use ketryx_report::config::EnvInputs;
use ketryx_report::runner::Orchestrator;
use ketryx_report::upload::KetryxClient;
use ketryx_report::util::logging::{init_logging, parse_level, LoggingConfig};
use ketryx_report::VERSION;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("ketryx-report v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let host = Arc::new(GitHubActions::from_env());
    let exit_code = match run(&args, host.clone()).await {
        Ok(code) => code,
        Err(e) => {
            debug!("Step setup failed: {:?}", e);
            host.set_failed(&format!("{:#}", e));
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(args: &CliArgs, host: Arc<GitHubActions>) -> Result<i32> {
    let base_dir = resolve_base_dir(args)?;
    debug!("Resolving patterns against {}", base_dir.display());

    let client = KetryxClient::with_timeout(Duration::from_secs(args.timeout))
        .context("Failed to build HTTP client")?;
    let orchestrator = Orchestrator::new(Arc::new(client), host, base_dir);

    let summary = orchestrator.run_from_source(&EnvInputs).await;
    Ok(summary.exit_code())
}

fn resolve_base_dir(args: &CliArgs) -> Result<PathBuf> {
    if let Some(dir) = &args.working_directory {
        return Ok(dir.clone());
    }
    if let Some(workspace) = env::var_os("GITHUB_WORKSPACE").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(workspace));
    }
    env::current_dir().context("Failed to determine the current directory")
}

fn init_logging_from_args(args: &CliArgs) {
    let config = if let Some(level_str) = &args.log_level {
        LoggingConfig::with_level(parse_level(level_str))
    } else if args.verbose {
        LoggingConfig::with_level(Level::DEBUG)
    } else if args.quiet {
        LoggingConfig::with_level(Level::ERROR)
    } else {
        LoggingConfig::from_env()
    };

    init_logging(config);
}
