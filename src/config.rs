// src/config.rs
use crate::error::{AppError, ExitStatus};
use crate::error_recovery::RetryPolicy;
use crate::types::{ApiToken, BlockId, ValidationError};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Export a wolai page tree to Markdown", long_about = None)]
pub struct CommandLineInput {
    /// wolai API token
    pub token: String,

    /// Page ID or wolai page URL (e.g. "https://www.wolai.com/...")
    pub page_id: String,

    /// Existing directory the export is written into
    pub output_dir: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Seconds to wait before retrying a rate-limited request
    #[arg(long, default_value_t = 5)]
    pub rate_limit_delay: u64,

    /// Give up on a block after this many rate-limited attempts (default: never)
    #[arg(long)]
    pub max_retries: Option<u32>,
}

/// Resolved pipeline configuration, validated and ready to run an export.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub token: ApiToken,
    pub page_id: BlockId,
    pub output_dir: PathBuf,
    pub retry: RetryPolicy,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Validates CLI input into a configuration.
    ///
    /// Fails with a parameter error when the output directory is missing or
    /// is not a directory.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let token = ApiToken::new(cli.token)?;
        let page_id = BlockId::parse(&cli.page_id)?;
        let output_dir = PathBuf::from(&cli.output_dir);
        check_output_dir(&output_dir)?;

        if cli.max_retries == Some(0) {
            return Err(AppError::InvalidParameter(
                "--max-retries must be at least 1".to_string(),
            ));
        }

        let retry = RetryPolicy::default()
            .with_delay(Duration::from_secs(cli.rate_limit_delay))
            .with_max_attempts(cli.max_retries);

        Ok(PipelineConfig {
            token,
            page_id,
            output_dir,
            retry,
            verbose: cli.verbose,
        })
    }
}

/// Exit outcome for a command line clap rejected.
///
/// Help and version output are not failures and map to `None`; every other
/// rejection (missing or malformed arguments) is a parameter error.
pub fn usage_exit_status(err: &clap::Error) -> Option<ExitStatus> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => Some(ExitStatus::ParamError),
    }
}

fn check_output_dir(path: &Path) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidOutputDir {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(invalid("output directory is not a directory")),
        Err(_) => Err(invalid("output directory does not exist")),
    }
}
