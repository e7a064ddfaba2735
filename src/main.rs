// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use wolai2markdown::{
    usage_exit_status, AppError, CommandLineInput, ExitStatus, ExportPipeline, HttpAssetSource,
    PageConverter, PipelineConfig, WolaiHttpClient,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("wolai2markdown.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {M} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Converts the configured page tree and writes it to disk.
async fn run_export(config: &PipelineConfig) -> Result<(), AppError> {
    let client = Arc::new(WolaiHttpClient::new(&config.token)?);
    let converter = PageConverter::new(client, config.retry);
    let pipeline = ExportPipeline::new(converter, Arc::new(HttpAssetSource::new()));

    let summary = pipeline.export(&config.page_id, &config.output_dir).await?;

    log::info!(
        "Exported {} page(s) to {} ({} image(s) saved, {} linked remotely)",
        summary.pages_written,
        config.output_dir.display(),
        summary.images_saved,
        summary.images_remote
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match CommandLineInput::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("failed to print usage: {}", io);
            }
            return match usage_exit_status(&e) {
                Some(status) => status.into(),
                None => ExitCode::SUCCESS,
            };
        }
    };

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitStatus::UnknownError.into();
    }

    let result = match PipelineConfig::resolve(cli) {
        Ok(config) => run_export(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            e.exit_status().into()
        }
    }
}
