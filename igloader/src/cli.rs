//! Command-line surface of igloader.
//!
//! Parsing, exit codes and the async [`run`] entrypoint live here; everything with
//! actual policy lives in `igloader-core`.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

use igloader_core::pipeline::{self, RunReport};

use crate::client::HttpResourceClient;
use crate::load_config::load_config;

const ACCESS_TOKEN_HELP: &str = "Additionally, if the ACCESS_TOKEN environment variable is defined,\n\
its value will be used as an OAuth bearer token for the FHIR API.";

/// Upload (JSON-encoded) conformance resources from FHIR IGPack tar archive.
#[derive(Parser, Debug)]
#[command(name = "igloader", after_help = ACCESS_TOKEN_HELP)]
pub struct Cli {
    /// IGPack filename (e.g. us-core-v3.1.1-package.tgz)
    #[arg(short, long)]
    pub igpack: PathBuf,

    /// FHIR API base URL for target server (e.g. http://localhost:8080/r4)
    #[arg(short, long)]
    pub target: String,
}

/// Exit status for a failed parse: help is a success, everything else is 1.
pub fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Async entrypoint shared by `main` and the integration tests.
pub async fn run(cli: Cli) -> Result<RunReport> {
    tracing::info!(igpack = %cli.igpack.display(), target = %cli.target, "Starting IG pack load");

    let config = load_config(&cli)?;
    let client = HttpResourceClient::new(config.access_token.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to construct FHIR client: {e}"))?;

    let report = pipeline::run(&config, &client)
        .await
        .with_context(|| format!("Failed to load IG pack {}", config.archive_path.display()))?;

    tracing::info!(
        created = report.publish.created(),
        skipped = report.publish.skipped(),
        rejected = report.publish.rejected(),
        "Load complete"
    );
    Ok(report)
}
