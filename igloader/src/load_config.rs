/// `load_config` module: resolves command-line flags and environment into a [`RunConfig`].
///
/// The only secret, the bearer token, comes from `ACCESS_TOKEN`. A `.env` file in
/// the working directory is honoured because `main` loads it before parsing.
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{anyhow, Result};
use igloader_core::config::RunConfig;
use std::env::{self, VarError};
use tracing::{error, info};

use crate::cli::Cli;

pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

pub fn load_config(cli: &Cli) -> Result<RunConfig> {
    if let Err(e) = reqwest::Url::parse(&cli.target) {
        error!(error = %e, target = %cli.target, "Target is not a valid URL");
        return Err(anyhow!("Invalid --target URL {:?}: {e}", cli.target));
    }

    let access_token = match env::var(ACCESS_TOKEN_VAR) {
        Ok(token) => Some(token),
        Err(VarError::NotPresent) => None,
        Err(e) => {
            error!(error = %e, "ACCESS_TOKEN is set but unreadable");
            return Err(anyhow!("Failed to read {ACCESS_TOKEN_VAR}: {e}"));
        }
    };
    info!(access_token_set = access_token.is_some(), "Resolved configuration from CLI and environment");

    Ok(RunConfig {
        archive_path: cli.igpack.clone(),
        target_base_url: cli.target.clone(),
        access_token,
    })
}
