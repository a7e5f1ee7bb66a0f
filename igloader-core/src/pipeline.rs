//! High-level pipeline: extract → classify → publish for one IG pack.
//!
//! The archive is read and closed before the first request goes out. The run is
//! strictly sequential: one request in flight at a time, no retries, and the
//! first fatal error ends the run with whatever was already published left in
//! place on the server.
//!
//! # Navigation
//! - Main entrypoint: [`run`]
//! - Output: [`RunReport`]

use tracing::{error, info};

use crate::classify::{classify, UnsupportedTypeWarning};
use crate::config::RunConfig;
use crate::contract::ResourceClient;
use crate::error::LoadError;
use crate::extract::extract;
use crate::publish::{PublishReport, Publisher};

#[derive(Debug)]
pub struct RunReport {
    pub warning: Option<UnsupportedTypeWarning>,
    pub publish: PublishReport,
}

pub async fn run<C>(config: &RunConfig, client: &C) -> Result<RunReport, LoadError>
where
    C: ResourceClient,
{
    info!("[RUN] Processing JSON content from IGPack");
    config.trace_loaded();

    let members = extract(&config.archive_path).inspect_err(|e| {
        error!(error = %e, "[RUN][ERROR] Extraction failed");
    })?;

    let classification = classify(members).inspect_err(|e| {
        error!(error = %e, "[RUN][ERROR] Classification failed");
    })?;

    let publisher = Publisher::new(client, &config.target_base_url);
    let publish = publisher
        .publish(&classification.groups)
        .await
        .inspect_err(|e| {
            error!(error = %e, "[RUN][ERROR] Publishing failed");
        })?;

    Ok(RunReport {
        warning: classification.warning,
        publish,
    })
}
