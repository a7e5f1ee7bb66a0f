use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a single run needs. Built once, before the pipeline starts.
#[derive(Clone)]
pub struct RunConfig {
    pub archive_path: PathBuf,
    pub target_base_url: String,
    pub access_token: Option<String>,
}

impl RunConfig {
    /// Token shortened to its first three characters, for display.
    pub fn masked_token(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("{}...", token.chars().take(3).collect::<String>()))
    }

    pub fn trace_loaded(&self) {
        info!(
            igpack = %self.archive_path.display(),
            target = %self.target_base_url,
            access_token = ?self.masked_token(),
            "Loaded RunConfig"
        );
        debug!(?self, "RunConfig loaded (full debug)");
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("archive_path", &self.archive_path)
            .field("target_base_url", &self.target_base_url)
            .field("access_token", &self.masked_token())
            .finish()
    }
}
