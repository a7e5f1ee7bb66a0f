use std::path::PathBuf;

/// Boxed error returned by [`crate::contract::ResourceClient`] implementations.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while reading the IG pack archive. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("input file is not a tar archive ({}): {reason}", path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    #[error("unable to ingest igpack ({}): {reason}", path.display())]
    ArchiveRead { path: PathBuf, reason: String },

    #[error("no JSON package files found ({})", path.display())]
    EmptyArchive { path: PathBuf },
}

/// Failures while parsing extracted members.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("malformed JSON document '{name}': {source}")]
    MalformedDocument {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while publishing. Status 422 is tolerated and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("resource.id missing for {resource_type} '{name}'")]
    MissingIdentifier { resource_type: String, name: String },

    #[error("{endpoint} request failed with HTTP status {status}: {body}")]
    UnexpectedHttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: TransportError,
    },
}

/// Any fatal failure of a full run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
