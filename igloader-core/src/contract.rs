#![allow(unused)]

//! # contract: transport seam between the publisher and a FHIR server
//!
//! The publisher decides *what* to send and in which order; a [`ResourceClient`]
//! decides *how* it travels. The CLI crate provides the real `reqwest` client,
//! while tests use the `mockall`-generated `MockResourceClient`.
//!
//! ## Contract
//! - One call per resource, issued strictly one at a time.
//! - The client must not follow redirects and must not retry.
//! - Any HTTP status is a successful call; only transport failures are errors.
//!   Interpreting the status is the publisher's job.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

use crate::error::TransportError;
use crate::resource_type::ResourceType;

/// A "create unless `_id` already exists" request for a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalPut {
    /// Fully qualified `{base}/{type}/{id}` URL.
    pub endpoint: String,
    pub resource_type: ResourceType,
    /// Value for the `If-None-Exist: _id=` header.
    pub id: String,
    /// The document exactly as it was read from the archive.
    pub body: String,
}

/// Status and body of whatever the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    pub body: String,
}

/// Sends conditional creates to a FHIR server.
///
/// The trait is `Send + Sync` and async so the CLI can drive it from a tokio
/// runtime; implementors own connection handling and authentication.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Issue the request and return the raw response, whatever its status.
    async fn conditional_put(&self, req: ConditionalPut) -> Result<ServerResponse, TransportError>;
}
