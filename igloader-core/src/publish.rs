//! Ordered, idempotent publication of classified resources.
//!
//! Groups are visited in [`PUBLISH_ORDER`]; anything else in [`ContentGroups`]
//! is ignored here. Each resource is sent as a conditional create addressed at
//! its own id, so re-running after a failure does not duplicate anything on
//! the server.
//!
//! # Failure policy
//! - `200`/`201`: created, continue.
//! - `422`: the server rejected this resource on validation or business rules.
//!   Logged, recorded, and the run continues.
//! - Any other status, a transport error, or a resource without `id`: the run
//!   stops immediately and nothing after it is attempted.

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::classify::{ClassifiedItem, ContentGroups};
use crate::contract::{ConditionalPut, ResourceClient};
use crate::error::PublishError;
use crate::resource_type::{ResourceType, PUBLISH_ORDER};

/// What happened to a single resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum PublishOutcome {
    Created { status: u16 },
    Skipped { reason: String },
    Rejected { status: u16, body: String },
}

/// How a response status affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Accepted,
    Tolerated,
    Fatal,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200 | 201 => StatusClass::Accepted,
        422 => StatusClass::Tolerated,
        _ => StatusClass::Fatal,
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ItemReport {
    pub resource_type: ResourceType,
    pub name: String,
    pub id: Option<String>,
    pub outcome: PublishOutcome,
}

/// Every attempted resource, in the order it was attempted.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PublishReport {
    pub items: Vec<ItemReport>,
}

impl PublishReport {
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Skipped { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, PublishOutcome::Rejected { .. }))
    }

    fn count(&self, pred: impl Fn(&PublishOutcome) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.outcome)).count()
    }
}

/// The resource's `id`, if it has a usable one.
///
/// Strings (non-empty) and numbers are accepted; everything else counts as missing.
pub fn resource_id(document: &Map<String, Value>) -> Option<String> {
    match document.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub fn endpoint(target_base_url: &str, resource_type: ResourceType, id: &str) -> String {
    format!("{target_base_url}/{resource_type}/{id}")
}

pub struct Publisher<'a, C: ResourceClient> {
    client: &'a C,
    target_base_url: String,
}

impl<'a, C: ResourceClient> Publisher<'a, C> {
    /// Every trailing `/` of `target_base_url` is dropped so endpoints never contain `//`.
    pub fn new(client: &'a C, target_base_url: &str) -> Self {
        Self {
            client,
            target_base_url: target_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Publish all whitelisted groups in order, stopping at the first fatal failure.
    pub async fn publish(&self, groups: &ContentGroups) -> Result<PublishReport, PublishError> {
        let mut report = PublishReport::default();

        for resource_type in PUBLISH_ORDER {
            let Some(items) = groups.get(resource_type.as_str()) else {
                continue;
            };
            if items.is_empty() {
                continue;
            }
            info!(resource_type = %resource_type, count = items.len(), "[PUBLISH] {resource_type} ({})", items.len());

            let total = items.len();
            for (index, item) in items.iter().enumerate() {
                info!(
                    resource_type = %resource_type,
                    index = index + 1,
                    total,
                    name = %item.name(),
                    "[PUBLISH] Uploading {} ({}/{})",
                    item.name(),
                    index + 1,
                    total
                );
                let entry = self.publish_item(resource_type, item).await?;
                report.items.push(entry);
            }
        }

        info!(
            created = report.created(),
            skipped = report.skipped(),
            rejected = report.rejected(),
            "[PUBLISH] Finished"
        );
        match serde_json::to_string_pretty(&report) {
            Ok(json) => debug!(json = %json, "[PUBLISH][DEBUG] Publish report as JSON"),
            Err(e) => error!(error = ?e, "[PUBLISH][DEBUG] Failed to serialize publish report"),
        }
        Ok(report)
    }

    async fn publish_item(
        &self,
        resource_type: ResourceType,
        item: &ClassifiedItem,
    ) -> Result<ItemReport, PublishError> {
        let name = item.name().to_string();

        if !resource_type.is_uploaded() {
            info!(name = %name, "[PUBLISH] skipped");
            return Ok(ItemReport {
                resource_type,
                name,
                id: resource_id(&item.document),
                outcome: PublishOutcome::Skipped {
                    reason: "not uploaded".to_string(),
                },
            });
        }

        let Some(id) = resource_id(&item.document) else {
            error!(name = %name, resource_type = %resource_type, "[PUBLISH] resource.id missing");
            return Err(PublishError::MissingIdentifier {
                resource_type: resource_type.to_string(),
                name,
            });
        };

        let endpoint = endpoint(&self.target_base_url, resource_type, &id);
        let request = ConditionalPut {
            endpoint: endpoint.clone(),
            resource_type,
            id: id.clone(),
            body: item.raw_text().to_string(),
        };
        debug!(endpoint = %endpoint, bytes = request.body.len(), "[PUBLISH] PUT");

        let response = match self.client.conditional_put(request).await {
            Ok(response) => response,
            Err(source) => {
                error!(endpoint = %endpoint, error = %source, "[PUBLISH] Transport failure");
                return Err(PublishError::Transport { endpoint, source });
            }
        };

        let outcome = match classify_status(response.status) {
            StatusClass::Accepted => {
                info!(status = response.status, "[PUBLISH] {resource_type}/{id} {}", response.status);
                PublishOutcome::Created {
                    status: response.status,
                }
            }
            StatusClass::Tolerated => {
                warn!(
                    endpoint = %endpoint,
                    status = response.status,
                    body = %response.body,
                    "[PUBLISH] Request rejected by server validation, continuing"
                );
                PublishOutcome::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            StatusClass::Fatal => {
                error!(
                    endpoint = %endpoint,
                    status = response.status,
                    body = %response.body,
                    "[PUBLISH] Request failed"
                );
                return Err(PublishError::UnexpectedHttpStatus {
                    endpoint,
                    status: response.status,
                    body: response.body,
                });
            }
        };

        Ok(ItemReport {
            resource_type,
            name,
            id: Some(id),
            outcome,
        })
    }
}
