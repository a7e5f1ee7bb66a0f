//! Groups extracted documents by their declared `resourceType`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ClassifyError;
use crate::extract::ArchiveMember;
use crate::resource_type::ResourceType;

/// An archive member together with its parsed JSON object.
#[derive(Debug, Clone)]
pub struct ClassifiedItem {
    pub member: ArchiveMember,
    pub document: Map<String, Value>,
    pub resource_type: String,
}

impl ClassifiedItem {
    pub fn name(&self) -> &str {
        &self.member.name
    }

    pub fn raw_text(&self) -> &str {
        &self.member.raw_text
    }
}

/// Items keyed by type tag. Each group keeps archive order.
pub type ContentGroups = BTreeMap<String, Vec<ClassifiedItem>>;

/// Type tags seen in the archive that igloader will not publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTypeWarning {
    /// Sorted lexicographically.
    pub types: Vec<String>,
}

#[derive(Debug)]
pub struct Classification {
    pub groups: ContentGroups,
    pub warning: Option<UnsupportedTypeWarning>,
}

/// Parse every member and group it by type tag.
///
/// Documents without a string `resourceType` are dropped. The first member that
/// is not valid JSON aborts the whole pass.
pub fn classify(members: Vec<ArchiveMember>) -> Result<Classification, ClassifyError> {
    let mut groups = ContentGroups::new();

    for member in members {
        let parsed: Value =
            serde_json::from_str(&member.raw_text).map_err(|source| {
                ClassifyError::MalformedDocument {
                    name: member.name.clone(),
                    source,
                }
            })?;

        let Value::Object(document) = parsed else {
            debug!(member = %member.name, "[CLASSIFY] Not a JSON object, dropping");
            continue;
        };
        let Some(resource_type) = document
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_owned)
        else {
            debug!(member = %member.name, "[CLASSIFY] No resourceType, dropping");
            continue;
        };

        groups
            .entry(resource_type.clone())
            .or_default()
            .push(ClassifiedItem {
                member,
                document,
                resource_type,
            });
    }

    // BTreeMap keys are already sorted.
    let unsupported: Vec<String> = groups
        .keys()
        .filter(|tag| !ResourceType::is_known(tag))
        .cloned()
        .collect();
    let warning = if unsupported.is_empty() {
        None
    } else {
        warn!(types = ?unsupported, "[CLASSIFY] Unsupported resource type(s) detected");
        Some(UnsupportedTypeWarning { types: unsupported })
    };

    info!(
        groups = groups.len(),
        items = groups.values().map(Vec::len).sum::<usize>(),
        "[CLASSIFY] Organised content by resourceType"
    );
    Ok(Classification { groups, warning })
}
