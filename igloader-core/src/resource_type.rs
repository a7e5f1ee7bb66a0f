//! The fixed set of conformance resource types igloader knows how to publish.
//!
//! [`PUBLISH_ORDER`] is a hand-maintained dependency order: terminology
//! resources come before the definitions that bind to them, and the
//! implementation guide itself comes last. Types outside this list are
//! reported as unsupported and never published.

use std::fmt;
use std::str::FromStr;

/// A whitelisted FHIR conformance resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum ResourceType {
    CodeSystem,
    ValueSet,
    ConceptMap,
    SearchParameter,
    OperationDefinition,
    StructureDefinition,
    CapabilityStatement,
    ImplementationGuide,
}

/// Publication order. Every whitelisted type appears exactly once.
pub const PUBLISH_ORDER: [ResourceType; 8] = [
    ResourceType::CodeSystem,
    ResourceType::ValueSet,
    ResourceType::ConceptMap,
    ResourceType::SearchParameter,
    ResourceType::OperationDefinition,
    ResourceType::StructureDefinition,
    ResourceType::CapabilityStatement,
    ResourceType::ImplementationGuide,
];

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::CodeSystem => "CodeSystem",
            ResourceType::ValueSet => "ValueSet",
            ResourceType::ConceptMap => "ConceptMap",
            ResourceType::SearchParameter => "SearchParameter",
            ResourceType::OperationDefinition => "OperationDefinition",
            ResourceType::StructureDefinition => "StructureDefinition",
            ResourceType::CapabilityStatement => "CapabilityStatement",
            ResourceType::ImplementationGuide => "ImplementationGuide",
        }
    }

    /// Implementation guide resources are counted and reported but never sent.
    pub fn is_uploaded(&self) -> bool {
        !matches!(self, ResourceType::ImplementationGuide)
    }

    /// True when `tag` names one of the whitelisted types (case-sensitive).
    pub fn is_known(tag: &str) -> bool {
        tag.parse::<ResourceType>().is_ok()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag is not in the whitelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResourceType(pub String);

impl fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported resource type: {}", self.0)
    }
}

impl std::error::Error for UnknownResourceType {}

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PUBLISH_ORDER
            .iter()
            .copied()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| UnknownResourceType(s.to_string()))
    }
}
