#![doc = "igloader-core: core logic library for igloader."]

//! Loads the conformance resources of a FHIR IG pack into a FHIR server.
//!
//! The pipeline is extract → classify → publish:
//! - [`extract`] pulls `package/*.json` members out of the archive,
//! - [`classify`] groups them by `resourceType`,
//! - [`publish`] sends them, in dependency order, through a [`contract::ResourceClient`].
//!
//! The concrete HTTP client, argument parsing and process exit codes live in the
//! `igloader` CLI crate.

pub mod classify;
pub mod config;
pub mod contract;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod publish;
pub mod resource_type;
