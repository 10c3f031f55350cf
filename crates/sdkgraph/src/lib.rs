//! Builds a normalized, language-agnostic type graph from an OpenAPI description and
//! partitions it into SDK modules.
//!
//! The entry point is [`generator::orchestrator::Orchestrator`]. Documents are loaded with
//! [`utils::load_document`] and module layouts with [`utils::load_config`].

pub mod document;
pub mod generator;
pub mod utils;
