pub mod analyzer;
pub mod ast;
pub mod config;
pub(crate) mod converter;
pub mod errors;
pub mod metrics;
pub(crate) mod module_partitioner;
pub(crate) mod operation_converter;
pub mod orchestrator;
pub mod report;
pub mod schema_registry;

#[cfg(test)]
mod tests;
