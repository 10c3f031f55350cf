use serde_json::Value;

use crate::{
  document::ApiDocument,
  generator::{
    config::ModuleConfig,
    errors::BuildResult,
    orchestrator::{BuildOutput, Orchestrator},
  },
};

pub(super) const PETSTORE_YAML: &str = include_str!("../../../fixtures/petstore.yaml");

pub(super) fn petstore() -> ApiDocument {
  ApiDocument::from_yaml(PETSTORE_YAML).expect("petstore fixture should parse")
}

pub(super) fn document(value: Value) -> ApiDocument {
  serde_json::from_value(value).expect("test document should parse")
}

pub(super) fn try_build(value: Value, config: ModuleConfig) -> BuildResult<BuildOutput> {
  Orchestrator::new(document(value), config).build()
}

pub(super) fn build(value: Value) -> BuildOutput {
  build_with(value, ModuleConfig::default())
}

pub(super) fn build_with(value: Value, config: ModuleConfig) -> BuildOutput {
  try_build(value, config).expect("build should succeed")
}

pub(super) fn type_names(output: &BuildOutput, module: &str) -> Vec<String> {
  let module = output
    .module(module)
    .unwrap_or_else(|| panic!("module {module} should exist"));
  module
    .types
    .iter()
    .map(|id| output.registry.get(*id).name.clone())
    .collect()
}

pub(super) fn handler_names(output: &BuildOutput, module: &str) -> Vec<String> {
  output
    .module(module)
    .map(|module| module.handlers.iter().map(|handler| handler.name.clone()).collect())
    .unwrap_or_default()
}

pub(super) fn order_names(output: &BuildOutput) -> Vec<String> {
  output
    .order
    .order()
    .iter()
    .map(|id| output.registry.get(*id).name.clone())
    .collect()
}
