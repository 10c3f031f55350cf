use std::collections::BTreeMap;

use bon::Builder;
use serde::Deserialize;

use crate::generator::ast::{DEFAULT_PAGE_INDEX_CANDIDATES, DEFAULT_PAGE_SIZE_CANDIDATES};

pub const DEFAULT_MODULE: &str = "default";

/// Partitioning configuration, loaded from JSON or YAML.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
  /// Explicit type to module assignments. Applied before reachability and never overridden.
  #[builder(default)]
  pub type_module_map: BTreeMap<String, String>,
  /// Module for operations that carry no tag.
  #[builder(default = DEFAULT_MODULE.to_string(), into)]
  pub fallback_module: String,
  #[builder(default = default_candidates(&DEFAULT_PAGE_INDEX_CANDIDATES))]
  pub page_index_candidates: Vec<String>,
  #[builder(default = default_candidates(&DEFAULT_PAGE_SIZE_CANDIDATES))]
  pub page_size_candidates: Vec<String>,
}

impl Default for ModuleConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl ModuleConfig {
  /// Adds an explicit assignment.
  #[must_use]
  pub fn with_assignment(mut self, type_name: impl Into<String>, module: impl Into<String>) -> Self {
    self.type_module_map.insert(type_name.into(), module.into());
    self
  }
}

fn default_candidates(candidates: &[&str]) -> Vec<String> {
  candidates.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = ModuleConfig::default();
    assert!(config.type_module_map.is_empty());
    assert_eq!(config.fallback_module, "default");
    assert_eq!(config.page_index_candidates, ["page_index", "page_num"]);
    assert_eq!(config.page_size_candidates, ["page_size", "page_num"]);
  }

  #[test]
  fn test_partial_yaml_keeps_defaults() {
    let config: ModuleConfig = serde_yaml::from_str("type_module_map:\n  Pet: zoo\n").unwrap();
    assert_eq!(config, ModuleConfig::default().with_assignment("Pet", "zoo"));
  }

  #[test]
  fn test_builder_overrides() {
    let config = ModuleConfig::builder()
      .fallback_module("misc")
      .page_size_candidates(vec!["limit".to_string()])
      .build();
    assert_eq!(config.fallback_module, "misc");
    assert_eq!(config.page_size_candidates, ["limit"]);
    assert_eq!(config.page_index_candidates, ["page_index", "page_num"]);
  }
}
