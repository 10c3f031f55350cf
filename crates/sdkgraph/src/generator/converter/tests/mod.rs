mod named_types;
mod primitives;

use serde_json::Value;

use super::SchemaConverter;
use crate::{
  document::ApiDocument,
  generator::{errors::BuildResult, metrics::GenerationStats, schema_registry::TypeRegistry},
};

pub(super) struct Converted {
  pub(super) registry: TypeRegistry,
  pub(super) stats: GenerationStats,
}

pub(super) fn parse(value: Value) -> ApiDocument {
  serde_json::from_value(value).expect("test document should parse")
}

pub(super) fn try_convert(value: Value) -> BuildResult<Converted> {
  let document = parse(value);
  let mut registry = TypeRegistry::new();
  let mut stats = GenerationStats::default();
  SchemaConverter::new(&document, &mut registry, &mut stats).convert_components()?;
  Ok(Converted { registry, stats })
}

pub(super) fn convert(value: Value) -> Converted {
  try_convert(value).expect("conversion should succeed")
}

pub(super) fn field_names(converted: &Converted, type_name: &str) -> Vec<String> {
  converted
    .registry
    .get_by_name(type_name)
    .unwrap_or_else(|| panic!("{type_name} should be registered"))
    .fields()
    .iter()
    .map(|field| field.name.clone())
    .collect()
}
