use serde_json::Value;

use crate::{
  document::{SchemaDef, SchemaType},
  generator::{
    ast::{EnumEntry, PrimitiveKind},
    metrics::{GenerationStats, GenerationWarning},
  },
};

const BINARY_FORMAT: &str = "binary";

pub(crate) fn primitive_kind(schema_type: Option<SchemaType>, format: Option<&str>) -> PrimitiveKind {
  match schema_type {
    Some(SchemaType::String) if format == Some(BINARY_FORMAT) => PrimitiveKind::Binary,
    Some(SchemaType::String) => PrimitiveKind::String,
    Some(SchemaType::Integer) => PrimitiveKind::Int,
    Some(SchemaType::Number) => PrimitiveKind::Float,
    Some(SchemaType::Boolean) => PrimitiveKind::Bool,
    _ => PrimitiveKind::Unknown,
  }
}

/// Primitive category of an untyped enum, taken from its first value.
pub(crate) fn infer_enum_kind(values: &[Value]) -> PrimitiveKind {
  match values.iter().find(|value| !value.is_null()) {
    Some(Value::String(_)) => PrimitiveKind::String,
    Some(Value::Number(number)) if number.is_f64() => PrimitiveKind::Float,
    Some(Value::Number(_)) => PrimitiveKind::Int,
    Some(Value::Bool(_)) => PrimitiveKind::Bool,
    _ => PrimitiveKind::Unknown,
  }
}

/// One entry per enum value. Names pair positionally only when the name list has exactly
/// one name per value.
pub(crate) fn enum_entries(schema: &SchemaDef, location: &str, stats: &mut GenerationStats) -> Vec<EnumEntry> {
  let values = &schema.enum_values;
  match schema.enum_names.as_deref() {
    Some(names) if names.len() == values.len() => names
      .iter()
      .zip(values)
      .map(|(name, value)| EnumEntry::named(name, value.clone()))
      .collect(),
    Some(names) => {
      stats.record_warning(GenerationWarning::InvalidEnumMetadata {
        location: location.to_string(),
        values: values.len(),
        names: names.len(),
      });
      values.iter().cloned().map(EnumEntry::unnamed).collect()
    }
    None => values.iter().cloned().map(EnumEntry::unnamed).collect(),
  }
}
