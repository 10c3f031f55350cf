use serde_json::json;

use super::convert;
use crate::generator::{
  ast::{EnumEntry, PrimitiveKind, TypeKind},
  metrics::GenerationWarning,
};

fn primitive_of(kind: &TypeKind) -> (PrimitiveKind, &[EnumEntry]) {
  match kind {
    TypeKind::Primitive {
      primitive,
      enum_entries,
    } => (*primitive, enum_entries),
    other => panic!("expected a primitive, got {}", other.name()),
  }
}

#[test]
fn test_primitive_mapping() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Count": { "type": "integer", "format": "int64" },
        "Ratio": { "type": "number" },
        "Name": { "type": "string" },
        "Upload": { "type": "string", "format": "binary" },
        "Flag": { "type": "boolean" },
        "Maybe": { "type": ["null", "integer"] },
        "Nothing": { "type": "null" }
      }
    }
  }));

  let cases = [
    ("Count", PrimitiveKind::Int),
    ("Ratio", PrimitiveKind::Float),
    ("Name", PrimitiveKind::String),
    ("Upload", PrimitiveKind::Binary),
    ("Flag", PrimitiveKind::Bool),
    ("Maybe", PrimitiveKind::Int),
    ("Nothing", PrimitiveKind::Unknown),
  ];
  for (name, expected) in cases {
    let node = converted.registry.get_by_name(name).unwrap();
    assert_eq!(primitive_of(&node.kind).0, expected, "wrong primitive for {name}");
  }
  assert!(converted.stats.warnings.is_empty(), "typed schemas never warn");
}

#[test]
fn test_enum_names_pair_positionally() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Level": {
          "type": "integer",
          "enum": [1, 2, 3],
          "x-enum-names": ["Low", "Mid", "High"]
        }
      }
    }
  }));

  let level = converted.registry.get_by_name("Level").unwrap();
  let (primitive, entries) = primitive_of(&level.kind);
  assert_eq!(primitive, PrimitiveKind::Int);
  assert_eq!(
    entries,
    [
      EnumEntry::named("Low", json!(1)),
      EnumEntry::named("Mid", json!(2)),
      EnumEntry::named("High", json!(3)),
    ]
  );
}

#[test]
fn test_enum_name_length_mismatch_warns() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Level": {
          "type": "integer",
          "enum": [1, 2],
          "x-coze-enum-names": ["Low"]
        }
      }
    }
  }));

  let level = converted.registry.get_by_name("Level").unwrap();
  let (_, entries) = primitive_of(&level.kind);
  assert_eq!(entries, [EnumEntry::unnamed(json!(1)), EnumEntry::unnamed(json!(2))]);
  assert_eq!(
    converted.stats.warnings,
    [GenerationWarning::InvalidEnumMetadata {
      location: "Level".to_string(),
      values: 2,
      names: 1,
    }]
  );
}

#[test]
fn test_enum_without_names_is_unnamed() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Status": { "type": "string", "enum": ["available", "sold"] }
      }
    }
  }));

  let status = converted.registry.get_by_name("Status").unwrap();
  let (_, entries) = primitive_of(&status.kind);
  assert!(entries.iter().all(|entry| entry.name.is_none()));
  assert!(converted.stats.warnings.is_empty());
}

#[test]
fn test_untyped_enum_infers_primitive() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Color": { "enum": ["red", "green"] }
      }
    }
  }));

  let color = converted.registry.get_by_name("Color").unwrap();
  assert_eq!(primitive_of(&color.kind).0, PrimitiveKind::String);
}

#[test]
fn test_shapeless_schema_degrades_to_unknown() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Pet": {
          "type": "object",
          "properties": { "extra": { "description": "anything goes" } }
        }
      }
    }
  }));

  let pet = converted.registry.get_by_name("Pet").unwrap();
  let extra = pet.field("extra").unwrap().type_ref.resolve(&converted.registry);
  assert_eq!(extra.kind, TypeKind::unknown());
  assert_eq!(
    converted.stats.warnings,
    [GenerationWarning::UnsupportedSchema {
      location: "Pet.extra".to_string()
    }]
  );
}

#[test]
fn test_unrecognized_type_degrades_to_unknown() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Blob": { "type": "file" },
        "Upload": { "type": "object", "properties": { "data": { "type": ["null", "file"] } } }
      }
    }
  }));

  let blob = converted.registry.get_by_name("Blob").unwrap();
  assert_eq!(blob.kind, TypeKind::unknown());

  let upload = converted.registry.get_by_name("Upload").unwrap();
  let data = upload.field("data").unwrap().type_ref.resolve(&converted.registry);
  assert_eq!(data.kind, TypeKind::unknown());

  assert_eq!(
    converted.stats.warnings,
    [
      GenerationWarning::UnsupportedSchema {
        location: "Blob".to_string()
      },
      GenerationWarning::UnsupportedSchema {
        location: "Upload.data".to_string()
      },
    ]
  );
}
