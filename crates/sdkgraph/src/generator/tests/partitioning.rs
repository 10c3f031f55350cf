use serde_json::{Value, json};

use super::support::{build, build_with, type_names};
use crate::generator::{config::ModuleConfig, metrics::GenerationWarning};

fn two_modules() -> Value {
  json!({
    "paths": {
      "/zoo": {
        "get": {
          "operationId": "visitZoo",
          "tags": ["zoo"],
          "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } } }
        }
      },
      "/alpha": {
        "get": {
          "operationId": "alpha",
          "tags": ["alpha"],
          "parameters": [
            { "name": "kind", "in": "query", "schema": { "$ref": "#/components/schemas/Kind" } }
          ]
        }
      }
    },
    "components": {
      "schemas": {
        "Pet": {
          "type": "object",
          "properties": {
            "kind": { "$ref": "#/components/schemas/Kind" },
            "food": { "type": "array", "items": { "$ref": "#/components/schemas/Food" } }
          }
        },
        "Kind": { "type": "string", "enum": ["cat", "dog"] },
        "Food": { "type": "object", "properties": { "name": { "type": "string" } } }
      }
    }
  })
}

#[test]
fn test_first_module_by_name_wins_shared_types() {
  let output = build(two_modules());

  assert_eq!(type_names(&output, "alpha"), ["Kind"], "alpha sorts before zoo");
  assert_eq!(type_names(&output, "zoo"), ["Food", "Pet"]);
}

#[test]
fn test_every_type_has_at_most_one_module() {
  let output = build(two_modules());

  for (id, node) in output.registry.nodes() {
    let owners = output
      .modules
      .values()
      .filter(|module| module.types.contains(&id))
      .map(|module| module.name.as_str())
      .collect::<Vec<_>>();
    assert!(owners.len() <= 1, "{} is in {owners:?}", node.name);
    assert_eq!(owners.first().copied(), node.module.as_deref(), "{} module mismatch", node.name);
  }
}

#[test]
fn test_explicit_assignment_overrides_reachability() {
  let output = build_with(two_modules(), ModuleConfig::default().with_assignment("Kind", "zoo"));

  assert_eq!(type_names(&output, "zoo"), ["Food", "Kind", "Pet"]);
  assert!(type_names(&output, "alpha").is_empty());
  assert_eq!(output.stats.explicit_assignments, 1);
  assert_eq!(output.stats.reachability_assignments, 2);
}

#[test]
fn test_unknown_configured_type_warns() {
  let output = build_with(two_modules(), ModuleConfig::default().with_assignment("Ghost", "zoo"));

  assert_eq!(
    output.stats.warnings,
    [GenerationWarning::UnknownConfiguredType {
      type_name: "Ghost".to_string(),
      module: "zoo".to_string(),
    }]
  );
  assert_eq!(type_names(&output, "alpha"), ["Kind"]);
}

#[test]
fn test_alias_in_configuration_assigns_target() {
  let mut spec = two_modules();
  spec["components"]["schemas"]["Animal"] = json!({ "$ref": "#/components/schemas/Pet" });

  let output = build_with(spec, ModuleConfig::default().with_assignment("Animal", "pets"));
  assert_eq!(output.module_of("Pet"), Some("pets"));
  assert_eq!(type_names(&output, "pets"), ["Pet"]);
}

#[test]
fn test_types_reached_only_through_explicit_types_follow_reachability() {
  let output = build_with(two_modules(), ModuleConfig::default().with_assignment("Pet", "pets"));

  assert_eq!(output.module_of("Pet"), Some("pets"));
  assert_eq!(
    output.module_of("Food"),
    Some("zoo"),
    "zoo still reaches Food through Pet even though Pet lives elsewhere"
  );
}
