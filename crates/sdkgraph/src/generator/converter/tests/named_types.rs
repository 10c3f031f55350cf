use serde_json::json;

use super::{convert, try_convert};
use crate::generator::{
  ast::{TypeKind, TypeRef},
  errors::BuildError,
};

#[test]
fn test_reference_resolves_to_single_instance() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Person": { "type": "object", "properties": { "name": { "type": "string" } } },
        "Pet": {
          "type": "object",
          "properties": {
            "owner": { "$ref": "#/components/schemas/Person" },
            "vet": { "$ref": "#/components/schemas/Person" }
          }
        }
      }
    }
  }));

  let person = converted.registry.lookup("Person").unwrap();
  let pet = converted.registry.get_by_name("Pet").unwrap();
  for field in pet.fields() {
    assert_eq!(
      field.type_ref,
      TypeRef::Named(person),
      "field {} should point at the interned Person",
      field.name
    );
  }
  assert_eq!(converted.registry.len(), 2);
  assert_eq!(converted.stats.named_types, 2);
}

#[test]
fn test_registration_follows_declaration_order() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Zebra": { "type": "string" },
        "Apple": { "type": "object", "properties": { "core": { "$ref": "#/components/schemas/Mango" } } },
        "Mango": { "type": "integer" }
      }
    }
  }));

  let names = converted
    .registry
    .nodes()
    .map(|(_, node)| node.name.clone())
    .collect::<Vec<_>>();
  assert_eq!(names, ["Zebra", "Apple", "Mango"], "Mango is reached through Apple first");
}

#[test]
fn test_self_reference_terminates() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Node": {
          "type": "object",
          "properties": {
            "value": { "type": "integer" },
            "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
          }
        }
      }
    }
  }));

  let id = converted.registry.lookup("Node").unwrap();
  let node = converted.registry.get(id);
  let children = node.field("children").unwrap().type_ref.resolve(&converted.registry);
  assert_eq!(children.element(), Some(&TypeRef::Named(id)));
  assert!(!converted.registry.is_pending(id), "node should be complete after conversion");
}

#[test]
fn test_mutual_references_terminate() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "A": { "type": "object", "properties": { "b": { "$ref": "#/components/schemas/B" } } },
        "B": { "type": "object", "properties": { "a": { "$ref": "#/components/schemas/A" } } }
      }
    }
  }));

  let a = converted.registry.lookup("A").unwrap();
  let b = converted.registry.lookup("B").unwrap();
  assert_eq!(converted.registry.get(a).field("b").unwrap().type_ref, TypeRef::Named(b));
  assert_eq!(converted.registry.get(b).field("a").unwrap().type_ref, TypeRef::Named(a));
}

#[test]
fn test_named_node_description_prefers_title() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Titled": { "type": "string", "title": "The title", "description": "The description" },
        "Described": { "type": "string", "description": "Only description" },
        "Bare": { "type": "string" }
      }
    }
  }));

  let description = |name: &str| converted.registry.get_by_name(name).unwrap().description.clone();
  assert_eq!(description("Titled").as_deref(), Some("The title"));
  assert_eq!(description("Described").as_deref(), Some("Only description"));
  assert_eq!(description("Bare"), None);
}

#[test]
fn test_alias_shares_target_node() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Animal": { "$ref": "#/components/schemas/Pet" },
        "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
        "Owner": { "type": "object", "properties": { "pet": { "$ref": "#/components/schemas/Animal" } } }
      }
    }
  }));

  let pet = converted.registry.lookup("Pet").unwrap();
  assert_eq!(converted.registry.lookup("Animal"), Some(pet));
  assert_eq!(converted.registry.len(), 2, "alias must not create a node");
  assert_eq!(converted.stats.aliases, 1);

  let owner = converted.registry.get_by_name("Owner").unwrap();
  assert_eq!(owner.field("pet").unwrap().type_ref, TypeRef::Named(pet));
}

#[test]
fn test_alias_declared_before_self_referencing_target() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Animal": { "$ref": "#/components/schemas/Pet" },
        "Pet": { "type": "object", "properties": { "parent": { "$ref": "#/components/schemas/Animal" } } }
      }
    }
  }));

  let pet = converted.registry.lookup("Pet").unwrap();
  assert_eq!(converted.registry.lookup("Animal"), Some(pet));
  assert_eq!(converted.stats.aliases, 1);
  assert_eq!(
    converted.registry.get(pet).field("parent").unwrap().type_ref,
    TypeRef::Named(pet),
    "reference through the alias resolves to the in-progress node"
  );
}

#[test]
fn test_alias_chain_registers_every_name() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Creature": { "$ref": "#/components/schemas/Animal" },
        "Animal": { "$ref": "#/components/schemas/Pet" },
        "Pet": { "type": "object", "properties": { "kin": { "$ref": "#/components/schemas/Creature" } } }
      }
    }
  }));

  let pet = converted.registry.lookup("Pet").unwrap();
  assert_eq!(converted.registry.lookup("Creature"), Some(pet));
  assert_eq!(converted.registry.lookup("Animal"), Some(pet));
  assert_eq!(converted.registry.len(), 1);
  assert_eq!(converted.stats.aliases, 2);
}

#[test]
fn test_circular_alias_is_fatal() {
  let err = try_convert(json!({
    "components": {
      "schemas": {
        "A": { "$ref": "#/components/schemas/B" },
        "B": { "$ref": "#/components/schemas/A" }
      }
    }
  }))
  .err()
  .expect("alias loop should fail");

  assert_eq!(err, BuildError::CircularAlias { name: "A".to_string() });
}

#[test]
fn test_unresolved_reference_names_location() {
  let err = try_convert(json!({
    "components": {
      "schemas": {
        "Pet": { "type": "object", "properties": { "owner": { "$ref": "#/components/schemas/Person" } } }
      }
    }
  }))
  .err()
  .expect("missing Person should fail");

  assert_eq!(
    err,
    BuildError::UnresolvedReference {
      reference: "#/components/schemas/Person".to_string(),
      location: "Pet.owner".to_string(),
    }
  );
  assert_eq!(err.to_string(), "Pet.owner: unresolved reference '#/components/schemas/Person'");
}

#[test]
fn test_missing_items_is_fatal() {
  let err = try_convert(json!({
    "components": {
      "schemas": {
        "Pet": { "type": "object", "properties": { "tags": { "type": "array" } } }
      }
    }
  }))
  .err()
  .expect("array without items should fail");

  assert_eq!(
    err,
    BuildError::MissingElementType {
      location: "Pet.tags".to_string()
    }
  );
}

#[test]
fn test_nested_array_location() {
  let err = try_convert(json!({
    "components": {
      "schemas": {
        "Grid": { "type": "array", "items": { "type": "array" } }
      }
    }
  }))
  .err()
  .expect("inner array without items should fail");

  assert_eq!(
    err,
    BuildError::MissingElementType {
      location: "Grid[]".to_string()
    }
  );
}

#[test]
fn test_named_array_of_named_elements() {
  let converted = convert(json!({
    "components": {
      "schemas": {
        "Pets": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } },
        "Pet": { "type": "object" }
      }
    }
  }));

  let pets = converted.registry.get_by_name("Pets").unwrap();
  let pet = converted.registry.lookup("Pet").unwrap();
  assert!(matches!(&pets.kind, TypeKind::Array { element } if *element == TypeRef::Named(pet)));
}
