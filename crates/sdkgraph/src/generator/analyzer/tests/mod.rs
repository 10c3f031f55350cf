mod reachability_tests;

use super::{DependencyOrder, DependencyResolver};
use crate::generator::{
  ast::{Field, PrimitiveKind, TypeId, TypeKind, TypeRef},
  schema_registry::TypeRegistry,
};

/// Registers object types whose fields reference other registered names.
pub(super) fn object_registry(types: &[(&str, &[&str])]) -> TypeRegistry {
  let mut registry = TypeRegistry::new();
  for (name, _) in types {
    registry.reserve(name);
  }
  for (name, deps) in types {
    let id = registry.lookup(name).unwrap();
    let fields = deps
      .iter()
      .map(|dep| Field {
        name: dep.to_lowercase(),
        description: None,
        type_ref: TypeRef::Named(registry.lookup(dep).unwrap()),
        required: false,
      })
      .collect();
    registry.complete(id, None, TypeKind::Object { fields });
  }
  registry
}

pub(super) fn resolve(registry: &TypeRegistry) -> DependencyOrder {
  DependencyResolver::new(registry).resolve()
}

pub(super) fn names(registry: &TypeRegistry, ids: &[TypeId]) -> Vec<String> {
  ids.iter().map(|id| registry.get(*id).name.clone()).collect()
}

pub(super) fn string_field(name: &str) -> Field {
  Field {
    name: name.to_string(),
    description: None,
    type_ref: TypeRef::anonymous(TypeKind::primitive(PrimitiveKind::String)),
    required: true,
  }
}
