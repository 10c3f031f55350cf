mod fields;
mod primitives;

use tracing::debug;

use self::{
  fields::{is_required, ordered_properties},
  primitives::{enum_entries, infer_enum_kind, primitive_kind},
};
use crate::{
  document::{ApiDocument, ObjectOrReference, SchemaDef, SchemaType},
  generator::{
    ast::{Field, PrimitiveKind, TypeId, TypeKind, TypeRef},
    errors::{BuildError, BuildResult},
    metrics::{GenerationStats, GenerationWarning},
    schema_registry::TypeRegistry,
  },
  utils::parse_schema_ref,
};

/// Turns schema definitions into type nodes.
///
/// Named schemas are interned in the registry and reserved before their children are
/// walked, so self and mutual references terminate on the in-progress node. Inline schemas
/// become anonymous nodes owned by their parent.
pub(crate) struct SchemaConverter<'a> {
  document: &'a ApiDocument,
  registry: &'a mut TypeRegistry,
  stats: &'a mut GenerationStats,
}

impl<'a> SchemaConverter<'a> {
  pub(crate) fn new(document: &'a ApiDocument, registry: &'a mut TypeRegistry, stats: &'a mut GenerationStats) -> Self {
    Self {
      document,
      registry,
      stats,
    }
  }

  pub(crate) fn stats(&mut self) -> &mut GenerationStats {
    self.stats
  }

  /// Converts every component schema, in declaration order.
  pub(crate) fn convert_components(&mut self) -> BuildResult<()> {
    for name in self.document.components.schemas.keys() {
      self.convert_named(name)?;
    }
    debug!(types = self.registry.len(), "converted component schemas");
    Ok(())
  }

  /// Converts a schema found at `location`, which names the slot in error messages.
  ///
  /// A reference yields the named node it designates. An inline schema yields a fresh
  /// anonymous node.
  pub(crate) fn convert_schema(
    &mut self,
    schema: &ObjectOrReference<SchemaDef>,
    location: &str,
  ) -> BuildResult<TypeRef> {
    match schema {
      ObjectOrReference::Ref { ref_path } => self.resolve_reference(ref_path, location).map(TypeRef::Named),
      ObjectOrReference::Object(def) => {
        let kind = self.build_kind(def, location)?;
        self.stats.record_anonymous_type();
        Ok(TypeRef::anonymous(kind))
      }
    }
  }

  pub(crate) fn resolve_reference(&mut self, ref_path: &str, location: &str) -> BuildResult<TypeId> {
    let name = parse_schema_ref(ref_path)
      .filter(|name| self.document.schema(name).is_some())
      .ok_or_else(|| BuildError::unresolved(ref_path, location))?;
    self.convert_named(&name)
  }

  /// Interns the component schema `name`, converting it on first use.
  pub(crate) fn convert_named(&mut self, name: &str) -> BuildResult<TypeId> {
    if let Some(id) = self.registry.lookup(name) {
      return Ok(id);
    }

    let document = self.document;
    let schema = document
      .schema(name)
      .ok_or_else(|| BuildError::unresolved(name, name))?;

    match schema {
      ObjectOrReference::Ref { ref_path } => self.convert_alias(name, ref_path),
      ObjectOrReference::Object(def) => {
        let id = self.registry.reserve(name);
        self.stats.record_named_type();
        let kind = self.build_kind(def, name)?;
        self.registry.complete(id, def.summary(), kind);
        Ok(id)
      }
    }
  }

  /// Follows a chain of pure-`$ref` components to its first concrete schema and registers
  /// every name in the chain as an alias of that schema's node.
  ///
  /// Only the chain itself is checked for loops. The concrete schema is converted after the
  /// walk, so references back to an alias from inside it resolve like any self reference.
  fn convert_alias(&mut self, name: &str, ref_path: &str) -> BuildResult<TypeId> {
    let document = self.document;
    let mut chain = vec![name.to_string()];
    let mut next_ref = ref_path;

    let target = loop {
      let referrer = chain.last().map_or(name, String::as_str);
      let target_name = parse_schema_ref(next_ref)
        .filter(|target| document.schema(target).is_some())
        .ok_or_else(|| BuildError::unresolved(next_ref, referrer))?;

      if let Some(id) = self.registry.lookup(&target_name) {
        break id;
      }
      match document.schema(&target_name) {
        Some(ObjectOrReference::Ref { ref_path }) => {
          if chain.contains(&target_name) {
            return Err(BuildError::CircularAlias { name: target_name });
          }
          chain.push(target_name);
          next_ref = ref_path;
        }
        _ => break self.convert_named(&target_name)?,
      }
    };

    for alias in &chain {
      if self.registry.alias(alias, target) {
        self.stats.record_alias();
        debug!(alias = %alias, target = %self.registry.get(target).name, "registered schema alias");
      }
    }
    Ok(target)
  }

  fn build_kind(&mut self, def: &SchemaDef, location: &str) -> BuildResult<TypeKind> {
    if let Some(value_schema) = def.additional_properties_schema() {
      let value = self.convert_schema(value_schema, &format!("{location}{{}}"))?;
      return Ok(TypeKind::Map { value });
    }

    match def.primary_type() {
      Some(SchemaType::Object) => self.build_object(def, location),
      Some(SchemaType::Array) => self.build_array(def, location),
      Some(SchemaType::Unknown) => Ok(self.unsupported(location)),
      Some(schema_type) => {
        let primitive = primitive_kind(Some(schema_type), def.format.as_deref());
        Ok(self.build_primitive(def, primitive, location))
      }
      None if !def.properties.is_empty() => self.build_object(def, location),
      None if def.items.is_some() => self.build_array(def, location),
      None if !def.enum_values.is_empty() => {
        let primitive = infer_enum_kind(&def.enum_values);
        Ok(self.build_primitive(def, primitive, location))
      }
      None if def.schema_type.is_some() => Ok(TypeKind::unknown()),
      None => Ok(self.unsupported(location)),
    }
  }

  fn unsupported(&mut self, location: &str) -> TypeKind {
    self.stats.record_warning(GenerationWarning::UnsupportedSchema {
      location: location.to_string(),
    });
    TypeKind::unknown()
  }

  fn build_object(&mut self, def: &SchemaDef, location: &str) -> BuildResult<TypeKind> {
    let mut fields = Vec::with_capacity(def.properties.len());
    for (name, prop) in ordered_properties(def) {
      let type_ref = self.convert_schema(prop, &format!("{location}.{name}"))?;
      fields.push(Field {
        name: name.to_string(),
        description: self.property_summary(prop),
        type_ref,
        required: is_required(def, name),
      });
    }
    Ok(TypeKind::Object { fields })
  }

  fn build_array(&mut self, def: &SchemaDef, location: &str) -> BuildResult<TypeKind> {
    let items = def.items.as_deref().ok_or_else(|| BuildError::MissingElementType {
      location: location.to_string(),
    })?;
    let element = self.convert_schema(items, &format!("{location}[]"))?;
    Ok(TypeKind::Array { element })
  }

  fn build_primitive(&mut self, def: &SchemaDef, primitive: PrimitiveKind, location: &str) -> TypeKind {
    TypeKind::Primitive {
      primitive,
      enum_entries: enum_entries(def, location, self.stats),
    }
  }

  /// Summary of a property schema. A reference takes the summary of the definition it
  /// points at, following aliases.
  fn property_summary(&self, prop: &ObjectOrReference<SchemaDef>) -> Option<String> {
    let mut current = prop;
    for _ in 0..=self.document.components.schemas.len() {
      match current {
        ObjectOrReference::Object(def) => return def.summary(),
        ObjectOrReference::Ref { ref_path } => {
          current = parse_schema_ref(ref_path).and_then(|name| self.document.schema(&name))?;
        }
      }
    }
    None
  }
}

#[cfg(test)]
mod tests;
