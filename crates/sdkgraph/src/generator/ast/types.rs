use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use strum::{Display, IntoStaticStr};

use crate::generator::schema_registry::TypeRegistry;

/// Stable handle to a named type: a dense index into the [`TypeRegistry`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(usize);

impl TypeId {
  pub(crate) const fn new(index: usize) -> Self {
    Self(index)
  }

  #[must_use]
  pub const fn index(self) -> usize {
    self.0
  }
}

/// Scalar categories a primitive node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
  Int,
  Float,
  String,
  Bool,
  Binary,
  #[default]
  Unknown,
}

/// One enum member. `name` is `None` when the description supplied no usable name list.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
  pub name: Option<String>,
  pub value: Value,
}

impl EnumEntry {
  pub fn unnamed(value: Value) -> Self {
    Self { name: None, value }
  }

  pub fn named(name: impl Into<String>, value: Value) -> Self {
    Self {
      name: Some(name.into()),
      value,
    }
  }
}

/// An object property, a handler parameter, or any other named slot holding a type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
  pub name: String,
  pub description: Option<String>,
  pub type_ref: TypeRef,
  pub required: bool,
}

/// Points at a type: a shared named node in the registry, or an anonymous node owned here.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
  Named(TypeId),
  Anonymous(Box<TypeNode>),
}

impl TypeRef {
  pub fn anonymous(kind: TypeKind) -> Self {
    Self::Anonymous(Box::new(TypeNode::anonymous(kind)))
  }

  /// The node this reference designates.
  pub fn resolve<'a>(&'a self, registry: &'a TypeRegistry) -> &'a TypeNode {
    match self {
      Self::Named(id) => registry.get(*id),
      Self::Anonymous(node) => node,
    }
  }

  /// Calls `visit` for every named type this reference reaches without crossing another
  /// named type: the reference itself when named, else the named types inside the owned
  /// anonymous subtree.
  pub fn visit_named(&self, visit: &mut impl FnMut(TypeId)) {
    match self {
      Self::Named(id) => visit(*id),
      Self::Anonymous(node) => node.visit_named_children(visit),
    }
  }
}

/// Shape of a type node.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TypeKind {
  Primitive {
    primitive: PrimitiveKind,
    enum_entries: Vec<EnumEntry>,
  },
  Object {
    fields: Vec<Field>,
  },
  Array {
    element: TypeRef,
  },
  Map {
    value: TypeRef,
  },
}

impl TypeKind {
  pub fn primitive(primitive: PrimitiveKind) -> Self {
    Self::Primitive {
      primitive,
      enum_entries: vec![],
    }
  }

  pub fn unknown() -> Self {
    Self::primitive(PrimitiveKind::Unknown)
  }

  pub fn name(&self) -> &'static str {
    self.into()
  }
}

/// A node of the type graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
  /// Declared name; empty for anonymous nodes.
  pub name: String,
  pub description: Option<String>,
  pub kind: TypeKind,
  pub is_named: bool,
  /// Owning module, written once by the partitioner.
  pub module: Option<String>,
}

impl TypeNode {
  pub fn named(name: impl Into<String>, kind: TypeKind) -> Self {
    Self {
      name: name.into(),
      description: None,
      kind,
      is_named: true,
      module: None,
    }
  }

  pub fn anonymous(kind: TypeKind) -> Self {
    Self {
      name: String::new(),
      description: None,
      kind,
      is_named: false,
      module: None,
    }
  }

  /// Object fields, or an empty slice for any other shape.
  pub fn fields(&self) -> &[Field] {
    match &self.kind {
      TypeKind::Object { fields } => fields,
      _ => &[],
    }
  }

  pub fn field(&self, name: &str) -> Option<&Field> {
    self.fields().iter().find(|field| field.name == name)
  }

  pub fn element(&self) -> Option<&TypeRef> {
    match &self.kind {
      TypeKind::Array { element } => Some(element),
      _ => None,
    }
  }

  pub fn is_object(&self) -> bool {
    matches!(self.kind, TypeKind::Object { .. })
  }

  /// Every type reference held directly by this node.
  pub fn children(&self) -> Vec<&TypeRef> {
    match &self.kind {
      TypeKind::Primitive { .. } => vec![],
      TypeKind::Object { fields } => fields.iter().map(|field| &field.type_ref).collect(),
      TypeKind::Array { element } => vec![element],
      TypeKind::Map { value } => vec![value],
    }
  }

  pub(crate) fn visit_named_children(&self, visit: &mut impl FnMut(TypeId)) {
    for child in self.children() {
      child.visit_named(visit);
    }
  }

  /// Named types this node depends on: those referenced by its fields, element or value,
  /// looking through anonymous subtrees but stopping at named boundaries.
  pub fn direct_dependencies(&self) -> BTreeSet<TypeId> {
    let mut deps = BTreeSet::new();
    self.visit_named_children(&mut |id| {
      deps.insert(id);
    });
    deps
  }
}
