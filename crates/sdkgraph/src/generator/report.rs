//! Serializable snapshot of a build, consumed by per-language renderers.
//!
//! Named types are referenced as `{"$ref": "Name"}`; anonymous types are written inline.
//! Every collection is emitted in a fixed order, so the JSON form of a report is identical
//! across runs on identical input.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{
  ast::{ContentType, EnumEntry, Field, HttpHandler, Module, PageInfo, PrimitiveKind, TypeKind, TypeNode, TypeRef},
  metrics::GenerationStats,
  orchestrator::{ApiMetadata, BuildOutput},
  schema_registry::TypeRegistry,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
  pub title: String,
  pub version: String,
  pub modules: Vec<ModuleReport>,
  /// Named types in global dependency order.
  pub types: Vec<TypeReport>,
  /// Alias name to the name of the type it stands for.
  pub aliases: BTreeMap<String, String>,
  pub unassigned: Vec<String>,
  pub stats: GenerationStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
  pub name: String,
  pub handlers: Vec<HandlerReport>,
  pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerReport {
  pub name: String,
  pub method: String,
  pub path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub content_type: ContentType,
  pub header_params: Vec<FieldReport>,
  pub path_params: Vec<FieldReport>,
  pub query_params: Vec<FieldReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_body: Option<TypeRefReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub response_body: Option<TypeRefReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page_info: Option<PageInfoReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfoReport {
  pub item_type: TypeRefReport,
  pub page_index_name: String,
  pub page_size_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeReport {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub module: Option<String>,
  #[serde(flatten)]
  pub shape: ShapeReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeReport {
  Primitive {
    primitive: PrimitiveKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    enum_entries: Vec<EnumEntryReport>,
  },
  Object {
    fields: Vec<FieldReport>,
  },
  Array {
    element: Box<TypeRefReport>,
  },
  Map {
    value: Box<TypeRefReport>,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeRefReport {
  Named {
    #[serde(rename = "$ref")]
    reference: String,
  },
  Inline(ShapeReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "type")]
  pub type_ref: TypeRefReport,
  pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumEntryReport {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub value: Value,
}

impl BuildReport {
  pub(crate) fn new(output: &BuildOutput, metadata: ApiMetadata) -> Self {
    let registry = &output.registry;

    let modules = output
      .modules
      .values()
      .map(|module| ModuleReport::new(module, output))
      .collect();

    let types = output
      .order
      .order()
      .iter()
      .map(|id| TypeReport::new(registry.get(*id), registry))
      .collect();

    let aliases = registry
      .aliases()
      .map(|(alias, id)| (alias.to_string(), registry.get(id).name.clone()))
      .collect();

    let mut unassigned = registry
      .nodes()
      .filter(|(_, node)| node.module.is_none())
      .map(|(_, node)| node.name.clone())
      .collect::<Vec<_>>();
    unassigned.sort();

    Self {
      title: metadata.title,
      version: metadata.version,
      modules,
      types,
      aliases,
      unassigned,
      stats: output.stats.clone(),
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  pub fn module(&self, name: &str) -> Option<&ModuleReport> {
    self.modules.iter().find(|module| module.name == name)
  }
}

impl ModuleReport {
  fn new(module: &Module, output: &BuildOutput) -> Self {
    Self {
      name: module.name.clone(),
      handlers: module
        .handlers
        .iter()
        .map(|handler| HandlerReport::new(handler, output))
        .collect(),
      types: module
        .types
        .iter()
        .map(|id| output.registry.get(*id).name.clone())
        .collect(),
    }
  }
}

impl HandlerReport {
  fn new(handler: &HttpHandler, output: &BuildOutput) -> Self {
    let registry = &output.registry;
    Self {
      name: handler.name.clone(),
      method: handler.method.to_string(),
      path: handler.path.clone(),
      description: handler.description.clone(),
      content_type: handler.content_type,
      header_params: FieldReport::many(&handler.header_params, registry),
      path_params: FieldReport::many(&handler.path_params, registry),
      query_params: FieldReport::many(&handler.query_params, registry),
      request_body: handler.request_body.as_ref().map(|body| TypeRefReport::new(body, registry)),
      response_body: handler.response_body.as_ref().map(|body| TypeRefReport::new(body, registry)),
      page_info: output
        .page_info(handler)
        .map(|info| PageInfoReport::new(&info, registry)),
    }
  }
}

impl PageInfoReport {
  fn new(info: &PageInfo<'_>, registry: &TypeRegistry) -> Self {
    Self {
      item_type: TypeRefReport::new(info.item_type, registry),
      page_index_name: info.page_index_name.clone(),
      page_size_name: info.page_size_name.clone(),
    }
  }
}

impl TypeReport {
  fn new(node: &TypeNode, registry: &TypeRegistry) -> Self {
    Self {
      name: node.name.clone(),
      description: node.description.clone(),
      module: node.module.clone(),
      shape: ShapeReport::new(&node.kind, registry),
    }
  }
}

impl ShapeReport {
  fn new(kind: &TypeKind, registry: &TypeRegistry) -> Self {
    match kind {
      TypeKind::Primitive {
        primitive,
        enum_entries,
      } => Self::Primitive {
        primitive: *primitive,
        enum_entries: enum_entries.iter().map(EnumEntryReport::from).collect(),
      },
      TypeKind::Object { fields } => Self::Object {
        fields: FieldReport::many(fields, registry),
      },
      TypeKind::Array { element } => Self::Array {
        element: Box::new(TypeRefReport::new(element, registry)),
      },
      TypeKind::Map { value } => Self::Map {
        value: Box::new(TypeRefReport::new(value, registry)),
      },
    }
  }
}

impl TypeRefReport {
  fn new(type_ref: &TypeRef, registry: &TypeRegistry) -> Self {
    match type_ref {
      TypeRef::Named(id) => Self::Named {
        reference: registry.get(*id).name.clone(),
      },
      TypeRef::Anonymous(node) => Self::Inline(ShapeReport::new(&node.kind, registry)),
    }
  }
}

impl FieldReport {
  fn new(field: &Field, registry: &TypeRegistry) -> Self {
    Self {
      name: field.name.clone(),
      description: field.description.clone(),
      type_ref: TypeRefReport::new(&field.type_ref, registry),
      required: field.required,
    }
  }

  fn many(fields: &[Field], registry: &TypeRegistry) -> Vec<Self> {
    fields.iter().map(|field| Self::new(field, registry)).collect()
  }
}

impl From<&EnumEntry> for EnumEntryReport {
  fn from(entry: &EnumEntry) -> Self {
    Self {
      name: entry.name.clone(),
      value: entry.value.clone(),
    }
  }
}
