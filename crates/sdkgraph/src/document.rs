//! In-memory model of the OpenAPI subset the type-graph builder reads.
//!
//! Every map is an [`IndexMap`] so that declaration order survives parsing: field order,
//! handler order and named-type registration order are all derived from it.

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Either an inline object or a `$ref` pointer to a reusable component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrReference<T> {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Object(T),
}

impl<T> ObjectOrReference<T> {
  pub fn ref_path(&self) -> Option<&str> {
    match self {
      Self::Ref { ref_path } => Some(ref_path),
      Self::Object(_) => None,
    }
  }
}

/// A parsed API description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiDocument {
  #[serde(default)]
  pub openapi: String,
  #[serde(default)]
  pub info: Info,
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default)]
  pub components: Components,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  #[serde(default)]
  pub schemas: IndexMap<String, ObjectOrReference<SchemaDef>>,
  #[serde(default)]
  pub parameters: IndexMap<String, ObjectOrReference<Parameter>>,
  #[serde(default)]
  pub request_bodies: IndexMap<String, ObjectOrReference<RequestBody>>,
  #[serde(default)]
  pub responses: IndexMap<String, ObjectOrReference<Response>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
  #[serde(default)]
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  pub get: Option<Operation>,
  pub put: Option<Operation>,
  pub post: Option<Operation>,
  pub delete: Option<Operation>,
  pub options: Option<Operation>,
  pub head: Option<Operation>,
  pub patch: Option<Operation>,
  pub trace: Option<Operation>,
}

impl PathItem {
  /// Operations of this path item in the fixed OpenAPI method order.
  pub fn methods(&self) -> Vec<(Method, &Operation)> {
    [
      (Method::GET, &self.get),
      (Method::PUT, &self.put),
      (Method::POST, &self.post),
      (Method::DELETE, &self.delete),
      (Method::OPTIONS, &self.options),
      (Method::HEAD, &self.head),
      (Method::PATCH, &self.patch),
      (Method::TRACE, &self.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
    .collect()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  pub operation_id: Option<String>,
  pub summary: Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  pub request_body: Option<ObjectOrReference<RequestBody>>,
  #[serde(default)]
  pub responses: IndexMap<String, ObjectOrReference<Response>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Query,
  Header,
  Path,
  Cookie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  pub description: Option<String>,
  #[serde(default)]
  pub required: bool,
  pub schema: Option<ObjectOrReference<SchemaDef>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
  pub description: Option<String>,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
  pub description: Option<String>,
  #[serde(default)]
  pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
  pub schema: Option<ObjectOrReference<SchemaDef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
  String,
  Integer,
  Number,
  Boolean,
  Array,
  Object,
  Null,
  /// Any type name outside the list above, e.g. Swagger 2's `file`.
  #[serde(other)]
  Unknown,
}

/// `type` is a single name in OpenAPI 3.0 and may be a list in 3.1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypeSet {
  Single(SchemaType),
  Multiple(Vec<SchemaType>),
}

impl SchemaTypeSet {
  /// The first non-null type, which decides the shape of the schema.
  pub fn primary(&self) -> Option<SchemaType> {
    match self {
      Self::Single(SchemaType::Null) => None,
      Self::Single(schema_type) => Some(*schema_type),
      Self::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Allowed(bool),
  Schema(Box<ObjectOrReference<SchemaDef>>),
}

/// A schema definition.
///
/// `property_order` and `enum_names` carry the vendor extensions that pin property order
/// and name enum values. Both are optional and degrade to declaration order and unnamed
/// entries respectively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDef {
  #[serde(rename = "type")]
  pub schema_type: Option<SchemaTypeSet>,
  pub format: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub properties: IndexMap<String, ObjectOrReference<SchemaDef>>,
  #[serde(default)]
  pub required: Vec<String>,
  pub items: Option<Box<ObjectOrReference<SchemaDef>>>,
  pub additional_properties: Option<AdditionalProperties>,
  #[serde(default, rename = "enum")]
  pub enum_values: Vec<Value>,
  #[serde(rename = "x-order", alias = "x-coze-order")]
  pub property_order: Option<Vec<String>>,
  #[serde(rename = "x-enum-names", alias = "x-coze-enum-names", alias = "x-enum-varnames")]
  pub enum_names: Option<Vec<String>>,
}

impl SchemaDef {
  pub fn primary_type(&self) -> Option<SchemaType> {
    self.schema_type.as_ref().and_then(SchemaTypeSet::primary)
  }

  /// `title` when present, otherwise `description`.
  pub fn summary(&self) -> Option<String> {
    self
      .title
      .as_deref()
      .filter(|title| !title.is_empty())
      .or(self.description.as_deref().filter(|desc| !desc.is_empty()))
      .map(ToString::to_string)
  }

  pub fn additional_properties_schema(&self) -> Option<&ObjectOrReference<SchemaDef>> {
    match &self.additional_properties {
      Some(AdditionalProperties::Schema(schema)) => Some(schema),
      _ => None,
    }
  }
}

/// One operation together with where it was declared.
#[derive(Debug, Clone)]
pub struct OperationEntry<'a> {
  pub path: &'a str,
  pub method: Method,
  pub path_item: &'a PathItem,
  pub operation: &'a Operation,
}

impl ApiDocument {
  pub fn from_json(content: &str) -> serde_json::Result<Self> {
    serde_json::from_str(content)
  }

  pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(content)
  }

  pub fn schema(&self, name: &str) -> Option<&ObjectOrReference<SchemaDef>> {
    self.components.schemas.get(name)
  }

  /// All operations, paths in declaration order and methods in OpenAPI order.
  pub fn operations(&self) -> impl Iterator<Item = OperationEntry<'_>> {
    self.paths.iter().flat_map(|(path, path_item)| {
      path_item
        .methods()
        .into_iter()
        .map(move |(method, operation)| OperationEntry {
          path,
          method,
          path_item,
          operation,
        })
    })
  }
}
