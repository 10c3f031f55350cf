use indexmap::IndexMap;
use inflections::Inflect;
use tracing::debug;

use super::{
  ast::{ContentType, Field, HttpHandler, TypeKind, TypeRef},
  converter::SchemaConverter,
  errors::{BuildError, BuildResult},
  metrics::GenerationWarning,
};
use crate::{
  document::{
    ApiDocument, MediaType, ObjectOrReference, OperationEntry, Parameter, ParameterLocation, RequestBody, SchemaDef,
  },
  utils::parse_component_ref,
};

const SUCCESS_STATUS: &str = "200";
const SUCCESS_RESPONSE_PREFIX: char = '2';

/// Turns operations into handlers and decides which module each belongs to.
pub(crate) struct OperationConverter<'a> {
  document: &'a ApiDocument,
  fallback_module: &'a str,
}

impl<'a> OperationConverter<'a> {
  pub(crate) fn new(document: &'a ApiDocument, fallback_module: &'a str) -> Self {
    Self {
      document,
      fallback_module,
    }
  }

  /// Converts one operation, returning the owning module name with the handler.
  pub(crate) fn convert(
    &self,
    schemas: &mut SchemaConverter<'_>,
    entry: &OperationEntry<'a>,
  ) -> BuildResult<(String, HttpHandler)> {
    let operation = entry.operation;
    let name = operation
      .operation_id
      .clone()
      .filter(|id| !id.is_empty())
      .unwrap_or_else(|| generate_operation_id(entry.method.as_str(), entry.path));

    let mut handler = HttpHandler::new(&name, entry.path, entry.method.clone());
    handler.description = operation.summary.clone().or_else(|| operation.description.clone());

    for param in self.collect_parameters(entry, &name)? {
      let bucket = match param.location {
        ParameterLocation::Header => &mut handler.header_params,
        ParameterLocation::Path => &mut handler.path_params,
        ParameterLocation::Query => &mut handler.query_params,
        ParameterLocation::Cookie => continue,
      };
      bucket.push(Self::convert_parameter(schemas, param, &name)?);
    }

    if let Some((media_type, schema)) = self.request_body_content(operation.request_body.as_ref(), &name)? {
      handler.content_type = ContentType::from_media_type(media_type);
      handler.request_body = Some(schemas.convert_schema(schema, &format!("{name}.request"))?);
    }

    if let Some(schema) = self.success_response_schema(entry, &name)? {
      handler.response_body = Some(schemas.convert_schema(schema, &format!("{name}.response"))?);
    }

    let module = operation
      .tags
      .first()
      .cloned()
      .unwrap_or_else(|| self.fallback_module.to_string());

    schemas.stats().record_handler();
    debug!(
      handler = %handler.name,
      method = %handler.method,
      path = %handler.path,
      module = %module,
      "converted operation"
    );
    Ok((module, handler))
  }

  /// Path-level parameters followed by operation-level ones. An operation parameter with
  /// the same name and location replaces the path-level one in place.
  fn collect_parameters(&self, entry: &OperationEntry<'a>, handler: &str) -> BuildResult<Vec<&'a Parameter>> {
    let mut params = Vec::<&'a Parameter>::new();
    for param_ref in &entry.path_item.parameters {
      params.push(self.resolve_parameter(param_ref, handler)?);
    }

    for param_ref in &entry.operation.parameters {
      let param = self.resolve_parameter(param_ref, handler)?;
      match params
        .iter_mut()
        .find(|existing| existing.name == param.name && existing.location == param.location)
      {
        Some(existing) => *existing = param,
        None => params.push(param),
      }
    }
    Ok(params)
  }

  fn convert_parameter(schemas: &mut SchemaConverter<'_>, param: &Parameter, handler: &str) -> BuildResult<Field> {
    let location = format!("{handler}.param({})", param.name);
    let type_ref = match &param.schema {
      Some(schema) => schemas.convert_schema(schema, &location)?,
      None => {
        schemas
          .stats()
          .record_warning(GenerationWarning::UnsupportedSchema { location });
        TypeRef::anonymous(TypeKind::unknown())
      }
    };

    Ok(Field {
      name: param.name.clone(),
      description: param.description.clone(),
      type_ref,
      required: param.required,
    })
  }

  fn resolve_parameter(
    &self,
    param_ref: &'a ObjectOrReference<Parameter>,
    handler: &str,
  ) -> BuildResult<&'a Parameter> {
    resolve_component(param_ref, "parameters", &self.document.components.parameters, handler)
  }

  /// First content entry of the request body that carries a schema.
  fn request_body_content(
    &self,
    body: Option<&'a ObjectOrReference<RequestBody>>,
    handler: &str,
  ) -> BuildResult<Option<ContentSchema<'a>>> {
    let Some(body) = body else {
      return Ok(None);
    };
    let body = resolve_component(body, "requestBodies", &self.document.components.request_bodies, handler)?;
    Ok(first_schema(&body.content))
  }

  /// Schema of the `200` response, else of the first other success response.
  fn success_response_schema(
    &self,
    entry: &OperationEntry<'a>,
    handler: &str,
  ) -> BuildResult<Option<&'a ObjectOrReference<SchemaDef>>> {
    let responses = &entry.operation.responses;
    let chosen = responses.get(SUCCESS_STATUS).or_else(|| {
      responses
        .iter()
        .find(|(status, _)| status.starts_with(SUCCESS_RESPONSE_PREFIX))
        .map(|(_, response)| response)
    });

    let Some(response) = chosen else {
      return Ok(None);
    };
    let response = resolve_component(response, "responses", &self.document.components.responses, handler)?;
    Ok(first_schema(&response.content).map(|(_, schema)| schema))
  }
}

type ContentSchema<'a> = (&'a str, &'a ObjectOrReference<SchemaDef>);

fn first_schema(content: &IndexMap<String, MediaType>) -> Option<ContentSchema<'_>> {
  content
    .iter()
    .find_map(|(media_type, media)| media.schema.as_ref().map(|schema| (media_type.as_str(), schema)))
}

/// Follows `$ref` chains into one components section.
fn resolve_component<'a, T>(
  mut item: &'a ObjectOrReference<T>,
  section: &str,
  components: &'a IndexMap<String, ObjectOrReference<T>>,
  handler: &str,
) -> BuildResult<&'a T> {
  for _ in 0..=components.len() {
    match item {
      ObjectOrReference::Object(object) => return Ok(object),
      ObjectOrReference::Ref { ref_path } => {
        item = parse_component_ref(ref_path, section)
          .and_then(|name| components.get(&name))
          .ok_or_else(|| BuildError::unresolved(ref_path, handler))?;
      }
    }
  }
  Err(BuildError::unresolved(item.ref_path().unwrap_or_default(), handler))
}

/// Stable handler name for an operation without an id: `GET /pets/{id}` yields
/// `get_pets_by_id`.
pub(crate) fn generate_operation_id(method: &str, path: &str) -> String {
  let path_parts = path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      if segment.starts_with('{') && segment.ends_with('}') {
        "by_id".to_string()
      } else {
        segment.to_snake_case()
      }
    })
    .collect::<Vec<_>>();

  let method = method.to_lowercase();
  if path_parts.is_empty() {
    method
  } else {
    format!("{method}_{}", path_parts.join("_"))
  }
}
