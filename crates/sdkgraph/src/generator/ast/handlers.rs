use std::collections::BTreeSet;

use http::Method;
use serde::Serialize;
use strum::Display;

use super::{Field, TypeId, TypeNode, TypeRef};
use crate::generator::schema_registry::TypeRegistry;

pub const DEFAULT_PAGE_INDEX_CANDIDATES: [&str; 2] = ["page_index", "page_num"];
pub const DEFAULT_PAGE_SIZE_CANDIDATES: [&str; 2] = ["page_size", "page_num"];

/// Field of an envelope response that carries the payload.
const DATA_FIELD_NAME: &str = "data";

/// How the request body is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
  #[default]
  Json,
  File,
}

impl ContentType {
  pub fn from_media_type(media_type: &str) -> Self {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case("multipart/form-data") {
      Self::File
    } else {
      Self::Json
    }
  }
}

/// One API operation, with parameters bucketed by location.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpHandler {
  pub name: String,
  pub description: Option<String>,
  pub path: String,
  pub method: Method,
  pub content_type: ContentType,
  pub header_params: Vec<Field>,
  pub path_params: Vec<Field>,
  pub query_params: Vec<Field>,
  pub request_body: Option<TypeRef>,
  /// `None` means the operation has no typed success body.
  pub response_body: Option<TypeRef>,
}

/// Pagination details of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo<'a> {
  pub item_type: &'a TypeRef,
  pub page_index_name: String,
  pub page_size_name: String,
}

impl HttpHandler {
  pub fn new(name: impl Into<String>, path: impl Into<String>, method: Method) -> Self {
    Self {
      name: name.into(),
      description: None,
      path: path.into(),
      method,
      content_type: ContentType::default(),
      header_params: vec![],
      path_params: vec![],
      query_params: vec![],
      request_body: None,
      response_body: None,
    }
  }

  /// Parameters in header, path, query order.
  pub fn params(&self) -> impl Iterator<Item = &Field> {
    self
      .header_params
      .iter()
      .chain(&self.path_params)
      .chain(&self.query_params)
  }

  /// Every type slot of the handler: bodies first, then parameters.
  pub fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
    self
      .request_body
      .iter()
      .chain(&self.response_body)
      .chain(self.params().map(|param| &param.type_ref))
  }

  /// Named types the handler uses directly, looking through anonymous bodies and parameters.
  pub fn named_roots(&self) -> BTreeSet<TypeId> {
    let mut roots = BTreeSet::new();
    for type_ref in self.type_refs() {
      type_ref.visit_named(&mut |id| {
        roots.insert(id);
      });
    }
    roots
  }

  /// The payload of an envelope response: the type of the `data` field of an object
  /// response body.
  pub fn actual_response_body<'a>(&'a self, registry: &'a TypeRegistry) -> Option<&'a TypeNode> {
    let body = self.response_body.as_ref()?.resolve(registry);
    if !body.is_object() {
      return None;
    }
    body.field(DATA_FIELD_NAME).map(|field| field.type_ref.resolve(registry))
  }

  /// Pagination details when this is a GET whose query carries a page index and a page
  /// size parameter and whose payload is an object holding an array. Empty candidate lists
  /// fall back to the defaults.
  pub fn page_info<'a, S: AsRef<str>>(
    &'a self,
    registry: &'a TypeRegistry,
    page_index_candidates: &[S],
    page_size_candidates: &[S],
  ) -> Option<PageInfo<'a>> {
    if self.method != Method::GET {
      return None;
    }

    let query_names = self
      .query_params
      .iter()
      .map(|param| param.name.as_str())
      .collect::<BTreeSet<_>>();

    let page_index = pick_candidate(&query_names, page_index_candidates, &DEFAULT_PAGE_INDEX_CANDIDATES, None)?;
    let page_size = pick_candidate(
      &query_names,
      page_size_candidates,
      &DEFAULT_PAGE_SIZE_CANDIDATES,
      Some(page_index.as_str()),
    )?;

    let payload = self.actual_response_body(registry)?;
    let item_type = payload
      .fields()
      .iter()
      .find_map(|field| field.type_ref.resolve(registry).element())?;
    Some(PageInfo {
      item_type,
      page_index_name: page_index,
      page_size_name: page_size,
    })
  }
}

fn pick_candidate<S: AsRef<str>>(
  names: &BTreeSet<&str>,
  candidates: &[S],
  defaults: &[&str],
  exclude: Option<&str>,
) -> Option<String> {
  let is_match = |candidate: &str| names.contains(candidate) && Some(candidate) != exclude;
  if candidates.is_empty() {
    defaults.iter().copied().find(|&c| is_match(c)).map(ToString::to_string)
  } else {
    candidates
      .iter()
      .map(AsRef::<str>::as_ref)
      .find(|&c| is_match(c))
      .map(ToString::to_string)
  }
}
