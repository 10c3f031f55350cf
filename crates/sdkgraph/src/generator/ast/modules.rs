use super::{HttpHandler, TypeId};

/// A delivery unit: the handlers grouped under one name and the types assigned to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
  pub name: String,
  /// Handlers in document encounter order.
  pub handlers: Vec<HttpHandler>,
  /// Assigned named types in dependency order.
  pub types: Vec<TypeId>,
}

impl Module {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      handlers: vec![],
      types: vec![],
    }
  }

  pub fn handler(&self, name: &str) -> Option<&HttpHandler> {
    self.handlers.iter().find(|handler| handler.name == name)
  }
}
