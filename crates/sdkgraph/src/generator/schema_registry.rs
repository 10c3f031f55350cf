use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::generator::ast::{TypeId, TypeKind, TypeNode};

/// Arena owning every named type of one build.
///
/// A name is interned exactly once: [`reserve`](Self::reserve) hands out the [`TypeId`]
/// before the type's children are walked, so references met during that walk (including
/// self references) resolve to the in-progress node. Aliases map further names onto an
/// existing id. Ids are dense and never invalidated while the registry lives.
#[derive(Debug, Default)]
pub struct TypeRegistry {
  nodes: Vec<TypeNode>,
  names: IndexMap<String, TypeId>,
  pending: BTreeSet<TypeId>,
}

impl TypeRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lookup(&self, name: &str) -> Option<TypeId> {
    self.names.get(name).copied()
  }

  /// The node behind `id`.
  ///
  /// Ids are only minted by this registry; passing an id from another build panics.
  pub fn get(&self, id: TypeId) -> &TypeNode {
    &self.nodes[id.index()]
  }

  pub fn get_by_name(&self, name: &str) -> Option<&TypeNode> {
    self.lookup(name).map(|id| self.get(id))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains_key(name)
  }

  /// Interns `name`, returning the existing id when it is already known.
  ///
  /// A freshly reserved node is an unknown primitive until [`complete`](Self::complete)
  /// fills it in.
  pub(crate) fn reserve(&mut self, name: &str) -> TypeId {
    if let Some(id) = self.lookup(name) {
      return id;
    }

    let id = TypeId::new(self.nodes.len());
    self.nodes.push(TypeNode::named(name, TypeKind::unknown()));
    self.names.insert(name.to_string(), id);
    self.pending.insert(id);
    id
  }

  pub(crate) fn complete(&mut self, id: TypeId, description: Option<String>, kind: TypeKind) {
    let node = &mut self.nodes[id.index()];
    node.description = description;
    node.kind = kind;
    self.pending.remove(&id);
  }

  /// Registers `alias` as another name for `id`. A name that is already registered is left
  /// untouched; returns whether this call registered it.
  pub(crate) fn alias(&mut self, alias: &str, id: TypeId) -> bool {
    if self.contains(alias) {
      return false;
    }
    self.names.insert(alias.to_string(), id);
    true
  }

  /// Whether the node behind `id` is still being built.
  pub fn is_pending(&self, id: TypeId) -> bool {
    self.pending.contains(&id)
  }

  /// Records the owning module. Only the first assignment takes effect; returns whether
  /// this call assigned it.
  pub(crate) fn assign_module(&mut self, id: TypeId, module: &str) -> bool {
    let node = &mut self.nodes[id.index()];
    if node.module.is_some() {
      return false;
    }
    node.module = Some(module.to_string());
    true
  }

  /// Ids in registration order.
  pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
    (0..self.nodes.len()).map(TypeId::new)
  }

  /// Nodes in registration order.
  pub fn nodes(&self) -> impl Iterator<Item = (TypeId, &TypeNode)> {
    self.nodes.iter().enumerate().map(|(index, node)| (TypeId::new(index), node))
  }

  /// Ids ordered by their canonical name.
  pub fn sorted_ids(&self) -> Vec<TypeId> {
    let mut ids = self.ids().collect::<Vec<_>>();
    self.sort_by_name(&mut ids);
    ids
  }

  pub fn sort_by_name(&self, ids: &mut [TypeId]) {
    ids.sort_by(|a, b| self.get(*a).name.cmp(&self.get(*b).name));
  }

  /// Names that resolve to a node declared under a different name, with that node's id.
  pub fn aliases(&self) -> impl Iterator<Item = (&str, TypeId)> {
    self
      .names
      .iter()
      .filter(|(name, id)| self.get(**id).name != **name)
      .map(|(name, id)| (name.as_str(), *id))
  }

  /// Number of distinct nodes, aliases excluded.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
