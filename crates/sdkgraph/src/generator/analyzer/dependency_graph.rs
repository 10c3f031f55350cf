use std::collections::{BTreeMap, BTreeSet};

use petgraph::{graphmap::DiGraphMap, visit::Dfs};

use crate::generator::{ast::TypeId, schema_registry::TypeRegistry};

/// Global emission order of named types, with the reference cycles met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyOrder {
  order: Vec<TypeId>,
  positions: BTreeMap<TypeId, usize>,
  cycles: Vec<Vec<TypeId>>,
}

impl DependencyOrder {
  fn new(order: Vec<TypeId>, cycles: Vec<Vec<TypeId>>) -> Self {
    let positions = order.iter().enumerate().map(|(position, id)| (*id, position)).collect();
    Self {
      order,
      positions,
      cycles,
    }
  }

  pub fn order(&self) -> &[TypeId] {
    &self.order
  }

  pub fn position(&self, id: TypeId) -> Option<usize> {
    self.positions.get(&id).copied()
  }

  /// Strongly connected groups of more than one type, plus self-referencing types, each in
  /// discovery order.
  pub fn cycles(&self) -> &[Vec<TypeId>] {
    &self.cycles
  }

  /// Sorts `ids` by their place in the global order.
  pub fn sort(&self, ids: &mut [TypeId]) {
    ids.sort_by_key(|id| self.position(*id).unwrap_or(usize::MAX));
  }
}

#[derive(Debug, Clone, Copy)]
struct Visit {
  index: usize,
  low_link: usize,
  on_stack: bool,
}

/// Orders named types so that every dependency precedes its dependents.
///
/// A depth-first walk from every type, roots and edges in lexicographic name order. Types
/// that reference each other form one group; a group is emitted once all of its outside
/// dependencies are, its members in the order the walk discovered them.
pub(crate) struct DependencyResolver<'a> {
  registry: &'a TypeRegistry,
  adjacency: BTreeMap<TypeId, Vec<TypeId>>,
  visits: BTreeMap<TypeId, Visit>,
  stack: Vec<TypeId>,
  order: Vec<TypeId>,
  cycles: Vec<Vec<TypeId>>,
}

impl<'a> DependencyResolver<'a> {
  pub(crate) fn new(registry: &'a TypeRegistry) -> Self {
    let adjacency = registry
      .nodes()
      .map(|(id, node)| {
        let mut deps = node.direct_dependencies().into_iter().collect::<Vec<_>>();
        registry.sort_by_name(&mut deps);
        (id, deps)
      })
      .collect();

    Self {
      registry,
      adjacency,
      visits: BTreeMap::new(),
      stack: vec![],
      order: Vec::with_capacity(registry.len()),
      cycles: vec![],
    }
  }

  pub(crate) fn resolve(mut self) -> DependencyOrder {
    for id in self.registry.sorted_ids() {
      if !self.visits.contains_key(&id) {
        self.visit(id);
      }
    }
    DependencyOrder::new(self.order, self.cycles)
  }

  fn visit(&mut self, id: TypeId) {
    let index = self.visits.len();
    self.visits.insert(
      id,
      Visit {
        index,
        low_link: index,
        on_stack: true,
      },
    );
    self.stack.push(id);

    let deps = self.adjacency.get(&id).cloned().unwrap_or_default();
    for dep in deps {
      match self.visits.get(&dep).copied() {
        None => {
          self.visit(dep);
          let dep_low = self.visits[&dep].low_link;
          self.lower(id, dep_low);
        }
        Some(visit) if visit.on_stack => self.lower(id, visit.index),
        Some(_) => {}
      }
    }

    let visit = self.visits[&id];
    if visit.low_link == visit.index {
      self.emit_group(id);
    }
  }

  fn lower(&mut self, id: TypeId, candidate: usize) {
    if let Some(visit) = self.visits.get_mut(&id) {
      visit.low_link = visit.low_link.min(candidate);
    }
  }

  fn emit_group(&mut self, root: TypeId) {
    let mut group = vec![];
    while let Some(member) = self.stack.pop() {
      if let Some(visit) = self.visits.get_mut(&member) {
        visit.on_stack = false;
      }
      group.push(member);
      if member == root {
        break;
      }
    }
    group.sort_by_key(|member| self.visits[member].index);

    let self_loop = self.adjacency.get(&root).is_some_and(|deps| deps.contains(&root));
    if group.len() > 1 || self_loop {
      self.cycles.push(group.clone());
    }
    self.order.extend(group);
  }
}

/// Named-type reference graph used for reachability.
pub(crate) struct TypeGraph {
  graph: DiGraphMap<TypeId, ()>,
}

impl TypeGraph {
  pub(crate) fn build(registry: &TypeRegistry) -> Self {
    let mut graph = DiGraphMap::new();
    for (id, node) in registry.nodes() {
      graph.add_node(id);
      for dep in node.direct_dependencies() {
        graph.add_edge(id, dep, ());
      }
    }
    Self { graph }
  }

  /// Every named type reachable from `roots`, roots included.
  pub(crate) fn reachable_from(&self, roots: impl IntoIterator<Item = TypeId>) -> BTreeSet<TypeId> {
    let mut reached = BTreeSet::new();
    for root in roots {
      if reached.contains(&root) || !self.graph.contains_node(root) {
        continue;
      }
      let mut dfs = Dfs::new(&self.graph, root);
      while let Some(node) = dfs.next(&self.graph) {
        reached.insert(node);
      }
    }
    reached
  }
}
