use std::collections::BTreeMap;

use tracing::debug;

use super::{
  analyzer::{DependencyOrder, TypeGraph},
  ast::Module,
  config::ModuleConfig,
  metrics::{GenerationStats, GenerationWarning},
  schema_registry::TypeRegistry,
};

/// Decides which module owns each named type.
///
/// Explicit configuration wins and is final. Every remaining type goes to the first module,
/// by name, whose handlers reach it through bodies, parameters, fields, elements and map
/// values. Types nothing reaches stay in the registry without a module.
pub(crate) struct ModulePartitioner<'a> {
  config: &'a ModuleConfig,
  order: &'a DependencyOrder,
}

impl<'a> ModulePartitioner<'a> {
  pub(crate) fn new(config: &'a ModuleConfig, order: &'a DependencyOrder) -> Self {
    Self { config, order }
  }

  pub(crate) fn partition(
    &self,
    registry: &mut TypeRegistry,
    modules: &mut BTreeMap<String, Module>,
    stats: &mut GenerationStats,
  ) {
    self.assign_configured(registry, modules, stats);
    Self::assign_reachable(registry, modules, stats);

    let unassigned = registry.nodes().filter(|(_, node)| node.module.is_none()).count();
    stats.record_unassigned(unassigned);
    stats.record_modules(modules.len());

    for module in modules.values_mut() {
      self.order.sort(&mut module.types);
    }
    debug!(
      modules = modules.len(),
      explicit = stats.explicit_assignments,
      reachable = stats.reachability_assignments,
      unassigned,
      "partitioned types"
    );
  }

  fn assign_configured(
    &self,
    registry: &mut TypeRegistry,
    modules: &mut BTreeMap<String, Module>,
    stats: &mut GenerationStats,
  ) {
    for (type_name, module_name) in &self.config.type_module_map {
      let Some(id) = registry.lookup(type_name) else {
        stats.record_warning(GenerationWarning::UnknownConfiguredType {
          type_name: type_name.clone(),
          module: module_name.clone(),
        });
        continue;
      };

      if registry.assign_module(id, module_name) {
        stats.record_explicit_assignment();
        modules
          .entry(module_name.clone())
          .or_insert_with(|| Module::new(module_name))
          .types
          .push(id);
      }
    }
  }

  fn assign_reachable(registry: &mut TypeRegistry, modules: &mut BTreeMap<String, Module>, stats: &mut GenerationStats) {
    let graph = TypeGraph::build(registry);

    for module in modules.values_mut() {
      let roots = module.handlers.iter().flat_map(|handler| handler.named_roots());
      let reached = graph.reachable_from(roots);

      for id in reached {
        if registry.assign_module(id, &module.name) {
          stats.record_reachability_assignment();
          module.types.push(id);
        }
      }
    }
  }
}
