//! Orchestration of one type-graph build.
//!
//! The [`Orchestrator`] owns a parsed document and a module configuration and runs the
//! phases strictly in order:
//!
//! 1. component schemas become named types in the [`TypeRegistry`]
//! 2. operations become handlers, grouped into modules by their first tag
//! 3. named types get a global dependency order
//! 4. every named type is assigned to at most one module
//!
//! ## Usage
//!
//! ```no_run
//! use sdkgraph::{
//!   document::ApiDocument,
//!   generator::{config::ModuleConfig, orchestrator::Orchestrator},
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let document = ApiDocument::from_json(&std::fs::read_to_string("openapi.json")?)?;
//! let config = ModuleConfig::default().with_assignment("Pet", "zoo");
//!
//! let output = Orchestrator::new(document, config).build()?;
//! for module in output.modules.values() {
//!   println!("{}: {} handlers, {} types", module.name, module.handlers.len(), module.types.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::{
  document::ApiDocument,
  generator::{
    analyzer::{DependencyOrder, DependencyResolver},
    ast::{HttpHandler, Module, PageInfo, TypeNode},
    config::ModuleConfig,
    converter::SchemaConverter,
    errors::BuildResult,
    metrics::GenerationStats,
    module_partitioner::ModulePartitioner,
    operation_converter::OperationConverter,
    report::BuildReport,
    schema_registry::TypeRegistry,
  },
};

/// Runs the build pipeline over one document.
pub struct Orchestrator {
  document: ApiDocument,
  config: ModuleConfig,
}

/// Descriptive fields of the API, carried into reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// Everything a build produces. Owned by the caller once returned.
#[derive(Debug)]
pub struct BuildOutput {
  pub registry: TypeRegistry,
  /// Modules by name.
  pub modules: BTreeMap<String, Module>,
  pub order: DependencyOrder,
  pub stats: GenerationStats,
  metadata: ApiMetadata,
  config: ModuleConfig,
}

impl Orchestrator {
  pub fn new(document: ApiDocument, config: ModuleConfig) -> Self {
    Self { document, config }
  }

  pub fn metadata(&self) -> ApiMetadata {
    ApiMetadata {
      title: self.document.info.title.clone(),
      version: self.document.info.version.clone(),
      description: self.document.info.description.clone(),
    }
  }

  /// Runs every phase and returns the partitioned graph.
  ///
  /// # Errors
  ///
  /// Fails on the first unresolved reference, array without items or alias loop. No
  /// partial output is returned.
  pub fn build(&self) -> BuildResult<BuildOutput> {
    let mut registry = TypeRegistry::new();
    let mut stats = GenerationStats::default();
    let mut modules = BTreeMap::<String, Module>::new();

    {
      let mut schemas = SchemaConverter::new(&self.document, &mut registry, &mut stats);
      schemas.convert_components()?;

      let operations = OperationConverter::new(&self.document, &self.config.fallback_module);
      for entry in self.document.operations() {
        let (module, handler) = operations.convert(&mut schemas, &entry)?;
        modules
          .entry(module)
          .or_insert_with_key(|name| Module::new(name.as_str()))
          .handlers
          .push(handler);
      }
    }
    debug!(
      types = registry.len(),
      handlers = stats.handlers_converted,
      "converted document"
    );

    let order = DependencyResolver::new(&registry).resolve();
    stats.record_cycles(
      order
        .cycles()
        .iter()
        .map(|cycle| cycle.iter().map(|id| registry.get(*id).name.clone()).collect())
        .collect(),
    );

    ModulePartitioner::new(&self.config, &order).partition(&mut registry, &mut modules, &mut stats);

    info!(
      types = stats.named_types,
      handlers = stats.handlers_converted,
      modules = stats.modules,
      cycles = stats.cycles_detected,
      warnings = stats.warnings.len(),
      "build complete"
    );

    Ok(BuildOutput {
      registry,
      modules,
      order,
      stats,
      metadata: self.metadata(),
      config: self.config.clone(),
    })
  }
}

impl BuildOutput {
  pub fn module(&self, name: &str) -> Option<&Module> {
    self.modules.get(name)
  }

  /// Named type by declared or alias name.
  pub fn type_node(&self, name: &str) -> Option<&TypeNode> {
    self.registry.get_by_name(name)
  }

  /// Module owning the named type, if any.
  pub fn module_of(&self, type_name: &str) -> Option<&str> {
    self.type_node(type_name).and_then(|node| node.module.as_deref())
  }

  pub fn metadata(&self) -> &ApiMetadata {
    &self.metadata
  }

  /// Pagination details of `handler`, using the configured candidate names.
  pub fn page_info<'a>(&'a self, handler: &'a HttpHandler) -> Option<PageInfo<'a>> {
    handler.page_info(
      &self.registry,
      &self.config.page_index_candidates,
      &self.config.page_size_candidates,
    )
  }

  pub fn report(&self) -> BuildReport {
    BuildReport::new(self, self.metadata.clone())
  }
}
