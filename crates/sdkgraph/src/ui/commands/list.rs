use std::path::{Path, PathBuf};

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use sdkgraph::{
  generator::{
    config::ModuleConfig,
    orchestrator::{BuildOutput, Orchestrator},
  },
  utils::{load_config, load_document},
};

use crate::ui::{Colors, colors::Role, term_width};

async fn build(input: &Path, config: ModuleConfig) -> anyhow::Result<BuildOutput> {
  let document = load_document(input).await?;
  Ok(Orchestrator::new(document, config).build()?)
}

fn table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(colors.cell(Role::Label)));
  }
  table.set_header(row);
  table
}

/// Rows of `(handler, method, path, module)` sorted by handler name.
fn operation_rows(output: &BuildOutput) -> Vec<(String, String, String, String)> {
  output
    .modules
    .values()
    .flat_map(|module| {
      module.handlers.iter().map(|handler| {
        (
          handler.name.clone(),
          handler.method.to_string(),
          handler.path.clone(),
          module.name.clone(),
        )
      })
    })
    .sorted_by(|a, b| a.0.cmp(&b.0))
    .collect()
}

pub async fn list_operations(input: &PathBuf, colors: &Colors) -> anyhow::Result<()> {
  let output = build(input, ModuleConfig::default()).await?;

  let mut table = table(colors, &["HANDLER", "METHOD", "PATH", "MODULE"]);
  for (name, method, path, module) in operation_rows(&output) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(colors.cell(Role::Method))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(colors.cell(Role::Detail)));
    row.add_cell(Cell::new(module).fg(colors.cell(Role::Module)));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

pub async fn list_modules(input: &Path, config: Option<&Path>, colors: &Colors) -> anyhow::Result<()> {
  let config = load_config(config).await?;
  let output = build(input, config).await?;

  let mut table = table(colors, &["MODULE", "HANDLERS", "TYPES"]);
  for module in output.modules.values() {
    let types = module
      .types
      .iter()
      .map(|id| output.registry.get(*id).name.as_str())
      .join(", ");

    let mut row = Row::new();
    row.add_cell(
      Cell::new(&module.name)
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(module.handlers.len())
        .fg(colors.cell(Role::Progress))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(types).fg(colors.cell(Role::Detail)));
    table.add_row(row);
  }

  println!("{table}");

  let unassigned = output.report().unassigned;
  if !unassigned.is_empty() {
    println!("Unassigned: {}", unassigned.join(", "));
  }

  Ok(())
}
