use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use tokio::io::AsyncWriteExt as _;

use sdkgraph::{
  generator::{metrics::GenerationStats, orchestrator::Orchestrator},
  utils::{load_config, load_document},
};

use crate::ui::{BuildCommand, Colors, colors::Role};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
  pub input: PathBuf,
  pub config: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub verbose: bool,
  pub quiet: bool,
}

impl From<BuildCommand> for BuildConfig {
  fn from(command: BuildCommand) -> Self {
    let BuildCommand {
      input,
      config,
      output,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      config,
      output,
      verbose,
      quiet,
    }
  }
}

impl BuildConfig {
  async fn write_report(&self, json: String) -> anyhow::Result<()> {
    match &self.output {
      Some(path) => {
        if let Some(parent) = path.parent()
          && !parent.as_os_str().is_empty()
        {
          tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json)
          .await
          .with_context(|| format!("failed to write {}", path.display()))
      }
      None => {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
      }
    }
  }

  /// Progress goes to stderr when the report itself is written to stdout.
  fn logs_to_stderr(&self) -> bool {
    self.output.is_none()
  }
}

struct BuildLogger<'a> {
  config: &'a BuildConfig,
  colors: &'a Colors,
}

impl<'a> BuildLogger<'a> {
  fn new(config: &'a BuildConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn line(&self, line: &str) {
    if self.config.quiet {
      return;
    }
    if self.config.logs_to_stderr() {
      eprintln!("{line}");
    } else {
      println!("{line}");
    }
  }

  fn info(&self, message: &str) {
    self.line(&format!("{} {message}", format_timestamp().with(self.colors.get(Role::Timestamp))));
  }

  fn stat(&self, label: &str, value: String) {
    self.line(&format!(
      "            {:<25} {}",
      label.with(self.colors.get(Role::Label)),
      value.with(self.colors.get(Role::Value))
    ));
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI description from: {}", self.config.input.display())
        .with(self.colors.get(Role::Progress))
        .to_string(),
    );
    if let Some(path) = &self.config.config {
      self.info(
        &format!("Loading module configuration from: {}", path.display())
          .with(self.colors.get(Role::Progress))
          .to_string(),
      );
    }
  }

  fn log_building(&self) {
    self.info(&"Building type graph...".with(self.colors.get(Role::Progress)).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Named types:", stats.named_types.to_string());
    if stats.aliases > 0 {
      self.stat("", format!("{} aliases", stats.aliases));
    }
    self.stat("", format!("{} anonymous types", stats.anonymous_types));
    self.stat("Handlers converted:", stats.handlers_converted.to_string());
    self.stat("Modules:", stats.modules.to_string());
    self.stat(
      "Assigned types:",
      format!(
        "{} explicit, {} by reachability",
        stats.explicit_assignments, stats.reachability_assignments
      ),
    );
    if stats.unassigned_types > 0 {
      self.stat("Unassigned types:", stats.unassigned_types.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        self.line(&format!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.get(Role::Cycle)),
          cycle.join(" -> ").with(self.colors.get(Role::Detail))
        ));
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet || !self.config.verbose {
      return;
    }

    eprintln!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.get(Role::Warning)),
        format!("{warning}").with(self.colors.get(Role::Detail))
      );
    }
  }

  fn log_writing(&self) {
    let target = self
      .config
      .output
      .as_ref()
      .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
    self.info(&format!("Writing report to: {target}").with(self.colors.get(Role::Progress)).to_string());
  }

  fn log_success(&self) {
    self.line("");
    self.line(&format!(
      "{} {}",
      format_timestamp().with(self.colors.get(Role::Timestamp)),
      "Successfully built type graph".with(self.colors.get(Role::Success))
    ));
  }
}

pub async fn build_graph(config: BuildConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = BuildLogger::new(&config, colors);

  logger.log_loading();
  let document = load_document(&config.input).await?;
  let module_config = load_config(config.config.as_deref()).await?;

  logger.log_building();
  let output = Orchestrator::new(document, module_config).build()?;
  logger.print_statistics(&output.stats);

  let json = output.report().to_json()?;
  logger.log_writing();
  config.write_report(json).await?;

  logger.log_success();
  Ok(())
}
