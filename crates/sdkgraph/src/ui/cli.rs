use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "sdkgraph")]
#[command(author, version, about = "OpenAPI to SDK type graph builder")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI description
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Build the type graph and write it as a JSON report
  Build(BuildCommand),
}

impl Commands {
  pub fn is_verbose(&self) -> bool {
    matches!(self, Self::Build(command) if command.verbose)
  }
}

#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
  /// Path to the OpenAPI description (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Module configuration mapping type names to modules (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Where the JSON report is written; stdout when omitted
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Enable verbose output with cycle details and warnings
  #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations with the handler names they build into
  Operations {
    /// Path to the OpenAPI description (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List modules with their handler and type counts
  Modules {
    /// Path to the OpenAPI description (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Module configuration mapping type names to modules (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_build_arguments() {
    let cli = Cli::try_parse_from(["sdkgraph", "build", "-i", "api.yaml", "-c", "modules.json", "-v"])
      .expect("arguments should parse");

    let Commands::Build(command) = &cli.command else {
      panic!("expected build command");
    };
    assert_eq!(command.input, PathBuf::from("api.yaml"));
    assert_eq!(command.config, Some(PathBuf::from("modules.json")));
    assert_eq!(command.output, None);
    assert!(cli.command.is_verbose());
  }

  #[test]
  fn test_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["sdkgraph", "build", "-i", "api.yaml", "-v", "-q"]).is_err());
  }
}
