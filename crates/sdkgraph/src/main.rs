#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

fn init_tracing(verbose: bool) {
  let default_filter = if verbose { "sdkgraph=debug" } else { "sdkgraph=warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  let fmt_layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false);

  if tracing_subscriber::registry()
    .with(filter)
    .with(fmt_layer)
    .try_init()
    .is_err()
  {
    eprintln!("Warning: tracing subscriber already initialized");
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.command.is_verbose());
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, &colors).await?,
      ListCommands::Modules { input, config } => {
        ui::commands::list_modules(&input, config.as_deref(), &colors).await?;
      }
    },
    Commands::Build(command) => {
      let config = ui::commands::BuildConfig::from(command);
      ui::commands::build_graph(config, &colors).await?;
    }
  }

  Ok(())
}
