mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_env, cmd_info, cmd_resolve};
use output::print_error;

/// smith - Build environments and recipe resolution for Blacksmith
#[derive(Parser)]
#[command(name = "smith")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build an environment from a configuration file and print its variables
  Env {
    /// Path to the build options file (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Write a variable: NAME=VALUE, optionally suffixed with @merge, @append, @prepend, @replace or @auto
    #[arg(long = "set", value_name = "NAME=VALUE[@OP]")]
    set: Vec<String>,

    /// Overlay a variable on the output without storing it: NAME=VALUE
    #[arg(long = "extra", value_name = "NAME=VALUE")]
    extra: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Resolve a component descriptor against a recipe registry
  Resolve {
    /// Path to the component descriptor (JSON)
    component: PathBuf,

    /// Path to the recipe registry (TOML)
    #[arg(short, long)]
    recipes: PathBuf,

    /// Required component id (defaults to the descriptor's id)
    #[arg(long)]
    id: Option<String>,

    /// Required version range (defaults to the descriptor's version)
    #[arg(long)]
    version: Option<String>,
  },

  /// Show platform and default directory information
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Env {
      config,
      set,
      extra,
      json,
    } => cmd_env(&config, &set, &extra, json),
    Commands::Resolve {
      component,
      recipes,
      id,
      version,
    } => cmd_resolve(&component, &recipes, id, version),
    Commands::Info => cmd_info(),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
