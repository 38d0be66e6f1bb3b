mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blueprint_lib::consts::DEFAULT_PROJECT_FILE;

use crate::cmd::OracleArgs;
use crate::output::print_error;

/// blueprint - dependency-aware build planning for libraries and applications
#[derive(Parser)]
#[command(name = "bp")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a project file and validate its dependency graph
  Check {
    #[arg(default_value = DEFAULT_PROJECT_FILE)]
    file: PathBuf,
  },

  /// Show the build plan: order, closures and eligibility of every item
  Plan {
    #[arg(default_value = DEFAULT_PROJECT_FILE)]
    file: PathBuf,

    #[command(flatten)]
    oracle: OracleArgs,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
  },

  /// Print items dependency-first, one per line
  Order {
    #[arg(default_value = DEFAULT_PROJECT_FILE)]
    file: PathBuf,

    /// Only items that should be built
    #[arg(long)]
    eligible: bool,

    #[command(flatten)]
    oracle: OracleArgs,
  },

  /// Show the dependencies of one item
  Deps {
    /// Item identity: `name`, `lib:name` or `app:name`
    item: String,

    #[arg(default_value = DEFAULT_PROJECT_FILE)]
    file: PathBuf,

    /// Show the items that depend on ITEM instead
    #[arg(short, long)]
    reverse: bool,

    /// Print as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show version and configuration
  Info,
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Check { file } => cmd::cmd_check(&file, cli.verbose),
    Commands::Plan { file, oracle, json } => cmd::cmd_plan(&file, &oracle, cli.verbose, json),
    Commands::Order { file, eligible, oracle } => cmd::cmd_order(&file, eligible, &oracle),
    Commands::Deps {
      item,
      file,
      reverse,
      json,
    } => cmd::cmd_deps(&item, &file, reverse, json),
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
