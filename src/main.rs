mod commands;
mod core;
mod docs;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::context::RepoContext;
use crate::core::error::{RelbookError, RelbookResult, print_error};
use std::path::PathBuf;

/// Release bookkeeping: version file, changelog, status document, tag and push
#[derive(Parser)]
#[command(name = "relbook")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Repository to operate on
  #[arg(long, global = true, default_value = ".")]
  repo: PathBuf,

  /// Verbosity level (-v, -vv, -vvv)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Record a release: update documents, commit, tag and push
  Release {
    /// Version being released (written verbatim to the version file)
    #[arg(value_name = "VERSION")]
    new_version: String,
    /// One-line summary for the changelog entry and tag message
    summary: String,
    /// Version planned next (recorded in the status document)
    next_target: String,
    /// Release date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,
    /// Remote to push to (default: from relbook.toml, else origin)
    #[arg(long)]
    remote: Option<String>,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    json: bool,
  },

  /// Commit all pending changes and push the current branch
  Push {
    /// Commit message
    message: String,
    /// Remote to push to (default: from relbook.toml, else origin)
    #[arg(long)]
    remote: Option<String>,
    /// List pending changes without committing
    #[arg(long)]
    dry_run: bool,
  },

  /// Show the recorded version, latest changelog entry and status fields
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a relbook.toml with the default settings
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr; stdout stays reserved for command output
fn init_tracing(verbose: u8) {
  use tracing_subscriber::{EnvFilter, fmt};

  let filter = match verbose {
    0 => "relbook=warn",
    1 => "relbook=info",
    2 => "relbook=debug",
    _ => "relbook=trace",
  };

  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> RelbookResult<()> {
  let ctx = RepoContext::build(&cli.repo)?;

  match cli.command {
    Commands::Release {
      new_version,
      summary,
      next_target,
      date,
      remote,
      dry_run,
      json,
    } => commands::run_release(
      &ctx,
      commands::ReleaseOptions {
        version: new_version,
        summary,
        next_target,
        date,
        remote,
        dry_run,
        json,
      },
    ),
    Commands::Push {
      message,
      remote,
      dry_run,
    } => commands::run_push(&ctx, &message, remote.as_deref(), dry_run),
    Commands::Status { json } => commands::run_status(&ctx, json),
    Commands::Init { force } => commands::run_init(&ctx, force),
  }
}

fn handle_error(err: RelbookError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
