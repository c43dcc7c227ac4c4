#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fleet: dependency-graph insights for beads issues",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides `FORMAT` and TTY detection).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Run as if started in this directory.
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Show dependency-graph insights",
        long_about = "Compute bottlenecks, keystones, influencers, hubs, authorities, \
                      cycles and density for the project's issues.",
        after_help = "EXAMPLES:\n    # Insights for the current project\n    fleet insights\n\n    # Top 5 per list, machine-readable\n    fleet insights --top 5 --json\n\n    # Another project, labelled\n    fleet -C ../api insights --source api"
    )]
    Insights(cmd::insights::InsightsArgs),

    #[command(
        next_help_heading = "Read",
        about = "List dependency cycles",
        long_about = "List groups of live issues that transitively depend on each other.",
        after_help = "EXAMPLES:\n    # Show cycles\n    fleet cycles\n\n    # Emit machine-readable output\n    fleet cycles --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    fleet completions bash > ~/.local/share/bash-completion/completions/fleet"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLEET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "fleet=debug,info"
        } else {
            "fleet=info,warn"
        })
    });

    let format = env::var("FLEET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = cli.directory.clone().map_or_else(env::current_dir, Ok)?;
    let output = cli.output_mode();
    debug!(root = %project_root.display(), ?output, "resolved invocation");

    match cli.command {
        Commands::Insights(ref args) => {
            cmd::insights::run_insights(args, output, &project_root)
        }
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
