mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    bmad::BmadSubcommand, config::ConfigSubcommand, idea::IdeaSubcommand, spec::SpecSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bsr",
    about = "BSR Method document pipeline: BMAD project files to idea.yaml to specification",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .bsr/ or .git/)
    #[arg(long, global = true, env = "BSR_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log pipeline progress (equivalent to RUST_LOG=debug)
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and convert BMAD project output
    Bmad {
        #[command(subcommand)]
        subcommand: BmadSubcommand,
    },

    /// Validate BSR idea documents
    Idea {
        #[command(subcommand)]
        subcommand: IdeaSubcommand,
    },

    /// Generate and check specifications
    Spec {
        #[command(subcommand)]
        subcommand: SpecSubcommand,
    },

    /// Inspect and initialize .bsr/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Bmad { subcommand } => cmd::bmad::run(&root, subcommand, cli.json),
        Commands::Idea { subcommand } => cmd::idea::run(&root, subcommand, cli.json),
        Commands::Spec { subcommand } => cmd::spec::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
