use crate::cmd::messages;
use crate::output::print_json;
use crate::root::resolve_path;
use anyhow::Context;
use bsr_core::bmad::{
    convert_bmad_file_to_bsr, convert_bmad_to_bsr, parse_bmad_directory, parse_bmad_file,
    ConvertOutcome, ParseResult,
};
use bsr_core::config::Config;
use clap::Subcommand;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum BmadSubcommand {
    /// Parse a BMAD directory or single project file and summarize it
    Parse {
        /// BMAD output directory, or a project .yaml/.yml/.md file
        path: PathBuf,
    },

    /// Parse, transform, and write a BSR idea.yaml
    Convert {
        /// BMAD output directory, or a project .yaml/.yml/.md file
        path: PathBuf,
        /// Output file (default: bmad.output_path from config)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Version written to the idea (default: bmad.version from config)
        #[arg(id = "idea_version", long = "idea-version", value_name = "VERSION")]
        version: Option<String>,
        /// Carry BMAD personas into the idea
        #[arg(long)]
        include_personas: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: BmadSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        BmadSubcommand::Parse { path } => parse(root, &path, json),
        BmadSubcommand::Convert {
            path,
            output,
            version,
            include_personas,
        } => convert(root, &path, output, version, include_personas, json),
    }
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

fn parse(root: &Path, path: &Path, json: bool) -> anyhow::Result<()> {
    let path = resolve_path(root, path);
    let result = if path.is_dir() {
        parse_bmad_directory(&path)
    } else {
        parse_bmad_file(&path)
    };

    if json {
        print_json(&serde_json::json!({
            "success": result.success,
            "project": result.project,
            "errors": messages(&result.errors),
            "warnings": result.warnings,
        }))?;
    } else {
        print_parse_summary(&result);
    }

    if !result.success {
        anyhow::bail!("failed to parse BMAD input at {}", path.display());
    }
    Ok(())
}

fn print_parse_summary(result: &ParseResult) {
    if let Some(project) = &result.project {
        let name = if project.name.is_empty() {
            "(unnamed)"
        } else {
            project.name.as_str()
        };
        println!("Project:    {name}");
        println!("Goals:      {}", project.goals.len());
        println!("Features:   {}", project.features.len());
        println!("Personas:   {}", project.personas.len());
        println!("Epics:      {}", project.epics.len());
        println!("Stories:    {}", project.user_stories.len());
    }
    print_diagnostics(&messages(&result.errors), &result.warnings);
}

fn print_diagnostics(errors: &[String], warnings: &[String]) {
    for w in warnings {
        println!("[warning] {w}");
    }
    for e in errors {
        println!("[error] {e}");
    }
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

fn convert(
    root: &Path,
    path: &Path,
    output: Option<PathBuf>,
    version: Option<String>,
    include_personas: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let mut options = config.bmad;
    if let Some(v) = version {
        options.version = v;
    }
    options.include_personas |= include_personas;

    let input = resolve_path(root, path);
    let output = resolve_path(root, output.as_deref().unwrap_or(&options.output_path));

    let outcome = if input.is_dir() {
        convert_bmad_to_bsr(&input, &output, &options)
    } else {
        convert_bmad_file_to_bsr(&input, &output, &options)
    };

    if json {
        print_json(&serde_json::json!({
            "success": outcome.success,
            "output": output,
            "errors": messages(&outcome.errors),
            "warnings": outcome.warnings,
            "idea": outcome.idea,
        }))?;
    } else {
        print_convert_summary(&outcome, &output);
    }

    if !outcome.success {
        anyhow::bail!("BMAD conversion failed");
    }
    Ok(())
}

fn print_convert_summary(outcome: &ConvertOutcome, output: &Path) {
    if outcome.success {
        if let Some(idea) = &outcome.idea {
            println!(
                "Wrote {} ({} features, {} milestones)",
                output.display(),
                idea.features.len(),
                idea.milestones.len()
            );
        }
    }
    print_diagnostics(&messages(&outcome.errors), &outcome.warnings);
}
