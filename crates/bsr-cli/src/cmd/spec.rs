use crate::cmd::idea::RuleArgs;
use crate::cmd::messages;
use crate::output::{print_json, print_validation};
use crate::root::resolve_path;
use anyhow::Context;
use bsr_core::config::Config;
use bsr_core::paths;
use bsr_core::speckit::{idea_to_spec, validate_spec, GeneratorOptions};
use bsr_core::types::DocFormat;
use clap::Subcommand;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum SpecSubcommand {
    /// Validate an idea.yaml and render it as a specification
    Generate {
        /// Idea file (default: bmad.output_path from config)
        idea: Option<PathBuf>,
        /// Output file (default: speckit.output_path from config)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Output format: markdown or yaml
        #[arg(long)]
        format: Option<DocFormat>,
        /// Append the task breakdown section
        #[arg(long)]
        task_breakdown: bool,
        /// Add acceptance criteria placeholders to each feature
        #[arg(long)]
        acceptance_criteria: bool,
        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Check a rendered Markdown specification for expected sections
    Check {
        /// Specification file
        spec: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: SpecSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SpecSubcommand::Generate {
            idea,
            output,
            format,
            task_breakdown,
            acceptance_criteria,
            rules,
        } => {
            let config = Config::load_or_default(root).context("failed to load config")?;
            let mut options = config.spec_options();
            options.validation = rules.apply(options.validation);
            if let Some(f) = format {
                options.generator.format = f;
            }
            options.generator.include_task_breakdown |= task_breakdown;
            options.generator.include_acceptance_criteria |= acceptance_criteria;

            let idea = resolve_path(root, idea.as_deref().unwrap_or(&config.bmad.output_path));
            let output = match output {
                Some(p) => resolve_path(root, &p),
                None => resolve_path(root, &default_output(&options.generator)),
            };
            generate(&idea, &output, &options, json)
        }
        SpecSubcommand::Check { spec } => check(&resolve_path(root, &spec), json),
    }
}

/// The configured output path, with its extension swapped when it does not
/// match the selected format.
fn default_output(options: &GeneratorOptions) -> PathBuf {
    let path = &options.output_path;
    match DocFormat::from_extension(&paths::extension(path)) {
        Some(f) if f == options.format => path.clone(),
        _ => path.with_extension(options.format.extension()),
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn generate(
    idea: &Path,
    output: &Path,
    options: &bsr_core::speckit::SpecOptions,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = idea_to_spec(idea, output, options);

    if json {
        let generation = outcome.generation.as_ref().map(|g| {
            serde_json::json!({
                "success": g.success,
                "output": output,
                "errors": messages(&g.errors),
                "warnings": g.warnings,
            })
        });
        print_json(&serde_json::json!({
            "validation": outcome.validation,
            "generation": generation,
        }))?;
    } else {
        print_validation(&outcome.validation);
        if let Some(g) = &outcome.generation {
            if g.success {
                println!("Wrote {}", output.display());
            }
            for e in messages(&g.errors) {
                println!("[error] {e}");
            }
        }
    }

    if !outcome.validation.valid {
        anyhow::bail!("idea validation failed: {}", idea.display());
    }
    match outcome.generation {
        Some(g) if g.success => Ok(()),
        _ => anyhow::bail!("failed to generate specification"),
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn check(spec: &Path, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(spec)
        .with_context(|| format!("failed to read {}", spec.display()))?;
    let result = validate_spec(&content);

    if json {
        print_json(&result)?;
    } else {
        print_validation(&result);
    }
    Ok(())
}
