use crate::output::{print_json, print_validation};
use crate::root::resolve_path;
use anyhow::Context;
use bsr_core::config::Config;
use bsr_core::speckit::{check_idea, ValidationOptions};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum IdeaSubcommand {
    /// Validate an idea.yaml and print its completeness score
    Validate {
        /// Idea file (default: bmad.output_path from config)
        idea: Option<PathBuf>,
        #[command(flatten)]
        rules: RuleArgs,
    },
}

/// Overrides for the `validation:` config section.
#[derive(Args, Debug, Default)]
pub struct RuleArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
    #[arg(long)]
    pub require_personas: bool,
    #[arg(long)]
    pub require_milestones: bool,
    #[arg(long)]
    pub require_architecture: bool,
    #[arg(long, value_name = "N")]
    pub min_features: Option<u32>,
    #[arg(long, value_name = "N")]
    pub min_goals: Option<u32>,
}

impl RuleArgs {
    pub fn apply(&self, mut options: ValidationOptions) -> ValidationOptions {
        options.strict |= self.strict;
        options.require_personas |= self.require_personas;
        options.require_milestones |= self.require_milestones;
        options.require_architecture |= self.require_architecture;
        if let Some(n) = self.min_features {
            options.min_features = n;
        }
        if let Some(n) = self.min_goals {
            options.min_goals = n;
        }
        options
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: IdeaSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        IdeaSubcommand::Validate { idea, rules } => validate(root, idea, &rules, json),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, idea: Option<PathBuf>, rules: &RuleArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let options = rules.apply(config.validation);
    let path = resolve_path(root, idea.as_deref().unwrap_or(&config.bmad.output_path));

    let result = check_idea(&path, &options);

    if json {
        print_json(&result)?;
    } else {
        print_validation(&result);
    }

    if !result.valid {
        anyhow::bail!("idea validation failed: {}", path.display());
    }
    Ok(())
}
