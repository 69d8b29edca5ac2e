//! SpecKit output: validate an idea document and render it as a
//! specification.

pub mod generator;
pub mod validator;

pub use generator::{generate_and_save, generate_spec, load_idea, GeneratorOptions, GeneratorResult};
pub use validator::{
    validate_idea, validate_idea_file, validate_spec, Severity, ValidationIssue, ValidationOptions,
    ValidationResult,
};

use crate::idea::Idea;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Combined options for the load → validate → render pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecOptions {
    #[serde(default)]
    pub validation: ValidationOptions,
    #[serde(default)]
    pub generator: GeneratorOptions,
}

#[derive(Debug)]
pub struct SpecOutcome {
    pub validation: ValidationResult,
    /// Present only when the idea validated.
    pub generation: Option<GeneratorResult>,
}

/// Load the idea at `idea_path`, validate it, and write the spec to
/// `output` if it is valid.
pub fn idea_to_spec(idea_path: &Path, output: &Path, options: &SpecOptions) -> SpecOutcome {
    let idea = match load_idea(idea_path) {
        Ok(idea) => idea,
        Err(e) => {
            debug!(path = %idea_path.display(), error = %e, "idea load failed");
            return SpecOutcome {
                validation: ValidationResult::file_error(format!(
                    "Failed to load idea from: {}",
                    idea_path.display()
                )),
                generation: None,
            };
        }
    };

    let validation = validate_idea(&idea, &options.validation);
    if !validation.valid {
        return SpecOutcome {
            validation,
            generation: None,
        };
    }

    let generation = generate_and_save(&idea, output, &options.generator);
    SpecOutcome {
        validation,
        generation: Some(generation),
    }
}

pub fn check_idea(path: &Path, options: &ValidationOptions) -> ValidationResult {
    validate_idea_file(path, options)
}

pub fn create_spec(idea: &Idea, options: &GeneratorOptions) -> GeneratorResult {
    generate_spec(idea, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
