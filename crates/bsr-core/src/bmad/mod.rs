//! BMAD input: parse a project directory or file, then project it into a
//! BSR idea document.

pub mod architecture;
pub(crate) mod fields;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod transformer;

pub use model::{Epic, Feature, Persona, Project, UserStory};
pub use parser::{parse_bmad_directory, parse_bmad_file, ParseResult};
pub use transformer::{
    normalize_priority, transform_and_save, transform_to_bsr, TransformOptions, TransformResult,
};

use crate::error::BsrError;
use crate::idea::Idea;
use std::path::Path;
use tracing::debug;

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BmadOutcome {
    pub parse: ParseResult,
    /// Present only when parsing succeeded.
    pub transform: Option<TransformResult>,
}

fn transform_parsed(parse: ParseResult, options: &TransformOptions) -> BmadOutcome {
    let transform = match (&parse.project, parse.success) {
        (Some(project), true) => Some(transform_to_bsr(project, options)),
        _ => None,
    };
    BmadOutcome { parse, transform }
}

pub fn bmad_to_bsr(dir: &Path, options: &TransformOptions) -> BmadOutcome {
    transform_parsed(parse_bmad_directory(dir), options)
}

pub fn bmad_file_to_bsr(file: &Path, options: &TransformOptions) -> BmadOutcome {
    transform_parsed(parse_bmad_file(file), options)
}

#[derive(Debug, Default)]
pub struct ConvertOutcome {
    pub success: bool,
    pub errors: Vec<BsrError>,
    pub warnings: Vec<String>,
    pub idea: Option<Idea>,
}

/// Parse `dir`, transform, and write the idea to `output`. Errors and
/// warnings from each stage are concatenated in stage order.
pub fn convert_bmad_to_bsr(dir: &Path, output: &Path, options: &TransformOptions) -> ConvertOutcome {
    save_outcome(bmad_to_bsr(dir, options), output)
}

/// Single-file counterpart of [`convert_bmad_to_bsr`].
pub fn convert_bmad_file_to_bsr(
    file: &Path,
    output: &Path,
    options: &TransformOptions,
) -> ConvertOutcome {
    save_outcome(bmad_file_to_bsr(file, options), output)
}

fn save_outcome(outcome: BmadOutcome, output: &Path) -> ConvertOutcome {
    let BmadOutcome { parse, transform } = outcome;

    let mut outcome = ConvertOutcome {
        errors: parse.errors,
        warnings: parse.warnings,
        ..ConvertOutcome::default()
    };

    let Some(transform) = transform else {
        return outcome;
    };
    outcome.errors.extend(transform.errors);
    outcome.warnings.extend(transform.warnings);
    if !transform.success {
        return outcome;
    }

    let idea = transform.idea;
    match idea.save(output) {
        Ok(()) => {
            debug!(path = %output.display(), "wrote idea");
            outcome.success = true;
        }
        Err(e) => outcome.errors.push(BsrError::WriteFailed {
            path: output.to_path_buf(),
            cause: e.to_string(),
        }),
    }
    outcome.idea = Some(idea);
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bmad_fixture(dir: &Path) {
        std::fs::write(
            dir.join("project.yaml"),
            "name: Pipeline\ndescription: End to end\ngoals: [ship]\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("features.yaml"),
            "- name: Search\n  description: Full text search\n  priority: high\n",
        )
        .unwrap();
    }

    #[test]
    fn bmad_to_bsr_transforms_on_success() {
        let dir = TempDir::new().unwrap();
        bmad_fixture(dir.path());
        let outcome = bmad_to_bsr(dir.path(), &TransformOptions::default());
        assert!(outcome.parse.success);
        let transform = outcome.transform.expect("transform ran");
        assert!(transform.success);
        assert_eq!(transform.idea.features[0].priority, "P0");
    }

    #[test]
    fn bmad_to_bsr_skips_transform_on_parse_failure() {
        let outcome = bmad_to_bsr(Path::new("/nonexistent/bmad"), &TransformOptions::default());
        assert!(!outcome.parse.success);
        assert!(outcome.transform.is_none());
    }

    #[test]
    fn bmad_file_to_bsr_uses_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("project.md");
        std::fs::write(&file, "# From Markdown\n\n## Goals\n- one\n").unwrap();
        let outcome = bmad_file_to_bsr(&file, &TransformOptions::default());
        let transform = outcome.transform.expect("transform ran");
        assert_eq!(transform.idea.name, "From Markdown");
        assert_eq!(transform.idea.goals, vec!["one"]);
    }

    #[test]
    fn convert_writes_idea() {
        let dir = TempDir::new().unwrap();
        bmad_fixture(dir.path());
        let out = dir.path().join("out/idea.yaml");

        let outcome = convert_bmad_to_bsr(dir.path(), &out, &TransformOptions::default());
        assert!(outcome.success);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.idea.as_ref().map(|i| i.name.as_str()), Some("Pipeline"));

        let loaded = Idea::load(&out).unwrap();
        assert_eq!(loaded.name, "Pipeline");
        assert_eq!(loaded.features.len(), 1);
    }

    #[test]
    fn convert_carries_parse_warnings_and_transform_errors() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("idea.yaml");

        let outcome = convert_bmad_to_bsr(dir.path(), &out, &TransformOptions::default());
        assert!(!outcome.success);
        assert_eq!(outcome.warnings, vec![parser::NO_PROJECT_FILE.to_string()]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].to_string(), "Project name is required");
        assert!(outcome.idea.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn convert_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("project.yml");
        std::fs::write(&file, "name: Single\ndescription: one file\n").unwrap();
        let out = dir.path().join("idea.yaml");

        let outcome = convert_bmad_file_to_bsr(&file, &out, &TransformOptions::default());
        assert!(outcome.success);
        assert_eq!(Idea::load(&out).unwrap().name, "Single");
    }

    #[test]
    fn convert_missing_directory() {
        let dir = TempDir::new().unwrap();
        let outcome = convert_bmad_to_bsr(
            &dir.path().join("missing"),
            &dir.path().join("idea.yaml"),
            &TransformOptions::default(),
        );
        assert!(!outcome.success);
        assert!(outcome.errors[0].is_not_found());
    }
}
