use crate::error::BsrError;
use crate::idea::{Architecture, Idea, IdeaFeature, IdeaPersona};
use crate::types::Priority;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding. `field` is a path into the idea, e.g. `features[2].priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
            suggestion: None,
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Options / result
// ---------------------------------------------------------------------------

/// Validation knobs. Doubles as the `validation:` section of
/// `.bsr/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Promote every warning to an error.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub require_personas: bool,
    #[serde(default)]
    pub require_milestones: bool,
    #[serde(default)]
    pub require_architecture: bool,
    #[serde(default = "default_min_features")]
    pub min_features: u32,
    #[serde(default = "default_min_goals")]
    pub min_goals: u32,
}

fn default_min_features() -> u32 {
    1
}

fn default_min_goals() -> u32 {
    1
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict: false,
            require_personas: false,
            require_milestones: false,
            require_architecture: false,
            min_features: default_min_features(),
            min_goals: default_min_goals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Completeness, 0..=100.
    pub score: u32,
}

impl ValidationResult {
    /// An invalid result carrying a single `file` error and a zero score.
    pub fn file_error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![ValidationIssue::error("file", message)],
            warnings: Vec::new(),
            score: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Idea rubric
// ---------------------------------------------------------------------------

static SEMVER_RE: OnceLock<Regex> = OnceLock::new();

fn semver_re() -> &'static Regex {
    SEMVER_RE.get_or_init(|| {
        Regex::new(r"^\d+\.\d+\.\d+(-[a-zA-Z0-9.]+)?(\+[a-zA-Z0-9.]+)?$").unwrap()
    })
}

pub fn is_valid_semver(version: &str) -> bool {
    semver_re().is_match(version)
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[derive(Default)]
struct Findings {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    points: u32,
}

impl Findings {
    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue::error(field, message));
    }

    fn warn(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }
}

pub fn validate_idea(idea: &Idea, options: &ValidationOptions) -> ValidationResult {
    let mut f = Findings::default();

    if blank(&idea.name) {
        f.error("name", "Project name is required");
    } else {
        f.points += 10;
    }

    if blank(&idea.version) {
        f.error("version", "Version is required");
    } else if !is_valid_semver(&idea.version) {
        f.warn(
            ValidationIssue::warning("version", "Version should follow semver format (e.g., 1.0.0)")
                .with_suggestion("Use format: MAJOR.MINOR.PATCH"),
        );
        f.points += 3;
    } else {
        f.points += 5;
    }

    if blank(&idea.description) {
        f.error("description", "Description is required");
    } else if idea.description.chars().count() < 20 {
        f.warn(
            ValidationIssue::warning("description", "Description is too short")
                .with_suggestion("Provide at least 20 characters describing the project"),
        );
        f.points += 5;
    } else {
        f.points += 10;
    }

    check_goals(&mut f, &idea.goals, options);
    check_features(&mut f, &idea.features, options);

    match idea.vision.as_deref() {
        Some(v) if !blank(v) => f.points += 10,
        _ => f.warn(
            ValidationIssue::warning("vision", "Vision statement not provided")
                .with_suggestion("Add a vision to guide development decisions"),
        ),
    }

    let arch_missing = idea.architecture.as_ref().is_none_or(Architecture::is_empty);
    if options.require_architecture && arch_missing {
        f.error("architecture", "Architecture definition required");
    } else if let Some(arch) = &idea.architecture {
        check_architecture(&mut f, arch);
    } else {
        f.warn(
            ValidationIssue::warning("architecture", "No architecture defined")
                .with_suggestion("Define at least architecture type and main components"),
        );
    }

    if options.require_personas && idea.personas.is_empty() {
        f.error("personas", "At least one persona required");
    } else if !idea.personas.is_empty() {
        check_personas(&mut f, &idea.personas);
        f.points += capped(idea.personas.len(), 3, 10);
    }

    if options.require_milestones && idea.milestones.is_empty() {
        f.error("milestones", "At least one milestone required");
    } else if !idea.milestones.is_empty() {
        f.points += capped(idea.milestones.len(), 3, 10);
    }

    f.points += capped(idea.tech_decisions.len(), 2, 10);

    finish(f, options.strict)
}

/// `min(cap, n * each)` without overflow on absurd counts.
fn capped(n: usize, each: u32, cap: u32) -> u32 {
    u32::try_from(n)
        .unwrap_or(u32::MAX)
        .saturating_mul(each)
        .min(cap)
}

fn finish(f: Findings, strict: bool) -> ValidationResult {
    let Findings {
        mut errors,
        warnings,
        points,
    } = f;

    let warnings = if strict {
        errors.extend(warnings.into_iter().map(|w| ValidationIssue {
            severity: Severity::Error,
            ..w
        }));
        Vec::new()
    } else {
        warnings
    };

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
        score: points.min(100),
    }
}

fn check_goals(f: &mut Findings, goals: &[String], options: &ValidationOptions) {
    if goals.is_empty() {
        if options.min_goals > 0 {
            f.error(
                "goals",
                format!("At least {} goal(s) required", options.min_goals),
            );
        } else {
            f.warn(ValidationIssue::warning("goals", "No goals defined"));
        }
    } else if goals.len() < options.min_goals.max(1) as usize {
        f.warn(ValidationIssue::warning(
            "goals",
            format!(
                "Only {} goal(s) defined, recommend at least {}",
                goals.len(),
                options.min_goals
            ),
        ));
        f.points += 5;
    } else {
        f.points += 10;
    }
}

fn check_features(f: &mut Findings, features: &[IdeaFeature], options: &ValidationOptions) {
    if features.is_empty() {
        if options.min_features > 0 {
            f.error(
                "features",
                format!("At least {} feature(s) required", options.min_features),
            );
        } else {
            f.warn(ValidationIssue::warning("features", "No features defined"));
        }
        return;
    }

    if features.len() < options.min_features.max(1) as usize {
        f.warn(ValidationIssue::warning(
            "features",
            format!("Only {} feature(s) defined", features.len()),
        ));
    }

    let mut seen = HashSet::new();
    for (i, feature) in features.iter().enumerate() {
        let prefix = format!("features[{i}]");

        if feature.id.is_empty() {
            f.error(format!("{prefix}.id"), "Feature ID is required");
        } else if !seen.insert(feature.id.as_str()) {
            f.error(
                format!("{prefix}.id"),
                format!("Duplicate feature ID: {}", feature.id),
            );
        }

        if blank(&feature.name) {
            f.error(format!("{prefix}.name"), "Feature name is required");
        }

        if blank(&feature.description) {
            f.warn(ValidationIssue::warning(
                format!("{prefix}.description"),
                "Feature description is empty",
            ));
        }

        if feature.priority.parse::<Priority>().is_err() {
            f.warn(
                ValidationIssue::warning(
                    format!("{prefix}.priority"),
                    format!("Invalid priority: {}", feature.priority),
                )
                .with_suggestion("Use P0, P1, P2, or P3"),
            );
        }
    }

    f.points += capped(features.len(), 4, 20);
}

fn check_architecture(f: &mut Findings, arch: &Architecture) {
    match arch.style.as_deref() {
        Some(s) if !s.is_empty() => f.points += 5,
        _ => f.warn(ValidationIssue::warning(
            "architecture.type",
            "Architecture type not specified",
        )),
    }
    f.points += capped(arch.components.len(), 1, 5);
    f.points += capped(arch.integrations.len(), 1, 5);
}

fn check_personas(f: &mut Findings, personas: &[IdeaPersona]) {
    for (i, persona) in personas.iter().enumerate() {
        let prefix = format!("personas[{i}]");
        if persona.name.is_empty() {
            f.error(format!("{prefix}.name"), "Persona name is required");
        }
        if persona.role.is_empty() {
            f.warn(ValidationIssue::warning(
                format!("{prefix}.role"),
                "Persona role not specified",
            ));
        }
        if persona.needs.is_empty() {
            f.warn(ValidationIssue::warning(
                format!("{prefix}.needs"),
                "Persona has no needs defined",
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// File form
// ---------------------------------------------------------------------------

/// Load and validate an idea file. Load failures become a single `file`
/// error with a zero score.
pub fn validate_idea_file(path: &Path, options: &ValidationOptions) -> ValidationResult {
    match Idea::load(path) {
        Ok(idea) => validate_idea(&idea, options),
        Err(e @ BsrError::NotFound { .. }) | Err(e @ BsrError::Parse { .. }) => {
            ValidationResult::file_error(e.to_string())
        }
        Err(e) => ValidationResult::file_error(format!("Failed to read {}: {e}", path.display())),
    }
}

// ---------------------------------------------------------------------------
// Rendered spec check
// ---------------------------------------------------------------------------

pub const REQUIRED_SECTIONS: &[&str] = &["Overview", "Architecture", "Features"];
pub const OPTIONAL_SECTIONS: &[&str] = &["Technical Decisions", "Personas", "Milestones", "Constraints"];
pub const MIN_SPEC_LEN: usize = 500;

/// Heuristic completeness check for a rendered Markdown specification.
/// Only produces warnings, so the result is always valid.
pub fn validate_spec(content: &str) -> ValidationResult {
    let lower = content.to_lowercase();
    let has_headers = content.contains("## ");
    let mut f = Findings::default();

    for section in REQUIRED_SECTIONS {
        if has_headers && lower.contains(&section.to_lowercase()) {
            f.points += 15;
        } else {
            f.warn(ValidationIssue::warning(
                "sections",
                format!("Missing recommended section: {section}"),
            ));
        }
    }

    for section in OPTIONAL_SECTIONS {
        if lower.contains(&section.to_lowercase()) {
            f.points += 5;
        }
    }

    if content.starts_with("# ") {
        f.points += 10;
    } else {
        f.warn(ValidationIssue::warning(
            "title",
            "Spec should start with a title (# Title)",
        ));
    }

    if content.chars().count() < MIN_SPEC_LEN {
        f.warn(ValidationIssue::warning(
            "content",
            "Specification seems incomplete (less than 500 characters)",
        ));
    } else {
        f.points += 10;
    }

    finish(f, false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idea::Milestone;
    use tempfile::TempDir;

    fn feature(id: &str, name: &str, priority: &str) -> IdeaFeature {
        IdeaFeature {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            priority: priority.to_string(),
            stories: Vec::new(),
        }
    }

    fn minimal_idea() -> Idea {
        Idea {
            name: "Test Project".to_string(),
            version: "1.0.0".to_string(),
            description: "A complete test project description".to_string(),
            goals: vec!["Goal 1".to_string()],
            features: vec![feature("F1", "Feature 1", "P1")],
            ..Idea::default()
        }
    }

    fn messages(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn minimal_idea_is_valid_with_partial_score() {
        let result = validate_idea(&minimal_idea(), &ValidationOptions::default());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.score, 39);
        assert!(result.score > 0 && result.score < 100);
        // vision and architecture are recommended
        assert!(messages(&result.warnings).contains(&"Vision statement not provided"));
        assert!(messages(&result.warnings).contains(&"No architecture defined"));
    }

    #[test]
    fn missing_required_fields() {
        let result = validate_idea(&Idea::default(), &ValidationOptions::default());
        assert!(!result.valid);
        let msgs = messages(&result.errors);
        assert!(msgs.contains(&"Project name is required"));
        assert!(msgs.contains(&"Version is required"));
        assert!(msgs.contains(&"Description is required"));
        assert!(msgs.contains(&"At least 1 goal(s) required"));
        assert!(msgs.contains(&"At least 1 feature(s) required"));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn whitespace_name_counts_as_missing() {
        let idea = Idea {
            name: "   ".to_string(),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert_eq!(result.errors[0].field, "name");
    }

    #[test]
    fn semver_check() {
        assert!(is_valid_semver("1.0.0"));
        assert!(is_valid_semver("1.0.0-beta.1+build.5"));
        assert!(!is_valid_semver("1.0"));
        assert!(!is_valid_semver("v1.0.0"));

        let idea = Idea {
            version: "1.0".to_string(),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        let w = result
            .warnings
            .iter()
            .find(|w| w.field == "version")
            .unwrap();
        assert_eq!(w.suggestion.as_deref(), Some("Use format: MAJOR.MINOR.PATCH"));
        assert_eq!(result.score, 37);
    }

    #[test]
    fn short_description_warns() {
        let idea = Idea {
            description: "Too short".to_string(),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert!(result.valid);
        assert!(messages(&result.warnings).contains(&"Description is too short"));
    }

    #[test]
    fn zero_minimums_downgrade_to_warnings() {
        let idea = Idea {
            goals: Vec::new(),
            features: Vec::new(),
            ..minimal_idea()
        };
        let opts = ValidationOptions {
            min_goals: 0,
            min_features: 0,
            ..ValidationOptions::default()
        };
        let result = validate_idea(&idea, &opts);
        assert!(result.valid);
        let msgs = messages(&result.warnings);
        assert!(msgs.contains(&"No goals defined"));
        assert!(msgs.contains(&"No features defined"));
    }

    #[test]
    fn below_minimum_counts_warn() {
        let opts = ValidationOptions {
            min_goals: 3,
            min_features: 2,
            ..ValidationOptions::default()
        };
        let result = validate_idea(&minimal_idea(), &opts);
        assert!(result.valid);
        let msgs = messages(&result.warnings);
        assert!(msgs.contains(&"Only 1 goal(s) defined, recommend at least 3"));
        assert!(msgs.contains(&"Only 1 feature(s) defined"));
    }

    #[test]
    fn feature_checks() {
        let mut bad_priority = feature("F1", "Dup", "HIGH");
        bad_priority.description = String::new();
        let idea = Idea {
            features: vec![
                feature("F1", "First", "P0"),
                bad_priority,
                feature("", "", "P2"),
            ],
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert!(!result.valid);

        let errs: Vec<(&str, &str)> = result
            .errors
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect();
        assert!(errs.contains(&("features[1].id", "Duplicate feature ID: F1")));
        assert!(errs.contains(&("features[2].id", "Feature ID is required")));
        assert!(errs.contains(&("features[2].name", "Feature name is required")));

        let warns = messages(&result.warnings);
        assert!(warns.contains(&"Feature description is empty"));
        assert!(warns.contains(&"Invalid priority: HIGH"));
    }

    #[test]
    fn architecture_scoring() {
        let idea = Idea {
            architecture: Some(Architecture {
                style: Some("monolith".to_string()),
                components: vec!["backend".to_string(), "database".to_string()],
                integrations: vec!["github".to_string()],
            }),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert_eq!(result.score, 39 + 5 + 2 + 1);
        assert!(!messages(&result.warnings).contains(&"No architecture defined"));
    }

    #[test]
    fn empty_architecture_warns_on_type() {
        let idea = Idea {
            architecture: Some(Architecture::default()),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        let w = result
            .warnings
            .iter()
            .find(|w| w.field == "architecture.type");
        assert!(w.is_some());
    }

    #[test]
    fn required_sections() {
        let opts = ValidationOptions {
            require_architecture: true,
            require_personas: true,
            require_milestones: true,
            ..ValidationOptions::default()
        };
        let idea = Idea {
            architecture: Some(Architecture::default()),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &opts);
        let msgs = messages(&result.errors);
        assert!(msgs.contains(&"Architecture definition required"));
        assert!(msgs.contains(&"At least one persona required"));
        assert!(msgs.contains(&"At least one milestone required"));
    }

    #[test]
    fn persona_and_milestone_checks() {
        let idea = Idea {
            personas: vec![IdeaPersona::default()],
            milestones: vec![Milestone {
                id: "M1".to_string(),
                name: "MVP".to_string(),
                ..Milestone::default()
            }],
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert!(messages(&result.errors).contains(&"Persona name is required"));
        let warns = messages(&result.warnings);
        assert!(warns.contains(&"Persona role not specified"));
        assert!(warns.contains(&"Persona has no needs defined"));
        assert_eq!(result.score, 39 + 3 + 3);
    }

    #[test]
    fn tech_decisions_bonus_is_capped() {
        let mut idea = minimal_idea();
        for i in 0..8 {
            idea.tech_decisions
                .insert(format!("k{i}"), "v".to_string());
        }
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert_eq!(result.score, 39 + 10);
    }

    #[test]
    fn strict_promotes_warnings() {
        let opts = ValidationOptions {
            strict: true,
            ..ValidationOptions::default()
        };
        let result = validate_idea(&minimal_idea(), &opts);
        assert!(!result.valid);
        assert!(result.warnings.is_empty());
        let vision = result
            .errors
            .iter()
            .find(|e| e.field == "vision")
            .unwrap();
        assert_eq!(vision.severity, Severity::Error);
        assert!(vision.suggestion.is_some());
    }

    #[test]
    fn score_caps_at_100() {
        let idea = Idea {
            vision: Some("A clear vision".to_string()),
            goals: vec!["a".to_string(), "b".to_string()],
            features: (1..=6)
                .map(|i| feature(&format!("F{i}"), "Feature", "P1"))
                .collect(),
            architecture: Some(Architecture {
                style: Some("monolith".to_string()),
                components: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
                integrations: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
            }),
            personas: (0..4)
                .map(|_| IdeaPersona {
                    name: "P".to_string(),
                    role: "R".to_string(),
                    needs: vec!["n".to_string()],
                })
                .collect(),
            milestones: (0..4).map(|_| Milestone::default()).collect(),
            tech_decisions: (0..5).map(|i| (format!("k{i}"), "v".to_string())).collect(),
            ..minimal_idea()
        };
        let result = validate_idea(&idea, &ValidationOptions::default());
        assert!(result.valid);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn file_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("none.yaml");
        let result = validate_idea_file(&missing, &ValidationOptions::default());
        assert!(!result.valid);
        assert_eq!(result.score, 0);
        assert_eq!(result.errors[0].field, "file");
        assert!(result.errors[0].message.starts_with("File not found: "));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "name: [unclosed").unwrap();
        let result = validate_idea_file(&bad, &ValidationOptions::default());
        assert!(!result.valid);
        assert!(result.errors[0].message.starts_with("Failed to parse YAML"));
    }

    #[test]
    fn file_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("idea.yaml");
        minimal_idea().save(&path).unwrap();
        let result = validate_idea_file(&path, &ValidationOptions::default());
        assert!(result.valid);
        assert_eq!(result.score, 39);
    }

    #[test]
    fn spec_check_complete_document() {
        let mut spec = String::from(
            "# Demo - Technical Specification\n\n## 1. Overview\ntext\n\n## 2. Architecture\n\n## 3. Technical Decisions\n\n## 4. Features\n\n## 5. User Personas\n\n## 6. Milestones\n\n## 7. Constraints\n",
        );
        spec.push_str(&"filler ".repeat(80));
        let result = validate_spec(&spec);
        assert!(result.valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.score, 45 + 20 + 10 + 10);
    }

    #[test]
    fn spec_check_bare_document() {
        let result = validate_spec("just some notes");
        assert!(result.valid);
        assert_eq!(result.score, 0);
        let msgs = messages(&result.warnings);
        assert!(msgs.contains(&"Missing recommended section: Overview"));
        assert!(msgs.contains(&"Spec should start with a title (# Title)"));
        assert!(msgs.contains(&"Specification seems incomplete (less than 500 characters)"));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: ValidationOptions = serde_yaml::from_str("strict: true\n").unwrap();
        assert!(opts.strict);
        assert_eq!(opts.min_features, 1);
        assert_eq!(opts.min_goals, 1);
    }
}
