use super::architecture::infer_architecture;
use super::model::{Feature, Project, UserStory};
use crate::error::BsrError;
use crate::idea::{Idea, IdeaFeature, IdeaPersona, Milestone, DEFAULT_VERSION};
use crate::types::Priority;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// TransformOptions
// ---------------------------------------------------------------------------

/// Options for the BMAD → idea projection. Doubles as the `bmad:` section
/// of `.bsr/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub include_personas: bool,
    /// Accepted for compatibility; stories only surface as feature links.
    #[serde(default)]
    pub include_stories: bool,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("idea.yaml")
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            version: default_version(),
            include_personas: false,
            include_stories: false,
            output_path: default_output_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// TransformResult
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct TransformResult {
    pub success: bool,
    /// Always populated, even when `success` is false.
    pub idea: Idea,
    pub errors: Vec<BsrError>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Priority normalization
// ---------------------------------------------------------------------------

pub fn normalize_priority(raw: Option<&str>) -> Priority {
    let Some(raw) = raw else {
        return Priority::P1;
    };
    match raw.to_uppercase().as_str() {
        "P0" | "HIGH" | "CRITICAL" => Priority::P0,
        "P1" | "MEDIUM" | "NORMAL" => Priority::P1,
        "P2" | "LOW" => Priority::P2,
        "P3" => Priority::P3,
        _ => Priority::P1,
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

pub fn transform_to_bsr(project: &Project, options: &TransformOptions) -> TransformResult {
    let mut errors = Vec::new();
    if project.name.is_empty() {
        errors.push(BsrError::required("name", "Project name is required"));
    }

    let personas = if options.include_personas {
        project
            .personas
            .iter()
            .map(|p| IdeaPersona {
                name: p.name.clone(),
                role: p.role.clone(),
                needs: p.goals.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let milestones = project
        .epics
        .iter()
        .enumerate()
        .map(|(i, epic)| Milestone {
            id: format!("M{}", i + 1),
            name: epic.title.clone(),
            features: epic.features.clone(),
            target_date: None,
        })
        .collect();

    let idea = Idea {
        name: project.name.clone(),
        version: options.version.clone(),
        description: project.description.clone(),
        vision: Some(project.vision.clone()).filter(|v| !v.is_empty()),
        goals: project.goals.clone(),
        features: project
            .features
            .iter()
            .map(|f| idea_feature(f, &project.user_stories))
            .collect(),
        personas,
        architecture: Some(infer_architecture(project)),
        milestones,
        ..Idea::default()
    };

    debug!(
        name = %idea.name,
        features = idea.features.len(),
        milestones = idea.milestones.len(),
        "transformed BMAD project"
    );

    TransformResult {
        success: errors.is_empty(),
        idea,
        errors,
        warnings: Vec::new(),
    }
}

fn idea_feature(feature: &Feature, stories: &[UserStory]) -> IdeaFeature {
    let needle = feature.name.to_lowercase();
    IdeaFeature {
        id: feature.id.clone(),
        name: feature.name.clone(),
        description: feature.description.clone(),
        priority: normalize_priority(feature.priority.as_deref()).to_string(),
        stories: stories
            .iter()
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .map(|s| s.id.clone())
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// Transform and write the idea to `path`. Nothing is written when the
/// projection fails.
pub fn transform_and_save(
    project: &Project,
    path: &Path,
    options: &TransformOptions,
) -> TransformResult {
    let mut result = transform_to_bsr(project, options);
    if !result.success {
        return result;
    }

    if let Err(e) = result.idea.save(path) {
        result.errors.push(BsrError::WriteFailed {
            path: path.to_path_buf(),
            cause: e.to_string(),
        });
        result.success = false;
        return result;
    }

    debug!(path = %path.display(), "wrote idea");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
