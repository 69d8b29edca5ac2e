use crate::error::{BsrError, Result};
use crate::idea::{Architecture, Idea, IdeaFeature, IdeaPersona, Milestone};
use crate::io::atomic_write;
use crate::types::{DocFormat, Priority};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// GeneratorOptions
// ---------------------------------------------------------------------------

/// Rendering options. Doubles as the `speckit:` section of
/// `.bsr/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default)]
    pub format: DocFormat,
    #[serde(default)]
    pub include_task_breakdown: bool,
    #[serde(default)]
    pub include_acceptance_criteria: bool,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("spec.md")
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            format: DocFormat::default(),
            include_task_breakdown: false,
            include_acceptance_criteria: false,
            output_path: default_output_path(),
        }
    }
}

#[derive(Debug, Default)]
pub struct GeneratorResult {
    pub success: bool,
    pub content: Option<String>,
    pub errors: Vec<BsrError>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn load_idea(path: &Path) -> Result<Idea> {
    Idea::load(path)
}

pub fn generate_spec(idea: &Idea, options: &GeneratorOptions) -> GeneratorResult {
    render_at(idea, options, Utc::now())
}

fn render_at(idea: &Idea, options: &GeneratorOptions, now: DateTime<Utc>) -> GeneratorResult {
    if idea.name.is_empty() {
        return GeneratorResult {
            success: false,
            errors: vec![BsrError::required("name", "Project name is required")],
            ..GeneratorResult::default()
        };
    }

    let content = match options.format {
        DocFormat::Markdown => Ok(render_markdown(idea, options, now)),
        DocFormat::Yaml => render_yaml(idea, options, now),
    };

    match content {
        Ok(content) => GeneratorResult {
            success: true,
            content: Some(content),
            ..GeneratorResult::default()
        },
        Err(e) => GeneratorResult {
            success: false,
            errors: vec![e],
            ..GeneratorResult::default()
        },
    }
}

/// Render and write to `path`. Nothing is written when rendering fails.
pub fn generate_and_save(idea: &Idea, path: &Path, options: &GeneratorOptions) -> GeneratorResult {
    let mut result = generate_spec(idea, options);
    let Some(content) = result.content.as_deref().filter(|_| result.success) else {
        return result;
    };

    if let Err(e) = atomic_write(path, content.as_bytes()) {
        result.errors.push(BsrError::WriteFailed {
            path: path.to_path_buf(),
            cause: e.to_string(),
        });
        result.success = false;
        return result;
    }

    debug!(path = %path.display(), format = %options.format, "wrote spec");
    result
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

/// Priority buckets in render order: `P0`..`P3`, then any other value in
/// first-seen order. An empty priority is treated as `P1`.
fn group_by_priority(features: &[IdeaFeature]) -> Vec<(String, Vec<&IdeaFeature>)> {
    let mut groups: Vec<(String, Vec<&IdeaFeature>)> = Priority::all()
        .iter()
        .map(|p| (p.to_string(), Vec::new()))
        .collect();

    for feature in features {
        let key = if feature.priority.is_empty() {
            Priority::default().as_str()
        } else {
            feature.priority.as_str()
        };
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, bucket)) => bucket.push(feature),
            None => groups.push((key.to_string(), vec![feature])),
        }
    }

    groups.retain(|(_, bucket)| !bucket.is_empty());
    groups
}

fn render_markdown(idea: &Idea, options: &GeneratorOptions, now: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut push = |s: String| lines.push(s);

    push(format!("# {} - Technical Specification", idea.name));
    push(String::new());
    push(format!("**Version:** {}", idea.version));
    push(format!("**Generated:** {}", now.format("%Y-%m-%d")));
    push(String::new());

    push("## 1. Overview".into());
    push(String::new());
    push(idea.description.clone());
    push(String::new());

    if let Some(vision) = idea.vision.as_deref().filter(|v| !v.is_empty()) {
        push("### Vision".into());
        push(String::new());
        push(vision.to_string());
        push(String::new());
    }

    if !idea.goals.is_empty() {
        push("### Goals".into());
        push(String::new());
        for goal in &idea.goals {
            push(format!("- {goal}"));
        }
        push(String::new());
    }

    push("## 2. Architecture".into());
    push(String::new());
    match &idea.architecture {
        Some(arch) => markdown_architecture(arch, &mut push),
        None => {
            push("*Architecture to be defined*".into());
            push(String::new());
        }
    }

    if !idea.tech_decisions.is_empty() {
        push("## 3. Technical Decisions".into());
        push(String::new());
        push("| Decision | Choice |".into());
        push("|----------|--------|".into());
        for (key, value) in &idea.tech_decisions {
            push(format!("| {key} | {value} |"));
        }
        push(String::new());
    }

    push("## 4. Features".into());
    push(String::new());
    for (priority, features) in group_by_priority(&idea.features) {
        push(format!("### {priority} Features"));
        push(String::new());
        for feature in features {
            push(format!("#### {}: {}", feature.id, feature.name));
            push(String::new());
            push(feature.description.clone());
            push(String::new());
            if options.include_acceptance_criteria {
                push("**Acceptance Criteria:**".into());
                push(String::new());
                push("- [ ] TBD".into());
                push(String::new());
            }
        }
    }

    if !idea.personas.is_empty() {
        push("## 5. User Personas".into());
        push(String::new());
        for persona in &idea.personas {
            push(format!("### {}", persona.name));
            push(String::new());
            push(format!("**Role:** {}", persona.role));
            push(String::new());
            push("**Needs:**".into());
            for need in &persona.needs {
                push(format!("- {need}"));
            }
            push(String::new());
        }
    }

    if !idea.milestones.is_empty() {
        push("## 6. Milestones".into());
        push(String::new());
        for milestone in &idea.milestones {
            push(format!("### {}: {}", milestone.id, milestone.name));
            if let Some(date) = &milestone.target_date {
                push(format!("**Target:** {date}"));
            }
            push(String::new());
            push("**Features:**".into());
            for id in &milestone.features {
                push(format!("- {id}"));
            }
            push(String::new());
        }
    }

    if !idea.constraints.is_empty() {
        push("## 7. Constraints".into());
        push(String::new());
        for constraint in &idea.constraints {
            push(format!("- {constraint}"));
        }
        push(String::new());
    }

    if options.include_task_breakdown {
        push("## 8. Task Breakdown".into());
        push(String::new());
        push("*See `tasks/breakdown.json` for detailed task breakdown.*".into());
        push(String::new());
    }

    lines.join("\n")
}

fn markdown_architecture(arch: &Architecture, push: &mut impl FnMut(String)) {
    if let Some(style) = arch.style.as_deref().filter(|s| !s.is_empty()) {
        push(format!("**Architecture Type:** {style}"));
        push(String::new());
    }
    if !arch.components.is_empty() {
        push("### Components".into());
        push(String::new());
        for component in &arch.components {
            push(format!("- **{component}**"));
        }
        push(String::new());
    }
    if !arch.integrations.is_empty() {
        push("### External Integrations".into());
        push(String::new());
        for integration in &arch.integrations {
            push(format!("- {integration}"));
        }
        push(String::new());
    }
}

// ---------------------------------------------------------------------------
// YAML
// ---------------------------------------------------------------------------

fn slice_is_empty<T>(s: &&[T]) -> bool {
    s.is_empty()
}

fn map_is_empty(m: &&BTreeMap<String, String>) -> bool {
    m.is_empty()
}

#[derive(Serialize)]
struct SpecDocument<'a> {
    metadata: SpecMetadata<'a>,
    overview: SpecOverview<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    architecture: Option<&'a Architecture>,
    #[serde(skip_serializing_if = "map_is_empty")]
    tech_decisions: &'a BTreeMap<String, String>,
    features: Vec<SpecFeature<'a>>,
    #[serde(skip_serializing_if = "slice_is_empty")]
    personas: &'a [IdeaPersona],
    #[serde(skip_serializing_if = "slice_is_empty")]
    milestones: &'a [Milestone],
    #[serde(skip_serializing_if = "slice_is_empty")]
    constraints: &'a [String],
}

#[derive(Serialize)]
struct SpecMetadata<'a> {
    name: &'a str,
    version: &'a str,
    generated: String,
}

#[derive(Serialize)]
struct SpecOverview<'a> {
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    vision: Option<&'a str>,
    goals: &'a [String],
}

#[derive(Serialize)]
struct SpecFeature<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    priority: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    acceptance_criteria: Option<Vec<&'static str>>,
}

fn render_yaml(idea: &Idea, options: &GeneratorOptions, now: DateTime<Utc>) -> Result<String> {
    let doc = SpecDocument {
        metadata: SpecMetadata {
            name: &idea.name,
            version: &idea.version,
            generated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
        overview: SpecOverview {
            description: &idea.description,
            vision: idea.vision.as_deref(),
            goals: &idea.goals,
        },
        architecture: idea.architecture.as_ref(),
        tech_decisions: &idea.tech_decisions,
        features: idea
            .features
            .iter()
            .map(|f| SpecFeature {
                id: &f.id,
                name: &f.name,
                description: &f.description,
                priority: &f.priority,
                acceptance_criteria: options.include_acceptance_criteria.then(|| vec!["TBD"]),
            })
            .collect(),
        personas: &idea.personas,
        milestones: &idea.milestones,
        constraints: &idea.constraints,
    };
    Ok(serde_yaml::to_string(&doc)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
