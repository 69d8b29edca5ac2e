//! Line scanners for Markdown BMAD documents.
//!
//! These are deliberately shallow: `# Title`, `## Section` capture regions,
//! and top-level `- ` bullets. No nesting, no multi-line list items.

use super::model::{Feature, Persona, Project};

fn heading<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.strip_prefix(marker).map(str::trim)
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ").map(str::trim)
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

pub fn parse_project(content: &str) -> Project {
    let mut project = Project::default();
    let mut section = String::new();

    for line in content.split('\n') {
        if let Some(title) = heading(line, "# ") {
            project.name = title.to_string();
        } else if let Some(name) = heading(line, "## ") {
            section = name.to_lowercase();
        } else {
            match section.as_str() {
                "description" | "overview" => {
                    project.description.push_str(line);
                    project.description.push('\n');
                }
                "vision" => {
                    project.vision.push_str(line);
                    project.vision.push('\n');
                }
                "goals" => {
                    if let Some(goal) = bullet(line) {
                        project.goals.push(goal.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    project.description = project.description.trim().to_string();
    project.vision = project.vision.trim().to_string();
    project
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Each `- Name: Description` (or `* `) line becomes one feature `F<n>`.
pub fn parse_features(content: &str) -> Vec<Feature> {
    content
        .split('\n')
        .filter_map(|line| line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")))
        .enumerate()
        .map(|(i, text)| {
            let text = text.trim();
            let (name, description) = text.split_once(':').unwrap_or((text, ""));
            Feature {
                id: format!("F{}", i + 1),
                name: name.trim().to_string(),
                description: description.trim().to_string(),
                priority: None,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

/// `# Name`, free text under `## Role`, bullets under `## Goals` and
/// `## Pain Points`.
pub fn parse_persona(content: &str) -> Persona {
    let mut persona = Persona::default();
    let mut section = String::new();
    let mut role = String::new();

    for line in content.split('\n') {
        if let Some(title) = heading(line, "# ") {
            persona.name = title.to_string();
        } else if let Some(name) = heading(line, "## ") {
            section = name.to_lowercase();
        } else {
            match section.as_str() {
                "role" => {
                    role.push_str(line);
                    role.push('\n');
                }
                "goals" | "needs" => {
                    if let Some(goal) = bullet(line) {
                        persona.goals.push(goal.to_string());
                    }
                }
                "pain points" | "painpoints" | "pain_points" => {
                    if let Some(pain) = bullet(line) {
                        persona.pain_points.push(pain.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    persona.role = role.trim().to_string();
    persona
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
