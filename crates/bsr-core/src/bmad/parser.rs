use super::fields;
use super::markdown;
use super::model::{Epic, Feature, Persona, Project, UserStory};
use crate::error::{BsrError, Result};
use crate::paths;
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, warn};

pub const NO_PROJECT_FILE: &str = "No project file found";

// ---------------------------------------------------------------------------
// ParseResult
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ParseResult {
    pub success: bool,
    /// `None` only when the input path itself does not exist.
    pub project: Option<Project>,
    pub errors: Vec<BsrError>,
    pub warnings: Vec<String>,
}

impl ParseResult {
    fn failed(error: BsrError) -> Self {
        Self {
            success: false,
            project: None,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    fn finish(project: Project, errors: Vec<BsrError>, warnings: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            project: Some(project),
            errors,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Directory form
// ---------------------------------------------------------------------------

/// Parse a BMAD output directory.
///
/// Looks for `project.{yaml,yml,md}`, `features.{yaml,yml,md}` and the
/// `personas/`, `epics/`, `stories/` subdirectories. Optional sources that
/// are absent are skipped; unreadable files inside them are skipped with a
/// log line. Only the project file can produce errors.
pub fn parse_bmad_directory(dir: &Path) -> ParseResult {
    if !dir.exists() {
        return ParseResult::failed(BsrError::not_found("BMAD directory", dir));
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut project = match paths::find_file(dir, paths::PROJECT_FILES) {
        Some(file) => {
            debug!(file = %file.display(), "parsing project file");
            match read_project_file(&file) {
                Ok(p) => p,
                Err(e) => {
                    errors.push(e);
                    Project::default()
                }
            }
        }
        None => {
            warnings.push(NO_PROJECT_FILE.to_string());
            Project::default()
        }
    };

    let personas_dir = dir.join(paths::PERSONAS_DIR);
    if personas_dir.is_dir() {
        project.personas = parse_personas(&personas_dir);
    }

    let epics_dir = dir.join(paths::EPICS_DIR);
    if epics_dir.is_dir() {
        project.epics = parse_epics(&epics_dir);
    }

    let stories_dir = dir.join(paths::STORIES_DIR);
    if stories_dir.is_dir() {
        project.user_stories = parse_stories(&stories_dir);
    }

    if let Some(file) = paths::find_file(dir, paths::FEATURES_FILES) {
        debug!(file = %file.display(), "parsing features file");
        project.features = parse_features_file(&file);
    }

    ParseResult::finish(project, errors, warnings)
}

fn read_project_file(path: &Path) -> Result<Project> {
    let content = std::fs::read_to_string(path)?;
    if paths::YAML_EXTENSIONS.contains(&paths::extension(path).as_str()) {
        let value = parse_yaml(&content, "project YAML")?;
        Ok(fields::project(&value))
    } else {
        Ok(markdown::parse_project(&content))
    }
}

// ---------------------------------------------------------------------------
// Single-file form
// ---------------------------------------------------------------------------

/// Parse a single BMAD project file (`.yaml`, `.yml` or `.md`).
pub fn parse_bmad_file(path: &Path) -> ParseResult {
    if !path.exists() {
        return ParseResult::failed(BsrError::not_found("File", path));
    }

    let mut errors = Vec::new();
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return ParseResult::failed(e.into()),
    };

    let ext = paths::extension(path);
    let project = match ext.as_str() {
        "yaml" | "yml" => match parse_yaml(&content, "YAML") {
            Ok(value) => fields::project(&value),
            Err(e) => {
                errors.push(e);
                Project::default()
            }
        },
        "md" => markdown::parse_project(&content),
        _ => {
            errors.push(BsrError::UnsupportedFormat {
                extension: if ext.is_empty() {
                    String::new()
                } else {
                    format!(".{ext}")
                },
            });
            Project::default()
        }
    };

    ParseResult::finish(project, errors, Vec::new())
}

// ---------------------------------------------------------------------------
// Optional sources
// ---------------------------------------------------------------------------

fn parse_yaml(content: &str, what: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| BsrError::yaml(what, e))
}

/// Read and parse every matching file in `dir`, skipping the ones that fail.
fn collect_dir<T>(
    dir: &Path,
    extensions: &[&str],
    mut parse: impl FnMut(&Path, &str) -> Result<T>,
) -> Vec<T> {
    let files = match paths::list_files(dir, extensions) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut items = Vec::new();
    for file in files {
        let parsed = std::fs::read_to_string(&file)
            .map_err(BsrError::from)
            .and_then(|content| parse(&file, &content));
        match parsed {
            Ok(item) => items.push(item),
            Err(e) => warn!(file = %file.display(), error = %e, "skipping unreadable file"),
        }
    }
    items
}

fn parse_personas(dir: &Path) -> Vec<Persona> {
    collect_dir(dir, paths::PERSONA_EXTENSIONS, |file, content| {
        if paths::extension(file) == "md" {
            Ok(markdown::parse_persona(content))
        } else {
            parse_yaml(content, "persona YAML").map(|v| fields::persona(&v))
        }
    })
}

fn parse_epics(dir: &Path) -> Vec<Epic> {
    collect_dir(dir, paths::YAML_EXTENSIONS, |file, content| {
        let value = parse_yaml(content, "epic YAML")?;
        Ok(fields::epic(&value, &paths::file_stem(file)))
    })
}

fn parse_stories(dir: &Path) -> Vec<UserStory> {
    collect_dir(dir, paths::YAML_EXTENSIONS, |file, content| {
        let value = parse_yaml(content, "story YAML")?;
        Ok(fields::story(&value, &paths::file_stem(file)))
    })
}

/// A YAML features file is either a bare list or a mapping with `features`.
fn parse_features_file(path: &Path) -> Vec<Feature> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "skipping unreadable features file");
            return Vec::new();
        }
    };

    if paths::extension(path) == "md" {
        return markdown::parse_features(&content);
    }

    match parse_yaml(&content, "features YAML") {
        Ok(Value::Sequence(items)) => fields::features(&items),
        Ok(value) => fields::Fields::new(&value)
            .seq("features")
            .map(fields::features)
            .unwrap_or_default(),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "skipping malformed features file");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
