use crate::error::Result;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BSR_DIR: &str = ".bsr";
pub const CONFIG_FILE: &str = ".bsr/config.yaml";

/// Candidate project files, in lookup order.
pub const PROJECT_FILES: &[&str] = &["project.yaml", "project.yml", "project.md"];
/// Candidate feature files, in lookup order.
pub const FEATURES_FILES: &[&str] = &["features.yaml", "features.yml", "features.md"];

pub const PERSONAS_DIR: &str = "personas";
pub const EPICS_DIR: &str = "epics";
pub const STORIES_DIR: &str = "stories";

pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];
pub const PERSONA_EXTENSIONS: &[&str] = &["yaml", "yml", "md"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn bsr_dir(root: &Path) -> PathBuf {
    root.join(BSR_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Return the first of `names` that exists under `dir`.
pub fn find_file(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|n| dir.join(n)).find(|p| p.exists())
}

/// Lowercased extension without the leading dot, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List regular files in `dir` whose extension is one of `extensions`,
/// sorted by file name so positional ids do not depend on the platform's
/// directory iteration order.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if extensions.contains(&extension(&path).as_str()) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
