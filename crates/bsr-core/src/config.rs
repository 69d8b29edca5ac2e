use crate::bmad::TransformOptions;
use crate::error::{BsrError, Result};
use crate::paths;
use crate::speckit::validator::is_valid_semver;
use crate::speckit::{GeneratorOptions, SpecOptions, ValidationOptions};
use crate::types::DocFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

/// `.bsr/config.yaml`. Every section is optional; missing sections take the
/// pipeline defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectConfig>,
    #[serde(default)]
    pub bmad: TransformOptions,
    #[serde(default)]
    pub speckit: GeneratorOptions,
    #[serde(default)]
    pub validation: ValidationOptions,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            project: None,
            bmad: TransformOptions::default(),
            speckit: GeneratorOptions::default(),
            validation: ValidationOptions::default(),
        }
    }
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project: Some(ProjectConfig {
                name: project_name.into(),
                description: None,
            }),
            ..Self::default()
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(BsrError::not_found("Config", path));
        }
        let data = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&data).map_err(|e| BsrError::yaml("config YAML", e))
    }

    /// Like [`Config::load`], but an absent file yields the defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(e) if e.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn spec_options(&self) -> SpecOptions {
        SpecOptions {
            validation: self.validation.clone(),
            generator: self.speckit.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != CONFIG_VERSION {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "unsupported config version {} (expected {CONFIG_VERSION})",
                    self.version
                ),
            });
        }

        if !is_valid_semver(&self.bmad.version) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "bmad.version '{}' is not a MAJOR.MINOR.PATCH version",
                    self.bmad.version
                ),
            });
        }

        let idea_ext = paths::extension(&self.bmad.output_path);
        if DocFormat::from_extension(&idea_ext) != Some(DocFormat::Yaml) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "bmad.output_path '{}' should be a .yaml file",
                    self.bmad.output_path.display()
                ),
            });
        }

        let spec_ext = paths::extension(&self.speckit.output_path);
        if let Some(format) = DocFormat::from_extension(&spec_ext) {
            if format != self.speckit.format {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "speckit.output_path '{}' does not match speckit.format '{}'",
                        self.speckit.output_path.display(),
                        self.speckit.format
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
