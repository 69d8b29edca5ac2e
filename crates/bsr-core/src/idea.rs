//! The BSR idea document (`idea.yaml`).
//!
//! Produced by the BMAD transformer, consumed by the SpecKit validator and
//! generator. Every field deserializes leniently so hand-authored documents
//! load even when incomplete; the validator reports what is missing.

use crate::error::{BsrError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// IdeaFeature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaFeature {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `P0`..`P3` once transformed; hand-authored documents may carry anything.
    pub priority: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stories: Vec<String>,
}

// ---------------------------------------------------------------------------
// IdeaPersona
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaPersona {
    pub name: String,
    pub role: String,
    pub needs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Architecture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub integrations: Vec<String>,
}

impl Architecture {
    /// True when no key would be written, i.e. the document has `architecture: {}`.
    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.components.is_empty() && self.integrations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Milestone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Idea
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Idea {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    pub goals: Vec<String>,
    pub features: Vec<IdeaFeature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<IdeaPersona>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tech_decisions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
}

impl Idea {
    pub fn from_yaml(data: &str) -> Result<Self> {
        serde_yaml::from_str(data).map_err(|e| BsrError::yaml("YAML", e))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BsrError::not_found("File", path));
        }
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    /// Write the idea as YAML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self.to_yaml()?;
        crate::io::atomic_write(path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
