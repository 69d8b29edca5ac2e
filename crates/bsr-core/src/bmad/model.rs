use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form; normalized to `P0`..`P3` by the transformer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub role: String,
    pub goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pain_points: Vec<String>,
}

// ---------------------------------------------------------------------------
// Epic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Feature ids; not checked for existence.
    #[serde(default)]
    pub features: Vec<String>,
}

// ---------------------------------------------------------------------------
// UserStory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    pub title: String,
    pub as_a: String,
    pub i_want: String,
    pub so_that: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Canonical record assembled from a BMAD directory or file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub personas: Vec<Persona>,
    #[serde(default)]
    pub epics: Vec<Epic>,
    #[serde(default)]
    pub user_stories: Vec<UserStory>,
}

impl Project {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
