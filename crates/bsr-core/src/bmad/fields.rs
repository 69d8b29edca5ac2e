//! Field-name normalization for loosely-typed BMAD YAML documents.
//!
//! BMAD files spell the same field several ways (`asA` / `as_a`,
//! `name` / `projectName` / `title`, ...). Lookups take the candidate keys in
//! priority order and return the first non-empty value.

use super::model::{Epic, Feature, Persona, Project, UserStory};
use serde_yaml::{Mapping, Value};

pub(crate) struct Fields<'a> {
    map: Option<&'a Mapping>,
}

impl<'a> Fields<'a> {
    /// Non-mapping documents (scalars, sequences, null) read as empty.
    pub fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_mapping(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    /// First non-empty scalar among `keys`, rendered as text.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.get(k).and_then(scalar_text))
            .find(|s| !s.is_empty())
    }

    pub fn text_or_default(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    /// First key among `keys` holding a sequence, as a list of scalar texts.
    /// Non-scalar items are dropped; a missing or non-sequence value yields
    /// an empty list.
    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .find_map(|k| self.get(k).and_then(Value::as_sequence))
            .map(|seq| seq.iter().filter_map(scalar_text).collect())
            .unwrap_or_default()
    }

    pub fn seq(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_sequence).map(Vec::as_slice)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(t) => scalar_text(&t.value),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Record normalization
// ---------------------------------------------------------------------------

pub(crate) fn project(value: &Value) -> Project {
    let f = Fields::new(value);
    Project {
        name: f.text_or_default(&["name", "projectName", "title"]),
        description: f.text_or_default(&["description", "summary"]),
        vision: f.text_or_default(&["vision", "projectVision"]),
        goals: f.list(&["goals"]),
        features: f.seq("features").map(features).unwrap_or_default(),
        ..Project::default()
    }
}

/// Features get positional ids `F1`, `F2`, ... when none is given.
pub(crate) fn features(items: &[Value]) -> Vec<Feature> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let f = Fields::new(item);
            Feature {
                id: f.text(&["id"]).unwrap_or_else(|| format!("F{}", i + 1)),
                name: f.text_or_default(&["name", "title"]),
                description: f.text_or_default(&["description"]),
                priority: f.text(&["priority"]),
            }
        })
        .collect()
}

pub(crate) fn persona(value: &Value) -> Persona {
    let f = Fields::new(value);
    Persona {
        name: f.text_or_default(&["name"]),
        role: f.text_or_default(&["role"]),
        goals: f.list(&["goals"]),
        pain_points: f.list(&["painPoints", "pain_points"]),
    }
}

/// `stem` is the file stem, used when the document carries no id.
pub(crate) fn epic(value: &Value, stem: &str) -> Epic {
    let f = Fields::new(value);
    Epic {
        id: f.text(&["id"]).unwrap_or_else(|| stem.to_string()),
        title: f.text_or_default(&["title", "name"]),
        description: f.text_or_default(&["description"]),
        features: f.list(&["features"]),
    }
}

pub(crate) fn story(value: &Value, stem: &str) -> UserStory {
    let f = Fields::new(value);
    UserStory {
        id: f.text(&["id"]).unwrap_or_else(|| stem.to_string()),
        epic: f.text(&["epic"]),
        title: f.text_or_default(&["title"]),
        as_a: f.text_or_default(&["asA", "as_a"]),
        i_want: f.text_or_default(&["iWant", "i_want"]),
        so_that: f.text_or_default(&["soThat", "so_that"]),
        acceptance_criteria: f.list(&["acceptanceCriteria", "acceptance_criteria"]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
