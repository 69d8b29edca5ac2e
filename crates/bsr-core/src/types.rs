use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Priority {
    P0,
    #[default]
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::P0, Priority::P1, Priority::P2, Priority::P3]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: only the canonical `P0`..`P3` spellings are accepted.
impl std::str::FromStr for Priority {
    type Err = crate::error::BsrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P0" => Ok(Priority::P0),
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            "P3" => Ok(Priority::P3),
            _ => Err(crate::error::BsrError::InvalidValue {
                what: "priority",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DocFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocFormat {
    #[default]
    Markdown,
    Yaml,
}

impl DocFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DocFormat::Markdown => "markdown",
            DocFormat::Yaml => "yaml",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            DocFormat::Markdown => "md",
            DocFormat::Yaml => "yaml",
        }
    }

    /// Infer the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(DocFormat::Yaml),
            "md" | "markdown" => Some(DocFormat::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocFormat {
    type Err = crate::error::BsrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(DocFormat::Markdown),
            "yaml" | "yml" => Ok(DocFormat::Yaml),
            _ => Err(crate::error::BsrError::InvalidValue {
                what: "format",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ArchitectureStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitectureStyle {
    Microservices,
    Monolith,
    Serverless,
    ApiFirst,
}

impl ArchitectureStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ArchitectureStyle::Microservices => "microservices",
            ArchitectureStyle::Monolith => "monolith",
            ArchitectureStyle::Serverless => "serverless",
            ArchitectureStyle::ApiFirst => "api-first",
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn priority_parse_is_strict() {
        assert_eq!(Priority::from_str("P2").unwrap(), Priority::P2);
        assert!(Priority::from_str("p2").is_err());
        assert!(Priority::from_str("HIGH").is_err());
    }

    #[test]
    fn priority_orders_by_urgency() {
        let mut v = vec![Priority::P3, Priority::P0, Priority::P2];
        v.sort();
        assert_eq!(v, vec![Priority::P0, Priority::P2, Priority::P3]);
    }

    #[test]
    fn doc_format_from_extension() {
        assert_eq!(DocFormat::from_extension("YML"), Some(DocFormat::Yaml));
        assert_eq!(DocFormat::from_extension("md"), Some(DocFormat::Markdown));
        assert_eq!(DocFormat::from_extension("txt"), None);
    }

    #[test]
    fn architecture_style_serializes_kebab() {
        let yaml = serde_yaml::to_string(&ArchitectureStyle::ApiFirst).unwrap();
        assert_eq!(yaml.trim(), "api-first");
    }
}
