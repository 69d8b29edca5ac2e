use super::model::Project;
use crate::idea::Architecture;
use crate::types::ArchitectureStyle;

// ---------------------------------------------------------------------------
// Keyword rules
// ---------------------------------------------------------------------------

/// A label that applies when any of its keywords occurs in the corpus.
pub struct KeywordRule<T> {
    pub label: T,
    pub keywords: &'static [&'static str],
}

impl<T> KeywordRule<T> {
    fn matches(&self, corpus: &str) -> bool {
        self.keywords.iter().any(|k| corpus.contains(k))
    }
}

/// Evaluated in order; the first match wins.
pub const STYLE_RULES: &[KeywordRule<ArchitectureStyle>] = &[
    KeywordRule {
        label: ArchitectureStyle::Microservices,
        keywords: &["microservice"],
    },
    KeywordRule {
        label: ArchitectureStyle::Monolith,
        keywords: &["monolith"],
    },
    KeywordRule {
        label: ArchitectureStyle::Serverless,
        keywords: &["serverless", "lambda"],
    },
    KeywordRule {
        label: ArchitectureStyle::ApiFirst,
        keywords: &["api", "rest"],
    },
];

pub const COMPONENT_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        label: "frontend",
        keywords: &["frontend", "ui", "dashboard"],
    },
    KeywordRule {
        label: "backend",
        keywords: &["backend", "api", "server"],
    },
    KeywordRule {
        label: "database",
        keywords: &["database", "db", "storage"],
    },
    KeywordRule {
        label: "auth",
        keywords: &["auth", "login", "user"],
    },
    KeywordRule {
        label: "cli",
        keywords: &["cli", "command"],
    },
];

pub const INTEGRATION_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        label: "github",
        keywords: &["github"],
    },
    KeywordRule {
        label: "slack",
        keywords: &["slack"],
    },
    KeywordRule {
        label: "payments",
        keywords: &["stripe", "payment"],
    },
    KeywordRule {
        label: "email",
        keywords: &["email", "sendgrid"],
    },
    KeywordRule {
        label: "oauth",
        keywords: &["oauth", "sso"],
    },
];

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Lowercased text the keyword rules are matched against: description,
/// vision, feature descriptions, then each story's title and want.
fn corpus(project: &Project) -> String {
    let mut parts: Vec<String> = vec![project.description.clone(), project.vision.clone()];
    parts.extend(project.features.iter().map(|f| f.description.clone()));
    parts.extend(
        project
            .user_stories
            .iter()
            .map(|s| format!("{} {}", s.title, s.i_want)),
    );
    parts.join(" ").to_lowercase()
}

/// Plain substring matching, so `ui` also fires inside `build` or `guide`.
pub fn infer_architecture(project: &Project) -> Architecture {
    let text = corpus(project);

    let style = STYLE_RULES
        .iter()
        .find(|r| r.matches(&text))
        .map(|r| r.label.as_str().to_string());

    Architecture {
        style,
        components: labels(COMPONENT_RULES, &text),
        integrations: labels(INTEGRATION_RULES, &text),
    }
}

fn labels(rules: &[KeywordRule<&'static str>], text: &str) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.matches(text))
        .map(|r| r.label.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
