//! Assistant response model.
//!
//! One `AssistantResponse` is created per user question and handed to the
//! rendering layer as-is; it is never mutated or persisted.

use serde::{Deserialize, Serialize};

/// How the rendering layer should treat a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Bare prose from the backend, rendered as markdown.
    PlainText,
    /// Content plus optional titled sections and a trailing suggestion.
    Structured,
    /// The single user-visible error shape (case not found).
    Error,
}

/// A titled list of display lines inside a structured response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// What the assistant says back, independent of how it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub kind: ResponseKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl AssistantResponse {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::PlainText,
            content: content.into(),
            sections: Vec::new(),
            recommendation: None,
        }
    }

    pub fn structured(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Structured,
            content: content.into(),
            sections: Vec::new(),
            recommendation: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Error,
            content: content.into(),
            sections: Vec::new(),
            recommendation: None,
        }
    }

    pub fn with_section(mut self, title: impl Into<String>, items: Vec<String>) -> Self {
        self.sections.push(Section::new(title, items));
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }
}
