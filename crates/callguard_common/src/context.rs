//! Conversation context and per-page suggestion chips.

use serde::{Deserialize, Serialize};

/// Where the user currently is, as far as the assistant cares: the page
/// name and, on the investigation page, the selected case. Owned by the
/// navigation layer, read by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub page: String,
    pub call_id: Option<String>,
}

impl ConversationContext {
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            call_id: None,
        }
    }

    pub fn investigation(call_id: impl Into<String>) -> Self {
        Self {
            page: "investigation".to_string(),
            call_id: Some(call_id.into()),
        }
    }
}

/// Fixed suggestion chips for the current page. Static data; the
/// rendering layer shows them as one-tap questions.
pub fn contextual_suggestions(context: Option<&ConversationContext>) -> Vec<&'static str> {
    let Some(context) = context else {
        return vec![
            "Show me today's high-risk cases",
            "Explain fraud detection patterns",
            "What are common compliance flags?",
            "How does the grounding system work?",
        ];
    };

    match context.page.as_str() {
        "investigation" => vec![
            "Explain this risk assessment",
            "What patterns were detected?",
            "Recommend next actions",
            "Show similar cases",
        ],
        "home" => vec![
            "Summarize the last 5 calls",
            "Show me today's high-risk cases",
            "Which cases need review?",
        ],
        "risk-queue" => vec![
            "Prioritize high-risk cases",
            "Bulk action recommendations",
            "Compliance review checklist",
            "Export queue summary",
        ],
        _ => vec![
            "Help with risk analysis",
            "Compliance guidelines",
            "Pattern recognition tips",
            "Workflow automation",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investigation_context_carries_call_id() {
        let ctx = ConversationContext::investigation("call_1");
        assert_eq!(ctx.page, "investigation");
        assert_eq!(ctx.call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn suggestions_differ_per_page() {
        let investigation = ConversationContext::investigation("call_1");
        let queue = ConversationContext::page("risk-queue");
        assert_ne!(
            contextual_suggestions(Some(&investigation)),
            contextual_suggestions(Some(&queue))
        );
        assert!(!contextual_suggestions(None).is_empty());
    }

    #[test]
    fn unknown_page_gets_generic_chips() {
        let settings = ConversationContext::page("settings");
        assert_eq!(contextual_suggestions(Some(&settings)).len(), 4);
    }
}
