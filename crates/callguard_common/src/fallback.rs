//! Offline fallback rule engine.
//!
//! When the chat backend is unreachable the assistant still answers,
//! deterministically, from a fixed rule table: an ordered list of
//! (keyword group, template) pairs evaluated first-match-wins over the
//! lower-cased question. Template text is static data; the engine never
//! computes content from the question beyond picking a branch.

use tracing::debug;

use crate::case_aware::case_response;
use crate::case_view::CaseView;
use crate::context::ConversationContext;
use crate::response::AssistantResponse;

/// Shown when an investigation context points at a case the repository
/// cannot resolve. The only user-visible error the core produces.
pub const MISSING_CASE_MESSAGE: &str =
    "I couldn't find the details for this case. Please make sure the case is still active.";

/// Page name that activates the case-aware branch.
pub const INVESTIGATION_PAGE: &str = "investigation";

/// One fallback rule: fires when any keyword is contained in the
/// lower-cased question.
struct FallbackRule {
    keywords: &'static [&'static str],
    build: fn() -> AssistantResponse,
}

/// Priority order is part of the contract: a question matching several
/// groups gets the earliest one.
const RULES: [FallbackRule; 4] = [
    FallbackRule {
        keywords: &["risk", "score"],
        build: risk_response,
    },
    FallbackRule {
        keywords: &["pattern", "detection"],
        build: pattern_response,
    },
    FallbackRule {
        keywords: &["compliance", "regulation"],
        build: compliance_response,
    },
    FallbackRule {
        keywords: &["workflow", "automation"],
        build: workflow_response,
    },
];

/// Deterministic local answer for a question the backend never saw.
///
/// `case_lookup` decouples the engine from any particular storage: it is
/// whatever the caller uses to resolve a call id to a normalized case.
pub fn local_fallback<L>(
    question: &str,
    context: &ConversationContext,
    case_lookup: L,
) -> AssistantResponse
where
    L: Fn(&str) -> Option<CaseView>,
{
    if context.page == INVESTIGATION_PAGE {
        if let Some(call_id) = &context.call_id {
            // The missing-case check outranks keyword matching here: any
            // question about an unloadable case gets the same error.
            return match case_lookup(call_id) {
                Some(case) => case_response(question, &case),
                None => {
                    debug!(call_id = %call_id, "case lookup failed in investigation context");
                    AssistantResponse::error(MISSING_CASE_MESSAGE)
                }
            };
        }
    }
    general_response(question)
}

/// Keyword-dispatch over the general (non-case) rule table.
pub fn general_response(question: &str) -> AssistantResponse {
    let q = question.to_lowercase();
    for rule in &RULES {
        if rule.keywords.iter().any(|keyword| q.contains(keyword)) {
            return (rule.build)();
        }
    }
    default_response()
}

fn risk_response() -> AssistantResponse {
    AssistantResponse::structured("I can help you understand risk assessments in CallGuard.")
        .with_section(
            "Risk Score Components",
            lines(&[
                "Behavioral pattern analysis (40%)",
                "Historical interaction data (25%)",
                "Voice biometric matching (20%)",
                "Compliance flag triggers (15%)",
            ]),
        )
        .with_section(
            "Score Interpretation",
            lines(&[
                "High Risk (70+): Immediate escalation required",
                "Medium Risk (40-69): Manual review recommended",
                "Low Risk (<40): Standard monitoring",
            ]),
        )
        .with_recommendation(
            "Would you like me to analyze a specific case or explain any particular risk pattern?",
        )
}

fn pattern_response() -> AssistantResponse {
    AssistantResponse::structured("Here are the key fraud patterns CallGuard detects:")
        .with_section(
            "High-Risk Patterns",
            lines(&[
                "Conditional promises with contradictions",
                "Identity concealment attempts",
                "Aggressive dispute escalation",
                "Evasive response to verification",
            ]),
        )
        .with_section(
            "Medium-Risk Patterns",
            lines(&[
                "Financial hardship claims",
                "Partial payment offers",
                "Policy deviation requests",
                "Inconsistent information",
            ]),
        )
        .with_recommendation(
            "These patterns are continuously learned from your data. Want to see how they apply to current cases?",
        )
}

fn compliance_response() -> AssistantResponse {
    AssistantResponse::structured("CallGuard helps maintain compliance across multiple frameworks:")
        .with_section(
            "Regulatory Coverage",
            lines(&[
                "UDAAP (Unfair, Deceptive practices)",
                "TCPA (Telephone Consumer Protection)",
                "FDCPA (Fair Debt Collection)",
                "CCPA/GDPR (Privacy regulations)",
            ]),
        )
        .with_section(
            "Automated Safeguards",
            lines(&[
                "Real-time flag detection",
                "Automatic escalation triggers",
                "Audit trail generation",
                "Policy adherence monitoring",
            ]),
        )
        .with_recommendation(
            "Need help with specific compliance requirements or want to review flagged cases?",
        )
}

fn workflow_response() -> AssistantResponse {
    AssistantResponse::structured("CallGuard plugs into your existing workflow automation:")
        .with_section(
            "Available Integrations",
            lines(&[
                "Slack notifications for high-risk cases",
                "CRM record updates with risk tags",
                "Automated callback scheduling",
                "Compliance ticket creation",
            ]),
        )
        .with_section(
            "Trigger Conditions",
            lines(&[
                "Risk score thresholds",
                "Pattern detection events",
                "Manual escalation requests",
                "Compliance flag activation",
            ]),
        )
        .with_recommendation(
            "Want to configure new automations or review current workflow performance?",
        )
}

fn default_response() -> AssistantResponse {
    AssistantResponse::structured(
        "I'm here to help you with risk analysis and compliance management.",
    )
    .with_section(
        "I can assist with",
        lines(&[
            "Risk assessment interpretation",
            "Fraud pattern explanation",
            "Compliance guideline review",
            "Workflow automation setup",
            "Case investigation guidance",
        ]),
    )
    .with_recommendation(
        "What specific aspect of your risk management process would you like to explore?",
    )
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
