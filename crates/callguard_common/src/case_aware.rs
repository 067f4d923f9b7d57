//! Case-aware responder.
//!
//! Fallback branch for investigation contexts: the question picks one of
//! three fixed shapes (assessment summary, action guidance, overview) and
//! the normalized case fills in the blanks. Header lines show labels
//! upper-cased with spaces; inline sentences keep them lower-cased.

use chrono::{DateTime, Utc};

use crate::case_view::{CaseView, RecommendedAction};
use crate::response::AssistantResponse;

/// Placeholder shown for absent numeric values.
pub const MISSING_VALUE: &str = "--";

const NO_PATTERNS_LINE: &str = "No specific patterns recorded";
const NO_FLAGS_LINE: &str = "No specific compliance flags detected";
const NO_EXPLANATION_LINE: &str = "No detailed explanation available.";

/// Pick a response shape for a question about one concrete case.
pub fn case_response(question: &str, case: &CaseView) -> AssistantResponse {
    let q = question.to_lowercase();
    if q.contains("explain") || q.contains("assessment") {
        assessment_summary(case)
    } else if q.contains("action") || q.contains("recommend") {
        action_guidance(case)
    } else {
        case_overview(case)
    }
}

fn assessment_summary(case: &CaseView) -> AssistantResponse {
    let confidence = match case.confidence {
        Some(fraction) => format!("{}%", percent(fraction)),
        None => MISSING_VALUE.to_string(),
    };
    let score = match case.risk_score {
        Some(score) => format!("{score}"),
        None => MISSING_VALUE.to_string(),
    };
    let patterns = if case.matched_patterns.is_empty() {
        vec![NO_PATTERNS_LINE.to_string()]
    } else {
        case.matched_patterns.clone()
    };
    let explanation = if case.explanation.is_empty() {
        NO_EXPLANATION_LINE.to_string()
    } else {
        case.explanation.clone()
    };

    AssistantResponse::structured(format!("Analysis for Case {}:", case.call_id))
        .with_section(
            "Risk Decision",
            vec![
                format!("Assessment: {}", case.assessment.label_upper()),
                format!("Confidence: {confidence}"),
                format!("Risk Score: {score}/100"),
            ],
        )
        .with_section("Detected Patterns", patterns)
        .with_recommendation(explanation)
}

fn action_guidance(case: &CaseView) -> AssistantResponse {
    let flags = if case.regulatory_flags.is_empty() {
        vec![NO_FLAGS_LINE.to_string()]
    } else {
        case.regulatory_flags.clone()
    };

    AssistantResponse::structured("Recommended action for this case:")
        .with_section(
            "Next Steps",
            action_steps(case.recommended_action)
                .iter()
                .map(|step| step.to_string())
                .collect(),
        )
        .with_section("Compliance Considerations", flags)
        .with_recommendation(
            "Would you like me to help you execute any of these actions or explain the reasoning?",
        )
}

fn case_overview(case: &CaseView) -> AssistantResponse {
    let status = case.status.as_deref().unwrap_or("N/A");
    let timestamp = case
        .timestamp
        .map(format_timestamp)
        .unwrap_or_else(|| "N/A".to_string());

    AssistantResponse::structured(format!("Case {} Overview:", case.call_id))
        .with_section(
            "Quick Facts",
            vec![
                format!("Call ID: {}", case.call_id),
                format!("Risk Level: {}", case.assessment.label_inline()),
                format!("Status: {status}"),
                format!("Timestamp: {timestamp}"),
            ],
        )
        .with_recommendation(
            "Ask me to explain the risk assessment, recommend actions, or analyze specific patterns.",
        )
}

/// Fixed next-step playbook per recommended action. Unknown actions get
/// the generic checklist.
pub fn action_steps(action: RecommendedAction) -> [&'static str; 4] {
    match action {
        RecommendedAction::EscalateToCompliance => [
            "Create compliance ticket immediately",
            "Document all risk indicators",
            "Pause collection activities",
            "Notify compliance team via Slack",
        ],
        RecommendedAction::ScheduleManualReview => [
            "Assign to senior analyst",
            "Set review deadline (24-48 hours)",
            "Gather additional documentation",
            "Schedule customer callback if needed",
        ],
        RecommendedAction::Monitor => [
            "Add to monitoring queue",
            "Set follow-up reminders",
            "Continue standard collection process",
            "Track behavioral changes",
        ],
        RecommendedAction::Unknown => [
            "Review case details thoroughly",
            "Consult with team lead if uncertain",
            "Document decision rationale",
            "Follow standard procedures",
        ],
    }
}

/// Round-half-up whole percentage from a [0,1] fraction.
fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
