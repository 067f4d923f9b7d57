//! Case normalizer: one raw backend payload in, one [`CaseView`] out.
//!
//! The backend never enforced a shape on case payloads, so every field is
//! optional and several live under more than one name. Each field resolves
//! through a fixed precedence chain; later entries are tried only when the
//! earlier ones are absent or wrong-typed. The chain is the single place
//! where "which shape wins" is decided.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::trace;

use crate::case_view::{Assessment, CaseView, RecommendedAction};

/// Substituted when a payload carries no identifier at all.
pub const UNKNOWN_CALL_ID: &str = "Unknown";

/// Map a raw case payload to its canonical view.
///
/// Total over all inputs, including `null` and `{}`: missing or
/// wrong-typed fields degrade to the documented defaults, never to an
/// error.
pub fn normalize(raw: &Value) -> CaseView {
    let call_id = first_str(raw, &[&["call_id"], &["callId"]])
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_CALL_ID)
        .to_string();
    trace!(call_id = %call_id, "normalizing case payload");

    CaseView {
        call_id,
        timestamp: first_str(raw, &[&["call_timestamp"], &["timestamp"]])
            .and_then(parse_timestamp),
        risk_score: first_f64(
            raw,
            &[
                &["risk_score"],
                &["risk_assessment", "risk_score"],
                &["input_risk_assessment", "risk_score"],
            ],
        ),
        assessment: first_str(
            raw,
            &[&["grounded_assessment"], &["rag_output", "grounded_assessment"]],
        )
        .map(Assessment::parse)
        .unwrap_or_default(),
        confidence: first_f64(
            raw,
            &[
                &["rag_output", "confidence"],
                &["risk_assessment", "confidence"],
                &["confidence"],
            ],
        ),
        explanation: first_str(raw, &[&["summary_for_rag"], &["rag_output", "explanation"]])
            .unwrap_or_default()
            .to_string(),
        matched_patterns: first_string_list(
            raw,
            &[&["rag_output", "matched_patterns"], &["matched_patterns"]],
        ),
        recommended_action: first_str(
            raw,
            &[&["recommended_action"], &["rag_output", "recommended_action"]],
        )
        .map(RecommendedAction::parse)
        .unwrap_or_default(),
        regulatory_flags: first_string_list(
            raw,
            &[&["rag_output", "regulatory_flags"], &["regulatory_flags"]],
        ),
        status: first_str(raw, &[&["status"]]).map(str::to_string),
    }
}

/// Walk a key path into the payload, treating JSON `null` as absent.
fn field<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = raw;
    for key in path {
        current = current.get(key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn first_str<'a>(raw: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths.iter().find_map(|path| field(raw, path)?.as_str())
}

fn first_f64(raw: &Value, paths: &[&[&str]]) -> Option<f64> {
    paths.iter().find_map(|path| field(raw, path)?.as_f64())
}

/// First present array in the chain, reduced to its string entries.
fn first_string_list(raw: &Value, paths: &[&[&str]]) -> Vec<String> {
    paths
        .iter()
        .find_map(|path| field(raw, path)?.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gets_defaults() {
        let view = normalize(&json!({}));
        assert_eq!(view.call_id, UNKNOWN_CALL_ID);
        assert_eq!(view.assessment, Assessment::LowRisk);
        assert_eq!(view.recommended_action, RecommendedAction::Unknown);
        assert_eq!(view.risk_score, None);
        assert_eq!(view.explanation, "");
        assert!(view.matched_patterns.is_empty());
    }

    #[test]
    fn flat_risk_score_wins_over_nested() {
        let view = normalize(&json!({
            "risk_score": 10,
            "risk_assessment": { "risk_score": 99 },
            "input_risk_assessment": { "risk_score": 50 }
        }));
        assert_eq!(view.risk_score, Some(10.0));
    }

    #[test]
    fn legacy_nested_score_is_last_resort() {
        let view = normalize(&json!({
            "input_risk_assessment": { "risk_score": 42 }
        }));
        assert_eq!(view.risk_score, Some(42.0));
    }

    #[test]
    fn wrong_typed_fields_fall_through_the_chain() {
        let view = normalize(&json!({
            "risk_score": "not a number",
            "risk_assessment": { "risk_score": 61 },
            "grounded_assessment": 7,
            "rag_output": { "grounded_assessment": "medium_risk" }
        }));
        assert_eq!(view.risk_score, Some(61.0));
        assert_eq!(view.assessment, Assessment::MediumRisk);
    }

    #[test]
    fn null_values_count_as_absent() {
        let view = normalize(&json!({
            "risk_score": null,
            "risk_assessment": { "risk_score": 33 }
        }));
        assert_eq!(view.risk_score, Some(33.0));
    }

    #[test]
    fn confidence_prefers_rag_output() {
        let view = normalize(&json!({
            "confidence": 0.1,
            "risk_assessment": { "confidence": 0.5 },
            "rag_output": { "confidence": 0.9 }
        }));
        assert_eq!(view.confidence, Some(0.9));
    }

    #[test]
    fn pattern_list_skips_non_strings() {
        let view = normalize(&json!({
            "rag_output": { "matched_patterns": ["Legal Threat", 42, null, "Aggressive Dispute"] }
        }));
        assert_eq!(view.matched_patterns, vec!["Legal Threat", "Aggressive Dispute"]);
    }

    #[test]
    fn malformed_timestamp_is_none() {
        let view = normalize(&json!({ "call_timestamp": "last tuesday" }));
        assert_eq!(view.timestamp, None);
    }

    #[test]
    fn empty_call_id_falls_back() {
        let view = normalize(&json!({ "call_id": "" }));
        assert_eq!(view.call_id, UNKNOWN_CALL_ID);
    }

    #[test]
    fn null_input_is_fine() {
        let view = normalize(&Value::Null);
        assert_eq!(view.call_id, UNKNOWN_CALL_ID);
        assert_eq!(view.assessment, Assessment::LowRisk);
    }
}
