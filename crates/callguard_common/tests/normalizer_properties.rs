//! Normalizer property suite: totality, precedence, and the
//! re-normalization identity.

use callguard_common::{normalize, Assessment, RecommendedAction};
use serde_json::{json, Value};

#[test]
fn total_over_degenerate_inputs() {
    let inputs = vec![
        Value::Null,
        json!({}),
        json!([]),
        json!("just a string"),
        json!(42),
        json!({ "call_id": 12345 }),
        json!({ "risk_assessment": "not an object" }),
        json!({ "rag_output": { "matched_patterns": "not an array" } }),
        json!({ "rag_output": null, "risk_assessment": null }),
    ];
    for raw in inputs {
        let view = normalize(&raw);
        assert!(!view.call_id.is_empty(), "call_id empty for {raw}");
        assert_eq!(view.call_id, "Unknown");
    }
}

#[test]
fn call_id_alias_is_accepted() {
    assert_eq!(normalize(&json!({ "callId": "c9" })).call_id, "c9");
    // Canonical name wins over the alias.
    assert_eq!(
        normalize(&json!({ "call_id": "a", "callId": "b" })).call_id,
        "a"
    );
}

#[test]
fn flat_fields_win_over_nested() {
    let view = normalize(&json!({
        "risk_score": 10,
        "risk_assessment": { "risk_score": 99 },
        "grounded_assessment": "high_risk",
        "rag_output": { "grounded_assessment": "low_risk" },
        "recommended_action": "monitor",
    }));
    assert_eq!(view.risk_score, Some(10.0));
    assert_eq!(view.assessment, Assessment::HighRisk);
    assert_eq!(view.recommended_action, RecommendedAction::Monitor);
}

#[test]
fn defaults_cover_every_required_field() {
    let view = normalize(&json!({}));
    assert_eq!(view.assessment, Assessment::LowRisk);
    assert_eq!(view.recommended_action, RecommendedAction::Unknown);
    assert_eq!(view.risk_score, None);
    assert_eq!(view.confidence, None);
    assert_eq!(view.explanation, "");
    assert!(view.matched_patterns.is_empty());
    assert!(view.regulatory_flags.is_empty());
    assert_eq!(view.status, None);
}

fn production_shaped_payload() -> Value {
    json!({
        "call_id": "call_2026_02_09_09e6b8",
        "call_timestamp": "2026-02-09T08:45:00+00:00",
        "customer_id": "CUST-3921",
        "duration": "2:18",
        "input_risk_assessment": {
            "risk_score": 57,
            "fraud_likelihood": "medium",
            "confidence": 0.71
        },
        "rag_output": {
            "grounded_assessment": "medium_risk",
            "explanation": "Customer reported unexpected job loss.",
            "recommended_action": "schedule_manual_review",
            "confidence": 0.75,
            "regulatory_flags": ["Hardship verification required"],
            "matched_patterns": ["Financial Hardship Claim", "Transparent Disclosure"]
        },
        "status": "complete"
    })
}

#[test]
fn production_shape_resolves_through_the_chains() {
    let view = normalize(&production_shaped_payload());
    assert_eq!(view.call_id, "call_2026_02_09_09e6b8");
    assert_eq!(view.risk_score, Some(57.0));
    assert_eq!(view.assessment, Assessment::MediumRisk);
    assert_eq!(view.confidence, Some(0.75));
    assert_eq!(view.explanation, "Customer reported unexpected job loss.");
    assert_eq!(view.matched_patterns.len(), 2);
    assert_eq!(view.recommended_action, RecommendedAction::ScheduleManualReview);
    assert_eq!(view.regulatory_flags, vec!["Hardship verification required"]);
    assert_eq!(view.status.as_deref(), Some("complete"));
    assert!(view.timestamp.is_some());
}

#[test]
fn renormalizing_the_flat_projection_is_identity() {
    let first = normalize(&production_shaped_payload());
    let second = normalize(&first.to_flat());
    assert_eq!(first, second);
}

#[test]
fn identity_holds_for_sparse_views_too() {
    let sparse = normalize(&json!({ "call_id": "c1" }));
    assert_eq!(normalize(&sparse.to_flat()), sparse);

    let unknown = normalize(&json!({}));
    assert_eq!(normalize(&unknown.to_flat()), unknown);
}
