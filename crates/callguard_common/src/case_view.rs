//! Canonical case model.
//!
//! The backend has shipped several payload shapes over time: risk fields
//! nested under `risk_assessment` or the legacy `input_risk_assessment`,
//! grounding fields under `rag_output`, and flattened copies of both.
//! Everything downstream of the fetch layer works on `CaseView`, produced
//! exactly once per payload by [`crate::normalize`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Final risk categorization from the grounding pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    HighRisk,
    MediumRisk,
    #[default]
    LowRisk,
}

impl Assessment {
    /// Exact, case-sensitive mapping per the backend contract.
    /// Anything unrecognized degrades to low risk.
    pub fn parse(s: &str) -> Self {
        match s {
            "high_risk" => Self::HighRisk,
            "medium_risk" => Self::MediumRisk,
            _ => Self::LowRisk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighRisk => "high_risk",
            Self::MediumRisk => "medium_risk",
            Self::LowRisk => "low_risk",
        }
    }

    /// Header display form: `HIGH RISK`.
    pub fn label_upper(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }

    /// Inline sentence form: `high risk`.
    pub fn label_inline(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// Action the grounding pipeline recommends for a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    EscalateToCompliance,
    ScheduleManualReview,
    Monitor,
    #[default]
    Unknown,
}

impl RecommendedAction {
    /// Exact match on the three known actions; everything else is unknown.
    pub fn parse(s: &str) -> Self {
        match s {
            "escalate_to_compliance" => Self::EscalateToCompliance,
            "schedule_manual_review" => Self::ScheduleManualReview,
            "monitor" => Self::Monitor,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EscalateToCompliance => "escalate_to_compliance",
            Self::ScheduleManualReview => "schedule_manual_review",
            Self::Monitor => "monitor",
            Self::Unknown => "unknown",
        }
    }
}

/// Canonical, fully-resolved representation of one call-risk case.
///
/// Immutable once produced. `assessment`, `risk_score` and
/// `recommended_action` always carry a defined value; absence in the raw
/// payload degrades to the documented defaults, never to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseView {
    pub call_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub risk_score: Option<f64>,
    pub assessment: Assessment,
    pub confidence: Option<f64>,
    pub explanation: String,
    pub matched_patterns: Vec<String>,
    pub recommended_action: RecommendedAction,
    pub regulatory_flags: Vec<String>,
    pub status: Option<String>,
}

impl CaseView {
    /// Project the view back onto the flat, first-priority raw key names.
    ///
    /// Normalizing the result reproduces this view field-for-field, which
    /// keeps re-normalization a no-op for already-normalized data.
    pub fn to_flat(&self) -> Value {
        let mut flat = serde_json::Map::new();
        flat.insert("call_id".into(), json!(self.call_id));
        if let Some(ts) = &self.timestamp {
            flat.insert("call_timestamp".into(), json!(ts.to_rfc3339()));
        }
        if let Some(score) = self.risk_score {
            flat.insert("risk_score".into(), json!(score));
        }
        flat.insert("grounded_assessment".into(), json!(self.assessment.as_str()));
        if let Some(conf) = self.confidence {
            flat.insert("confidence".into(), json!(conf));
        }
        flat.insert("summary_for_rag".into(), json!(self.explanation));
        flat.insert("matched_patterns".into(), json!(self.matched_patterns));
        flat.insert(
            "recommended_action".into(),
            json!(self.recommended_action.as_str()),
        );
        flat.insert("regulatory_flags".into(), json!(self.regulatory_flags));
        if let Some(status) = &self.status {
            flat.insert("status".into(), json!(status));
        }
        Value::Object(flat)
    }
}
