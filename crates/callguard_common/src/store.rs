//! In-memory case repository.
//!
//! The fetch layer loads normalized cases here; the assistant reads them
//! back through an injected lookup closure. Explicitly passed around
//! instead of living in a process-wide global, so every reader is visible
//! in the call graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::case_view::{Assessment, CaseView};
use crate::normalize::normalize;

/// One executed or requested workflow action, newest first in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub call_id: String,
    pub action: String,
    pub status: String,
    pub reason: String,
    pub actor: String,
}

/// Repository of the currently loaded cases and workflow log feed.
#[derive(Debug, Default)]
pub struct CaseStore {
    cases: Vec<CaseView>,
    logs: Vec<WorkflowLog>,
}

impl CaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded cases with a fresh fetch result.
    pub fn set_cases(&mut self, cases: Vec<CaseView>) {
        info!(count = cases.len(), "case store refreshed");
        self.cases = cases;
    }

    /// Normalize one raw payload and prepend it, as when an analyzed
    /// upload comes back with a new `call_id`. An existing case with the
    /// same id is replaced.
    pub fn ingest(&mut self, raw: &Value) -> &CaseView {
        let view = normalize(raw);
        self.cases.retain(|c| c.call_id != view.call_id);
        self.cases.insert(0, view);
        &self.cases[0]
    }

    pub fn cases(&self) -> &[CaseView] {
        &self.cases
    }

    pub fn find(&self, call_id: &str) -> Option<&CaseView> {
        self.cases.iter().find(|c| c.call_id == call_id)
    }

    /// High and medium risk cases, highest score first. Unscored cases
    /// sort last.
    pub fn risk_queue(&self) -> Vec<&CaseView> {
        let mut queue: Vec<&CaseView> = self
            .cases
            .iter()
            .filter(|c| {
                matches!(c.assessment, Assessment::HighRisk | Assessment::MediumRisk)
            })
            .collect();
        queue.sort_by(|a, b| {
            let a_score = a.risk_score.unwrap_or(f64::MIN);
            let b_score = b.risk_score.unwrap_or(f64::MIN);
            b_score.partial_cmp(&a_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        queue
    }

    pub fn logs(&self) -> &[WorkflowLog] {
        &self.logs
    }

    /// Prepend a manually triggered action to the workflow feed.
    pub fn record_action(&mut self, call_id: &str, action: &str, reason: &str) -> &WorkflowLog {
        let entry = WorkflowLog {
            id: format!("log_{}", Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            call_id: call_id.to_string(),
            action: action_label(action),
            status: "Success".to_string(),
            reason: reason.to_string(),
            actor: "Operator".to_string(),
        };
        info!(call_id = %call_id, action = %entry.action, "workflow action recorded");
        self.logs.insert(0, entry);
        &self.logs[0]
    }

    /// Prepend an automation-produced log entry as received.
    pub fn push_log(&mut self, entry: WorkflowLog) {
        self.logs.insert(0, entry);
    }
}

/// `schedule_manual_review` -> `Schedule Manual Review`.
fn action_label(action: &str) -> String {
    action
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
