//! Dashboard statistics reducer.

use serde::{Deserialize, Serialize};

use crate::case_view::{Assessment, CaseView};

/// Headline numbers for the dashboard, computed from the loaded cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Rounded mean over cases that carry a score; 0 when none do.
    pub avg_risk_score: i64,
}

impl DashboardStats {
    pub fn from_cases(cases: &[CaseView]) -> Self {
        let mut stats = Self {
            total: cases.len(),
            ..Self::default()
        };
        let mut score_sum = 0.0;
        let mut scored = 0usize;

        for case in cases {
            match case.assessment {
                Assessment::HighRisk => stats.high += 1,
                Assessment::MediumRisk => stats.medium += 1,
                Assessment::LowRisk => stats.low += 1,
            }
            if let Some(score) = case.risk_score {
                score_sum += score;
                scored += 1;
            }
        }

        if scored > 0 {
            stats.avg_risk_score = (score_sum / scored as f64).round() as i64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn case(assessment: &str, score: f64) -> CaseView {
        normalize(&json!({
            "call_id": "c",
            "grounded_assessment": assessment,
            "risk_score": score
        }))
    }

    #[test]
    fn counts_and_average() {
        let cases = vec![
            case("high_risk", 88.0),
            case("medium_risk", 57.0),
            case("low_risk", 12.0),
        ];
        let stats = DashboardStats::from_cases(&cases);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        // (88 + 57 + 12) / 3 = 52.33 rounds to 52.
        assert_eq!(stats.avg_risk_score, 52);
    }

    #[test]
    fn no_scores_means_zero_average() {
        let cases = vec![normalize(&json!({ "call_id": "c" }))];
        let stats = DashboardStats::from_cases(&cases);
        assert_eq!(stats.avg_risk_score, 0);
        assert_eq!(stats.low, 1);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(DashboardStats::from_cases(&[]), DashboardStats::default());
    }
}
