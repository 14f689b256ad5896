//! Presentation helpers turning scoring results into display-ready rows.

use crate::form::FormId;
use crate::scoring::{PredictionResult, VerdictSource};

/// Risk bucket used to tint the risk badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a 0-100 risk value. Values outside the range are clamped first.
    pub fn from_percent(percent: f64) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        if percent < 40.0 {
            Self::Low
        } else if percent < 70.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Medium => "Medium risk",
            Self::High => "High risk",
        }
    }
}

/// Badge rendered next to the verdict when the model reports a risk score.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskBadge {
    pub text: String,
    pub level: RiskLevel,
}

/// Everything the prediction panel draws for one result.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub fraud: bool,
    pub headline: String,
    pub summary: Option<String>,
    /// Fraud category line, shown only for fraudulent verdicts.
    pub category_line: Option<String>,
    pub risk: Option<RiskBadge>,
    pub reasons: Vec<String>,
    pub explanation: Option<String>,
}

impl PredictionView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let fraud = result.is_fraud();
        let category = result.category.as_deref().filter(|_| fraud);
        let (headline, summary, category_line) = match result.source {
            VerdictSource::Flag => (
                format!("Prediction: {}", if fraud { "Fraud" } else { "Legitimate" }),
                None,
                category.map(|label| format!("Fraud Type: {label}")),
            ),
            VerdictSource::Category => {
                if fraud {
                    (
                        "FRAUD ALERT".to_string(),
                        Some("Transaction blocked as potential fraud.".to_string()),
                        category.map(|label| format!("Predicted fraud type: {label}")),
                    )
                } else {
                    (
                        "LEGIT TRANSACTION".to_string(),
                        Some("No fraud pattern detected.".to_string()),
                        None,
                    )
                }
            }
        };
        Self {
            fraud,
            headline,
            summary,
            category_line,
            risk: result.risk_percent.map(risk_badge),
            reasons: result.reasons.clone(),
            explanation: result.explanation.clone(),
        }
    }
}

/// Format a risk score as `Risk: 12%`, keeping one decimal when fractional.
pub fn risk_badge(percent: f64) -> RiskBadge {
    let clamped = percent.clamp(0.0, 100.0);
    let text = if clamped.fract() == 0.0 {
        format!("Risk: {clamped:.0}%")
    } else {
        format!("Risk: {clamped:.1}%")
    };
    RiskBadge {
        text,
        level: RiskLevel::from_percent(clamped),
    }
}

/// Label on the submit button for a form.
pub fn submit_label(form: FormId, submitting: bool) -> &'static str {
    match (form, submitting) {
        (_, true) => "Analyzing...",
        (FormId::ModelV1, false) => "Predict Fraud",
        (FormId::ModelV2, false) => "Analyze Transaction Risk",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Verdict;

    fn result(verdict: Verdict, source: VerdictSource) -> PredictionResult {
        PredictionResult {
            verdict,
            source,
            risk_percent: None,
            category: None,
            reasons: Vec::new(),
            explanation: None,
        }
    }

    #[test]
    fn legit_flag_has_no_fraud_type_line() {
        let mut legit = result(Verdict::Legit, VerdictSource::Flag);
        legit.category = Some("Mule".into());
        let view = PredictionView::from_result(&legit);
        assert_eq!(view.headline, "Prediction: Legitimate");
        assert_eq!(view.category_line, None);
    }

    #[test]
    fn fraud_flag_shows_category_when_present() {
        let mut fraud = result(Verdict::Fraud, VerdictSource::Flag);
        fraud.category = Some("Mule".into());
        let view = PredictionView::from_result(&fraud);
        assert_eq!(view.headline, "Prediction: Fraud");
        assert_eq!(view.category_line.as_deref(), Some("Fraud Type: Mule"));
    }

    #[test]
    fn category_verdict_uses_alert_headlines() {
        let mut legit = result(Verdict::Legit, VerdictSource::Category);
        legit.risk_percent = Some(12.0);
        let view = PredictionView::from_result(&legit);
        assert_eq!(view.headline, "LEGIT TRANSACTION");
        assert_eq!(
            view.risk,
            Some(RiskBadge {
                text: "Risk: 12%".into(),
                level: RiskLevel::Low,
            })
        );

        let mut fraud = result(Verdict::Fraud, VerdictSource::Category);
        fraud.category = Some("SIM_Swap".into());
        let view = PredictionView::from_result(&fraud);
        assert_eq!(view.headline, "FRAUD ALERT");
        assert_eq!(
            view.category_line.as_deref(),
            Some("Predicted fraud type: SIM_Swap")
        );
    }

    #[test]
    fn risk_badge_formats_and_buckets() {
        assert_eq!(risk_badge(39.5).text, "Risk: 39.5%");
        assert_eq!(risk_badge(39.5).level, RiskLevel::Low);
        assert_eq!(risk_badge(40.0).level, RiskLevel::Medium);
        assert_eq!(risk_badge(70.0).level, RiskLevel::High);
        assert_eq!(risk_badge(140.0).text, "Risk: 100%");
        assert_eq!(risk_badge(-3.0).level, RiskLevel::Low);
    }
}
