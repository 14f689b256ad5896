//! Parsing of scoring-service responses into [`PredictionResult`].
//!
//! Two upstream contracts are accepted. The binary contract reports
//! `is_fraud` (bool or 0/1) plus an `explanation` string; the categorical
//! contract reports `fraud_type`, `risk_percent` and `reasons`, where reasons
//! arrive either as a JSON list or as one string of `• `-prefixed lines.

use serde::Deserialize;

use super::error::SubmissionError;

const REASON_BULLET: char = '•';
const LEGIT_CATEGORIES: [&str; 6] = ["legit", "legitimate", "normal", "none", "not_fraud", "genuine"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Fraud,
    Legit,
}

/// Which response field the verdict was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerdictSource {
    /// `is_fraud` flag.
    Flag,
    /// `fraud_type` category label.
    Category,
}

/// Verdict returned by the scoring service, rendered as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub verdict: Verdict,
    pub source: VerdictSource,
    /// Risk on a 0–100 scale, when the model reports one.
    pub risk_percent: Option<f64>,
    /// Predicted fraud category.
    pub category: Option<String>,
    pub reasons: Vec<String>,
    pub explanation: Option<String>,
}

impl PredictionResult {
    pub fn is_fraud(&self) -> bool {
        self.verdict == Verdict::Fraud
    }
}

#[derive(Debug, Deserialize)]
struct PredictionWire {
    #[serde(default)]
    is_fraud: Option<serde_json::Value>,
    #[serde(default)]
    fraud_type: Option<String>,
    #[serde(default)]
    risk_percent: Option<serde_json::Value>,
    #[serde(default)]
    risk_score: Option<serde_json::Value>,
    #[serde(default)]
    reasons: Option<ReasonsWire>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReasonsWire {
    List(Vec<String>),
    Text(String),
}

/// Parse a successful response body.
pub fn parse_prediction(body: &str) -> Result<PredictionResult, SubmissionError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::InvalidResponse(
            "Empty response body".to_string(),
        ));
    }
    let wire: PredictionWire = serde_json::from_str(trimmed)
        .map_err(|err| SubmissionError::InvalidResponse(format!("{err}: {trimmed}")))?;

    let category = wire
        .fraud_type
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());
    let (verdict, source) = match wire.is_fraud.filter(|flag| !flag.is_null()) {
        Some(flag) => (flag_verdict(&flag)?, VerdictSource::Flag),
        None => match category.as_deref() {
            Some(label) => (category_verdict(label), VerdictSource::Category),
            None => {
                return Err(SubmissionError::InvalidResponse(
                    "Response has neither is_fraud nor fraud_type".to_string(),
                ));
            }
        },
    };

    Ok(PredictionResult {
        verdict,
        source,
        risk_percent: wire
            .risk_percent
            .as_ref()
            .and_then(risk_value)
            .or_else(|| wire.risk_score.as_ref().and_then(risk_value)),
        category,
        reasons: wire.reasons.map(normalize_reasons).unwrap_or_default(),
        explanation: wire
            .explanation
            .filter(|text| !text.trim().is_empty()),
    })
}

fn flag_verdict(flag: &serde_json::Value) -> Result<Verdict, SubmissionError> {
    let is_fraud = match flag {
        serde_json::Value::Bool(flag) => Some(*flag),
        serde_json::Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        serde_json::Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "fraud" => Some(true),
            "0" | "false" | "no" | "legit" | "legitimate" => Some(false),
            _ => None,
        },
        _ => None,
    };
    is_fraud
        .map(|flag| if flag { Verdict::Fraud } else { Verdict::Legit })
        .ok_or_else(|| SubmissionError::InvalidResponse(format!("Unrecognized is_fraud value {flag}")))
}

fn category_verdict(label: &str) -> Verdict {
    let lowered = label.to_ascii_lowercase();
    if LEGIT_CATEGORIES.contains(&lowered.as_str()) {
        Verdict::Legit
    } else {
        Verdict::Fraud
    }
}

fn risk_value(value: &serde_json::Value) -> Option<f64> {
    let risk = match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }?;
    risk.is_finite().then_some(risk)
}

fn normalize_reasons(wire: ReasonsWire) -> Vec<String> {
    let entries = match wire {
        ReasonsWire::List(entries) => entries,
        ReasonsWire::Text(text) => vec![text],
    };
    entries
        .iter()
        .flat_map(|entry| entry.lines())
        .map(|line| line.trim().trim_start_matches(REASON_BULLET).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
