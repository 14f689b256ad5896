use thiserror::Error;

/// Shown for failures the user cannot act on beyond retrying.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while contacting the scoring service. Please try again.";

/// Why a submission did not produce a prediction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The configured deadline expired before a response arrived.
    #[error("Scoring service did not respond within {secs}s")]
    Timeout { secs: u64 },
    /// The request could not complete (DNS, connection refused, reset).
    #[error("HTTP error: {0}")]
    Transport(String),
    /// A 2xx response whose body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid endpoint {path}: {reason}")]
    Endpoint { path: String, reason: String },
}

impl SubmissionError {
    /// Message rendered inline in the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Timeout { secs } => {
                format!("The scoring service did not respond within {secs} seconds.")
            }
            Self::Transport(_) | Self::InvalidResponse(_) | Self::Endpoint { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Extract the human-readable message from an error response body.
///
/// FastAPI-style bodies carry `detail` either as a string or, for request
/// validation failures, as a list of `{loc, msg}` objects.
pub(crate) fn server_message(status: u16, body: &str) -> String {
    let fallback = || format!("Scoring service returned HTTP {status}");
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body.trim()) else {
        return fallback();
    };
    let message = match value.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.trim().to_string()),
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<String> = items.iter().filter_map(validation_entry).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(|text| text.trim().to_string()),
    };
    message
        .filter(|text| !text.is_empty())
        .unwrap_or_else(fallback)
}

fn validation_entry(item: &serde_json::Value) -> Option<String> {
    let msg = item.get("msg").and_then(|msg| msg.as_str())?;
    let location = item
        .get("loc")
        .and_then(|loc| loc.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter(|part| part.as_str() != Some("body"))
                .map(|part| match part {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .filter(|loc| !loc.is_empty());
    Some(match location {
        Some(loc) => format!("{loc}: {msg}"),
        None => msg.to_string(),
    })
}
