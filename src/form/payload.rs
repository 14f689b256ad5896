use serde::Serialize;
use thiserror::Error;

use super::schema::{ElapsedRule, FormSchema};
use super::state::FormState;
use super::timestamp::{local_offset, parse_timestamp_in};
use time::{OffsetDateTime, UtcOffset};

/// Submitted in place of elapsed seconds when there is no prior transaction.
pub const ELAPSED_UNKNOWN_SECS: i64 = 99_999;

/// Local validation failure; submission is never attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{last} cannot be later than {current}.")]
    TimestampOrder { current: String, last: String },
    #[error("{label} is not a valid date-time: \"{input}\"")]
    InvalidTimestamp { label: String, input: String },
}

/// JSON object sent to the scoring endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl SubmissionPayload {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_json(self) -> serde_json::Value {
        serde_json::Value::Object(self.fields)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for SubmissionPayload {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }
}

/// Serialize the form values, applying the schema's derived elapsed-time field.
pub fn build_payload(
    schema: &FormSchema,
    state: &FormState,
) -> Result<SubmissionPayload, ValidationError> {
    build_payload_in(schema, state, local_offset())
}

/// Like [`build_payload`], reading offset-less timestamps in `local`.
fn build_payload_in(
    schema: &FormSchema,
    state: &FormState,
    local: UtcOffset,
) -> Result<SubmissionPayload, ValidationError> {
    let mut fields = serde_json::Map::new();
    for field in schema.fields() {
        let value = state
            .value(&field.key)
            .map(|value| value.to_json())
            .unwrap_or(serde_json::Value::Null);
        fields.insert(field.key.clone(), value);
    }
    if let Some(rule) = schema.elapsed_rule() {
        let elapsed = elapsed_seconds(schema, state, rule, local)?;
        fields.remove(&rule.last_key);
        fields.insert(rule.derived_key.clone(), serde_json::Value::from(elapsed));
    }
    Ok(SubmissionPayload { fields })
}

fn elapsed_seconds(
    schema: &FormSchema,
    state: &FormState,
    rule: &ElapsedRule,
    local: UtcOffset,
) -> Result<i64, ValidationError> {
    let current = timestamp_for(schema, state, &rule.current_key, local)?;
    let last = timestamp_for(schema, state, &rule.last_key, local)?;
    let (Some(current), Some(last)) = (current, last) else {
        return Ok(ELAPSED_UNKNOWN_SECS);
    };
    if last > current {
        return Err(ValidationError::TimestampOrder {
            current: label_for(schema, &rule.current_key),
            last: label_for(schema, &rule.last_key),
        });
    }
    Ok((current - last).whole_seconds().max(0))
}

fn timestamp_for(
    schema: &FormSchema,
    state: &FormState,
    key: &str,
    local: UtcOffset,
) -> Result<Option<OffsetDateTime>, ValidationError> {
    let Some(value) = state.value(key) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    let input = value.display();
    parse_timestamp_in(&input, local)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            label: label_for(schema, key),
            input,
        })
}

fn label_for(schema: &FormSchema, key: &str) -> String {
    schema
        .field(key)
        .map(|field| field.label.clone())
        .unwrap_or_else(|| key.to_string())
}
