use std::collections::BTreeMap;

use thiserror::Error;

use super::schema::{FieldKind, FormSchema};
use super::value::FieldValue;

/// Errors raised while applying a single edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("{label} must be a number (got \"{input}\")")]
    InvalidNumber { label: String, input: String },
    #[error("\"{input}\" is not an option for {label}")]
    UnknownOption { label: String, input: String },
}

/// Current values of a mounted form, one entry per schema field.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    /// Seed every field with its default value.
    pub fn initialize(schema: &FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| (field.key.clone(), field.default_value()))
            .collect();
        Self { values }
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// Return a copy of this state with one field replaced.
    ///
    /// The raw input is coerced by the field kind: numbers parse to `f64`
    /// with blank input mapping to [`FieldValue::Empty`], toggles flip, and
    /// choices store the typed value of the matching option.
    pub fn with_field(
        &self,
        schema: &FormSchema,
        key: &str,
        raw: &str,
    ) -> Result<FormState, FormError> {
        let field = schema
            .field(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        let value = match &field.kind {
            FieldKind::Number => parse_number(raw).ok_or_else(|| FormError::InvalidNumber {
                label: field.label.clone(),
                input: raw.to_string(),
            })?,
            FieldKind::Toggle => {
                let current = self.value(key).and_then(FieldValue::as_bool).unwrap_or(false);
                FieldValue::Bool(!current)
            }
            FieldKind::Choice(options) => options
                .iter()
                .find(|option| option.matches(raw))
                .map(|option| option.value.clone())
                .ok_or_else(|| FormError::UnknownOption {
                    label: field.label.clone(),
                    input: raw.to_string(),
                })?,
            FieldKind::Text | FieldKind::DateTime => {
                if raw.trim().is_empty() {
                    FieldValue::Empty
                } else {
                    FieldValue::Text(raw.to_string())
                }
            }
        };
        let mut next = self.clone();
        next.values.insert(field.key.clone(), value);
        Ok(next)
    }
}

fn parse_number(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(FieldValue::Empty);
    }
    let number = trimmed.parse::<f64>().ok()?;
    number.is_finite().then_some(FieldValue::Number(number))
}
