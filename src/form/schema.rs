use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::FieldValue;

/// Identifies one of the scoring forms shown as tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormId {
    /// Banking-transfer schema scored by the V1 model.
    #[default]
    ModelV1,
    /// UPI transaction schema scored by the V2 model.
    ModelV2,
}

impl FormId {
    pub const ALL: [FormId; 2] = [FormId::ModelV1, FormId::ModelV2];

    pub fn tab_label(self) -> &'static str {
        match self {
            Self::ModelV1 => "Model V1",
            Self::ModelV2 => "Model V2",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModelV1 => "model_v1",
            Self::ModelV2 => "model_v2",
        }
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a closed option list.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: FieldValue,
}

impl ChoiceOption {
    /// Option whose label and submitted value are the same string.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value: FieldValue::Text(value),
        }
    }

    /// Option that submits a JSON number.
    pub fn number(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: FieldValue::Number(value),
        }
    }

    pub(crate) fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        raw == self.label || raw == self.value.display()
    }
}

/// Type tag that decides coercion and the control rendered for a field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Toggle,
    DateTime,
    Choice(Vec<ChoiceOption>),
}

/// Static description of a single form field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// JSON payload key, unique within a form.
    pub key: String,
    pub label: String,
    pub hint: Option<String>,
    /// Heading the field is grouped under when rendered.
    pub section: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            hint: None,
            section: String::new(),
            kind,
        }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn toggle(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Toggle)
    }

    pub fn datetime(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::DateTime)
    }

    pub fn choice(key: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(key, label, FieldKind::Choice(options))
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn in_section(mut self, section: &str) -> Self {
        self.section = section.to_string();
        self
    }

    /// Value a freshly mounted form holds for this field.
    pub fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Choice(options) => options
                .first()
                .map(|option| option.value.clone())
                .unwrap_or(FieldValue::Empty),
            FieldKind::Toggle => FieldValue::Bool(false),
            FieldKind::Text | FieldKind::Number | FieldKind::DateTime => FieldValue::Empty,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }
}

/// Replaces a "last transaction" timestamp with elapsed seconds at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElapsedRule {
    pub current_key: String,
    pub last_key: String,
    pub derived_key: String,
}

/// Errors raised when a schema definition is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate field key `{0}`")]
    DuplicateKey(String),
    #[error("Choice field `{0}` has no options")]
    EmptyChoice(String),
    #[error("Elapsed rule refers to `{0}`, which is not a date-time field")]
    ElapsedField(String),
    #[error("Derived key `{0}` collides with a field key")]
    DerivedKeyCollision(String),
}

/// Ordered field list for one scoring form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormSchema {
    id: FormId,
    title: String,
    fields: Vec<FieldSpec>,
    elapsed: Option<ElapsedRule>,
}

impl FormSchema {
    pub fn new(
        id: FormId,
        title: &str,
        fields: Vec<FieldSpec>,
        elapsed: Option<ElapsedRule>,
    ) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(SchemaError::DuplicateKey(field.key.clone()));
            }
            if matches!(&field.kind, FieldKind::Choice(options) if options.is_empty()) {
                return Err(SchemaError::EmptyChoice(field.key.clone()));
            }
        }
        if let Some(rule) = &elapsed {
            for key in [&rule.current_key, &rule.last_key] {
                let is_datetime = fields
                    .iter()
                    .any(|field| &field.key == key && field.kind == FieldKind::DateTime);
                if !is_datetime {
                    return Err(SchemaError::ElapsedField(key.clone()));
                }
            }
            if seen.contains(rule.derived_key.as_str()) {
                return Err(SchemaError::DerivedKeyCollision(rule.derived_key.clone()));
            }
        }
        Ok(Self {
            id,
            title: title.to_string(),
            fields,
            elapsed,
        })
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key.as_str())
    }

    pub fn elapsed_rule(&self) -> Option<&ElapsedRule> {
        self.elapsed.as_ref()
    }

    /// Consecutive runs of fields sharing a section heading, in schema order.
    pub fn sections(&self) -> Vec<(&str, &[FieldSpec])> {
        let mut sections = Vec::new();
        let mut start = 0;
        for index in 1..=self.fields.len() {
            let boundary = index == self.fields.len()
                || self.fields[index].section != self.fields[start].section;
            if boundary {
                sections.push((self.fields[start].section.as_str(), &self.fields[start..index]));
                start = index;
            }
        }
        sections
    }
}
