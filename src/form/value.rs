use serde::{Serialize, Serializer};

/// Largest magnitude at which every whole `f64` is still an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Current value of a single form field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// The field has not been filled in. Serializes as JSON `null`.
    Empty,
    /// Free text, identifiers, and ISO-8601 date-time strings.
    Text(String),
    /// Parsed numeric input.
    Number(f64),
    /// Toggle state.
    Bool(bool),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Text shown in an input control bound to this value.
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::Bool(flag) => flag.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Empty => serde_json::Value::Null,
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Number(number) => number_to_json(*number),
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Whole numbers go out as JSON integers so `1000` is not sent as `1000.0`.
pub(crate) fn number_to_json(number: f64) -> serde_json::Value {
    if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER {
        return serde_json::Value::from(number as i64);
    }
    serde_json::Number::from_f64(number)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

pub(crate) fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_serializes_as_null_not_zero() {
        assert_eq!(FieldValue::Empty.to_json(), serde_json::Value::Null);
        assert_eq!(serde_json::to_string(&FieldValue::Empty).unwrap(), "null");
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        assert_eq!(FieldValue::Number(1000.0).to_json(), json!(1000));
        assert_eq!(FieldValue::Number(-3.0).to_json(), json!(-3));
        assert_eq!(FieldValue::Number(12.5).to_json(), json!(12.5));
    }

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(FieldValue::Text("   ".into()).is_empty());
        assert!(!FieldValue::Text("A".into()).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn display_matches_input_text() {
        assert_eq!(FieldValue::Number(4000.0).display(), "4000");
        assert_eq!(FieldValue::Number(0.25).display(), "0.25");
        assert_eq!(FieldValue::Empty.display(), "");
    }
}
