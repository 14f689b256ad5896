use std::collections::BTreeMap;

use crate::egui_app::view_model::PredictionView;
use crate::form::{FormId, FormSchema, FormState};

/// Submission lifecycle of the mounted form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// A request is in flight; only its response is accepted.
    Submitting { request_id: u64 },
    Succeeded,
    Failed,
}

/// UI state for the form shown in the active tab.
#[derive(Clone, Debug)]
pub struct FormPanelState {
    pub form_id: FormId,
    /// Coerced values sent on submit.
    pub values: FormState,
    /// Raw text per input, kept separately so partial numbers like `-` stay editable.
    pub drafts: BTreeMap<String, String>,
    /// Per-field coercion errors from the last edit.
    pub field_errors: BTreeMap<String, String>,
    pub phase: SubmitPhase,
    pub validation_error: Option<String>,
    pub submission_error: Option<String>,
    pub result: Option<PredictionView>,
}

impl FormPanelState {
    /// Fresh state with schema defaults.
    pub fn mount(schema: &FormSchema) -> Self {
        let values = FormState::initialize(schema);
        let drafts = values
            .values()
            .iter()
            .map(|(key, value)| (key.clone(), value.display()))
            .collect();
        Self {
            form_id: schema.id(),
            values,
            drafts,
            field_errors: BTreeMap::new(),
            phase: SubmitPhase::Idle,
            validation_error: None,
            submission_error: None,
            result: None,
        }
    }

    pub fn draft(&self, key: &str) -> &str {
        self.drafts.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting { .. })
    }

    pub fn pending_request(&self) -> Option<u64> {
        match self.phase {
            SubmitPhase::Submitting { request_id } => Some(request_id),
            _ => None,
        }
    }
}
