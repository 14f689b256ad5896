//! Controller bridging the form engine and scoring client to the egui UI.

mod background_jobs;
mod jobs;
mod submission;

use crate::config::{self, AppConfig, ConfigError};
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::form::{FieldKind, FormError, FormId, FormSchema, SchemaError, timestamp, variants};
use crate::scoring::ScoringClient;
use jobs::ControllerJobs;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures while building the controller at startup.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid form definition: {0}")]
    Schema(#[from] SchemaError),
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    config: AppConfig,
    client: ScoringClient,
    schemas: FormSchemas,
    jobs: ControllerJobs,
    next_request_id: u64,
}

impl EguiController {
    /// Build the controller and mount the form remembered in `config`.
    pub fn new(config: AppConfig) -> Result<Self, ControllerError> {
        let client = ScoringClient::new(&config.scoring)?;
        let schemas = FormSchemas {
            transfer: variants::schema_for(FormId::ModelV1)?,
            upi: variants::schema_for(FormId::ModelV2)?,
        };
        let initial = config.ui.last_form;
        let ui = UiState::new(schemas.get(initial));
        info!(
            base_url = %client.base_url(),
            form = %initial,
            "Controller ready"
        );
        Ok(Self {
            ui,
            config,
            client,
            schemas,
            jobs: ControllerJobs::new(),
            next_request_id: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Schema of the mounted form.
    pub fn active_schema(&self) -> &FormSchema {
        self.schemas.get(self.ui.active_form)
    }

    pub fn is_submitting(&self) -> bool {
        self.ui.form.is_submitting()
    }

    /// Apply raw input to one field, keeping the draft text in sync.
    pub fn set_field(&mut self, key: &str, raw: &str) {
        let schema = self.schemas.get(self.ui.active_form);
        let result = self.ui.form.values.with_field(schema, key, raw);
        let form = &mut self.ui.form;
        form.drafts.insert(key.to_string(), raw.to_string());
        match result {
            Ok(values) => {
                form.values = values;
                form.field_errors.remove(key);
            }
            Err(err @ FormError::InvalidNumber { .. }) => {
                form.field_errors.insert(key.to_string(), err.to_string());
            }
            Err(err) => {
                warn!(field = key, error = %err, "Rejected field edit");
                form.field_errors.insert(key.to_string(), err.to_string());
            }
        }
        self.after_edit();
    }

    /// Flip a toggle field.
    pub fn toggle(&mut self, key: &str) {
        let schema = self.schemas.get(self.ui.active_form);
        match self.ui.form.values.with_field(schema, key, "") {
            Ok(values) => {
                let display = values.value(key).map(|value| value.display());
                self.ui.form.values = values;
                if let Some(display) = display {
                    self.ui.form.drafts.insert(key.to_string(), display);
                }
                self.after_edit();
            }
            Err(err) => warn!(field = key, error = %err, "Rejected toggle"),
        }
    }

    /// Fill a date-time field with the current local time.
    pub fn fill_now(&mut self, key: &str) {
        let is_datetime = matches!(
            self.active_schema().field(key).map(|field| &field.kind),
            Some(FieldKind::DateTime)
        );
        if is_datetime {
            self.set_field(key, &timestamp::now_local_timestamp());
        }
    }

    /// Edits after a finished submission re-arm the form; the last result stays visible.
    fn after_edit(&mut self) {
        let form = &mut self.ui.form;
        if matches!(form.phase, SubmitPhase::Succeeded | SubmitPhase::Failed) {
            form.phase = SubmitPhase::Idle;
        }
        form.validation_error = None;
    }

    /// Restore schema defaults. Abandons any in-flight submission.
    pub fn reset_form(&mut self) {
        if self.ui.form.is_submitting() {
            self.jobs.clear_submission();
        }
        let schema = self.schemas.get(self.ui.active_form);
        self.ui.form = FormPanelState::mount(schema);
        self.set_status("Form reset", StatusTone::Idle);
    }

    /// Switch tabs. The outgoing form is unmounted and its state discarded.
    pub fn select_form(&mut self, id: FormId) {
        if id == self.ui.active_form {
            return;
        }
        if self.ui.form.is_submitting() {
            debug!(form = %self.ui.active_form, "Abandoning submission on tab switch");
            self.jobs.clear_submission();
        }
        self.ui.active_form = id;
        let schema = self.schemas.get(id);
        self.ui.form = FormPanelState::mount(schema);
        let title = schema.title().to_string();
        self.set_status(title, StatusTone::Idle);
        self.persist_last_form(id);
    }

    fn persist_last_form(&mut self, id: FormId) {
        self.config.ui.last_form = id;
        if let Err(err) = config::save(&self.config) {
            warn!(error = %err, "Failed to persist last active form");
            self.set_status(format!("Failed to save config: {err}"), StatusTone::Warning);
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}

/// The built-in schemas, one per tab.
struct FormSchemas {
    transfer: FormSchema,
    upi: FormSchema,
}

impl FormSchemas {
    fn get(&self, id: FormId) -> &FormSchema {
        match id {
            FormId::ModelV1 => &self.transfer,
            FormId::ModelV2 => &self.upi,
        }
    }
}

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;
