use super::jobs::SubmissionJob;
use super::*;
use crate::form::build_payload;

impl EguiController {
    /// Validate the mounted form and send it for scoring on a worker thread.
    pub fn submit(&mut self) {
        if self.ui.form.is_submitting() {
            return;
        }
        let form_id = self.ui.active_form;
        let schema = self.schemas.get(form_id);
        let form = &mut self.ui.form;
        if !form.field_errors.is_empty() {
            form.validation_error = Some("Fix the highlighted fields before submitting.".into());
            return;
        }
        let payload = match build_payload(schema, &form.values) {
            Ok(payload) => payload,
            Err(err) => {
                info!(form = %form_id, error = %err, "Submission blocked by validation");
                form.validation_error = Some(err.to_string());
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let form = &mut self.ui.form;
        form.validation_error = None;
        form.submission_error = None;
        form.result = None;
        form.phase = SubmitPhase::Submitting { request_id };

        let path = self.config.scoring.path_for(form_id).to_string();
        debug!(
            form = %form_id,
            request_id,
            path = %path,
            fields = payload.len(),
            "Submitting form"
        );
        self.set_status(format!("Scoring via {path}…"), StatusTone::Busy);
        self.jobs.begin_submission(
            self.client.clone(),
            SubmissionJob {
                form_id,
                request_id,
                path,
                payload,
            },
        );
    }

    /// Abandon the in-flight submission. Its response is dropped when it arrives.
    pub fn cancel_submission(&mut self) {
        let Some(request_id) = self.ui.form.pending_request() else {
            return;
        };
        debug!(form = %self.ui.active_form, request_id, "Cancelling submission");
        self.jobs.clear_submission();
        self.ui.form.phase = SubmitPhase::Idle;
        self.set_status("Submission cancelled", StatusTone::Info);
    }

    /// True while a worker result is still expected.
    pub fn has_pending_job(&self) -> bool {
        self.jobs.submission_in_progress()
    }
}
