use super::*;
use crate::egui_app::controller::jobs::SubmissionResult;
use crate::egui_app::view_model::PredictionView;
use tracing::{debug, info, warn};

pub(super) fn handle_submission_finished(
    controller: &mut EguiController,
    message: SubmissionResult,
) {
    let current = controller.ui.form.pending_request();
    if !controller.jobs.is_pending(message.form_id, message.request_id)
        || controller.ui.form.form_id != message.form_id
        || current != Some(message.request_id)
    {
        debug!(
            form = %message.form_id,
            request_id = message.request_id,
            "Dropping stale submission result"
        );
        return;
    }
    controller.jobs.clear_submission();
    match message.result {
        Ok(prediction) => {
            info!(
                form = %message.form_id,
                request_id = message.request_id,
                fraud = prediction.is_fraud(),
                risk = ?prediction.risk_percent,
                "Submission scored"
            );
            let view = PredictionView::from_result(&prediction);
            let status = view.headline.clone();
            let form = &mut controller.ui.form;
            form.submission_error = None;
            form.result = Some(view);
            form.phase = SubmitPhase::Succeeded;
            controller.set_status(status, StatusTone::Info);
        }
        Err(err) => {
            warn!(
                form = %message.form_id,
                request_id = message.request_id,
                error = %err,
                "Submission failed"
            );
            let form = &mut controller.ui.form;
            form.result = None;
            form.submission_error = Some(err.user_message());
            form.phase = SubmitPhase::Failed;
            controller.set_status("Scoring request failed", StatusTone::Error);
        }
    }
}
