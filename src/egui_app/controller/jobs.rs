use crate::form::{FormId, SubmissionPayload};
use crate::scoring::{PredictionResult, ScoringClient, SubmissionError};
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};
use tracing::debug;

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    SubmissionFinished(SubmissionResult),
}

#[derive(Debug)]
pub(crate) struct SubmissionJob {
    pub(crate) form_id: FormId,
    pub(crate) request_id: u64,
    pub(crate) path: String,
    pub(crate) payload: SubmissionPayload,
}

#[derive(Debug)]
pub(crate) struct SubmissionResult {
    pub(crate) form_id: FormId,
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionResult, SubmissionError>,
}

/// Worker threads report back through one channel drained by the UI thread.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pending_submission: Option<(FormId, u64)>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            pending_submission: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Spawn a worker for one submission. A previous, abandoned worker may still
    /// be running; its result is filtered out by [`Self::is_pending`].
    pub(super) fn begin_submission(&mut self, client: ScoringClient, job: SubmissionJob) {
        self.pending_submission = Some((job.form_id, job.request_id));
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            debug!(form = %job.form_id, request_id = job.request_id, "Submission worker started");
            let result = client.submit(&job.path, &job.payload);
            let _ = tx.send(JobMessage::SubmissionFinished(SubmissionResult {
                form_id: job.form_id,
                request_id: job.request_id,
                result,
            }));
        });
    }

    pub(super) fn is_pending(&self, form_id: FormId, request_id: u64) -> bool {
        self.pending_submission == Some((form_id, request_id))
    }

    pub(super) fn submission_in_progress(&self) -> bool {
        self.pending_submission.is_some()
    }

    pub(super) fn clear_submission(&mut self) {
        self.pending_submission = None;
    }
}
