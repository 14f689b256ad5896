mod updates;

use super::jobs::JobMessage;
use super::*;

impl EguiController {
    /// Drain finished worker messages. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::SubmissionFinished(message) => {
                    updates::handle_submission_finished(self, message);
                }
            }
        }
    }
}
