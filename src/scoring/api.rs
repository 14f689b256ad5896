//! Blocking client for the fraud-scoring HTTP service.

use tracing::{debug, warn};
use url::Url;

use super::error::{SubmissionError, server_message};
use super::response::{PredictionResult, parse_prediction};
use crate::config::{ConfigError, ScoringSettings};
use crate::form::SubmissionPayload;
use crate::http_client;

/// Sends one payload per call to the configured scoring endpoint. No retries.
#[derive(Clone, Debug)]
pub struct ScoringClient {
    agent: ureq::Agent,
    base_url: Url,
    timeout_secs: u64,
    max_response_bytes: usize,
}

impl ScoringClient {
    pub fn new(settings: &ScoringSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::build_agent(settings),
            base_url: settings.base_url()?,
            timeout_secs: settings.timeout_secs,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` below the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, SubmissionError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim();
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|err| SubmissionError::Endpoint {
            path: path.to_string(),
            reason: err.to_string(),
        })
    }

    /// Submit a payload and parse the verdict.
    pub fn submit(
        &self,
        path: &str,
        payload: &SubmissionPayload,
    ) -> Result<PredictionResult, SubmissionError> {
        let body = self.exchange(path, payload)?;
        parse_prediction(&body)
    }

    /// POST the payload as JSON and return the raw 2xx response body.
    pub fn exchange(
        &self,
        path: &str,
        payload: &SubmissionPayload,
    ) -> Result<String, SubmissionError> {
        let url = self.endpoint(path)?;
        let request = self
            .agent
            .post(url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        debug!(url = %url, fields = payload.len(), "POST scoring request");
        let response = match request.send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = self
                    .read_body(response)
                    .unwrap_or_else(|err| err.to_string());
                warn!(url = %url, status, body = %body, "Scoring service rejected request");
                return Err(SubmissionError::Server {
                    status,
                    message: server_message(status, &body),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(url = %url, error = %transport, "Scoring request failed");
                if http_client::is_timeout(&transport) {
                    return Err(SubmissionError::Timeout {
                        secs: self.timeout_secs,
                    });
                }
                return Err(SubmissionError::Transport(transport.to_string()));
            }
        };
        debug!(url = %url, status = response.status(), "Scoring response received");
        self.read_body(response)
    }

    fn read_body(&self, response: ureq::Response) -> Result<String, SubmissionError> {
        let bytes = http_client::read_response_bytes(response, self.max_response_bytes)
            .map_err(|err| {
                if http_client::is_timeout_io(&err) {
                    SubmissionError::Timeout {
                        secs: self.timeout_secs,
                    }
                } else {
                    SubmissionError::InvalidResponse(err.to_string())
                }
            })?;
        String::from_utf8(bytes).map_err(|err| SubmissionError::InvalidResponse(err.to_string()))
    }
}
