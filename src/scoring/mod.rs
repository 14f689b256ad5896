//! Client for the remote fraud-scoring service.

pub mod api;
mod error;
mod response;

pub use api::ScoringClient;
pub use error::{GENERIC_FAILURE_MESSAGE, SubmissionError};
pub use response::{PredictionResult, Verdict, VerdictSource, parse_prediction};
