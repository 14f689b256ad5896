//! Schema-driven form engine.
//!
//! A [`FormSchema`] lists the fields of one scoring form. [`FormState`] holds
//! the current values (replaced on every edit) and [`build_payload`] turns
//! them into the JSON object sent to the scoring service.

mod payload;
mod schema;
mod state;
pub mod timestamp;
mod value;
pub mod variants;

pub use payload::{ELAPSED_UNKNOWN_SECS, SubmissionPayload, ValidationError, build_payload};
pub use schema::{ChoiceOption, ElapsedRule, FieldKind, FieldSpec, FormId, FormSchema, SchemaError};
pub use state::{FormError, FormState};
pub use value::FieldValue;
