//! Shared state types for the egui UI.

mod form_panel;
mod status;

pub use form_panel::*;
pub use status::*;

use crate::form::{FormId, FormSchema};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    /// Tab currently shown; owned here and handed to the tab bar by value.
    pub active_form: FormId,
    /// The mounted form. Replaced wholesale on tab switch.
    pub form: FormPanelState,
}

impl UiState {
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            status: StatusBarState::idle(),
            active_form: schema.id(),
            form: FormPanelState::mount(schema),
        }
    }
}
