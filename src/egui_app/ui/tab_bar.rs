//! Tab strip switching between the scoring forms.
//!
//! The caller owns the active tab. [`show`] receives it by value and reports
//! which tab the user asked for, leaving the switch to the caller.

use super::style;
use crate::form::FormId;
use eframe::egui::{self, RichText};

/// Draw one tab per form. Returns the clicked tab when it differs from `active`.
pub fn show(ui: &mut egui::Ui, active: FormId) -> Option<FormId> {
    let palette = style::palette();
    let mut requested = None;
    ui.horizontal(|ui| {
        for id in FormId::ALL {
            let selected = id == active;
            let color = if selected {
                palette.accent_ice
            } else {
                palette.text_muted
            };
            let response = ui.selectable_label(selected, RichText::new(id.tab_label()).color(color));
            if response.clicked() && !selected {
                requested = Some(id);
            }
        }
    });
    requested
}
