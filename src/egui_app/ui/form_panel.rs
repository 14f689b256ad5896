use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::EguiApp;
use super::fields::NumericInput;
use super::style;
use crate::egui_app::state::FormPanelState;
use crate::egui_app::view_model;
use crate::form::{FieldKind, FieldSpec, FormSchema, timestamp};

/// Width shared by combo boxes, numeric and text inputs.
const FIELD_WIDTH: f32 = 180.0;

/// User intent collected while drawing, applied once the frame's borrows end.
enum FormAction {
    Set { key: String, raw: String },
    Toggle(String),
    FillNow(String),
    Submit,
    Cancel,
    Reset,
}

impl EguiApp {
    pub(super) fn render_form_panel(&mut self, ui: &mut Ui) {
        let actions = {
            let schema = self.controller.active_schema();
            let form = &self.controller.ui.form;
            draw_form(ui, schema, form)
        };
        for action in actions {
            match action {
                FormAction::Set { key, raw } => self.controller.set_field(&key, &raw),
                FormAction::Toggle(key) => self.controller.toggle(&key),
                FormAction::FillNow(key) => self.controller.fill_now(&key),
                FormAction::Submit => self.controller.submit(),
                FormAction::Cancel => self.controller.cancel_submission(),
                FormAction::Reset => self.controller.reset_form(),
            }
        }
    }
}

fn draw_form(ui: &mut Ui, schema: &FormSchema, form: &FormPanelState) -> Vec<FormAction> {
    let palette = style::palette();
    let mut actions = Vec::new();
    ui.heading(RichText::new(schema.title()).color(palette.text_primary));
    ui.add_space(8.0);

    for (section, fields) in schema.sections() {
        Frame::new()
            .stroke(style::inner_border())
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                if !section.is_empty() {
                    ui.label(RichText::new(section).strong().color(palette.accent_copper));
                    ui.add_space(4.0);
                }
                egui::Grid::new(("form_section", schema.id().as_str(), section))
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for field in fields {
                            ui.label(RichText::new(&field.label).color(palette.text_primary));
                            ui.vertical(|ui| {
                                draw_control(ui, field, form, &mut actions);
                                if let Some(error) = form.field_errors.get(&field.key) {
                                    ui.label(RichText::new(error).small().color(palette.warning));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        ui.add_space(6.0);
    }

    if let Some(error) = &form.validation_error {
        ui.label(RichText::new(error).color(palette.warning));
    }
    if let Some(error) = &form.submission_error {
        ui.label(RichText::new(error).color(palette.danger));
    }
    ui.add_space(6.0);

    let submitting = form.is_submitting();
    ui.horizontal(|ui| {
        let label = view_model::submit_label(schema.id(), submitting);
        if ui
            .add_enabled(!submitting, egui::Button::new(RichText::new(label).strong()))
            .clicked()
        {
            actions.push(FormAction::Submit);
        }
        if submitting {
            ui.spinner();
            if ui.button("Cancel").clicked() {
                actions.push(FormAction::Cancel);
            }
        }
        if ui.button("Reset").clicked() {
            actions.push(FormAction::Reset);
        }
    });
    actions
}

fn draw_control(
    ui: &mut Ui,
    field: &FieldSpec,
    form: &FormPanelState,
    actions: &mut Vec<FormAction>,
) {
    let key = field.key.as_str();
    let hint = field.hint.clone().unwrap_or_default();
    match &field.kind {
        FieldKind::Choice(options) => {
            let current = form.values.value(key);
            let selected = options
                .iter()
                .find(|option| Some(&option.value) == current)
                .map(|option| option.label.as_str())
                .unwrap_or_default();
            egui::ComboBox::from_id_salt(("choice", key))
                .selected_text(selected)
                .width(FIELD_WIDTH)
                .show_ui(ui, |ui| {
                    for option in options {
                        let is_selected = Some(&option.value) == current;
                        if ui.selectable_label(is_selected, &option.label).clicked() && !is_selected {
                            actions.push(FormAction::Set {
                                key: key.to_string(),
                                raw: option.label.clone(),
                            });
                        }
                    }
                });
        }
        FieldKind::Toggle => {
            let mut checked = form
                .values
                .value(key)
                .and_then(|value| value.as_bool())
                .unwrap_or(false);
            if ui.checkbox(&mut checked, "").changed() {
                actions.push(FormAction::Toggle(key.to_string()));
            }
        }
        FieldKind::Number => {
            let mut text = form.draft(key).to_string();
            let id = ui.make_persistent_id(("number", key));
            if NumericInput::new(&mut text, id)
                .width(FIELD_WIDTH)
                .hint(hint)
                .show(ui)
                .changed() {
                actions.push(FormAction::Set {
                    key: key.to_string(),
                    raw: text,
                });
            }
        }
        FieldKind::DateTime => {
            let mut text = form.draft(key).to_string();
            ui.horizontal(|ui| {
                let hint = if hint.is_empty() {
                    timestamp::TIMESTAMP_HINT.to_string()
                } else {
                    hint
                };
                let response = egui::TextEdit::singleline(&mut text)
                    .hint_text(hint)
                    .desired_width(150.0)
                    .show(ui)
                    .response;
                if response.changed() {
                    actions.push(FormAction::Set {
                        key: key.to_string(),
                        raw: text.clone(),
                    });
                }
                if ui.small_button("Now").clicked() {
                    actions.push(FormAction::FillNow(key.to_string()));
                }
            });
        }
        FieldKind::Text => {
            let mut text = form.draft(key).to_string();
            let response = egui::TextEdit::singleline(&mut text)
                .hint_text(hint)
                .desired_width(FIELD_WIDTH)
                .show(ui)
                .response;
            if response.changed() {
                actions.push(FormAction::Set {
                    key: key.to_string(),
                    raw: text,
                });
            }
        }
    }
}
