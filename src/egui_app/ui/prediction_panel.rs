use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::EguiApp;
use super::style;
use crate::egui_app::view_model::{PredictionView, RiskBadge};

impl EguiApp {
    pub(super) fn render_prediction_panel(&mut self, ui: &mut Ui) {
        let Some(view) = self.controller.ui.form.result.as_ref() else {
            return;
        };
        draw_prediction(ui, view);
    }
}

fn draw_prediction(ui: &mut Ui, view: &PredictionView) {
    let palette = style::palette();
    let accent = style::verdict_color(view.fraud);
    Frame::new()
        .fill(palette.bg_primary)
        .stroke(egui::Stroke::new(2.0, accent))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&view.headline).heading().strong().color(accent));
                if let Some(risk) = &view.risk {
                    ui.add_space(12.0);
                    risk_badge(ui, risk);
                }
            });
            if let Some(summary) = &view.summary {
                ui.label(RichText::new(summary).color(palette.text_primary));
            }
            if let Some(category) = &view.category_line {
                ui.label(RichText::new(category).strong().color(palette.danger));
            }
            if !view.reasons.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new("REASONING:").strong().color(palette.text_primary));
                for reason in &view.reasons {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("•").color(palette.text_muted));
                        ui.label(RichText::new(reason).color(palette.text_primary));
                    });
                }
            }
            if let Some(explanation) = &view.explanation {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(explanation)
                        .monospace()
                        .color(palette.text_primary),
                );
            }
        });
}

fn risk_badge(ui: &mut Ui, risk: &RiskBadge) {
    let color = style::risk_color(risk.level);
    Frame::new()
        .fill(color)
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                RichText::new(&risk.text)
                    .strong()
                    .color(style::palette().bg_primary),
            );
        })
        .response
        .on_hover_text(risk.level.label());
}
