//! egui renderer for the application UI.

mod fields;
mod form_panel;
mod prediction_panel;
mod status_area;
pub mod style;
pub mod tab_bar;

use std::time::Duration;

use crate::config;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin};

/// Smallest window that still fits one form column and the result panel.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 480.0);

const PENDING_REPAINT: Duration = Duration::from_millis(50);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create a new egui app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let cfg = config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let controller =
            EguiController::new(cfg).map_err(|err| format!("Failed to start: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (submit, cancel) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if submit {
            self.controller.submit();
        } else if cancel {
            self.controller.cancel_submission();
        }
    }

    fn render_tabs(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("tab_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::outer_border())
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                if let Some(requested) = tab_bar::show(ui, self.controller.ui.active_form) {
                    self.controller.select_form(requested);
                }
            });
    }

    fn render_body(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(style::palette().bg_secondary)
                    .inner_margin(Margin::same(12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("form_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_form_panel(ui);
                        ui.add_space(12.0);
                        self.render_prediction_panel(ui);
                    });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_shortcuts(ctx);
        self.render_tabs(ctx);
        self.render_status(ctx);
        self.render_body(ctx);
        if self.controller.has_pending_job() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}
