use eframe::egui;

/// Single-line numeric input. Non-numeric characters are dropped as they are
/// typed and ArrowUp/ArrowDown step the value by one.
pub struct NumericInput<'a> {
    value: &'a mut String,
    id: egui::Id,
    width: f32,
    hint: String,
}

impl<'a> NumericInput<'a> {
    pub fn new(value: &'a mut String, id: egui::Id) -> Self {
        Self {
            value,
            id,
            width: 180.0,
            hint: String::new(),
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Returns the response; `changed()` is set for typed edits and arrow steps alike.
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let mut adjust = 0.0;
        if ui.memory(|m| m.has_focus(self.id)) {
            ui.input_mut(|i| {
                if i.key_pressed(egui::Key::ArrowUp) {
                    adjust = 1.0;
                } else if i.key_pressed(egui::Key::ArrowDown) {
                    adjust = -1.0;
                }
                if adjust != 0.0 {
                    i.events.retain(|e| {
                        !matches!(
                            e,
                            egui::Event::Key {
                                key: egui::Key::ArrowUp | egui::Key::ArrowDown,
                                ..
                            }
                        )
                    });
                }
            });
        }

        let mut response = egui::TextEdit::singleline(&mut *self.value)
            .id(self.id)
            .desired_width(self.width)
            .hint_text(self.hint)
            .show(ui)
            .response;

        if response.changed() {
            let filtered = filter_numeric(self.value);
            if filtered != *self.value {
                *self.value = filtered;
            }
        }
        if adjust != 0.0
            && let Some(stepped) = step_value(self.value, adjust)
        {
            *self.value = stepped;
            response.mark_changed();
        }
        response
    }
}

/// Keep digits, one leading `-` and the first `.`.
pub fn filter_numeric(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut seen_dot = false;
    for ch in input.chars() {
        match ch {
            '0'..='9' => out.push(ch),
            '-' if out.is_empty() => out.push(ch),
            '.' if !seen_dot => {
                seen_dot = true;
                out.push(ch);
            }
            _ => {}
        }
    }
    out
}

fn step_value(current: &str, delta: f32) -> Option<String> {
    let trimmed = current.trim();
    let base = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().ok()?
    };
    let next = base + f64::from(delta);
    Some(if next.fract() == 0.0 {
        format!("{}", next as i64)
    } else {
        format!("{next}")
    })
}
