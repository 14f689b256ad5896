use crate::egui_app::ui::style;
use egui::Color32;

const MAX_LOG_ENTRIES: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries.
    pub log: Vec<String>,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Fill in the transaction and submit it for scoring".into(),
            badge_label: style::StatusTone::Idle.label().into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
            log: Vec::new(),
        }
    }

    /// Replace the visible status and append it to the rolling log.
    pub fn set(&mut self, text: impl Into<String>, tone: style::StatusTone) {
        self.text = text.into();
        self.badge_label = tone.label().into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(format!("[{}] {}", self.badge_label, self.text));
        let excess = self.log.len().saturating_sub(MAX_LOG_ENTRIES);
        self.log.drain(..excess);
    }

    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut status = StatusBarState::idle();
        for index in 0..(MAX_LOG_ENTRIES + 5) {
            status.set(format!("entry {index}"), style::StatusTone::Info);
        }
        assert_eq!(status.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(status.text, format!("entry {}", MAX_LOG_ENTRIES + 4));
        assert!(status.log[0].ends_with("entry 5"));
    }
}
