//! Write-only sink for the lock's text and panel visuals.

use crate::widget::SerializableColor;
use peniko::Color;

pub const LOCKED_STRING: &str = "Locked";
pub const UNLOCKED_STRING: &str = "Unlocked";

/// Instruction line while waiting for the combination.
pub fn start_text(digits: usize) -> String {
    format!("Enter {} Digit Combo", digits)
}

/// Instruction line while waiting for a new combination.
pub fn reset_text(digits: usize) -> String {
    format!("Enter {} Digits To Reset Combo", digits)
}

/// Receives UI updates reflecting lock state. Never read back.
pub trait LockDisplay {
    /// The digits typed so far.
    fn set_input_text(&mut self, text: &str);
    /// The instruction line.
    fn set_info_text(&mut self, text: &str);
    /// Status label and panel color.
    fn set_status(&mut self, text: &str, color: Color);
}

/// A display that just remembers the latest values.
///
/// Used headless and in tests; a rendering host would forward these values to
/// its text and image components instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    pub input_text: String,
    pub info_text: String,
    pub status_text: String,
    pub status_color: Option<SerializableColor>,
}

impl LockDisplay for PanelState {
    fn set_input_text(&mut self, text: &str) {
        self.input_text.clear();
        self.input_text.push_str(text);
    }

    fn set_info_text(&mut self, text: &str) {
        self.info_text.clear();
        self.info_text.push_str(text);
    }

    fn set_status(&mut self, text: &str, color: Color) {
        self.status_text.clear();
        self.status_text.push_str(text);
        self.status_color = Some(color.into());
    }
}
