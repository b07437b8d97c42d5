//! The button set driving a combination lock.

use crate::combo::{ComboLock, PressOutcome};
use crate::display::{reset_text, start_text, LockDisplay, LOCKED_STRING, UNLOCKED_STRING};
use crate::ids::InteractableId;
use crate::input::{Contact, Interactable, InteractionKind, InteractionResponse};
use crate::widget::{ButtonWidget, StatusPalette};

/// What a keypad did with one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResponse {
    pub response: InteractionResponse,
    /// Set when the interaction was a press that reached the lock.
    pub outcome: Option<PressOutcome>,
}

/// Buttons, the lock they feed, and the panel that shows its state.
///
/// The keypad owns the mapping from a pressed button's identity to its digit
/// index, so the lock never needs to know about buttons or visuals.
#[derive(Debug)]
pub struct Keypad<D: LockDisplay> {
    buttons: Vec<ButtonWidget>,
    lock: ComboLock,
    display: D,
    palette: StatusPalette,
}

impl<D: LockDisplay> Keypad<D> {
    /// Build the keypad and draw the initial panel.
    pub fn new(buttons: Vec<ButtonWidget>, lock: ComboLock, display: D, palette: StatusPalette) -> Self {
        let mut keypad = Self {
            buttons,
            lock,
            display,
            palette,
        };
        keypad.refresh_display();
        keypad
    }

    /// The lock the buttons feed.
    pub fn lock(&self) -> &ComboLock {
        &self.lock
    }

    /// Mutable access, e.g. to subscribe to the lock's hooks.
    pub fn lock_mut(&mut self) -> &mut ComboLock {
        &mut self.lock
    }

    /// The panel sink.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Buttons in digit order.
    pub fn buttons(&self) -> &[ButtonWidget] {
        &self.buttons
    }

    /// The button with this identity, if any.
    pub fn button(&self, id: InteractableId) -> Option<&ButtonWidget> {
        self.buttons.iter().find(|b| b.id() == id)
    }

    /// Route an interaction to the button it targets.
    ///
    /// Returns `None` if no button has that identity. A press resets every
    /// other button's color and feeds the digit to the lock.
    pub fn handle(
        &mut self,
        target: InteractableId,
        kind: InteractionKind,
        contact: &Contact,
    ) -> Option<KeyResponse> {
        let button = self.buttons.iter_mut().find(|b| b.id() == target)?;
        let response = button.dispatch(kind, contact);
        let outcome = match response {
            InteractionResponse::Pressed(index) => {
                for other in self.buttons.iter_mut().filter(|b| b.id() != target) {
                    other.reset_color();
                }
                Some(self.press(index))
            }
            _ => None,
        };
        Some(KeyResponse { response, outcome })
    }

    /// Feed a digit straight to the lock and update the panel.
    pub fn press(&mut self, index: usize) -> PressOutcome {
        let outcome = self.lock.on_button_pressed(index);
        self.apply(outcome);
        outcome
    }

    /// Restore every button's idle look.
    pub fn reset_colors(&mut self) {
        for button in &mut self.buttons {
            button.reset_color();
        }
    }

    fn apply(&mut self, outcome: PressOutcome) {
        match outcome {
            PressOutcome::Ignored => {}
            PressOutcome::Buffered(_) => {
                let digits = digits_text(self.lock.input());
                self.display.set_input_text(&digits);
            }
            PressOutcome::Rejected => {
                self.display.set_input_text("");
                self.reset_colors();
            }
            PressOutcome::Accepted | PressOutcome::Unlocked | PressOutcome::Rekeyed => {
                self.refresh_display();
            }
        }
    }

    /// Rewrite every panel field from the lock's current state.
    fn refresh_display(&mut self) {
        let digits = digits_text(self.lock.input());
        self.display.set_input_text(&digits);
        let info = if self.lock.pending_reset() {
            reset_text(self.lock.len())
        } else {
            start_text(self.lock.len())
        };
        self.display.set_info_text(&info);
        if self.lock.is_locked() {
            self.display.set_status(LOCKED_STRING, self.palette.locked.into());
        } else {
            self.display.set_status(UNLOCKED_STRING, self.palette.unlocked.into());
        }
    }
}

fn digits_text(digits: &[usize]) -> String {
    digits.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PanelState;
    use crate::ids::InteractorId;
    use crate::pose::Pose;
    use crate::widget::{ButtonPalette, ButtonState};

    fn keypad(target: Vec<usize>, resettable: bool) -> Keypad<PanelState> {
        let buttons = (0..10)
            .map(|i| ButtonWidget::new(InteractableId::new(), i, ButtonPalette::default()))
            .collect();
        Keypad::new(
            buttons,
            ComboLock::new(target, resettable),
            PanelState::default(),
            StatusPalette::default(),
        )
    }

    fn contact() -> Contact {
        Contact {
            interactor: InteractorId::new(),
            pose: Pose::IDENTITY,
        }
    }

    fn press_button(pad: &mut Keypad<PanelState>, index: usize) -> Option<InteractionResponse> {
        let id = pad.buttons()[index].id();
        let c = contact();
        let response = pad.handle(id, InteractionKind::SelectEnter, &c);
        pad.handle(id, InteractionKind::SelectExit, &c);
        response.map(|r| r.response)
    }

    #[test]
    fn test_initial_panel() {
        let pad = keypad(vec![1, 2, 3], false);
        let panel = pad.display();
        assert_eq!(panel.input_text, "");
        assert_eq!(panel.info_text, "Enter 3 Digit Combo");
        assert_eq!(panel.status_text, LOCKED_STRING);
        assert_eq!(panel.status_color, Some(StatusPalette::default().locked));
    }

    #[test]
    fn test_digits_echo_on_panel() {
        let mut pad = keypad(vec![1, 2, 3], false);
        assert_eq!(press_button(&mut pad, 1), Some(InteractionResponse::Pressed(1)));
        press_button(&mut pad, 2);
        assert_eq!(pad.display().input_text, "12");
        assert_eq!(pad.lock().input(), &[1, 2]);
    }

    #[test]
    fn test_press_resets_other_buttons() {
        let mut pad = keypad(vec![1, 2, 3], false);
        press_button(&mut pad, 4);
        assert_eq!(pad.buttons()[4].state(), ButtonState::Selected);
        press_button(&mut pad, 5);
        assert_eq!(pad.buttons()[4].state(), ButtonState::Normal);
        assert_eq!(pad.buttons()[5].state(), ButtonState::Selected);
    }

    #[test]
    fn test_unlock_updates_status() {
        let mut pad = keypad(vec![1, 2, 3], false);
        press_button(&mut pad, 1);
        press_button(&mut pad, 2);
        let id = pad.buttons()[3].id();
        let response = pad.handle(id, InteractionKind::SelectEnter, &contact()).unwrap();
        assert_eq!(response.response, InteractionResponse::Pressed(3));
        assert_eq!(response.outcome, Some(PressOutcome::Unlocked));
        let panel = pad.display();
        assert_eq!(panel.status_text, UNLOCKED_STRING);
        assert_eq!(panel.status_color, Some(StatusPalette::default().unlocked));
        assert_eq!(panel.input_text, "");
    }

    #[test]
    fn test_wrong_combo_clears_panel_and_colors() {
        let mut pad = keypad(vec![1, 2, 3], false);
        for i in [1, 2, 4] {
            press_button(&mut pad, i);
        }
        assert_eq!(pad.display().input_text, "");
        assert_eq!(pad.display().status_text, LOCKED_STRING);
        assert!(pad.buttons().iter().all(|b| b.state() == ButtonState::Normal));
    }

    #[test]
    fn test_resettable_shows_reset_prompt_then_relocks() {
        let mut pad = keypad(vec![1, 2, 3], true);
        for i in [1, 2, 3] {
            pad.press(i);
        }
        assert_eq!(pad.display().info_text, "Enter 3 Digits To Reset Combo");

        for i in [4, 4, 4] {
            pad.press(i);
        }
        assert_eq!(pad.display().info_text, "Enter 3 Digit Combo");
        assert_eq!(pad.display().status_text, LOCKED_STRING);
        assert_eq!(pad.lock().target(), &[4, 4, 4]);
    }

    #[test]
    fn test_prompt_follows_combination_length() {
        let mut pad = keypad(vec![2, 7, 1, 8], true);
        assert_eq!(pad.display().info_text, "Enter 4 Digit Combo");
        for i in [2, 7, 1, 8] {
            pad.press(i);
        }
        assert_eq!(pad.display().info_text, "Enter 4 Digits To Reset Combo");
    }

    #[test]
    fn test_unknown_button() {
        let mut pad = keypad(vec![1, 2, 3], false);
        let c = contact();
        let stranger = InteractableId::new();
        assert!(pad.button(stranger).is_none());
        assert!(pad.handle(stranger, InteractionKind::SelectEnter, &c).is_none());
        assert!(pad.lock().input().is_empty());
    }
}
