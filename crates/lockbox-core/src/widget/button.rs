//! Keypad button widget.

use super::color::{ButtonPalette, SerializableColor};
use super::state::ButtonState;
use crate::ids::InteractableId;
use crate::input::{Contact, Interactable, InteractionResponse};

/// A pressable keypad button that reports its digit index.
#[derive(Debug, Clone)]
pub struct ButtonWidget {
    id: InteractableId,
    index: usize,
    palette: ButtonPalette,
    state: ButtonState,
    /// Set by a press, cleared by the next hover enter.
    is_pressed: bool,
    /// The indicator light turns on with the first press and stays on.
    indicator_lit: bool,
}

impl ButtonWidget {
    /// An idle button reporting `index` when pressed.
    pub fn new(id: InteractableId, index: usize, palette: ButtonPalette) -> Self {
        Self {
            id,
            index,
            palette,
            state: ButtonState::Normal,
            is_pressed: false,
            indicator_lit: false,
        }
    }

    /// The digit this button enters.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current visual state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the button was pressed since the last hover enter.
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Whether the indicator light is on.
    pub fn indicator_lit(&self) -> bool {
        self.indicator_lit
    }

    /// The color the button image should show right now.
    pub fn color(&self) -> SerializableColor {
        match self.state {
            ButtonState::Normal => self.palette.normal,
            ButtonState::Hovered => self.palette.highlighted,
            ButtonState::Pressed => self.palette.pressed,
            ButtonState::Selected => self.palette.selected,
        }
    }

    /// Restore the idle look.
    pub fn reset_color(&mut self) {
        self.state = ButtonState::Normal;
    }
}

impl Interactable for ButtonWidget {
    fn id(&self) -> InteractableId {
        self.id
    }

    fn on_hover_begin(&mut self, _contact: &Contact) -> InteractionResponse {
        self.is_pressed = false;
        self.state = ButtonState::Hovered;
        InteractionResponse::Handled
    }

    fn on_hover_end(&mut self, _contact: &Contact) -> InteractionResponse {
        if self.is_pressed {
            return InteractionResponse::Ignored;
        }
        self.state = ButtonState::Normal;
        InteractionResponse::Handled
    }

    fn on_grab_begin(&mut self, _contact: &Contact) -> InteractionResponse {
        self.is_pressed = true;
        self.indicator_lit = true;
        self.state = ButtonState::Pressed;
        InteractionResponse::Pressed(self.index)
    }

    fn on_grab_end(&mut self, _contact: &Contact) -> InteractionResponse {
        self.state = ButtonState::Selected;
        InteractionResponse::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::InteractorId;
    use crate::input::InteractionKind;
    use crate::pose::Pose;

    fn contact() -> Contact {
        Contact {
            interactor: InteractorId::new(),
            pose: Pose::IDENTITY,
        }
    }

    fn button(index: usize) -> ButtonWidget {
        ButtonWidget::new(InteractableId::new(), index, ButtonPalette::default())
    }

    #[test]
    fn test_press_reports_index() {
        let mut b = button(7);
        let c = contact();
        b.dispatch(InteractionKind::HoverEnter, &c);
        assert_eq!(b.color(), ButtonPalette::default().highlighted);

        let response = b.dispatch(InteractionKind::SelectEnter, &c);
        assert_eq!(response, InteractionResponse::Pressed(b.index()));
        assert_eq!(b.index(), 7);
        assert_eq!(b.state(), ButtonState::Pressed);
        assert!(b.is_pressed());
        assert!(b.indicator_lit());

        b.dispatch(InteractionKind::SelectExit, &c);
        assert_eq!(b.color(), ButtonPalette::default().selected);
    }

    #[test]
    fn test_hover_exit_keeps_pressed_look() {
        let mut b = button(0);
        let c = contact();
        b.dispatch(InteractionKind::HoverEnter, &c);
        b.dispatch(InteractionKind::SelectEnter, &c);
        b.dispatch(InteractionKind::SelectExit, &c);
        b.dispatch(InteractionKind::HoverExit, &c);
        assert_eq!(b.state(), ButtonState::Selected);
    }

    #[test]
    fn test_hover_clears_pressed_flag() {
        let mut b = button(0);
        let c = contact();
        b.dispatch(InteractionKind::SelectEnter, &c);
        b.dispatch(InteractionKind::HoverEnter, &c);
        assert!(!b.is_pressed());
        b.dispatch(InteractionKind::HoverExit, &c);
        assert_eq!(b.state(), ButtonState::Normal);
        assert!(!b.state().is_lit());
    }

    #[test]
    fn test_reset_color() {
        let mut b = button(2);
        let c = contact();
        b.dispatch(InteractionKind::SelectEnter, &c);
        b.reset_color();
        assert_eq!(b.color(), ButtonPalette::default().normal);
        // the light stays on
        assert!(b.indicator_lit());
    }
}
