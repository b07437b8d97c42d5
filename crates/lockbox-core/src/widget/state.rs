//! Button visual states.

/// The visual state of a keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Idle, nothing touching it.
    #[default]
    Normal,
    /// An interactor is hovering over the button.
    Hovered,
    /// The button is being pressed.
    Pressed,
    /// Press released; the button keeps its "last pressed" look until reset.
    Selected,
}

impl ButtonState {
    /// Whether the button currently shows anything other than its idle look.
    pub fn is_lit(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
