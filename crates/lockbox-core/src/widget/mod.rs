//! Keypad button widgets.
//!
//! Buttons only track their own look and report presses; what a press means
//! is decided by the [`Keypad`](crate::keypad::Keypad) that owns them.

mod button;
mod color;
mod state;

pub use button::ButtonWidget;
pub use color::{ButtonPalette, SerializableColor, StatusPalette};
pub use state::ButtonState;
