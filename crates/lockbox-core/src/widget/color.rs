//! Serializable colors for widget and panel visuals.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The four colors a keypad button cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPalette {
    pub normal: SerializableColor,
    pub highlighted: SerializableColor,
    pub pressed: SerializableColor,
    pub selected: SerializableColor,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            normal: SerializableColor::rgb(200, 200, 200),
            highlighted: SerializableColor::rgb(147, 197, 253),
            pressed: SerializableColor::rgb(34, 197, 94),
            selected: SerializableColor::rgb(250, 204, 21),
        }
    }
}

/// Panel colors for the lock status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPalette {
    pub locked: SerializableColor,
    pub unlocked: SerializableColor,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            locked: SerializableColor::rgb(220, 38, 38),
            unlocked: SerializableColor::rgb(22, 163, 74),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peniko_conversion_preserves_channels() {
        let rgba = SerializableColor::new(12, 34, 56, 255);
        let color: Color = rgba.into();
        assert_eq!(SerializableColor::from(color), rgba);
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        let p = ButtonPalette::default();
        assert_ne!(p.normal, p.highlighted);
        assert_ne!(p.pressed, p.selected);
    }
}
