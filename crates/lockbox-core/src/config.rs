//! Scene configuration: what a room contains and how it is tuned.
//!
//! A config is validated before any component is built; a bad config is a
//! startup failure, never something to limp along with.

use crate::combo::DEFAULT_COMBO_LENGTH;
use crate::ids::{InteractableId, SocketId, ZoneId};
use crate::motion::{DrawerLimits, HingeLimits};
use crate::pose::Pose;
use crate::widget::{ButtonPalette, StatusPalette};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Buttons on a keypad unless configured otherwise (digits 0-9).
pub const DEFAULT_BUTTON_COUNT: usize = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Combination is empty")]
    EmptyCombination,
    #[error("Combination digit {digit} is outside the {buttons} configured buttons")]
    DigitOutOfRange { digit: usize, buttons: usize },
    #[error("Identity {0} is used more than once")]
    DuplicateId(Uuid),
    #[error("Invalid limit {name}: {value}")]
    InvalidLimit { name: &'static str, value: f32 },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypadConfig {
    /// One identity per button; a button's position is its digit.
    pub buttons: Vec<InteractableId>,
    pub combination: Vec<usize>,
    pub resettable: bool,
    pub button_palette: ButtonPalette,
    pub status_palette: StatusPalette,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            buttons: (0..DEFAULT_BUTTON_COUNT).map(|_| InteractableId::new()).collect(),
            combination: (1..=DEFAULT_COMBO_LENGTH).collect(),
            resettable: false,
            button_palette: ButtonPalette::default(),
            status_palette: StatusPalette::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerConfig {
    pub id: InteractableId,
    /// Fully closed pose, in the drawer's parent space.
    pub closed: Pose,
    #[serde(default)]
    pub limits: DrawerLimits,
    /// Key socket gating the drawer. Without one the drawer is always free.
    #[serde(default)]
    pub key_socket: Option<SocketId>,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            id: InteractableId::new(),
            closed: Pose::IDENTITY,
            limits: DrawerLimits::default(),
            key_socket: Some(SocketId::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Identity of the hinge handle the player grabs.
    pub id: InteractableId,
    /// Hinge pivot in the same space as tracked driver positions.
    pub pivot: Vec3,
    /// Handle pose when closed.
    pub start: Pose,
    /// Handle pose when fully open.
    pub end: Pose,
    /// Door panel pose; only its yaw is driven.
    pub panel: Pose,
    #[serde(default)]
    pub limits: HingeLimits,
    pub closed_zone: ZoneId,
    pub open_zone: ZoneId,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            id: InteractableId::new(),
            pivot: Vec3::ZERO,
            start: Pose::IDENTITY,
            end: Pose::IDENTITY.with_euler(Vec3::new(0.0, 90.0, 0.0)),
            panel: Pose::IDENTITY,
            limits: HingeLimits::default(),
            closed_zone: ZoneId::new(),
            open_zone: ZoneId::new(),
        }
    }
}

/// A whole room: keypad, optional drawer, optional lock-gated door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub keypad: KeypadConfig,
    pub drawer: Option<DrawerConfig>,
    pub door: Option<DoorConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            keypad: KeypadConfig::default(),
            drawer: Some(DrawerConfig::default()),
            door: Some(DoorConfig::default()),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check combination, identities and limits.
    pub fn validate(&self) -> ConfigResult<()> {
        let keypad = &self.keypad;
        if keypad.combination.is_empty() {
            return Err(ConfigError::EmptyCombination);
        }
        let buttons = keypad.buttons.len();
        if let Some(&digit) = keypad.combination.iter().find(|&&d| d >= buttons) {
            return Err(ConfigError::DigitOutOfRange { digit, buttons });
        }

        let mut seen = HashSet::new();
        let mut claim = |uuid: Uuid| {
            if seen.insert(uuid) {
                Ok(())
            } else {
                Err(ConfigError::DuplicateId(uuid))
            }
        };
        for id in &keypad.buttons {
            claim(id.as_uuid())?;
        }
        if let Some(drawer) = &self.drawer {
            claim(drawer.id.as_uuid())?;
            if let Some(socket) = drawer.key_socket {
                claim(socket.as_uuid())?;
            }
            drawer.limits.validate()?;
        }
        if let Some(door) = &self.door {
            claim(door.id.as_uuid())?;
            claim(door.closed_zone.as_uuid())?;
            claim(door.open_zone.as_uuid())?;
            positive("door.limits.position.x", door.limits.position.x)?;
            positive("door.limits.position.y", door.limits.position.y)?;
            positive("door.limits.position.z", door.limits.position.z)?;
            positive("door.limits.pitch", door.limits.pitch)?;
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLimit { name, value })
    }
}
