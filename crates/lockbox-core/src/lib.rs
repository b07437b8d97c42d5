//! Lockbox Core Library
//!
//! Engine-agnostic interaction logic for the Lockbox VR puzzle room: a keypad
//! combination lock, a key-gated drawer and a lock-gated hinged door.

pub mod combo;
pub mod config;
pub mod display;
pub mod door;
pub mod events;
pub mod gate;
pub mod ids;
pub mod input;
pub mod keypad;
pub mod motion;
pub mod pose;
pub mod scene;
pub mod widget;

pub use combo::{ComboLock, LockState, PressOutcome, DEFAULT_COMBO_LENGTH};
pub use config::{ConfigError, ConfigResult, DoorConfig, DrawerConfig, KeypadConfig, SceneConfig};
pub use display::{LockDisplay, PanelState};
pub use door::DoorInteractable;
pub use events::Hook;
pub use gate::Gate;
pub use ids::{InteractableId, InteractorId, SocketId, ZoneId};
pub use input::{
    Contact, FrameInput, Interactable, InteractionEvent, InteractionKind, InteractionResponse,
    PoseSource, SceneEvent,
};
pub use keypad::{KeyResponse, Keypad};
pub use motion::{
    ConstrainedMotion, DrawerBinding, DrawerRest, HingeBinding, HingeRest, MotionState,
    ReleaseReason, Zone,
};
pub use pose::Pose;
pub use scene::{FrameReport, Scene};
pub use widget::{ButtonState, ButtonWidget};
