//! Recorded sessions and their replay through a [`Scene`].

use lockbox_core::{
    DrawerRest, FrameInput, InteractorId, LockDisplay, MotionState, PanelState, Pose,
    PressOutcome, Scene, SceneConfig, SceneEvent,
};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Session parse error: {0}")]
    Parse(String),
    #[error("Config error: {0}")]
    Config(#[from] lockbox_core::ConfigError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// A tracked driver pose reported in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPose {
    pub interactor: InteractorId,
    pub pose: Pose,
}

/// Input recorded for a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub events: Vec<SceneEvent>,
    /// Pose updates. Interactors not listed keep their previous pose.
    pub track: Vec<TrackedPose>,
    /// Interactors whose tracking was lost this frame.
    pub lost: Vec<InteractorId>,
}

/// A recorded session: frames in playback order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub frames: Vec<Frame>,
}

impl Session {
    /// Parse a session from JSON.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        serde_json::from_str(json).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    /// Read and parse a session file.
    pub fn from_path(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

/// Panel display that logs every change before storing it.
#[derive(Debug, Default)]
pub struct LoggingDisplay {
    panel: PanelState,
}

impl LoggingDisplay {
    /// Latest panel values.
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }
}

impl LockDisplay for LoggingDisplay {
    fn set_input_text(&mut self, text: &str) {
        if self.panel.input_text != text {
            log::debug!("panel input: {:?}", text);
        }
        self.panel.set_input_text(text);
    }

    fn set_info_text(&mut self, text: &str) {
        if self.panel.info_text != text {
            log::info!("panel info: {}", text);
        }
        self.panel.set_info_text(text);
    }

    fn set_status(&mut self, text: &str, color: Color) {
        if self.panel.status_text != text {
            log::info!("panel status: {}", text);
        }
        self.panel.set_status(text, color);
    }
}

/// End state of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub presses: usize,
    pub unlocks: usize,
    pub rekeys: usize,
    pub locked: bool,
    pub door_opened: bool,
    pub drawer_extended: bool,
    pub status_text: String,
}

/// Build the scene described by `config` and play `session` through it.
///
/// Bindings still held when the session ends are force-released.
pub fn replay(config: &SceneConfig, session: &Session) -> ReplayResult<ReplaySummary> {
    let mut scene = Scene::from_config(config, LoggingDisplay::default())?;
    let mut input = FrameInput::new();
    let mut presses = 0;
    let mut unlocks = 0;
    let mut rekeys = 0;
    let mut door_opened = false;

    for (index, frame) in session.frames.iter().enumerate() {
        input.begin_frame();
        for tracked in &frame.track {
            input.track(tracked.interactor, tracked.pose);
        }
        for &interactor in &frame.lost {
            input.lose(interactor);
        }
        for event in &frame.events {
            input.push(*event);
        }

        let report = scene.frame(&input);
        for outcome in &report.lock_outcomes {
            log::debug!("frame {}: press -> {:?}", index, outcome);
            match outcome {
                PressOutcome::Unlocked => unlocks += 1,
                PressOutcome::Rekeyed => rekeys += 1,
                _ => {}
            }
        }
        presses += report.lock_outcomes.len();
        for id in &report.released {
            log::info!("frame {}: {} released", index, id);
        }
        if report.door_opened {
            log::info!("frame {}: door opened", index);
            door_opened = true;
        }
    }

    let closing = scene.release_all();
    door_opened |= closing.door_opened;

    let drawer_extended = scene
        .drawer()
        .is_some_and(|d| !matches!(d.state(), MotionState::Unbound(DrawerRest::Closed)));
    let summary = ReplaySummary {
        frames: session.frames.len(),
        presses,
        unlocks,
        rekeys,
        locked: scene.keypad().lock().is_locked(),
        door_opened,
        drawer_extended,
        status_text: scene.keypad().display().panel().status_text.clone(),
    };
    log::info!(
        "replayed {} frames: {} presses, locked: {}, door opened: {}",
        summary.frames,
        summary.presses,
        summary.locked,
        summary.door_opened
    );
    Ok(summary)
}
