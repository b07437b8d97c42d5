//! Lockbox Application
//!
//! Headless host for Lockbox scenes: loads a room config and replays a
//! recorded session of input events and tracked poses through it.

mod replay;

pub use replay::{
    replay, Frame, LoggingDisplay, ReplayError, ReplayResult, ReplaySummary, Session, TrackedPose,
};

use lockbox_core::SceneConfig;
use std::path::Path;

/// Load both files and replay the session. A missing config path uses the
/// default room.
pub fn run(config: Option<&Path>, session: &Path) -> ReplayResult<ReplaySummary> {
    let config = match config {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    let session = Session::from_path(session)?;
    replay(&config, &session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_with_default_room() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.json");
        fs::write(&session, r#"{ "frames": [] }"#).unwrap();
        let summary = run(None, &session).unwrap();
        assert_eq!(summary.frames, 0);
        assert!(summary.locked);
        assert_eq!(summary.status_text, "Locked");
    }

    #[test]
    fn test_run_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SceneConfig::default();
        config.keypad.combination = vec![7];
        let unlock = config.keypad.buttons[7];
        let config_path = dir.path().join("scene.json");
        fs::write(&config_path, config.to_json_pretty().unwrap()).unwrap();

        let session = format!(
            r#"{{ "frames": [ {{ "events": [ {{
                "type": "interaction",
                "target": "{}",
                "kind": "select_enter",
                "contact": {{
                    "interactor": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                    "pose": {{ "position": [0.0, 0.0, 0.0] }}
                }}
            }} ] }} ] }}"#,
            unlock
        );
        let session_path = dir.path().join("session.json");
        fs::write(&session_path, session).unwrap();

        let summary = run(Some(&config_path), &session_path).unwrap();
        assert_eq!(summary.unlocks, 1);
        assert!(!summary.locked);
    }

    #[test]
    fn test_run_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(None, &dir.path().join("nope.json")),
            Err(ReplayError::Io(_))
        ));
    }
}
