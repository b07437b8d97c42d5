//! Input events delivered by the XR runtime and the per-frame input buffer.

use crate::ids::{InteractableId, InteractorId, SocketId, ZoneId};
use crate::pose::Pose;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discrete interaction signals from the XR runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    HoverEnter,
    HoverExit,
    /// Grab begin (or button press).
    SelectEnter,
    /// Grab end (or button release).
    SelectExit,
}

/// The interacting point at the moment an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub interactor: InteractorId,
    pub pose: Pose,
}

/// An interaction aimed at a specific interactable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub target: InteractableId,
    pub kind: InteractionKind,
    pub contact: Contact,
}

/// Everything the scene reacts to, besides the per-frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    Interaction(InteractionEvent),
    /// An object was inserted into (or removed from) a socket.
    Socket { socket: SocketId, inserted: bool },
    /// The follower entered (or left) a trigger volume.
    Trigger { zone: ZoneId, entered: bool },
}

impl SceneEvent {
    /// Shorthand for an [`InteractionEvent`].
    pub fn interaction(target: InteractableId, kind: InteractionKind, contact: Contact) -> Self {
        Self::Interaction(InteractionEvent {
            target,
            kind,
            contact,
        })
    }
}

/// What a widget did with an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponse {
    /// Nothing changed (gate locked, already bound, not ours).
    Ignored,
    /// State changed with nothing further to propagate.
    Handled,
    /// A button reported a press with its index.
    Pressed(usize),
    /// The door settled into its open rest pose.
    Opened,
}

/// The capability set every interactive widget implements.
///
/// All methods default to ignoring the event, so a widget only overrides the
/// interactions it reacts to.
pub trait Interactable {
    fn id(&self) -> InteractableId;

    fn on_hover_begin(&mut self, _contact: &Contact) -> InteractionResponse {
        InteractionResponse::Ignored
    }

    fn on_hover_end(&mut self, _contact: &Contact) -> InteractionResponse {
        InteractionResponse::Ignored
    }

    fn on_grab_begin(&mut self, _contact: &Contact) -> InteractionResponse {
        InteractionResponse::Ignored
    }

    fn on_grab_end(&mut self, _contact: &Contact) -> InteractionResponse {
        InteractionResponse::Ignored
    }

    /// Route an event to the matching capability.
    fn dispatch(&mut self, kind: InteractionKind, contact: &Contact) -> InteractionResponse {
        match kind {
            InteractionKind::HoverEnter => self.on_hover_begin(contact),
            InteractionKind::HoverExit => self.on_hover_end(contact),
            InteractionKind::SelectEnter => self.on_grab_begin(contact),
            InteractionKind::SelectExit => self.on_grab_end(contact),
        }
    }
}

/// Supplies the current pose of tracked interactors.
pub trait PoseSource {
    fn pose(&self, interactor: InteractorId) -> Option<Pose>;
}

impl PoseSource for HashMap<InteractorId, Pose> {
    fn pose(&self, interactor: InteractorId) -> Option<Pose> {
        self.get(&interactor).copied()
    }
}

/// Input collected for one frame: queued events plus the latest tracked poses.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    events: Vec<SceneEvent>,
    poses: HashMap<InteractorId, Pose>,
}

impl FrameInput {
    /// An empty frame with no tracked interactors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame. Queued events are dropped, tracked
    /// poses persist until the interactor is updated or lost.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Queue an event for this frame.
    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Record the latest tracked pose for an interactor.
    pub fn track(&mut self, interactor: InteractorId, pose: Pose) {
        self.poses.insert(interactor, pose);
    }

    /// Tracking for this interactor was lost.
    pub fn lose(&mut self, interactor: InteractorId) {
        self.poses.remove(&interactor);
    }

    /// Events queued this frame, in arrival order.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }
}

impl PoseSource for FrameInput {
    fn pose(&self, interactor: InteractorId) -> Option<Pose> {
        self.poses.get(&interactor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    struct Counter {
        id: InteractableId,
        grabs: usize,
    }

    impl Interactable for Counter {
        fn id(&self) -> InteractableId {
            self.id
        }

        fn on_grab_begin(&mut self, _contact: &Contact) -> InteractionResponse {
            self.grabs += 1;
            InteractionResponse::Handled
        }
    }

    fn contact() -> Contact {
        Contact {
            interactor: InteractorId::new(),
            pose: Pose::at(Vec3::ONE),
        }
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let mut counter = Counter {
            id: InteractableId::new(),
            grabs: 0,
        };
        let c = contact();
        assert_eq!(
            counter.dispatch(InteractionKind::SelectEnter, &c),
            InteractionResponse::Handled
        );
        assert_eq!(
            counter.dispatch(InteractionKind::HoverEnter, &c),
            InteractionResponse::Ignored
        );
        assert_eq!(counter.grabs, 1);
    }

    #[test]
    fn test_begin_frame_keeps_poses() {
        let mut input = FrameInput::new();
        let hand = InteractorId::new();
        input.track(hand, Pose::at(Vec3::X));
        input.push(SceneEvent::Trigger {
            zone: ZoneId::new(),
            entered: true,
        });
        assert_eq!(input.events().len(), 1);

        input.begin_frame();
        assert!(input.events().is_empty());
        assert_eq!(input.pose(hand), Some(Pose::at(Vec3::X)));

        input.lose(hand);
        assert_eq!(input.pose(hand), None);
    }

    #[test]
    fn test_scene_event_json_shape() {
        let zone = ZoneId::new();
        let json = serde_json::to_value(SceneEvent::Trigger {
            zone,
            entered: false,
        })
        .unwrap();
        assert_eq!(json["type"], "trigger");
        assert_eq!(json["entered"], false);
    }
}
