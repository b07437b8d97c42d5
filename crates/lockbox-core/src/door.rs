//! Hinged door gated by a combination lock.

use crate::combo::ComboLock;
use crate::events::Hook;
use crate::ids::{InteractableId, ZoneId};
use crate::input::{Contact, Interactable, InteractionResponse, PoseSource};
use crate::motion::{HingeBinding, HingeRest, MotionState, Release, ReleaseReason};
use crate::pose::Pose;

/// A door panel swung by a hinge handle.
///
/// The hinge gate follows the lock: the lock's unlock hook opens it and its
/// lock hook closes it. The lock holds no reference back to the door.
#[derive(Debug)]
pub struct DoorInteractable {
    hinge: HingeBinding,
    panel: Pose,
    on_open: Hook,
}

impl DoorInteractable {
    /// Build the door and subscribe its hinge gate to `lock`.
    pub fn new(hinge: HingeBinding, panel: Pose, lock: &mut ComboLock) -> Self {
        let gate = hinge.gate().clone();
        gate.set_open(!lock.is_locked());

        let unlock_gate = gate.clone();
        lock.on_unlock(move || unlock_gate.unlock());
        lock.on_lock(move || gate.lock());

        let mut door = Self {
            hinge,
            panel,
            on_open: Hook::new(),
        };
        door.mirror_panel();
        door
    }

    /// Observe the door settling into its open rest pose.
    pub fn on_open(&mut self, observer: impl FnMut() + 'static) {
        self.on_open.subscribe(observer);
    }

    /// The hinge handle driving the panel.
    pub fn hinge(&self) -> &HingeBinding {
        &self.hinge
    }

    /// Current door panel pose.
    pub fn panel(&self) -> Pose {
        self.panel
    }

    /// Whether the lock currently keeps the handle from being grabbed.
    pub fn is_locked(&self) -> bool {
        self.hinge.is_locked()
    }

    /// Whether the hinge last settled into its open rest pose.
    pub fn is_open(&self) -> bool {
        self.hinge.state() == MotionState::Unbound(HingeRest::Open)
    }

    /// Forward a trigger-volume signal to the hinge.
    pub fn on_trigger(&mut self, zone: ZoneId, entered: bool) -> bool {
        self.hinge.on_trigger(zone, entered)
    }

    /// Advance the hinge and swing the panel to match.
    pub fn tick_from(&mut self, source: &impl PoseSource) -> InteractionResponse {
        let released = self.hinge.tick_from(source).and_then(|tick| tick.released);
        self.mirror_panel();
        match released {
            Some(release) => self.settle(release),
            None => InteractionResponse::Ignored,
        }
    }

    /// Release the hinge from outside (no-op while unbound).
    pub fn release(&mut self, reason: ReleaseReason) -> InteractionResponse {
        match self.hinge.release(reason) {
            Some(release) => {
                self.mirror_panel();
                self.settle(release)
            }
            None => InteractionResponse::Ignored,
        }
    }

    fn settle(&mut self, release: Release<HingeRest>) -> InteractionResponse {
        if release.rest == HingeRest::Open {
            log::info!("door {} opened", self.hinge.id());
            self.on_open.emit();
            InteractionResponse::Opened
        } else {
            InteractionResponse::Handled
        }
    }

    /// Copy the hinge yaw onto the panel; panel pitch and roll stay put.
    fn mirror_panel(&mut self) {
        self.panel.euler.y = self.hinge.pose().euler.y;
    }
}

impl Interactable for DoorInteractable {
    fn id(&self) -> InteractableId {
        self.hinge.id()
    }

    fn on_grab_begin(&mut self, contact: &Contact) -> InteractionResponse {
        if self.hinge.attach(contact) {
            InteractionResponse::Handled
        } else {
            log::debug!("door {} refused grab (locked or busy)", self.hinge.id());
            InteractionResponse::Ignored
        }
    }

    fn on_grab_end(&mut self, contact: &Contact) -> InteractionResponse {
        match self.hinge.grab_ended(contact) {
            Some(release) => {
                self.mirror_panel();
                self.settle(release)
            }
            None => InteractionResponse::Ignored,
        }
    }
}
