//! Hinge: look-at rotation about a pivot, rest pose chosen by trigger zones.

use super::{
    excursion, excursion3, Axis, ConstrainedMotion, DriverSample, MotionConstraint, MotionState,
    Release, ReleaseReason, Tick, Violation,
};
use crate::gate::Gate;
use crate::ids::{InteractableId, ZoneId};
use crate::input::{Contact, PoseSource};
use crate::pose::{look_at_euler, normalize_angle, Pose};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which trigger zone the hinge handle is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    Closed,
    Open,
    #[default]
    Neither,
}

/// Where a released hinge settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HingeRest {
    /// Back at the recorded start pose.
    #[default]
    Closed,
    /// At the recorded end pose.
    Open,
    /// Pitch reset to its start value, yaw and roll left where they were.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HingeLimits {
    /// Per-axis half-widths for the driver position around the pivot.
    pub position: Vec3,
    /// Maximum pitch deviation from the start pitch, in degrees.
    pub pitch: f32,
}

impl Default for HingeLimits {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, 0.5),
            pitch: 30.0,
        }
    }
}

/// Look-at following with driver-position and pitch limits.
#[derive(Debug, Clone, PartialEq)]
pub struct HingeConstraint {
    pivot: Vec3,
    start: Pose,
    end: Pose,
    limits: HingeLimits,
    closed_zone: ZoneId,
    open_zone: ZoneId,
    zone: Zone,
}

impl HingeConstraint {
    /// Constraint rotating about `pivot`, starting in no zone.
    pub fn new(
        pivot: Vec3,
        start: Pose,
        end: Pose,
        limits: HingeLimits,
        closed_zone: ZoneId,
        open_zone: ZoneId,
    ) -> Self {
        Self {
            pivot,
            start,
            end,
            limits,
            closed_zone,
            open_zone,
            zone: Zone::Neither,
        }
    }

    /// Zone recorded from the latest trigger signals.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Closed rest pose.
    pub fn start_pose(&self) -> Pose {
        self.start
    }

    /// Open rest pose.
    pub fn end_pose(&self) -> Pose {
        self.end
    }

    fn start_pitch(&self) -> f32 {
        normalize_angle(self.start.euler.x)
    }

    /// Record entry into a trigger volume. Returns whether the zone is one of ours.
    pub fn zone_entered(&mut self, zone: ZoneId) -> bool {
        if zone == self.closed_zone {
            self.zone = Zone::Closed;
        } else if zone == self.open_zone {
            self.zone = Zone::Open;
        } else {
            return false;
        }
        true
    }

    /// Record exit from a trigger volume.
    pub fn zone_exited(&mut self, zone: ZoneId) -> bool {
        let leaving = if zone == self.closed_zone {
            Zone::Closed
        } else if zone == self.open_zone {
            Zone::Open
        } else {
            return false;
        };
        if self.zone == leaving {
            self.zone = Zone::Neither;
        }
        true
    }
}

impl MotionConstraint for HingeConstraint {
    type Rest = HingeRest;

    fn follow(&self, follower: Pose, driver: &DriverSample) -> Pose {
        match look_at_euler(self.pivot, driver.pose.position) {
            Some(look) => follower.with_euler(Vec3::new(look.x, look.y, follower.euler.z)),
            None => follower,
        }
    }

    fn check_limits(&self, follower: &Pose, driver: &DriverSample) -> Option<Violation> {
        excursion3(driver.pose.position, self.pivot, self.limits.position).or_else(|| {
            excursion(
                Axis::Pitch,
                follower.pitch(),
                self.start_pitch(),
                self.limits.pitch,
            )
        })
    }

    fn rest_pose(&self, follower: Pose, _reason: ReleaseReason) -> (Pose, HingeRest) {
        match self.zone {
            Zone::Closed => (self.start, HingeRest::Closed),
            Zone::Open => (self.end, HingeRest::Open),
            Zone::Neither => {
                let mut euler = follower.euler;
                euler.x = self.start.euler.x;
                (follower.with_euler(euler), HingeRest::Neutral)
            }
        }
    }

    fn initial_rest(&self) -> HingeRest {
        HingeRest::Closed
    }
}

/// A hinge handle whose gate is driven by someone else (the combination lock).
#[derive(Debug, Clone)]
pub struct HingeBinding {
    id: InteractableId,
    motion: ConstrainedMotion<HingeConstraint>,
}

impl HingeBinding {
    /// A hinge resting at the constraint's start pose.
    pub fn new(id: InteractableId, constraint: HingeConstraint, gate: Gate) -> Self {
        let start = constraint.start_pose();
        Self {
            id,
            motion: ConstrainedMotion::new(constraint, gate, start),
        }
    }

    /// Identity of the handle the player grabs.
    pub fn id(&self) -> InteractableId {
        self.id
    }

    /// Whether the gate currently refuses grabs.
    pub fn is_locked(&self) -> bool {
        self.motion.is_gate_locked()
    }

    /// The gate the lock hooks drive.
    pub fn gate(&self) -> &Gate {
        self.motion.gate()
    }

    /// Current handle pose.
    pub fn pose(&self) -> Pose {
        self.motion.follower()
    }

    /// Last trigger zone the handle reported.
    pub fn zone(&self) -> Zone {
        self.motion.constraint().zone()
    }

    /// Bound driver, or the rest the handle settled into.
    pub fn state(&self) -> MotionState<HingeRest> {
        self.motion.state()
    }

    /// The underlying binding.
    pub fn motion(&self) -> &ConstrainedMotion<HingeConstraint> {
        &self.motion
    }

    /// Bind a driver; see [`ConstrainedMotion::attach`].
    pub fn attach(&mut self, contact: &Contact) -> bool {
        self.motion.attach(contact)
    }

    /// End the grab if `contact` is the bound interactor.
    pub fn grab_ended(&mut self, contact: &Contact) -> Option<Release<HingeRest>> {
        self.motion.grab_ended(contact)
    }

    /// Trigger-volume signal. While bound this only updates the last known zone.
    pub fn on_trigger(&mut self, zone: ZoneId, entered: bool) -> bool {
        let constraint = self.motion.constraint_mut();
        if entered {
            constraint.zone_entered(zone)
        } else {
            constraint.zone_exited(zone)
        }
    }

    /// Advance one frame, reading the bound driver from `source`.
    pub fn tick_from(&mut self, source: &impl PoseSource) -> Option<Tick<HingeRest>> {
        self.motion.tick_from(source)
    }

    /// Release the handle from outside (no-op while unbound).
    pub fn release(&mut self, reason: ReleaseReason) -> Option<Release<HingeRest>> {
        self.motion.release(reason)
    }
}
