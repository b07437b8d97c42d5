//! Drawer: linear travel along local depth, gated by a key socket.

use super::{
    excursion, Axis, ConstrainedMotion, DriverSample, MotionConstraint, MotionState, Release,
    ReleaseReason, Side, Tick, Violation,
};
use crate::config::{ConfigError, ConfigResult};
use crate::gate::Gate;
use crate::ids::{InteractableId, SocketId};
use crate::input::{Contact, Interactable, InteractionResponse, PoseSource};
use crate::pose::Pose;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How far inside the outer limit a drawer that was pulled out too far settles,
/// so it never rests exactly on the boundary.
pub const PULL_OUT_INSET: f32 = 0.01;

/// Travel and tolerance limits for a drawer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerLimits {
    /// Maximum pull-out distance along depth from the closed position.
    pub travel: f32,
    /// Half-width bands: X/Y lateral drift of the grab point, Z slack past
    /// either end of the travel range.
    pub tolerance: Vec3,
}

impl Default for DrawerLimits {
    fn default() -> Self {
        Self {
            travel: 0.8,
            tolerance: Vec3::new(0.02, 0.02, 0.0),
        }
    }
}

impl DrawerLimits {
    /// Travel must leave room for the pull-out inset; tolerances must be
    /// finite and non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.travel.is_finite() || self.travel <= PULL_OUT_INSET {
            return Err(ConfigError::InvalidLimit {
                name: "drawer.limits.travel",
                value: self.travel,
            });
        }
        for value in self.tolerance.to_array() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLimit {
                    name: "drawer.limits.tolerance",
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Where a released drawer settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerRest {
    /// Fully pushed in at the recorded starting position.
    #[default]
    Closed,
    /// Somewhere inside the travel range.
    Extended,
    /// Pulled too far; parked just inside the outer limit.
    Inset,
}

/// Depth-only following with lateral drift and travel limits.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerConstraint {
    closed: Pose,
    limits: DrawerLimits,
}

impl DrawerConstraint {
    /// Constraint for a drawer that closes at `closed`. Limits are not
    /// checked here; see [`DrawerLimits::validate`].
    pub fn new(closed: Pose, limits: DrawerLimits) -> Self {
        Self { closed, limits }
    }

    fn inner_depth(&self) -> f32 {
        self.closed.position.z
    }

    fn outer_depth(&self) -> f32 {
        self.closed.position.z + self.limits.travel
    }

    fn with_depth(pose: Pose, depth: f32) -> Pose {
        let mut position = pose.position;
        position.z = depth;
        pose.with_position(position)
    }
}

impl MotionConstraint for DrawerConstraint {
    type Rest = DrawerRest;

    fn follow(&self, follower: Pose, driver: &DriverSample) -> Pose {
        Self::with_depth(follower, driver.grab_point().z)
    }

    fn check_limits(&self, follower: &Pose, driver: &DriverSample) -> Option<Violation> {
        let grab = driver.grab_point();
        let tol = self.limits.tolerance;
        let reference = self.closed.position;
        if let Some(v) = excursion(Axis::X, grab.x, reference.x, tol.x)
            .or_else(|| excursion(Axis::Y, grab.y, reference.y, tol.y))
        {
            return Some(v);
        }

        let depth = follower.position.z;
        if depth < self.inner_depth() - tol.z {
            Some(Violation::new(Axis::Z, Side::Below))
        } else if depth > self.outer_depth() + tol.z {
            Some(Violation::new(Axis::Z, Side::Above))
        } else {
            None
        }
    }

    fn rest_pose(&self, follower: Pose, reason: ReleaseReason) -> (Pose, DrawerRest) {
        match reason.violation() {
            Some(Violation {
                axis: Axis::Z,
                side: Side::Below,
            }) => (self.closed, DrawerRest::Closed),
            Some(Violation {
                axis: Axis::Z,
                side: Side::Above,
            }) => (
                Self::with_depth(follower, self.outer_depth() - PULL_OUT_INSET),
                DrawerRest::Inset,
            ),
            _ => {
                let depth = follower
                    .position
                    .z
                    .clamp(self.inner_depth(), self.outer_depth());
                if depth <= self.inner_depth() {
                    (Self::with_depth(follower, depth), DrawerRest::Closed)
                } else {
                    (Self::with_depth(follower, depth), DrawerRest::Extended)
                }
            }
        }
    }

    fn initial_rest(&self) -> DrawerRest {
        DrawerRest::Closed
    }
}

/// A grabbable drawer that only slides while its key is in the socket.
#[derive(Debug, Clone)]
pub struct DrawerBinding {
    id: InteractableId,
    key_socket: Option<SocketId>,
    motion: ConstrainedMotion<DrawerConstraint>,
}

impl DrawerBinding {
    /// A drawer with a key socket starts locked.
    pub fn with_key_socket(
        id: InteractableId,
        closed: Pose,
        limits: DrawerLimits,
        key_socket: SocketId,
    ) -> ConfigResult<Self> {
        let mut drawer = Self::with_gate(id, closed, limits, Gate::locked())?;
        drawer.key_socket = Some(key_socket);
        Ok(drawer)
    }

    /// A drawer gated by an externally owned gate.
    pub fn with_gate(
        id: InteractableId,
        closed: Pose,
        limits: DrawerLimits,
        gate: Gate,
    ) -> ConfigResult<Self> {
        limits.validate()?;
        Ok(Self {
            id,
            key_socket: None,
            motion: ConstrainedMotion::new(DrawerConstraint::new(closed, limits), gate, closed),
        })
    }

    /// The socket whose key unlocks this drawer, if any.
    pub fn key_socket(&self) -> Option<SocketId> {
        self.key_socket
    }

    /// Whether the gate currently refuses grabs.
    pub fn is_locked(&self) -> bool {
        self.motion.is_gate_locked()
    }

    /// The underlying binding.
    pub fn motion(&self) -> &ConstrainedMotion<DrawerConstraint> {
        &self.motion
    }

    /// Current drawer pose.
    pub fn pose(&self) -> Pose {
        self.motion.follower()
    }

    /// Bound driver, or the rest the drawer settled into.
    pub fn state(&self) -> MotionState<DrawerRest> {
        self.motion.state()
    }

    /// Socket insertion unlocks, removal locks. Returns whether the socket is
    /// this drawer's key socket.
    pub fn on_socket(&mut self, socket: SocketId, inserted: bool) -> bool {
        if self.key_socket != Some(socket) {
            return false;
        }
        self.motion.gate().set_open(inserted);
        log::info!(
            "drawer {} {}",
            self.id,
            if inserted { "unlocked" } else { "locked" }
        );
        true
    }

    /// Advance one frame, reading the bound driver from `source`.
    pub fn tick_from(&mut self, source: &impl PoseSource) -> Option<Tick<DrawerRest>> {
        self.motion.tick_from(source)
    }

    /// Release the drawer from outside (no-op while unbound).
    pub fn release(&mut self, reason: ReleaseReason) -> Option<Release<DrawerRest>> {
        self.motion.release(reason)
    }
}

impl Interactable for DrawerBinding {
    fn id(&self) -> InteractableId {
        self.id
    }

    fn on_grab_begin(&mut self, contact: &Contact) -> InteractionResponse {
        if self.motion.attach(contact) {
            InteractionResponse::Handled
        } else {
            log::debug!("drawer {} refused grab (locked or busy)", self.id);
            InteractionResponse::Ignored
        }
    }

    fn on_grab_end(&mut self, contact: &Contact) -> InteractionResponse {
        match self.motion.grab_ended(contact) {
            Some(_) => InteractionResponse::Handled,
            None => InteractionResponse::Ignored,
        }
    }
}
