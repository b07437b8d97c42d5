//! Constrained motion: a follower pose bound to an externally tracked driver.
//!
//! A [`ConstrainedMotion`] owns the follower and the binding lifecycle
//! (attach, tick, limit check, release). What "following" means, which
//! excursions are out of bounds and where the follower settles afterwards is
//! supplied by a [`MotionConstraint`]:
//!
//! - [`DrawerConstraint`]: linear travel along local depth.
//! - [`HingeConstraint`]: look-at rotation about a pivot.

mod drawer;
mod hinge;

pub use drawer::{DrawerBinding, DrawerConstraint, DrawerLimits, DrawerRest, PULL_OUT_INSET};
pub use hinge::{HingeBinding, HingeConstraint, HingeLimits, HingeRest, Zone};

use crate::gate::Gate;
use crate::ids::InteractorId;
use crate::input::{Contact, PoseSource};
use crate::pose::Pose;
use glam::Vec3;

/// An axis (or angle) a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    Pitch,
}

/// Which side of the allowed band a value left through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Below,
    Above,
}

/// A single-axis excursion past a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Violation {
    pub axis: Axis,
    pub side: Side,
}

impl Violation {
    /// A violation of `axis` on `side`.
    pub fn new(axis: Axis, side: Side) -> Self {
        Self { axis, side }
    }
}

/// Test `value` against `center ± half_width`.
///
/// A value exactly on the boundary is inside.
pub fn excursion(axis: Axis, value: f32, center: f32, half_width: f32) -> Option<Violation> {
    if value > center + half_width {
        Some(Violation::new(axis, Side::Above))
    } else if value < center - half_width {
        Some(Violation::new(axis, Side::Below))
    } else {
        None
    }
}

/// Per-axis excursion test of `value` against `center ± half_widths`, X first.
pub fn excursion3(value: Vec3, center: Vec3, half_widths: Vec3) -> Option<Violation> {
    excursion(Axis::X, value.x, center.x, half_widths.x)
        .or_else(|| excursion(Axis::Y, value.y, center.y, half_widths.y))
        .or_else(|| excursion(Axis::Z, value.z, center.z, half_widths.z))
}

/// Why a binding was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    /// The interactor let go.
    GrabEnded,
    /// A limit check failed.
    Limit(Violation),
    /// Tracking no longer reports the driver.
    DriverLost,
    /// Released by the owner (e.g. a scene reset).
    Forced,
}

impl ReleaseReason {
    /// The limit that was exceeded, for limit releases.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Self::Limit(v) => Some(*v),
            _ => None,
        }
    }
}

/// The driver as a constraint sees it on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSample {
    /// Tracked pose of the interactor.
    pub pose: Pose,
    /// Driver position minus follower position at attach time.
    pub grab_offset: Vec3,
}

impl DriverSample {
    /// Where the grabbed point of the follower would be if it moved rigidly
    /// with the driver.
    pub fn grab_point(&self) -> Vec3 {
        self.pose.position - self.grab_offset
    }
}

/// The per-binding rules for following, limits and resting.
pub trait MotionConstraint {
    /// Label for the rest pose the follower settled into.
    type Rest: Copy + std::fmt::Debug + PartialEq;

    /// Constrained follower pose for this driver sample. Axes the constraint
    /// does not drive pass through from `follower`.
    fn follow(&self, follower: Pose, driver: &DriverSample) -> Pose;

    /// First limit the follower or driver has exceeded, if any.
    fn check_limits(&self, follower: &Pose, driver: &DriverSample) -> Option<Violation>;

    /// Rest pose to apply on release.
    fn rest_pose(&self, follower: Pose, reason: ReleaseReason) -> (Pose, Self::Rest);

    /// Rest label for a follower that has never been bound.
    fn initial_rest(&self) -> Self::Rest;
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release<R> {
    pub reason: ReleaseReason,
    pub pose: Pose,
    pub rest: R,
}

/// Outcome of a tick while bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<R> {
    /// Follower pose after this tick (the rest pose if released).
    pub pose: Pose,
    pub released: Option<Release<R>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    interactor: InteractorId,
    grab_offset: Vec3,
}

/// Binding state of a constrained follower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState<R> {
    Bound(InteractorId),
    Unbound(R),
}

/// Follower pose plus its binding to a driver.
///
/// While unbound the follower always sits in a rest pose chosen by the
/// constraint. Releasing is idempotent.
#[derive(Debug, Clone)]
pub struct ConstrainedMotion<C: MotionConstraint> {
    constraint: C,
    gate: Gate,
    follower: Pose,
    binding: Option<Binding>,
    rest: C::Rest,
}

impl<C: MotionConstraint> ConstrainedMotion<C> {
    /// An unbound follower at `follower`.
    pub fn new(constraint: C, gate: Gate, follower: Pose) -> Self {
        let rest = constraint.initial_rest();
        Self {
            constraint,
            gate,
            follower,
            binding: None,
            rest,
        }
    }

    /// The rules this binding follows.
    pub fn constraint(&self) -> &C {
        &self.constraint
    }

    /// Mutable constraint, e.g. for zone updates.
    pub fn constraint_mut(&mut self) -> &mut C {
        &mut self.constraint
    }

    /// The gate checked on attach.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Current follower pose.
    pub fn follower(&self) -> Pose {
        self.follower
    }

    /// Whether a driver is attached.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The bound interactor, if any.
    pub fn driver(&self) -> Option<InteractorId> {
        self.binding.map(|b| b.interactor)
    }

    /// Bound driver, or the rest the follower settled into.
    pub fn state(&self) -> MotionState<C::Rest> {
        match self.binding {
            Some(b) => MotionState::Bound(b.interactor),
            None => MotionState::Unbound(self.rest),
        }
    }

    /// Whether the gate currently refuses attaching.
    pub fn is_gate_locked(&self) -> bool {
        !self.gate.is_open()
    }

    /// Bind a driver. Fails if the gate is locked, a driver is already bound,
    /// or the contact pose is not finite.
    pub fn attach(&mut self, contact: &Contact) -> bool {
        if self.is_gate_locked() || self.is_bound() {
            return false;
        }
        if !contact.pose.is_finite() {
            log::warn!("refusing non-finite grab from interactor {}", contact.interactor);
            return false;
        }
        self.binding = Some(Binding {
            interactor: contact.interactor,
            grab_offset: contact.pose.position - self.follower.position,
        });
        log::debug!("bound to interactor {}", contact.interactor);
        true
    }

    /// Advance one frame with the driver's current pose.
    ///
    /// Returns `None` while unbound. A non-finite driver pose counts as lost
    /// tracking and releases before the follower moves.
    pub fn tick(&mut self, driver: &Pose) -> Option<Tick<C::Rest>> {
        let binding = self.binding?;
        if !driver.is_finite() {
            log::warn!("non-finite pose for interactor {}, releasing", binding.interactor);
            let released = self.release(ReleaseReason::DriverLost);
            return Some(Tick {
                pose: self.follower,
                released,
            });
        }
        let sample = DriverSample {
            pose: *driver,
            grab_offset: binding.grab_offset,
        };
        self.follower = self.constraint.follow(self.follower, &sample);
        let released = self.check_limits(&sample);
        Some(Tick {
            pose: self.follower,
            released,
        })
    }

    /// Advance one frame, reading the bound driver from `source`.
    ///
    /// Releases if the source has lost the driver.
    pub fn tick_from(&mut self, source: &impl PoseSource) -> Option<Tick<C::Rest>> {
        let interactor = self.driver()?;
        match source.pose(interactor) {
            Some(pose) => self.tick(&pose),
            None => {
                log::warn!("lost tracking for interactor {}, releasing", interactor);
                let released = self.release(ReleaseReason::DriverLost);
                Some(Tick {
                    pose: self.follower,
                    released,
                })
            }
        }
    }

    /// Release if the follower or driver is out of bounds.
    pub fn check_limits(&mut self, driver: &DriverSample) -> Option<Release<C::Rest>> {
        let violation = self.constraint.check_limits(&self.follower, driver)?;
        log::debug!("limit exceeded on {:?} ({:?})", violation.axis, violation.side);
        self.release(ReleaseReason::Limit(violation))
    }

    /// End the grab if `contact` is the bound interactor.
    pub fn grab_ended(&mut self, contact: &Contact) -> Option<Release<C::Rest>> {
        if self.driver() != Some(contact.interactor) {
            return None;
        }
        self.release(ReleaseReason::GrabEnded)
    }

    /// Unbind and settle into a rest pose. A no-op while unbound.
    pub fn release(&mut self, reason: ReleaseReason) -> Option<Release<C::Rest>> {
        self.binding.take()?;
        let (pose, rest) = self.constraint.rest_pose(self.follower, reason);
        self.follower = pose;
        self.rest = rest;
        log::debug!("released ({:?}), resting at {:?}", reason, rest);
        Some(Release { reason, pose, rest })
    }
}
