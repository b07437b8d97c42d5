//! Scene: routes input to widgets and runs the per-frame tick.

use crate::combo::{ComboLock, PressOutcome};
use crate::config::{ConfigResult, SceneConfig};
use crate::display::LockDisplay;
use crate::door::DoorInteractable;
use crate::gate::Gate;
use crate::ids::InteractableId;
use crate::input::{
    FrameInput, Interactable, InteractionEvent, InteractionKind, InteractionResponse, PoseSource,
    SceneEvent,
};
use crate::keypad::Keypad;
use crate::motion::{DrawerBinding, HingeBinding, HingeConstraint, ReleaseReason};
use crate::widget::ButtonWidget;

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Lock outcomes, one per press that reached the lock.
    pub lock_outcomes: Vec<PressOutcome>,
    /// Bindings that let go of their driver this frame.
    pub released: Vec<InteractableId>,
    /// The door settled into its open rest pose.
    pub door_opened: bool,
}

impl FrameReport {
    /// Note a binding's response. `kind` is `None` for tick and forced
    /// releases, where any handled response means the binding let go.
    fn record(
        &mut self,
        id: InteractableId,
        kind: Option<InteractionKind>,
        response: InteractionResponse,
    ) {
        let releasing = matches!(kind, None | Some(InteractionKind::SelectExit));
        match response {
            InteractionResponse::Opened => {
                self.door_opened = true;
                self.released.push(id);
            }
            InteractionResponse::Handled if releasing => self.released.push(id),
            _ => {}
        }
    }
}

/// A room: keypad, optional drawer, optional door.
///
/// Call [`Scene::frame`] once per host frame. Events are always dispatched
/// before bound followers are ticked.
#[derive(Debug)]
pub struct Scene<D: LockDisplay> {
    keypad: Keypad<D>,
    drawer: Option<DrawerBinding>,
    door: Option<DoorInteractable>,
}

impl<D: LockDisplay> Scene<D> {
    /// Validate `config` and build every component it describes.
    pub fn from_config(config: &SceneConfig, display: D) -> ConfigResult<Self> {
        config.validate()?;

        let kc = &config.keypad;
        let buttons = kc
            .buttons
            .iter()
            .enumerate()
            .map(|(index, &id)| ButtonWidget::new(id, index, kc.button_palette))
            .collect();
        let lock = ComboLock::new(kc.combination.clone(), kc.resettable);
        let mut keypad = Keypad::new(buttons, lock, display, kc.status_palette);

        let drawer = config
            .drawer
            .as_ref()
            .map(|dc| match dc.key_socket {
                Some(socket) => DrawerBinding::with_key_socket(dc.id, dc.closed, dc.limits, socket),
                None => DrawerBinding::with_gate(dc.id, dc.closed, dc.limits, Gate::open()),
            })
            .transpose()?;

        let door = config.door.as_ref().map(|dc| {
            let constraint = HingeConstraint::new(
                dc.pivot,
                dc.start,
                dc.end,
                dc.limits,
                dc.closed_zone,
                dc.open_zone,
            );
            let hinge = HingeBinding::new(dc.id, constraint, Gate::locked());
            DoorInteractable::new(hinge, dc.panel, keypad.lock_mut())
        });

        log::info!(
            "scene built: {} buttons, drawer: {}, door: {}",
            kc.buttons.len(),
            drawer.is_some(),
            door.is_some()
        );
        Ok(Self {
            keypad,
            drawer,
            door,
        })
    }

    /// The keypad and its lock.
    pub fn keypad(&self) -> &Keypad<D> {
        &self.keypad
    }

    /// The drawer, if the room has one.
    pub fn drawer(&self) -> Option<&DrawerBinding> {
        self.drawer.as_ref()
    }

    /// The door, if the room has one.
    pub fn door(&self) -> Option<&DoorInteractable> {
        self.door.as_ref()
    }

    /// Mutable door, e.g. to observe it opening.
    pub fn door_mut(&mut self) -> Option<&mut DoorInteractable> {
        self.door.as_mut()
    }

    /// Run one frame: dispatch queued events, then tick bound followers.
    pub fn frame(&mut self, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport::default();
        for event in input.events() {
            self.dispatch(event, &mut report);
        }
        self.tick(input, &mut report);
        report
    }

    /// Dispatch a single event outside of [`Scene::frame`].
    pub fn handle_event(&mut self, event: &SceneEvent) -> FrameReport {
        let mut report = FrameReport::default();
        self.dispatch(event, &mut report);
        report
    }

    /// Release every bound follower (e.g. when the session ends).
    pub fn release_all(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if let Some(drawer) = self.drawer.as_mut() {
            if drawer.release(ReleaseReason::Forced).is_some() {
                report.released.push(drawer.id());
            }
        }
        if let Some(door) = self.door.as_mut() {
            let response = door.release(ReleaseReason::Forced);
            report.record(door.id(), None, response);
        }
        report
    }

    fn dispatch(&mut self, event: &SceneEvent, report: &mut FrameReport) {
        match *event {
            SceneEvent::Interaction(interaction) => self.dispatch_interaction(interaction, report),
            SceneEvent::Socket { socket, inserted } => {
                let handled = self
                    .drawer
                    .as_mut()
                    .is_some_and(|drawer| drawer.on_socket(socket, inserted));
                if !handled {
                    log::debug!("ignoring event for unknown socket {}", socket);
                }
            }
            SceneEvent::Trigger { zone, entered } => {
                let handled = self
                    .door
                    .as_mut()
                    .is_some_and(|door| door.on_trigger(zone, entered));
                if !handled {
                    log::debug!("ignoring event for unknown zone {}", zone);
                }
            }
        }
    }

    fn dispatch_interaction(&mut self, event: InteractionEvent, report: &mut FrameReport) {
        let InteractionEvent {
            target,
            kind,
            contact,
        } = event;

        if let Some(key) = self.keypad.handle(target, kind, &contact) {
            report.lock_outcomes.extend(key.outcome);
            return;
        }

        let widget: Option<&mut dyn Interactable> = match (&mut self.drawer, &mut self.door) {
            (Some(drawer), _) if drawer.id() == target => Some(drawer as &mut dyn Interactable),
            (_, Some(door)) if door.id() == target => Some(door as &mut dyn Interactable),
            _ => None,
        };
        match widget {
            Some(widget) => {
                let response = widget.dispatch(kind, &contact);
                report.record(target, Some(kind), response);
            }
            None => log::debug!("ignoring {:?} for unknown interactable {}", kind, target),
        }
    }

    fn tick(&mut self, source: &impl PoseSource, report: &mut FrameReport) {
        if let Some(drawer) = self.drawer.as_mut() {
            if let Some(tick) = drawer.tick_from(source) {
                if tick.released.is_some() {
                    report.released.push(drawer.id());
                }
            }
        }
        if let Some(door) = self.door.as_mut() {
            let response = door.tick_from(source);
            report.record(door.id(), None, response);
        }
    }
}
