use std::rc::Rc;

use super::affordance::{AffordanceOverride, InputAffordances};
use super::machine::{ModeEvent, ModeMachine, ModeState, ModeTransition};
use crate::selection::{PointerTracker, TargetExclusions};

/// Everything capture mode holds while active. Dropping the scope drops any
/// in-progress drag and restores the affordances.
#[derive(Debug)]
struct CaptureScope {
    tracker: PointerTracker,
    _affordances: AffordanceOverride,
}

/// Owner of the screenshot-mode flag.
pub struct ModeController {
    machine: ModeMachine,
    affordances: Rc<dyn InputAffordances>,
    exclusions: TargetExclusions,
    scope: Option<CaptureScope>,
}

impl ModeController {
    pub fn new(affordances: Rc<dyn InputAffordances>, exclusions: TargetExclusions) -> Self {
        Self {
            machine: ModeMachine::new(),
            affordances,
            exclusions,
            scope: None,
        }
    }

    pub fn state(&self) -> ModeState {
        self.machine.state()
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn toggle(&mut self) -> ModeTransition {
        self.apply(ModeEvent::Toggle)
    }

    pub fn set_active(&mut self, active: bool) -> ModeTransition {
        self.apply(ModeEvent::set(active))
    }

    /// Pointer tracker of the active scope; `None` while inactive so pointer
    /// events are not observed.
    pub fn tracker(&self) -> Option<&PointerTracker> {
        self.scope.as_ref().map(|scope| &scope.tracker)
    }

    pub fn tracker_mut(&mut self) -> Option<&mut PointerTracker> {
        self.scope.as_mut().map(|scope| &mut scope.tracker)
    }

    fn apply(&mut self, event: ModeEvent) -> ModeTransition {
        let transition = self.machine.transition(event);
        if !transition.changed() {
            return transition;
        }

        if transition.to.is_active() {
            self.scope = Some(CaptureScope {
                tracker: PointerTracker::new(self.exclusions.clone()),
                _affordances: AffordanceOverride::apply(self.affordances.clone()),
            });
            tracing::info!("screenshot mode enabled");
        } else {
            let dragging = self
                .scope
                .take()
                .is_some_and(|scope| scope.tracker.is_dragging());
            tracing::info!(dragging, "screenshot mode disabled");
        }
        transition
    }
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("machine", &self.machine)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
