use crate::capture::{CaptureDispatcher, PendingCapture};
use crate::geometry::{Point, Rect};
use crate::input::InputContext;
use crate::mode::{ModeController, ModeTransition};
use crate::selection::PointerTarget;

/// Screenshot-mode interaction: mode flag, pointer tracking and capture handoff.
#[derive(Debug)]
pub struct RegionSelector {
    mode: ModeController,
    dispatcher: CaptureDispatcher,
}

impl RegionSelector {
    pub fn new(mode: ModeController, dispatcher: CaptureDispatcher) -> Self {
        Self { mode, dispatcher }
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.mode
            .tracker()
            .is_some_and(|tracker| tracker.is_dragging())
    }

    pub fn toggle_mode(&mut self) -> ModeTransition {
        self.mode.toggle()
    }

    pub fn set_mode(&mut self, active: bool) -> ModeTransition {
        self.mode.set_active(active)
    }

    pub fn input_context(&self) -> InputContext {
        InputContext {
            capture_active: self.is_active(),
            dragging: self.is_dragging(),
        }
    }

    /// Box to render right now; `None` when idle or inactive.
    pub fn selection(&self) -> Option<Rect> {
        self.mode.tracker().and_then(|tracker| tracker.selection())
    }

    pub fn pointer_down(&mut self, point: Point, target: &PointerTarget) -> bool {
        self.mode
            .tracker_mut()
            .is_some_and(|tracker| tracker.on_pointer_down(point, target))
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.mode
            .tracker_mut()
            .is_some_and(|tracker| tracker.on_pointer_move(point))
    }

    /// Commits the drag. The returned handle is only for observing the result;
    /// the capture proceeds whether or not it is kept.
    pub fn pointer_up(&mut self) -> Option<PendingCapture> {
        let rect = self.mode.tracker_mut()?.on_pointer_up()?;
        self.dispatcher.submit(rect)
    }
}
