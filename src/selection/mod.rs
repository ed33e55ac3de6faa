mod target;

pub use crate::geometry::{Point, Rect};
pub use target::{
    PointerTarget, TargetExclusions, DEFAULT_EXCLUDED_ELEMENTS, DEFAULT_EXCLUDED_REGIONS,
};

/// In-progress drag. Only `current` moves once the drag has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    start: Point,
    current: Point,
}

impl DragState {
    pub const fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub const fn start(&self) -> Point {
        self.start
    }

    pub const fn current(&self) -> Point {
        self.current
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }
}

/// Box to draw for the current drag, if any.
pub fn selection_rect(drag: Option<&DragState>) -> Option<Rect> {
    drag.map(DragState::rect)
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    drag: Option<DragState>,
    exclusions: TargetExclusions,
}

impl PointerTracker {
    pub fn new(exclusions: TargetExclusions) -> Self {
        Self {
            drag: None,
            exclusions,
        }
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn selection(&self) -> Option<Rect> {
        selection_rect(self.drag.as_ref())
    }

    /// Starts a drag unless the press landed on an interactive control.
    pub fn on_pointer_down(&mut self, point: Point, target: &PointerTarget) -> bool {
        if self.exclusions.excludes(target) {
            tracing::debug!(
                element = target.element(),
                x = point.x,
                y = point.y,
                "pointer down on interactive control; drag not started"
            );
            return false;
        }
        self.drag = Some(DragState::new(point));
        tracing::trace!(x = point.x, y = point.y, "selection drag started");
        true
    }

    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        match self.drag.as_mut() {
            Some(drag) if drag.current != point => {
                drag.current = point;
                true
            }
            _ => false,
        }
    }

    /// Ends the drag and yields its rectangle. The tracker is idle afterwards.
    pub fn on_pointer_up(&mut self) -> Option<Rect> {
        let drag = self.drag.take()?;
        let rect = drag.rect();
        tracing::debug!(
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "selection drag committed"
        );
        Some(rect)
    }

    pub fn reset(&mut self) {
        if self.drag.take().is_some() {
            tracing::debug!("selection drag cleared");
        }
    }
}
