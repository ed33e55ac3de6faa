use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
}

impl CursorStyle {
    /// Cursor name understood by the toolkit; `None` restores the inherited one.
    pub const fn cursor_name(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Crosshair => Some("crosshair"),
        }
    }
}

/// Window-global input styling touched while capture mode is active.
pub trait InputAffordances {
    fn set_cursor(&self, cursor: CursorStyle);
    fn set_text_selection(&self, enabled: bool);
}

/// Capture-mode styling held for as long as the value lives. Restored on drop,
/// whichever path released it.
pub struct AffordanceOverride {
    target: Rc<dyn InputAffordances>,
}

impl AffordanceOverride {
    pub fn apply(target: Rc<dyn InputAffordances>) -> Self {
        target.set_cursor(CursorStyle::Crosshair);
        target.set_text_selection(false);
        Self { target }
    }
}

impl Drop for AffordanceOverride {
    fn drop(&mut self) {
        self.target.set_cursor(CursorStyle::Default);
        self.target.set_text_selection(true);
    }
}

impl std::fmt::Debug for AffordanceOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffordanceOverride").finish_non_exhaustive()
    }
}
