use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Label};

use super::runtime_css::CAPTURE_MODE_CSS_CLASS;
use crate::mode::{CursorStyle, InputAffordances};

/// Cursor and text-selection switches for the main window.
pub(super) struct WindowAffordances {
    window: ApplicationWindow,
    selectable_labels: Vec<Label>,
}

impl WindowAffordances {
    pub(super) fn new(window: ApplicationWindow, selectable_labels: Vec<Label>) -> Self {
        Self {
            window,
            selectable_labels,
        }
    }
}

impl InputAffordances for WindowAffordances {
    fn set_cursor(&self, style: CursorStyle) {
        self.window.set_cursor_from_name(style.cursor_name());
    }

    fn set_text_selection(&self, enabled: bool) {
        if enabled {
            self.window.remove_css_class(CAPTURE_MODE_CSS_CLASS);
        } else {
            self.window.add_css_class(CAPTURE_MODE_CSS_CLASS);
        }
        for label in &self.selectable_labels {
            if !enabled {
                label.select_region(0, 0);
            }
            label.set_selectable(enabled);
        }
    }
}
