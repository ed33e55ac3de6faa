use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::DrawingArea;

use super::runtime_css::{SelectionPalette, SELECTION_PALETTE};
use crate::geometry::Rect;
use crate::region::RegionSelector;

/// Cairo rectangle for a selection, inset by half the stroke so a 2px border
/// lands on whole pixels.
fn selection_paint_rect(rect: Rect, stroke_width: f64) -> (f64, f64, f64, f64) {
    let inset = stroke_width / 2.0;
    (
        f64::from(rect.x) + inset,
        f64::from(rect.y) + inset,
        (f64::from(rect.width) - stroke_width).max(0.0),
        (f64::from(rect.height) - stroke_width).max(0.0),
    )
}

fn draw_selection(context: &gtk4::cairo::Context, rect: Rect, palette: SelectionPalette) {
    let (x, y, width, height) = selection_paint_rect(rect, palette.stroke_width);
    context.save().ok();
    context.rectangle(x, y, width, height);
    let fill = palette.fill;
    context.set_source_rgba(fill.red, fill.green, fill.blue, fill.alpha);
    let _ = context.fill_preserve();
    let stroke = palette.stroke;
    context.set_source_rgba(stroke.red, stroke.green, stroke.blue, stroke.alpha);
    context.set_line_width(palette.stroke_width);
    let _ = context.stroke();
    context.restore().ok();
}

pub(super) fn build_selection_overlay(selector: Rc<RefCell<RegionSelector>>) -> DrawingArea {
    let canvas = DrawingArea::new();
    canvas.set_hexpand(true);
    canvas.set_vexpand(true);
    canvas.set_can_target(false);
    canvas.set_draw_func(move |_, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        let Ok(selector) = selector.try_borrow() else {
            return;
        };
        if let Some(rect) = selector.selection() {
            draw_selection(context, rect, SELECTION_PALETTE);
        }
    });
    canvas
}
