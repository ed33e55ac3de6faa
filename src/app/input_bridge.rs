use gtk4::prelude::*;

use crate::geometry::Point;
use crate::input::{ShortcutKey, ShortcutModifiers};
use crate::selection::PointerTarget;

fn shortcut_character_from_keycode(keycode: u32) -> Option<char> {
    // Wayland/XKB keycodes are commonly evdev+8; accept both.
    match keycode {
        31 | 39 => Some('s'),
        _ => None,
    }
}

pub(super) fn normalize_shortcut_key(key: gtk4::gdk::Key, keycode: u32) -> Option<ShortcutKey> {
    if key == gtk4::gdk::Key::Escape {
        return Some(ShortcutKey::Escape);
    }

    let keyval_shortcut = key
        .to_unicode()
        .filter(|character| !character.is_control())
        .map(|character| character.to_ascii_lowercase());
    match keyval_shortcut {
        Some(character) if character.is_ascii() => Some(ShortcutKey::Character(character)),
        Some(_) | None => shortcut_character_from_keycode(keycode).map(ShortcutKey::Character),
    }
}

pub(super) fn shortcut_modifiers(modifier: gtk4::gdk::ModifierType) -> ShortcutModifiers {
    ShortcutModifiers::new(
        modifier.contains(gtk4::gdk::ModifierType::CONTROL_MASK),
        modifier.contains(gtk4::gdk::ModifierType::SHIFT_MASK),
        modifier.contains(gtk4::gdk::ModifierType::ALT_MASK),
    )
}

/// Surface-relative pointer position. No translation to output coordinates
/// happens: the capture crops grim's full-output grab with these values, so
/// the saved region only lines up when the window sits at the output origin.
pub(super) fn pointer_point(x: f64, y: f64) -> Point {
    Point::from_f64(x, y)
}

/// Names the widget under `(x, y)` in `surface` coordinates along with its
/// ancestors' CSS node names and classes, nearest first.
pub(super) fn pointer_target_at<W: IsA<gtk4::Widget>>(surface: &W, x: f64, y: f64) -> PointerTarget {
    let Some(widget) = surface.pick(x, y, gtk4::PickFlags::DEFAULT) else {
        return PointerTarget::new(surface.as_ref().css_name().as_str());
    };

    let mut ancestors = Vec::new();
    let mut parent = widget.parent();
    while let Some(current) = parent {
        push_widget_names(&mut ancestors, &current);
        parent = current.parent();
    }
    PointerTarget::new(widget.css_name().as_str()).with_ancestors(ancestors)
}

fn push_widget_names(names: &mut Vec<String>, widget: &gtk4::Widget) {
    names.push(widget.css_name().to_string());
    names.extend(widget.css_classes().iter().map(|class| class.to_string()));
    let widget_name = widget.widget_name();
    if !widget_name.is_empty() && !widget_name.starts_with("Gtk") {
        names.push(widget_name.to_string());
    }
}
