#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { ctrl, shift, alt }
    }

    const fn any(self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub capture_active: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleCaptureMode,
    ExitCaptureMode,
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.dragging || modifiers.any() {
        return None;
    }

    match key {
        ShortcutKey::Character(ch) if ch.eq_ignore_ascii_case(&'s') => {
            Some(ShortcutAction::ToggleCaptureMode)
        }
        ShortcutKey::Escape if context.capture_active => Some(ShortcutAction::ExitCaptureMode),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> InputContext {
        InputContext {
            capture_active: true,
            dragging: false,
        }
    }

    #[test]
    fn plain_s_toggles_in_both_states() {
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('s'),
                ShortcutModifiers::default(),
                InputContext::default()
            ),
            Some(ShortcutAction::ToggleCaptureMode)
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('s'),
                ShortcutModifiers::default(),
                active()
            ),
            Some(ShortcutAction::ToggleCaptureMode)
        );
    }

    #[test]
    fn modified_s_is_not_a_toggle() {
        for modifiers in [
            ShortcutModifiers::new(true, false, false),
            ShortcutModifiers::new(false, true, false),
            ShortcutModifiers::new(false, false, true),
        ] {
            assert_eq!(
                resolve_shortcut(ShortcutKey::Character('s'), modifiers, active()),
                None
            );
        }
    }

    #[test]
    fn escape_exits_only_when_active() {
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), active()),
            Some(ShortcutAction::ExitCaptureMode)
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Escape,
                ShortcutModifiers::default(),
                InputContext::default()
            ),
            None
        );
    }

    #[test]
    fn shortcuts_are_ignored_mid_drag() {
        let context = InputContext {
            capture_active: true,
            dragging: true,
        };
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), context),
            None
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('s'),
                ShortcutModifiers::default(),
                context
            ),
            None
        );
    }

    #[test]
    fn unrelated_keys_resolve_to_nothing() {
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('x'),
                ShortcutModifiers::default(),
                active()
            ),
            None
        );
    }
}
