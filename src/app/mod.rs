use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::capture::{capture_notice, CaptureDispatcher, ScreenCapture};
use crate::config::load_app_config;
use crate::error::{AppError, AppResult};
use crate::input::{resolve_shortcut, ShortcutAction};
use crate::mode::ModeController;
use crate::notification::DesktopNotifier;
use crate::region::RegionSelector;
use crate::selection::TargetExclusions;
use crate::storage::ScreenshotStore;
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, DrawingArea, Label, Orientation,
    Overlay, ToggleButton,
};

mod affordances;
mod input_bridge;
mod lifecycle;
mod overlay;
mod runtime_css;
mod worker;

use self::affordances::WindowAffordances;
use self::input_bridge::*;
use self::lifecycle::{gtk_launch_args, ShutdownSignal};
use self::overlay::build_selection_overlay;
use self::runtime_css::{install_runtime_css, ROOT_CSS_CLASS, TOOLBAR_CSS_CLASS};
use self::worker::watch_pending_capture;

const APP_ID: &str = "io.github.peek.Peek";
const ENABLE_MODE_LABEL: &str = "Enable Screenshot Mode";
const DISABLE_MODE_LABEL: &str = "Disable Screenshot Mode";
const STATUS_CAPTURING: &str = "Capturing…";
const CANVAS_HINT: &str = "Press s or use the button to enter screenshot mode.";

fn toggle_label(active: bool) -> &'static str {
    if active {
        DISABLE_MODE_LABEL
    } else {
        ENABLE_MODE_LABEL
    }
}

fn mode_status(active: bool) -> &'static str {
    if active {
        "Drag to select a region. Esc leaves screenshot mode."
    } else {
        "Screenshot mode off."
    }
}

#[derive(Clone)]
struct ShellRuntime {
    dispatcher: CaptureDispatcher,
    exclusions: TargetExclusions,
    shutdown: Arc<ShutdownSignal>,
}

#[derive(Clone)]
struct ShellWidgets {
    toggle_button: ToggleButton,
    status_label: Label,
    canvas: DrawingArea,
}

impl ShellWidgets {
    fn show_mode(&self, active: bool) {
        self.toggle_button.set_label(toggle_label(active));
        self.status_label.set_text(mode_status(active));
        self.canvas.queue_draw();
    }
}

pub struct App {
    shutdown: Arc<ShutdownSignal>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(ShutdownSignal::default()),
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_closing()
    }

    pub fn start(&mut self) -> AppResult<()> {
        let config = load_app_config();
        tracing::info!(
            min_dimension = config.min_dimension,
            notifications = config.notifications,
            "loaded app config"
        );

        let store = ScreenshotStore::with_default_paths(config.screenshots_dir.clone())?;
        tracing::info!(
            screenshots_dir = %store.screenshots_dir().display(),
            "resolved screenshot directory"
        );
        let dispatcher = CaptureDispatcher::new(
            Arc::new(ScreenCapture::system(store)),
            Arc::new(DesktopNotifier::new(config.notifications)),
        )
        .with_min_dimension(config.min_dimension);
        let runtime = ShellRuntime {
            dispatcher,
            exclusions: config.target_exclusions(),
            shutdown: self.shutdown.clone(),
        };

        tracing::info!("starting gtk runtime");
        let application = Application::new(
            Some(APP_ID),
            gtk4::gio::ApplicationFlags::NON_UNIQUE,
        );
        let activate_once = Rc::new(Cell::new(false));
        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            install_runtime_css();
            let window = build_main_window(app, &runtime);
            tracing::info!("presenting main window");
            window.present();
        });

        let status = application.run_with_args(&gtk_launch_args());
        if status != gtk4::glib::ExitCode::SUCCESS {
            return Err(AppError::Exit(format!("{status:?}")));
        }
        Ok(())
    }
}

fn build_main_window(app: &Application, runtime: &ShellRuntime) -> ApplicationWindow {
    let window = ApplicationWindow::new(app);
    window.add_css_class(ROOT_CSS_CLASS);
    window.set_title(Some("Peek"));
    window.set_default_size(960, 640);

    let toggle_button = ToggleButton::with_label(toggle_label(false));
    let status_label = Label::new(Some(mode_status(false)));
    status_label.add_css_class("status-line");
    status_label.set_selectable(true);
    status_label.set_hexpand(true);
    status_label.set_xalign(0.0);

    let toolbar = GtkBox::new(Orientation::Horizontal, 12);
    toolbar.add_css_class(TOOLBAR_CSS_CLASS);
    toolbar.append(&toggle_button);
    toolbar.append(&status_label);

    let hint = Label::new(Some(CANVAS_HINT));
    hint.add_css_class("capture-hint");
    hint.set_selectable(true);
    hint.set_wrap(true);
    hint.set_hexpand(true);
    hint.set_vexpand(true);
    hint.set_valign(Align::Center);

    let content = GtkBox::new(Orientation::Vertical, 0);
    content.append(&toolbar);
    content.append(&hint);

    let affordances = Rc::new(WindowAffordances::new(
        window.clone(),
        vec![status_label.clone(), hint.clone()],
    ));
    let selector = Rc::new(RefCell::new(RegionSelector::new(
        ModeController::new(affordances, runtime.exclusions.clone()),
        runtime.dispatcher.clone(),
    )));

    let canvas = build_selection_overlay(selector.clone());
    let overlay = Overlay::new();
    overlay.set_child(Some(&content));
    overlay.add_overlay(&canvas);
    window.set_child(Some(&overlay));

    let widgets = ShellWidgets {
        toggle_button,
        status_label,
        canvas,
    };
    connect_mode_toggle(&widgets, &selector);
    connect_selection_gesture(&overlay, &widgets, &selector);
    connect_mode_shortcuts(&window, &widgets, &selector);
    connect_close_request(&window, &selector, runtime.shutdown.clone());
    window
}

fn connect_mode_toggle(widgets: &ShellWidgets, selector: &Rc<RefCell<RegionSelector>>) {
    let selector = selector.clone();
    let widgets_for_toggle = widgets.clone();
    widgets.toggle_button.connect_toggled(move |button| {
        let active = button.is_active();
        let transition = selector.borrow_mut().set_mode(active);
        if transition.changed() {
            widgets_for_toggle.show_mode(active);
        }
    });
}

fn connect_selection_gesture(
    surface: &Overlay,
    widgets: &ShellWidgets,
    selector: &Rc<RefCell<RegionSelector>>,
) {
    let drag = gtk4::GestureDrag::new();
    drag.set_button(gtk4::gdk::BUTTON_PRIMARY);
    drag.set_propagation_phase(gtk4::PropagationPhase::Capture);

    {
        let selector = selector.clone();
        let canvas = widgets.canvas.clone();
        let surface = surface.clone();
        drag.connect_drag_begin(move |_, x, y| {
            let target = pointer_target_at(&surface, x, y);
            if selector
                .borrow_mut()
                .pointer_down(pointer_point(x, y), &target)
            {
                canvas.queue_draw();
            }
        });
    }
    {
        let selector = selector.clone();
        let canvas = widgets.canvas.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let point = pointer_point(start_x + offset_x, start_y + offset_y);
            if selector.borrow_mut().pointer_move(point) {
                canvas.queue_draw();
            }
        });
    }
    {
        let selector = selector.clone();
        let widgets = widgets.clone();
        drag.connect_drag_end(move |_, _, _| {
            let pending = selector.borrow_mut().pointer_up();
            widgets.canvas.queue_draw();
            let Some(pending) = pending else {
                return;
            };
            widgets.status_label.set_text(STATUS_CAPTURING);
            let status_label = widgets.status_label.clone();
            watch_pending_capture(pending, move |result| {
                status_label.set_text(&capture_notice(&result));
            });
        });
    }
    surface.add_controller(drag);
}

fn connect_mode_shortcuts(
    window: &ApplicationWindow,
    widgets: &ShellWidgets,
    selector: &Rc<RefCell<RegionSelector>>,
) {
    let key_controller = gtk4::EventControllerKey::new();
    let selector = selector.clone();
    let toggle_button = widgets.toggle_button.clone();
    key_controller.connect_key_pressed(move |_, key, keycode, modifier| {
        let Some(shortcut_key) = normalize_shortcut_key(key, keycode) else {
            return gtk4::glib::Propagation::Proceed;
        };
        let context = selector.borrow().input_context();
        let Some(action) = resolve_shortcut(shortcut_key, shortcut_modifiers(modifier), context)
        else {
            return gtk4::glib::Propagation::Proceed;
        };
        tracing::debug!(?action, "mode shortcut");
        match action {
            ShortcutAction::ToggleCaptureMode => {
                toggle_button.set_active(!toggle_button.is_active());
            }
            ShortcutAction::ExitCaptureMode => toggle_button.set_active(false),
        }
        gtk4::glib::Propagation::Stop
    });
    window.add_controller(key_controller);
}

fn connect_close_request(
    window: &ApplicationWindow,
    selector: &Rc<RefCell<RegionSelector>>,
    shutdown: Arc<ShutdownSignal>,
) {
    let selector = selector.clone();
    window.connect_close_request(move |_| {
        if !shutdown.begin() {
            return gtk4::glib::Propagation::Proceed;
        }
        tracing::info!("close requested; leaving screenshot mode");
        match selector.try_borrow_mut() {
            Ok(mut selector) => {
                selector.set_mode(false);
            }
            Err(_) => tracing::warn!("selector busy during close; mode left as is"),
        }
        gtk4::glib::Propagation::Proceed
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_the_next_action() {
        assert_eq!(toggle_label(false), "Enable Screenshot Mode");
        assert_eq!(toggle_label(true), "Disable Screenshot Mode");
    }

    #[test]
    fn mode_status_differs_per_state() {
        assert_ne!(mode_status(true), mode_status(false));
        assert!(mode_status(true).contains("Esc"));
    }

    #[test]
    fn new_app_is_not_shutting_down() {
        assert!(!App::new().is_shutting_down());
    }
}
