use gtk4::CssProvider;

pub(super) const ROOT_CSS_CLASS: &str = "peek-root";
pub(super) const TOOLBAR_CSS_CLASS: &str = "toolbar";
pub(super) const CAPTURE_MODE_CSS_CLASS: &str = "capture-mode";

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Rgba {
    pub(super) red: f64,
    pub(super) green: f64,
    pub(super) blue: f64,
    pub(super) alpha: f64,
}

impl Rgba {
    const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    fn css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            self.alpha
        )
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SelectionPalette {
    pub(super) fill: Rgba,
    pub(super) stroke: Rgba,
    pub(super) stroke_width: f64,
}

pub(super) const SELECTION_PALETTE: SelectionPalette = SelectionPalette {
    fill: Rgba::new(0.23, 0.51, 0.96, 0.18),
    stroke: Rgba::new(0.23, 0.51, 0.96, 0.95),
    stroke_width: 2.0,
};

pub(super) fn runtime_css(palette: SelectionPalette) -> String {
    format!(
        "
window.{root} {{
  background: @theme_bg_color;
}}
.{root} .{toolbar} {{
  padding: 8px 12px;
  border-bottom: 1px solid alpha(currentColor, 0.12);
}}
.{root} .{toolbar} togglebutton:checked {{
  background: {accent};
  color: white;
}}
.{root} .status-line {{
  opacity: 0.8;
}}
window.{capture_mode} label selection {{
  background: transparent;
  color: inherit;
}}
window.{capture_mode} .capture-hint {{
  color: {accent};
}}
",
        root = ROOT_CSS_CLASS,
        toolbar = TOOLBAR_CSS_CLASS,
        capture_mode = CAPTURE_MODE_CSS_CLASS,
        accent = palette.stroke.css(),
    )
}

pub(super) fn install_runtime_css() {
    let provider = CssProvider::new();
    provider.load_from_data(&runtime_css(SELECTION_PALETTE));
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no default display; runtime css not installed");
    }
}
