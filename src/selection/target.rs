pub const DEFAULT_EXCLUDED_ELEMENTS: [&str; 3] = ["button", "input", "entry"];
pub const DEFAULT_EXCLUDED_REGIONS: [&str; 2] = ["toolbar", "devtools"];

/// Element a pointer press landed on, named the way the toolkit names it
/// (CSS node name or widget name), plus the names of its ancestors from the
/// nearest parent outwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerTarget {
    element: String,
    ancestors: Vec<String>,
}

impl PointerTarget {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ancestors: Vec::new(),
        }
    }

    pub fn with_ancestors<I, S>(mut self, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ancestors = ancestors.into_iter().map(Into::into).collect();
        self
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }
}

/// Tag/ancestor check deciding which presses must not start a capture drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetExclusions {
    elements: Vec<String>,
    regions: Vec<String>,
}

impl Default for TargetExclusions {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_ELEMENTS, DEFAULT_EXCLUDED_REGIONS)
    }
}

impl TargetExclusions {
    pub fn new<E, R, S>(elements: E, regions: R) -> Self
    where
        E: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: normalized(elements),
            regions: normalized(regions),
        }
    }

    /// A press is excluded when it lands on an excluded element or anywhere
    /// inside one (toolkits report the innermost child, e.g. a button's
    /// label), or inside an excluded region.
    pub fn excludes(&self, target: &PointerTarget) -> bool {
        if contains_name(&self.elements, target.element()) {
            return true;
        }
        target.ancestors().iter().any(|ancestor| {
            contains_name(&self.elements, ancestor) || contains_name(&self.regions, ancestor)
        })
    }
}

fn normalized<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn contains_name(names: &[String], candidate: &str) -> bool {
    let candidate = candidate.trim();
    names
        .iter()
        .any(|name| name.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exclusions_cover_buttons_and_inputs() {
        let exclusions = TargetExclusions::default();
        assert!(exclusions.excludes(&PointerTarget::new("button")));
        assert!(exclusions.excludes(&PointerTarget::new("INPUT")));
        assert!(exclusions.excludes(&PointerTarget::new("entry")));
        assert!(!exclusions.excludes(&PointerTarget::new("drawingarea")));
    }

    #[test]
    fn ancestor_region_match_excludes_nested_elements() {
        let exclusions = TargetExclusions::default();
        let nested = PointerTarget::new("label").with_ancestors(["box", "DevTools"]);
        assert!(exclusions.excludes(&nested));

        let elsewhere = PointerTarget::new("label").with_ancestors(["box", "window"]);
        assert!(!exclusions.excludes(&elsewhere));
    }

    #[test]
    fn press_inside_button_or_entry_child_is_excluded_without_regions() {
        let exclusions = TargetExclusions::new(DEFAULT_EXCLUDED_ELEMENTS, Vec::<&str>::new());
        let button_label =
            PointerTarget::new("label").with_ancestors(["button", "box", "window"]);
        let entry_text = PointerTarget::new("text").with_ancestors(["entry", "box", "window"]);
        assert!(exclusions.excludes(&button_label));
        assert!(exclusions.excludes(&entry_text));

        let canvas = PointerTarget::new("drawingarea").with_ancestors(["overlay", "window"]);
        assert!(!exclusions.excludes(&canvas));
    }

    #[test]
    fn region_names_only_match_ancestors() {
        let exclusions = TargetExclusions::default();
        assert!(!exclusions.excludes(&PointerTarget::new("toolbar")));
    }

    #[test]
    fn custom_exclusions_drop_blank_names() {
        let exclusions = TargetExclusions::new(vec!["  ", "Switch"], vec![""]);
        assert!(exclusions.excludes(&PointerTarget::new("switch")));
        assert!(!exclusions.excludes(&PointerTarget::new("button")));
        assert!(!exclusions.excludes(&PointerTarget::new("").with_ancestors([""])));
    }
}
