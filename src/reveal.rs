use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

// Observers report ratios like 0.19999 when they fire for a 0.2 threshold.
const OBSERVER_ROUNDING: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(self) -> bool {
        matches!(self, RevealState::Revealed)
    }
}

/// Intersection options for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl RevealOptions {
    pub const fn new(threshold: f64, root_margin: &'static str) -> Self {
        Self {
            threshold,
            root_margin,
        }
    }

    /// Ratio to feed the watcher for one observer entry. Entries that are not
    /// intersecting are skipped, and a ratio that lands just under the threshold
    /// counts as the threshold the observer fired for.
    pub fn observed_ratio(&self, intersecting: bool, ratio: f64) -> Option<f64> {
        if !intersecting {
            return None;
        }
        if ratio < self.threshold && self.threshold - ratio <= OBSERVER_ROUNDING {
            Some(self.threshold)
        } else {
            Some(ratio)
        }
    }
}

/// One-shot visibility watcher.
///
/// Flips to [`RevealState::Revealed`] the first time the visible fraction meets the
/// threshold and ignores every observation after that.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealWatcher {
    threshold: f64,
    state: RevealState,
}

impl RevealWatcher {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            state: RevealState::Hidden,
        }
    }

    /// Feeds a visible fraction. Returns `true` only for the observation that
    /// caused the reveal.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.state.is_revealed() || ratio.is_nan() {
            return false;
        }
        if ratio >= self.threshold {
            self.state = RevealState::Revealed;
            return true;
        }
        false
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_watching(&self) -> bool {
        !self.state.is_revealed()
    }
}

/// Something that can take class and inline style changes.
pub trait Surface {
    fn toggle_class(&mut self, class: &'static str, on: bool);
    fn set_style(&mut self, property: &'static str, value: Option<String>);
}

/// Declarative classes and inline styles for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    classes: BTreeSet<&'static str>,
    styles: BTreeMap<&'static str, String>,
}

impl Presentation {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn class_attr(&self) -> String {
        self.classes.iter().copied().collect::<Vec<_>>().join(" ")
    }

    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Surface for Presentation {
    fn toggle_class(&mut self, class: &'static str, on: bool) {
        if on {
            self.classes.insert(class);
        } else {
            self.classes.remove(class);
        }
    }

    fn set_style(&mut self, property: &'static str, value: Option<String>) {
        match value {
            Some(value) => {
                self.styles.insert(property, value);
            }
            None => {
                self.styles.remove(property);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entrance {
    /// Only toggles `animate`; the stylesheet owns the motion.
    Class,
    Fade,
    SlideX(i32),
    SlideY(i32),
    /// Grows the width from zero to a percentage.
    Fill(u32),
}

/// How an element moves from hidden to revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub entrance: Entrance,
    pub duration: Duration,
}

impl Transition {
    pub const fn new(entrance: Entrance, duration: Duration) -> Self {
        Self { entrance, duration }
    }

    pub fn render<S: Surface + ?Sized>(&self, state: RevealState, surface: &mut S) {
        let shown = state.is_revealed();
        surface.toggle_class("animate", shown);
        let transition = format!("all {}s ease", self.duration.as_secs_f64());
        match self.entrance {
            Entrance::Class => {}
            Entrance::Fade => {
                surface.set_style("opacity", Some(opacity(shown)));
                surface.set_style("transition", Some(transition));
            }
            Entrance::SlideX(px) => {
                let x = if shown { 0 } else { px };
                surface.set_style("opacity", Some(opacity(shown)));
                surface.set_style("transform", Some(format!("translateX({x}px)")));
                surface.set_style("transition", Some(transition));
            }
            Entrance::SlideY(px) => {
                let y = if shown { 0 } else { px };
                surface.set_style("opacity", Some(opacity(shown)));
                surface.set_style("transform", Some(format!("translateY({y}px)")));
                surface.set_style("transition", Some(transition));
            }
            Entrance::Fill(percent) => {
                let width = if shown { percent.min(100) } else { 0 };
                surface.set_style("width", Some(format!("{width}%")));
                let transition = format!("width {}s ease", self.duration.as_secs_f64());
                surface.set_style("transition", Some(transition));
            }
        }
    }

    pub fn presentation(&self, state: RevealState) -> Presentation {
        let mut presentation = Presentation::default();
        self.render(state, &mut presentation);
        presentation
    }
}

fn opacity(shown: bool) -> String {
    if shown { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every mutation, like a DOM element would receive them.
    #[derive(Default)]
    struct MockElement {
        calls: Vec<String>,
        presentation: Presentation,
    }

    impl Surface for MockElement {
        fn toggle_class(&mut self, class: &'static str, on: bool) {
            self.calls.push(format!("class {class} {on}"));
            self.presentation.toggle_class(class, on);
        }

        fn set_style(&mut self, property: &'static str, value: Option<String>) {
            self.calls.push(format!("style {property}"));
            self.presentation.set_style(property, value);
        }
    }

    #[test]
    fn test_reveal_exactly_once() {
        let mut watcher = RevealWatcher::new(0.2);
        let ratios = [0.0, 0.1, 0.25, 0.0, 0.5, 1.0, 0.0, 0.3];
        let transitions = ratios
            .iter()
            .filter(|ratio| watcher.observe(**ratio))
            .count();
        assert_eq!(transitions, 1);
        assert_eq!(watcher.state(), RevealState::Revealed);
        assert!(!watcher.is_watching());
    }

    #[test]
    fn test_reveal_below_threshold_stays_hidden() {
        let mut watcher = RevealWatcher::new(0.3);
        assert!(!watcher.observe(0.1));
        assert!(!watcher.observe(0.29));
        assert!(!watcher.observe(f64::NAN));
        assert!(watcher.is_watching());
        assert_eq!(watcher.state(), RevealState::Hidden);
    }

    #[test]
    fn test_reveal_meets_threshold() {
        let mut watcher = RevealWatcher::new(0.3);
        assert!(!watcher.observe(0.2995));
        assert!(watcher.observe(0.3));

        let mut zero = RevealWatcher::new(0.0);
        assert!(zero.observe(0.0));
        assert!(!zero.observe(0.5));
    }

    #[test]
    fn test_observed_ratio() {
        let options = RevealOptions::new(0.2, "0px");
        assert_eq!(options.observed_ratio(false, 0.5), None);
        assert_eq!(options.observed_ratio(true, 0.1999), Some(0.2));
        assert_eq!(options.observed_ratio(true, 0.15), Some(0.15));
        assert_eq!(options.observed_ratio(true, 0.6), Some(0.6));

        let mut watcher = RevealWatcher::new(options.threshold);
        let fired = options.observed_ratio(true, 0.1999).is_some_and(|r| watcher.observe(r));
        assert!(fired);
    }

    #[test]
    fn test_presentation_attrs() {
        let mut p = Presentation::default();
        p.toggle_class("show", true);
        p.toggle_class("active", true);
        p.toggle_class("show", false);
        p.set_style("opacity", Some("1".to_string()));
        p.set_style("width", Some("40%".to_string()));
        p.set_style("width", None);

        assert_eq!(p.class_attr(), "active");
        assert_eq!(p.style_attr(), "opacity: 1;");
        assert!(p.has_class("active"));
        assert_eq!(p.style("width"), None);
    }

    #[test]
    fn test_slide_transition_render() {
        let transition = Transition::new(Entrance::SlideX(-20), Duration::from_millis(500));

        let hidden = transition.presentation(RevealState::Hidden);
        assert!(!hidden.has_class("animate"));
        assert_eq!(hidden.style("opacity"), Some("0"));
        assert_eq!(hidden.style("transform"), Some("translateX(-20px)"));
        assert_eq!(hidden.style("transition"), Some("all 0.5s ease"));

        let shown = transition.presentation(RevealState::Revealed);
        assert!(shown.has_class("animate"));
        assert_eq!(shown.style("opacity"), Some("1"));
        assert_eq!(shown.style("transform"), Some("translateX(0px)"));
    }

    #[test]
    fn test_fill_transition_clamps() {
        let transition = Transition::new(Entrance::Fill(140), Duration::from_secs(2));
        assert_eq!(
            transition.presentation(RevealState::Hidden).style("width"),
            Some("0%")
        );
        assert_eq!(
            transition.presentation(RevealState::Revealed).style("width"),
            Some("100%")
        );
    }

    #[test]
    fn test_render_through_mock_element() {
        let mut el = MockElement::default();
        let transition = Transition::new(Entrance::Class, Duration::from_millis(600));
        transition.render(RevealState::Revealed, &mut el);

        assert_eq!(el.calls, vec!["class animate true".to_string()]);
        assert_eq!(el.presentation.class_attr(), "animate");
        assert_eq!(el.presentation.style_attr(), "");
    }
}
