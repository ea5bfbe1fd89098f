//! Viewport-triggered animations shared by every page.

use fxhash::FxHashMap;
use serde::Serialize;

/// What the presentation layer should do with a trigger after a visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealSignal {
    /// Play the entrance animation.
    Enter,
    /// Return to the hidden state (repeatable triggers only).
    Exit,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default)]
struct Trigger {
    once: bool,
    fired: bool,
    visible: bool,
}

/// Registry of reveal triggers keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct ViewportReveal {
    triggers: FxHashMap<String, Trigger>,
}

impl ViewportReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers, resetting) a trigger. A `once` trigger enters once and
    /// then stays revealed.
    pub fn register(&mut self, id: impl Into<String>, once: bool) {
        self.triggers.insert(id.into(), Trigger { once, ..Trigger::default() });
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        self.triggers.remove(id).is_some()
    }

    /// Feeds a visibility change. `None` for unregistered ids.
    pub fn observe(&mut self, id: &str, visible: bool) -> Option<RevealSignal> {
        let trigger = self.triggers.get_mut(id)?;
        let was_visible = std::mem::replace(&mut trigger.visible, visible);

        let signal = match (was_visible, visible) {
            (false, true) if trigger.once && trigger.fired => RevealSignal::Unchanged,
            (false, true) => {
                trigger.fired = true;
                RevealSignal::Enter
            },
            (true, false) if !trigger.once => RevealSignal::Exit,
            _ => RevealSignal::Unchanged,
        };
        Some(signal)
    }

    /// Whether the trigger is currently in its revealed state.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.triggers.get(id).is_some_and(|t| if t.once { t.fired } else { t.visible })
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }
}

/// Background parallax: the layer moves at `factor` times the scroll speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    factor: f64,
}

impl Default for Parallax {
    fn default() -> Self {
        Self { factor: 0.5 }
    }
}

impl Parallax {
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Vertical translation for a scroll position.
    pub fn offset(&self, scroll_y: f64) -> f64 {
        scroll_y * self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_trigger_fires_a_single_time() {
        let mut reveal = ViewportReveal::new();
        reveal.register("hero", true);

        assert_eq!(reveal.observe("hero", true), Some(RevealSignal::Enter));
        assert_eq!(reveal.observe("hero", false), Some(RevealSignal::Unchanged));
        assert_eq!(reveal.observe("hero", true), Some(RevealSignal::Unchanged));
        assert!(reveal.is_revealed("hero"));
    }

    #[test]
    fn repeatable_trigger_enters_and_exits() {
        let mut reveal = ViewportReveal::new();
        reveal.register("card", false);

        assert_eq!(reveal.observe("card", true), Some(RevealSignal::Enter));
        assert_eq!(reveal.observe("card", true), Some(RevealSignal::Unchanged));
        assert_eq!(reveal.observe("card", false), Some(RevealSignal::Exit));
        assert!(!reveal.is_revealed("card"));
        assert_eq!(reveal.observe("card", true), Some(RevealSignal::Enter));
    }

    #[test]
    fn unknown_and_removed_triggers_are_ignored() {
        let mut reveal = ViewportReveal::new();
        assert_eq!(reveal.observe("ghost", true), None);

        reveal.register("form", true);
        assert!(reveal.unregister("form"));
        assert_eq!(reveal.len(), 0);
        assert_eq!(reveal.observe("form", true), None);
    }

    #[test]
    fn parallax_moves_at_half_speed_by_default() {
        assert!((Parallax::default().offset(300.0) - 150.0).abs() < f64::EPSILON);
        assert!((Parallax::new(0.2).offset(100.0) - 20.0).abs() < 1e-12);
    }
}
