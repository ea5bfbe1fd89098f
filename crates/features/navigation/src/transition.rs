use castellan_kernel::domain::constants::HOME_PATH;
use castellan_kernel::prelude::SiteConfig;
use serde::Serialize;
use std::time::Duration;

/// Phase of the back-navigation fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Navigated,
}

/// Declarative fade-to-black before returning to the home page.
///
/// `Idle → FadingOut → Navigated`. Time is fed in as elapsed durations since
/// [`BackTransition::begin`], so the machine has no clock of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackTransition {
    phase: TransitionPhase,
    fade: Duration,
    destination: &'static str,
}

impl Default for BackTransition {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl BackTransition {
    pub const fn new(fade: Duration) -> Self {
        Self { phase: TransitionPhase::Idle, fade, destination: HOME_PATH }
    }

    pub const fn from_config(site: &SiteConfig) -> Self {
        Self::new(Duration::from_millis(site.fade_ms))
    }

    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub const fn fade(&self) -> Duration {
        self.fade
    }

    /// Starts the fade. Returns `false` if a transition is already under way or done.
    pub fn begin(&mut self) -> bool {
        if self.phase != TransitionPhase::Idle {
            return false;
        }
        self.phase = TransitionPhase::FadingOut;
        tracing::debug!(fade_ms = self.fade.as_millis(), "Back transition started");
        true
    }

    /// Advances the fade. Yields the destination exactly once, when the fade completes.
    pub fn tick(&mut self, elapsed: Duration) -> Option<&'static str> {
        if self.phase != TransitionPhase::FadingOut || elapsed < self.fade {
            return None;
        }
        self.phase = TransitionPhase::Navigated;
        Some(self.destination)
    }

    /// Overlay opacity in `[0, 1]`.
    pub fn opacity(&self, elapsed: Duration) -> f64 {
        match self.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::Navigated => 1.0,
            TransitionPhase::FadingOut if self.fade.is_zero() => 1.0,
            TransitionPhase::FadingOut => {
                (elapsed.as_secs_f64() / self.fade.as_secs_f64()).clamp(0.0, 1.0)
            },
        }
    }
}
