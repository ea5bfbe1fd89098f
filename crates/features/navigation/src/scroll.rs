//! Eased scrolling towards an in-page anchor.

use castellan_kernel::prelude::SiteConfig;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Smoothstep easing, `t²(3 − 2t)`, with `t` clamped to `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * 2.0f64.mul_add(-t, 3.0)
}

/// A time-bounded scroll from the current position to an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    from: f64,
    to: f64,
    duration: Duration,
}

impl ScrollPlan {
    pub const fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Plans a scroll that leaves `offset` units above an element.
    ///
    /// `element_top` is relative to the viewport, as reported by layout.
    pub fn to_element(scroll_y: f64, element_top: f64, offset: f64, duration: Duration) -> Self {
        Self::new(scroll_y, element_top + scroll_y - offset, duration)
    }

    /// [`ScrollPlan::to_element`] with the site's offset and duration.
    pub fn for_site(site: &SiteConfig, scroll_y: f64, element_top: f64) -> Self {
        Self::to_element(
            scroll_y,
            element_top,
            f64::from(site.scroll_offset),
            Duration::from_millis(site.scroll_duration_ms),
        )
    }

    pub const fn target(&self) -> f64 {
        self.to
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Position after `elapsed`; exactly the target once the duration has passed.
    pub fn position(&self, elapsed: Duration) -> f64 {
        if self.is_complete(elapsed) {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.to - self.from).mul_add(ease_in_out(progress), self.from)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Positions sampled every `frame`, ending with the target.
    pub fn frames(&self, frame: Duration) -> impl Iterator<Item = f64> + '_ {
        let frame = frame.max(Duration::from_millis(1));
        let mut elapsed = Some(Duration::ZERO);
        std::iter::from_fn(move || {
            let now = elapsed?;
            elapsed = if self.is_complete(now) { None } else { Some(now.saturating_add(frame).min(self.duration)) };
            Some(self.position(now))
        })
    }
}

/// Drives `plan` on a frame clock, handing each position to `apply`.
///
/// Returns once the target is applied. Dropping the future cancels the animation.
pub async fn animate(plan: ScrollPlan, frame: Duration, mut apply: impl FnMut(f64)) {
    let mut ticker = interval(frame.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let start = Instant::now();

    loop {
        ticker.tick().await;
        let elapsed = start.elapsed();
        apply(plan.position(elapsed));
        if plan.is_complete(elapsed) {
            tracing::trace!(target_y = plan.target(), "Scroll animation finished");
            return;
        }
    }
}
