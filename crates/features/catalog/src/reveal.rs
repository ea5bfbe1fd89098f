//! Progressive reveal of the filtered catalog on narrow viewports.

use castellan_kernel::prelude::SiteConfig;
use serde::{Deserialize, Serialize};

/// Entries shown before the first "load more".
pub const INITIAL_BATCH: usize = 3;

/// Presentation mode derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Narrow,
    Wide,
}

impl Viewport {
    /// `width <= narrow_max` is narrow.
    pub const fn from_width(width: u32, narrow_max: u32) -> Self {
        if width <= narrow_max { Self::Narrow } else { Self::Wide }
    }

    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}

/// Tracks how many filtered entries a narrow viewport exposes.
///
/// The count only grows: filter or search changes keep it, and only [`RevealController::reset`]
/// (a fresh session) brings it back to the batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealController {
    batch: usize,
    reveal_count: usize,
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new(INITIAL_BATCH)
    }
}

impl RevealController {
    /// A batch of zero is treated as one.
    pub const fn new(batch: usize) -> Self {
        let batch = if batch == 0 { 1 } else { batch };
        Self { batch, reveal_count: batch }
    }

    pub const fn from_config(site: &SiteConfig) -> Self {
        Self::new(site.reveal_batch)
    }

    /// Restores a previously advanced count, never going below the batch size.
    #[must_use]
    pub const fn with_reveal_count(mut self, reveal_count: usize) -> Self {
        if reveal_count > self.batch {
            self.reveal_count = reveal_count;
        }
        self
    }

    pub const fn batch(&self) -> usize {
        self.batch
    }

    pub const fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// The full slice on wide viewports, else its first `min(reveal_count, len)` items.
    pub fn visible<'a, T>(&self, filtered: &'a [T], viewport: Viewport) -> &'a [T] {
        visible_entries(filtered, self.reveal_count, viewport)
    }

    pub const fn can_advance(&self, filtered_len: usize) -> bool {
        self.reveal_count < filtered_len
    }

    /// Reveals one more batch. Returns `false` (and changes nothing) once everything is shown.
    pub fn advance(&mut self, filtered_len: usize) -> bool {
        if !self.can_advance(filtered_len) {
            return false;
        }
        self.reveal_count = self.reveal_count.saturating_add(self.batch);
        tracing::debug!(reveal_count = self.reveal_count, filtered_len, "Revealed more entries");
        true
    }

    pub const fn reset(&mut self) {
        self.reveal_count = self.batch;
    }
}

/// Clips `filtered` to `reveal_count` items on narrow viewports.
pub fn visible_entries<T>(filtered: &[T], reveal_count: usize, viewport: Viewport) -> &[T] {
    match viewport {
        Viewport::Wide => filtered,
        Viewport::Narrow => &filtered[..reveal_count.min(filtered.len())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_threshold_is_inclusive() {
        assert_eq!(Viewport::from_width(767, 767), Viewport::Narrow);
        assert_eq!(Viewport::from_width(768, 767), Viewport::Wide);
    }

    #[test]
    fn advance_steps_by_batch_until_exhausted() {
        let mut reveal = RevealController::default();
        assert!(reveal.advance(7));
        assert_eq!(reveal.reveal_count(), 6);
        assert!(reveal.advance(7));
        assert_eq!(reveal.reveal_count(), 9);
        assert!(!reveal.advance(7));
        assert_eq!(reveal.reveal_count(), 9);
    }

    #[test]
    fn visible_is_clamped_to_filtered_len() {
        let items = [1, 2];
        let reveal = RevealController::default();
        assert_eq!(reveal.visible(&items, Viewport::Narrow), &[1, 2]);
        assert_eq!(reveal.visible(&[1, 2, 3, 4, 5], Viewport::Narrow).len(), 3);
        assert_eq!(reveal.visible(&[1, 2, 3, 4, 5], Viewport::Wide).len(), 5);
    }

    #[test]
    fn restored_count_never_drops_below_batch() {
        assert_eq!(RevealController::default().with_reveal_count(1).reveal_count(), 3);
        assert_eq!(RevealController::default().with_reveal_count(9).reveal_count(), 9);
    }

    #[test]
    fn reset_returns_to_batch() {
        let mut reveal = RevealController::new(0);
        assert_eq!(reveal.batch(), 1);
        reveal.advance(5);
        reveal.reset();
        assert_eq!(reveal.reveal_count(), 1);
    }

    #[test]
    fn follows_site_config() {
        let site = SiteConfig { reveal_batch: 4, ..SiteConfig::default() };
        assert_eq!(RevealController::from_config(&site).reveal_count(), 4);
    }
}
