//! Visibility tracking for the content sections
//!
//! The observer keeps the set of observed sections that intersect the
//! viewport by at least `threshold` of their height. Each section also owns a
//! [`FadeTransition`] that eases its card in and out.

use std::collections::BTreeSet;

use super::page::{PageLayout, ScrollState};

/// Seconds a section takes to fade fully in or out
pub const FADE_DURATION: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub index: usize,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    visible: BTreeSet<usize>,
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: BTreeSet::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    pub fn visible(&self) -> &BTreeSet<usize> {
        &self.visible
    }

    /// Fraction of a section's height that lies inside the viewport
    pub fn intersection_ratio(section_top: f32, section_bottom: f32, scroll: &ScrollState) -> f32 {
        let height = section_bottom - section_top;
        if height <= 0.0 {
            return 0.0;
        }
        let view_top = scroll.offset();
        let view_bottom = view_top + scroll.viewport_height();
        let overlap = section_bottom.min(view_bottom) - section_top.max(view_top);
        (overlap / height).clamp(0.0, 1.0)
    }

    /// Updates the visible set and returns the sections whose state changed
    pub fn observe(&mut self, layout: &PageLayout, scroll: &ScrollState) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();

        for (position, section) in layout.sections().iter().enumerate() {
            let Some(index) = section.observed else {
                continue;
            };
            let (top, bottom) = layout.section_span(position, scroll.viewport_height());
            let ratio = Self::intersection_ratio(top, bottom, scroll);

            let changed = if ratio >= self.threshold {
                self.visible.insert(index)
            } else {
                self.visible.remove(&index)
            };
            if changed {
                changes.push(VisibilityChange {
                    index,
                    visible: self.visible.contains(&index),
                });
            }
        }

        if !changes.is_empty() {
            log::debug!("Visible sections: {:?}", self.visible);
        }
        changes
    }
}

/// Time-based fade toward visible or hidden
#[derive(Debug, Clone, Copy)]
pub struct FadeTransition {
    progress: f32,
    visible: bool,
    duration: f32,
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self::new(FADE_DURATION)
    }
}

impl FadeTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            progress: 0.0,
            visible: false,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, dt: f32) {
        let step = dt.max(0.0) / self.duration;
        self.progress = if self.visible {
            (self.progress + step).min(1.0)
        } else {
            (self.progress - step).max(0.0)
        };
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Eased opacity (ease-out cubic)
    pub fn opacity(&self) -> f32 {
        1.0 - (1.0 - self.progress).powi(3)
    }

    /// Horizontal offset for a card sliding in from the left, in pixels
    pub fn slide_offset(&self, width: f32) -> f32 {
        -(1.0 - self.opacity()) * width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PageLayout, ScrollState, VisibilityObserver) {
        let layout = PageLayout::showcase();
        let scroll = ScrollState::new(800.0, layout.content_height(800.0), 0.15);
        (layout, scroll, VisibilityObserver::new(0.3))
    }

    #[test]
    fn nothing_visible_at_top_of_page() {
        let (layout, scroll, mut observer) = setup();
        assert!(observer.observe(&layout, &scroll).is_empty());
        assert!(observer.visible().is_empty());
    }

    #[test]
    fn section_becomes_visible_past_threshold() {
        let (layout, mut scroll, mut observer) = setup();
        scroll.scroll_to(200.0);
        assert!(observer.observe(&layout, &scroll).is_empty());

        scroll.scroll_to(260.0);
        let changes = observer.observe(&layout, &scroll);
        assert_eq!(
            changes,
            vec![VisibilityChange {
                index: 0,
                visible: true
            }]
        );
    }

    #[test]
    fn observation_is_idempotent() {
        let (layout, mut scroll, mut observer) = setup();
        scroll.scroll_to(1200.0);
        let first = observer.observe(&layout, &scroll);
        assert!(!first.is_empty());
        let snapshot = observer.visible().clone();

        assert!(observer.observe(&layout, &scroll).is_empty());
        assert_eq!(observer.visible(), &snapshot);
    }

    #[test]
    fn sections_leave_the_set_when_scrolled_past() {
        let (layout, mut scroll, mut observer) = setup();
        scroll.scroll_to(800.0);
        observer.observe(&layout, &scroll);
        assert!(observer.is_visible(0));

        scroll.scroll_to(scroll.max_offset());
        let changes = observer.observe(&layout, &scroll);
        assert!(changes.contains(&VisibilityChange {
            index: 0,
            visible: false
        }));
        assert!(observer.is_visible(4));
    }

    #[test]
    fn fade_reaches_full_opacity_after_duration() {
        let mut fade = FadeTransition::default();
        fade.set_visible(true);
        fade.update(0.5);
        assert!(fade.opacity() > 0.0 && fade.opacity() < 1.0);
        fade.update(0.5);
        assert_eq!(fade.opacity(), 1.0);
        assert_eq!(fade.slide_offset(300.0), 0.0);

        fade.set_visible(false);
        fade.update(2.0);
        assert_eq!(fade.opacity(), 0.0);
        assert_eq!(fade.slide_offset(300.0), -300.0);
    }
}
