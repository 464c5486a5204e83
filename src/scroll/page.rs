//! Page layout and scroll position

/// Offset (in pixels) after which the navigation bar gets a solid background
pub const SCROLLED_THRESHOLD: f32 = 50.0;

/// Distance (in pixels) at which a smooth scroll snaps onto its target
const SNAP_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Entrance,
    Amenities,
    Residences,
    Penthouse,
    Contact,
}

/// One full-viewport block of the page
#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    /// Short label used by the navigation and progress bars
    pub nav_label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: &'static str,
    /// Index in the visibility observer, `None` for sections that are not observed
    pub observed: Option<usize>,
}

/// Ordered list of sections, each exactly one viewport tall
#[derive(Debug, Clone)]
pub struct PageLayout {
    sections: Vec<Section>,
}

impl PageLayout {
    /// The showcase page: a hero followed by five content sections
    pub fn showcase() -> Self {
        let sections = vec![
            Section {
                id: SectionId::Hero,
                nav_label: "Home",
                title: "Skyline Tower",
                subtitle: "Now Selling",
                body: "Redefining luxury living in the heart of the city",
                observed: None,
            },
            Section {
                id: SectionId::Entrance,
                nav_label: "Entrance",
                title: "Grand Entrance",
                subtitle: "Where luxury begins",
                body: "Step into a world of sophisticated design with our double-height lobby \
                       featuring marble finishes, contemporary art installations, and 24/7 \
                       concierge service.",
                observed: Some(0),
            },
            Section {
                id: SectionId::Amenities,
                nav_label: "Amenities",
                title: "World-Class Amenities",
                subtitle: "Everything you need",
                body: "Enjoy our rooftop infinity pool, state-of-the-art fitness center, \
                       private dining rooms, and landscaped terraces with panoramic city views.",
                observed: Some(1),
            },
            Section {
                id: SectionId::Residences,
                nav_label: "Residences",
                title: "Luxury Residences",
                subtitle: "Your perfect home",
                body: "Spacious 1-4 bedroom apartments with floor-to-ceiling windows, premium \
                       finishes, smart home technology, and private balconies overlooking the city.",
                observed: Some(2),
            },
            Section {
                id: SectionId::Penthouse,
                nav_label: "Penthouse",
                title: "Penthouse Collection",
                subtitle: "The pinnacle of luxury",
                body: "Exclusive penthouse suites with private elevators, wraparound terraces, \
                       premium appliances, and unobstructed 360-degree city views.",
                observed: Some(3),
            },
            Section {
                id: SectionId::Contact,
                nav_label: "Contact",
                title: "Schedule Your Visit",
                subtitle: "Experience luxury living",
                body: "Contact our sales team to schedule a private tour and discover why this \
                       is the most sought-after address in the city.",
                observed: Some(4),
            },
        ];
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Total page height for a given viewport height
    pub fn content_height(&self, viewport_height: f32) -> f32 {
        self.sections.len() as f32 * viewport_height
    }

    /// Top and bottom page coordinates of a section
    pub fn section_span(&self, index: usize, viewport_height: f32) -> (f32, f32) {
        let top = index as f32 * viewport_height;
        (top, top + viewport_height)
    }

    /// Scroll offset that brings the section's top to the top of the viewport
    pub fn offset_of(&self, id: SectionId, viewport_height: f32) -> Option<f32> {
        self.index_of(id)
            .map(|index| self.section_span(index, viewport_height).0)
    }

    /// Number of sections taking part in visibility observation
    pub fn observed_count(&self) -> usize {
        self.sections.iter().filter(|s| s.observed.is_some()).count()
    }

    /// Section whose span contains the vertical centre of the viewport
    pub fn active_section(&self, scroll: &ScrollState) -> Option<usize> {
        let centre = scroll.offset() + scroll.viewport_height() / 2.0;
        (0..self.sections.len()).find(|&index| {
            let (top, bottom) = self.section_span(index, scroll.viewport_height());
            top <= centre && bottom >= centre
        })
    }
}

/// Scroll offset over a page of known height
///
/// `fraction()` is what the camera follows. All setters clamp the offset to
/// the scrollable range.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
    smooth_target: Option<f32>,
    smooth_factor: f32,
}

impl ScrollState {
    pub fn new(viewport_height: f32, content_height: f32, smooth_factor: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
            content_height: content_height.max(0.0),
            smooth_target: None,
            smooth_factor: smooth_factor.clamp(0.01, 1.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Normalised progress through the scrollable height, in [0, 1]
    pub fn fraction(&self) -> f32 {
        let scrollable = self.content_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.offset / scrollable).clamp(0.0, 1.0)
    }

    /// Manual scroll; cancels any smooth scroll in flight
    pub fn scroll_by(&mut self, delta: f32) {
        self.smooth_target = None;
        self.offset = self.clamp_offset(self.offset + delta);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.smooth_target = None;
        self.offset = self.clamp_offset(offset);
    }

    pub fn smooth_scroll_to(&mut self, offset: f32) {
        self.smooth_target = Some(self.clamp_offset(offset));
    }

    pub fn is_animating(&self) -> bool {
        self.smooth_target.is_some()
    }

    /// Whether the page has moved far enough for the navigation bar to turn solid
    pub fn is_scrolled(&self) -> bool {
        self.offset > SCROLLED_THRESHOLD
    }

    /// Advances a smooth scroll by one frame
    pub fn update(&mut self) {
        let Some(target) = self.smooth_target else {
            return;
        };
        let remaining = target - self.offset;
        if remaining.abs() < SNAP_DISTANCE {
            self.offset = target;
            self.smooth_target = None;
        } else {
            self.offset += remaining * self.smooth_factor;
        }
    }

    /// Applies new viewport/page dimensions, keeping the scroll fraction
    pub fn resize(&mut self, viewport_height: f32, content_height: f32) {
        let fraction = self.fraction();
        let target_fraction = self.smooth_target.map(|t| {
            if self.max_offset() > 0.0 {
                t / self.max_offset()
            } else {
                0.0
            }
        });

        self.viewport_height = viewport_height.max(0.0);
        self.content_height = content_height.max(0.0);
        self.offset = fraction * self.max_offset();
        self.smooth_target = target_fraction.map(|f| f * self.max_offset());
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_scroll() -> (PageLayout, ScrollState) {
        let layout = PageLayout::showcase();
        let scroll = ScrollState::new(800.0, layout.content_height(800.0), 0.15);
        (layout, scroll)
    }

    #[test]
    fn fraction_spans_zero_to_one() {
        let (_, mut scroll) = page_scroll();
        assert_eq!(scroll.fraction(), 0.0);

        scroll.scroll_to(scroll.max_offset() / 2.0);
        assert!((scroll.fraction() - 0.5).abs() < 1e-6);

        scroll.scroll_by(1.0e9);
        assert_eq!(scroll.fraction(), 1.0);
        assert_eq!(scroll.offset(), scroll.max_offset());

        scroll.scroll_by(-1.0e9);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn unscrollable_page_has_zero_fraction() {
        let mut scroll = ScrollState::new(800.0, 600.0, 0.15);
        scroll.scroll_by(300.0);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.fraction(), 0.0);
    }

    #[test]
    fn resize_keeps_fraction() {
        let (layout, mut scroll) = page_scroll();
        scroll.scroll_to(scroll.max_offset() * 0.4);
        scroll.resize(1200.0, layout.content_height(1200.0));
        assert!((scroll.fraction() - 0.4).abs() < 1e-5);
        assert_eq!(scroll.viewport_height(), 1200.0);
    }

    #[test]
    fn smooth_scroll_converges_and_snaps() {
        let (layout, mut scroll) = page_scroll();
        let target = layout.offset_of(SectionId::Penthouse, 800.0).unwrap();
        scroll.smooth_scroll_to(target);

        let mut previous = (target - scroll.offset()).abs();
        for _ in 0..200 {
            scroll.update();
            let remaining = (target - scroll.offset()).abs();
            assert!(remaining <= previous);
            previous = remaining;
        }
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset(), target);
    }

    #[test]
    fn manual_scroll_cancels_smooth_scroll() {
        let (_, mut scroll) = page_scroll();
        scroll.smooth_scroll_to(2000.0);
        scroll.update();
        scroll.scroll_by(10.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn active_section_follows_viewport_centre() {
        let (layout, mut scroll) = page_scroll();
        assert_eq!(layout.active_section(&scroll), Some(0));

        scroll.scroll_to(layout.offset_of(SectionId::Residences, 800.0).unwrap());
        assert_eq!(
            layout.active_section(&scroll),
            layout.index_of(SectionId::Residences)
        );
    }

    #[test]
    fn navigation_turns_solid_after_threshold() {
        let (_, mut scroll) = page_scroll();
        scroll.scroll_to(SCROLLED_THRESHOLD);
        assert!(!scroll.is_scrolled());
        scroll.scroll_by(1.0);
        assert!(scroll.is_scrolled());
    }

    #[test]
    fn only_content_sections_are_observed() {
        let layout = PageLayout::showcase();
        assert_eq!(layout.observed_count(), 5);
        assert_eq!(layout.sections()[0].observed, None);
    }
}
