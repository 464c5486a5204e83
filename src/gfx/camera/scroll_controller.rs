use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::config::ScrollConfig;
use crate::scroll::ScrollState;

/// Maps wheel and keyboard input onto the page scroll
pub struct ScrollController {
    /// Pixels per wheel line
    pub line_pixels: f32,
    /// Fraction of the viewport moved by a page step
    pub page_step: f32,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::from_config(&ScrollConfig::default())
    }
}

impl ScrollController {
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self {
            line_pixels: config.line_pixels,
            page_step: config.page_step,
        }
    }

    /// Page offset change for a wheel event; wheel up moves toward the top
    pub fn wheel_delta(&self, delta: &MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, lines) => -lines * self.line_pixels,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => -*y as f32,
        }
    }

    pub fn process_wheel(&self, delta: &MouseScrollDelta, scroll: &mut ScrollState) {
        scroll.scroll_by(self.wheel_delta(delta));
    }

    /// Returns true if the key moved the page
    pub fn process_key(&self, event: &KeyEvent, scroll: &mut ScrollState) -> bool {
        if event.state != ElementState::Pressed {
            return false;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        self.apply_key(code, scroll)
    }

    pub fn apply_key(&self, code: KeyCode, scroll: &mut ScrollState) -> bool {
        let page = scroll.viewport_height() * self.page_step;
        match code {
            KeyCode::PageDown | KeyCode::Space => scroll.scroll_by(page),
            KeyCode::PageUp => scroll.scroll_by(-page),
            KeyCode::ArrowDown => scroll.scroll_by(self.line_pixels),
            KeyCode::ArrowUp => scroll.scroll_by(-self.line_pixels),
            KeyCode::Home => scroll.smooth_scroll_to(0.0),
            KeyCode::End => scroll.smooth_scroll_to(scroll.max_offset()),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll() -> ScrollState {
        ScrollState::new(800.0, 4800.0, 0.15)
    }

    #[test]
    fn wheel_down_moves_page_down() {
        let controller = ScrollController::default();
        let mut scroll = scroll();
        controller.process_wheel(&MouseScrollDelta::LineDelta(0.0, -2.0), &mut scroll);
        assert_eq!(scroll.offset(), 160.0);

        controller.process_wheel(
            &MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 60.0)),
            &mut scroll,
        );
        assert_eq!(scroll.offset(), 100.0);
    }

    #[test]
    fn page_keys_step_by_viewport() {
        let controller = ScrollController::default();
        let mut scroll = scroll();
        assert!(controller.apply_key(KeyCode::PageDown, &mut scroll));
        assert!((scroll.offset() - 720.0).abs() < 1e-3);
        assert!(controller.apply_key(KeyCode::PageUp, &mut scroll));
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn end_starts_smooth_scroll() {
        let controller = ScrollController::default();
        let mut scroll = scroll();
        assert!(controller.apply_key(KeyCode::End, &mut scroll));
        assert!(scroll.is_animating());
        assert!(!controller.apply_key(KeyCode::KeyQ, &mut scroll));
    }
}
