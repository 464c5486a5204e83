//! Welcome screen with the theme chooser

use imgui::{StyleColor, Ui};

use crate::ui::context::SiteContext;
use crate::ui::theme::Theme;
use crate::ui::widgets;

use super::{Route, Screen};

/// Delay between pressing "Begin Your Journey" and the tour appearing
const START_DELAY: f32 = 0.8;

/// Countdown started by the begin button
#[derive(Debug, Default, Clone)]
pub struct JourneyStart {
    elapsed: Option<f32>,
}

impl JourneyStart {
    /// Starts the countdown; pressing again while it runs has no effect
    pub fn begin(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(0.0);
        }
    }

    pub fn is_starting(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Returns true once the delay has passed
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.elapsed.as_mut() {
            Some(elapsed) => {
                *elapsed += dt;
                *elapsed >= START_DELAY
            }
            None => false,
        }
    }
}

pub struct WelcomeScreen {
    start: JourneyStart,
}

impl WelcomeScreen {
    pub fn new() -> Self {
        Self {
            start: JourneyStart::default(),
        }
    }
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for WelcomeScreen {
    fn name(&self) -> &str {
        "Welcome"
    }

    fn update(&mut self, dt: f32, _ctx: &mut SiteContext) -> Option<Route> {
        self.start.advance(dt).then_some(Route::Tour)
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let palette = ctx.theme.palette();
        let site_name = ctx.config.site.name.to_uppercase();
        let mut chosen = None;

        widgets::full_window(ui, "##welcome", || {
            let height = ui.window_size()[1];
            ui.set_cursor_pos([0.0, height * 0.2]);

            widgets::centered_text(ui, "Welcome to", 1.4, palette.text_muted);
            widgets::centered_text(ui, &site_name, 2.8, palette.accent);
            ui.spacing();
            widgets::centered_text(
                ui,
                "Experience luxury living redefined in the heart of the metropolitan district.",
                1.0,
                palette.text,
            );
            widgets::centered_text(
                ui,
                "Your architectural journey begins here.",
                1.0,
                palette.text,
            );

            ui.dummy([0.0, 40.0]);
            widgets::centered_text(ui, "Choose Your Experience", 1.4, palette.text);
            widgets::centered_text(
                ui,
                "For the best viewing experience, please select your preferred theme",
                1.0,
                palette.text_muted,
            );
            ui.spacing();

            let button = [160.0, 40.0];
            widgets::center_next(ui, button[0] * 2.0 + 10.0);
            for (i, theme) in [Theme::Light, Theme::Dark].into_iter().enumerate() {
                if i > 0 {
                    ui.same_line();
                }
                let selected = ctx.theme == theme;
                let _tint = (!selected)
                    .then(|| ui.push_style_color(StyleColor::Button, palette.accent_soft));
                if ui.button_with_size(theme.label(), button) {
                    chosen = Some(theme);
                }
            }

            ui.dummy([0.0, 40.0]);
            let begin = [260.0, 48.0];
            widgets::center_next(ui, begin[0]);
            let label = if self.start.is_starting() {
                "Starting..."
            } else {
                "Begin Your Journey"
            };
            ui.disabled(self.start.is_starting(), || {
                if ui.button_with_size(label, begin) {
                    log::info!("Starting tour in {:?} theme", ctx.theme);
                    self.start.begin();
                }
            });
        });

        if let Some(theme) = chosen {
            ctx.set_theme(theme);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tour_starts_after_the_delay() {
        let mut start = JourneyStart::default();
        assert!(!start.advance(5.0));

        start.begin();
        assert!(start.is_starting());
        assert!(!start.advance(0.5));
        start.begin();
        assert!(!start.advance(0.2));
        assert!(start.advance(0.2));
    }
}
