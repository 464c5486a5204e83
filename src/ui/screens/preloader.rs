//! Loading screen shown before the welcome screen

use imgui::{ProgressBar, Ui};

use crate::ui::context::SiteContext;
use crate::ui::widgets;

use super::{Route, Screen};

/// Seconds between progress ticks
const TICK: f32 = 0.05;
/// Percent added per tick
const STEP: u32 = 2;
/// Pause after reaching 100% before moving on
const FINISH_DELAY: f32 = 0.5;

/// Tick-driven loading progress
#[derive(Debug, Default, Clone)]
pub struct LoadingProgress {
    percent: u32,
    tick: f32,
    finishing: Option<f32>,
}

impl LoadingProgress {
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Advances by `dt` seconds; returns true once loading has finished
    ///
    /// The first tick that finds the bar full starts the finishing delay.
    pub fn advance(&mut self, dt: f32) -> bool {
        if let Some(waited) = self.finishing.as_mut() {
            *waited += dt;
            return *waited >= FINISH_DELAY;
        }

        self.tick += dt;
        while self.tick >= TICK {
            self.tick -= TICK;
            if self.percent >= 100 {
                let waited = self.tick;
                self.finishing = Some(waited);
                return waited >= FINISH_DELAY;
            }
            self.percent = (self.percent + STEP).min(100);
        }
        false
    }
}

pub struct PreloaderScreen {
    progress: LoadingProgress,
}

impl PreloaderScreen {
    pub fn new() -> Self {
        Self {
            progress: LoadingProgress::default(),
        }
    }
}

impl Default for PreloaderScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PreloaderScreen {
    fn name(&self) -> &str {
        "Preloader"
    }

    fn update(&mut self, dt: f32, _ctx: &mut SiteContext) -> Option<Route> {
        self.progress.advance(dt).then_some(Route::Welcome)
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let palette = ctx.theme.palette();
        let tower = ctx.config.site.tower_name.clone();
        let percent = self.progress.percent();

        widgets::full_window(ui, "##preloader", || {
            let height = ui.window_size()[1];
            ui.set_cursor_pos([0.0, height * 0.38]);

            widgets::centered_text(ui, &tower, 2.4, palette.text);
            ui.spacing();
            widgets::centered_text(ui, "Loading architectural experience...", 1.0, palette.text_muted);
            ui.spacing();
            ui.spacing();

            let bar_width = 320.0;
            widgets::center_next(ui, bar_width);
            ProgressBar::new(percent as f32 / 100.0)
                .size([bar_width, 6.0])
                .overlay_text("")
                .build(ui);
            ui.spacing();
            widgets::centered_text(ui, &format!("{}%", percent), 1.0, palette.text_muted);
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_gains_two_percent_per_tick() {
        let mut progress = LoadingProgress::default();
        for _ in 0..10 {
            assert!(!progress.advance(TICK));
        }
        assert_eq!(progress.percent(), 20);
    }

    #[test]
    fn completes_half_a_second_after_the_bar_fills() {
        let mut progress = LoadingProgress::default();
        for _ in 0..50 {
            assert!(!progress.advance(TICK));
        }
        assert_eq!(progress.percent(), 100);

        // The next tick notices the full bar and starts the finishing delay.
        assert!(!progress.advance(TICK));
        for _ in 0..9 {
            assert!(!progress.advance(TICK));
        }
        assert!(progress.advance(TICK * 2.0));
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn large_frames_catch_up_several_ticks() {
        let mut progress = LoadingProgress::default();
        progress.advance(1.0 + TICK / 2.0);
        assert_eq!(progress.percent(), 40);
    }
}
