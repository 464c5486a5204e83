//! Light and dark themes
//!
//! A theme decides both the imgui overlay colours and the colours of the 3D
//! backdrop (sky gradient, fog and ground).

use imgui::{Style, StyleColor};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours used by the overlay and the renderer for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub sky_top: [f32; 3],
    pub sky_horizon: [f32; 3],
    pub ground: [f32; 3],
    pub background: [f32; 3],
    pub accent: [f32; 4],
    pub accent_soft: [f32; 4],
    pub text: [f32; 4],
    pub text_muted: [f32; 4],
    pub panel: [f32; 4],
    pub danger: [f32; 4],
    pub warning: [f32; 4],
    pub success: [f32; 4],
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark Mode",
            Theme::Light => "Light Mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                sky_top: [0.02, 0.03, 0.09],
                sky_horizon: [0.102, 0.102, 0.180],
                ground: [0.059, 0.059, 0.137],
                background: [0.07, 0.08, 0.11],
                accent: [0.15, 0.39, 0.92, 1.0],
                accent_soft: [0.58, 0.77, 0.99, 1.0],
                text: [0.95, 0.96, 0.98, 1.0],
                text_muted: [0.62, 0.65, 0.70, 1.0],
                panel: [0.0, 0.0, 0.0, 0.78],
                danger: [0.97, 0.44, 0.44, 1.0],
                warning: [0.98, 0.80, 0.30, 1.0],
                success: [0.29, 0.87, 0.50, 1.0],
            },
            Theme::Light => Palette {
                sky_top: [0.36, 0.60, 0.92],
                sky_horizon: [0.84, 0.91, 0.99],
                ground: [0.42, 0.48, 0.44],
                background: [0.86, 0.91, 0.98],
                accent: [0.23, 0.51, 0.96, 1.0],
                accent_soft: [0.15, 0.39, 0.92, 1.0],
                text: [0.07, 0.09, 0.15, 1.0],
                text_muted: [0.29, 0.33, 0.39, 1.0],
                panel: [1.0, 1.0, 1.0, 0.85],
                danger: [0.86, 0.15, 0.15, 1.0],
                warning: [0.70, 0.45, 0.03, 1.0],
                success: [0.09, 0.64, 0.29, 1.0],
            },
        }
    }

    /// Writes this theme into an imgui style
    pub fn apply_to(self, style: &mut Style) {
        match self {
            Theme::Dark => style.use_dark_colors(),
            Theme::Light => style.use_light_colors(),
        };

        let palette = self.palette();
        style.window_rounding = 12.0;
        style.frame_rounding = 6.0;
        style.child_rounding = 8.0;
        style.popup_rounding = 10.0;
        style.window_padding = [18.0, 16.0];
        style.frame_padding = [10.0, 6.0];
        style.item_spacing = [10.0, 8.0];

        style[StyleColor::WindowBg] = palette.panel;
        style[StyleColor::PopupBg] = [palette.panel[0], palette.panel[1], palette.panel[2], 0.96];
        style[StyleColor::Text] = palette.text;
        style[StyleColor::TextDisabled] = palette.text_muted;
        style[StyleColor::Button] = palette.accent;
        style[StyleColor::ButtonHovered] = palette.accent_soft;
        style[StyleColor::ButtonActive] = palette.accent_soft;
        style[StyleColor::PlotHistogram] = palette.accent;
        style[StyleColor::CheckMark] = palette.accent;
        style[StyleColor::Header] = palette.accent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_themes() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn themes_parse_from_lowercase_names() {
        #[derive(Deserialize)]
        struct Holder {
            theme: Theme,
        }
        let holder: Holder = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(holder.theme, Theme::Light);
    }
}
