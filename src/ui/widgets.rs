//! Small drawing helpers shared by the screens

use imgui::{Condition, Ui, WindowFlags};

use crate::portal::dashboard::Priority;

use super::theme::Palette;

/// Flags for the borderless full-window backdrop of a screen
pub fn backdrop_flags() -> WindowFlags {
    WindowFlags::NO_DECORATION
        | WindowFlags::NO_MOVE
        | WindowFlags::NO_SAVED_SETTINGS
        | WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS
}

/// Runs `build` inside a window covering the whole display
pub fn full_window<R>(ui: &Ui, id: &str, build: impl FnOnce() -> R) -> Option<R> {
    let size = ui.io().display_size;
    ui.window(id)
        .position([0.0, 0.0], Condition::Always)
        .size(size, Condition::Always)
        .flags(backdrop_flags())
        .build(build)
}

/// Text scaled by `scale`, restoring the normal scale afterwards
pub fn heading(ui: &Ui, text: &str, scale: f32, color: [f32; 4]) {
    ui.set_window_font_scale(scale);
    ui.text_colored(color, text);
    ui.set_window_font_scale(1.0);
}

/// Text centred horizontally in the current window
pub fn centered_text(ui: &Ui, text: &str, scale: f32, color: [f32; 4]) {
    ui.set_window_font_scale(scale);
    let width = ui.calc_text_size(text)[0];
    let available = ui.window_size()[0];
    let y = ui.cursor_pos()[1];
    ui.set_cursor_pos([((available - width) / 2.0).max(0.0), y]);
    ui.text_colored(color, text);
    ui.set_window_font_scale(1.0);
}

/// Moves the cursor so an item of `width` ends up centred
pub fn center_next(ui: &Ui, width: f32) {
    let available = ui.window_size()[0];
    let y = ui.cursor_pos()[1];
    ui.set_cursor_pos([((available - width) / 2.0).max(0.0), y]);
}

/// Coloured `[label]` tag on the current line
pub fn badge(ui: &Ui, label: &str, color: [f32; 4]) {
    ui.text_colored(color, format!("[{}]", label));
}

pub fn priority_color(palette: &Palette, priority: Priority) -> [f32; 4] {
    match priority {
        Priority::High => palette.danger,
        Priority::Medium => palette.warning,
        Priority::Low => palette.success,
    }
}

/// Centred window of a fixed size, for dialogs and forms
pub fn centered_window_position(ui: &Ui, size: [f32; 2]) -> [f32; 2] {
    let display = ui.io().display_size;
    [
        ((display[0] - size[0]) / 2.0).max(0.0),
        ((display[1] - size[1]) / 2.0).max(0.0),
    ]
}
