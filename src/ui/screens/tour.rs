//! The scrolling tour drawn over the 3D tower
//!
//! Sections are laid out on a virtual page one viewport tall each; their
//! cards are positioned from the scroll offset every frame and slide in as
//! they become visible.

use std::borrow::Cow;

use imgui::{Condition, ProgressBar, StyleColor, StyleVar, Ui, WindowFlags};

use crate::portal::forms::{Budget, ContactError, Interest};
use crate::portal::{ContactForm, LoginForm};
use crate::scroll::{Section, SectionId};
use crate::ui::context::SiteContext;
use crate::ui::widgets;

use super::login::{demo_credentials, login_form, poll_login};
use super::{Route, Screen};

const NAV_HEIGHT: f32 = 64.0;
const CARD_WIDTH: f32 = 620.0;
const CARD_HEIGHT: f32 = 300.0;
const PROGRESS_HEIGHT: f32 = 92.0;
const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

const ADDRESS: &str = "123 Skyline Avenue, Metropolitan District";
const PHONE: &str = "+1 (555) 123-4567";

/// Sections linked from the navigation bar
const NAV_LINKS: [SectionId; 5] = [
    SectionId::Hero,
    SectionId::Entrance,
    SectionId::Residences,
    SectionId::Penthouse,
    SectionId::Contact,
];

fn overlay_flags() -> WindowFlags {
    WindowFlags::NO_DECORATION
        | WindowFlags::NO_MOVE
        | WindowFlags::NO_SAVED_SETTINGS
        | WindowFlags::NO_SCROLLBAR
        | WindowFlags::NO_SCROLL_WITH_MOUSE
}

/// Where a section currently sits on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPlacement {
    /// Screen y of the section's top edge
    pub top: f32,
    /// Whether any part of the section is inside the viewport
    pub on_screen: bool,
}

pub fn place_section(position: usize, offset: f32, viewport_height: f32) -> SectionPlacement {
    let top = position as f32 * viewport_height - offset;
    SectionPlacement {
        top,
        on_screen: top < viewport_height && top + viewport_height > 0.0,
    }
}

pub struct TourScreen {
    contact_open: bool,
    contact: ContactForm,
    contact_error: Option<ContactError>,
    login_open: bool,
    login: LoginForm,
}

impl TourScreen {
    pub fn new() -> Self {
        Self {
            contact_open: false,
            contact: ContactForm::default(),
            contact_error: None,
            login_open: false,
            login: LoginForm::default(),
        }
    }

    fn open_contact(&mut self) {
        self.contact_open = true;
        self.contact_error = None;
    }

    fn open_login(&mut self) {
        self.login_open = true;
        self.login.reset();
    }

    fn dialog_open(&self) -> bool {
        self.contact_open || self.login_open
    }

    fn render_navigation(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let palette = ctx.theme.palette();
        let width = ui.io().display_size[0];
        let background = if ctx.scroll.is_scrolled() { 0.85 } else { 0.0 };
        let tower = ctx.config.site.tower_name.clone();
        let mut next = None;

        ui.window("##navigation")
            .position([0.0, 0.0], Condition::Always)
            .size([width, NAV_HEIGHT], Condition::Always)
            .flags(overlay_flags())
            .bg_alpha(background)
            .build(|| {
                widgets::heading(ui, &tower, 1.5, palette.text);
                ui.same_line();
                ui.text_colored(palette.accent_soft, "Luxury Redefined");

                let link = ui.push_style_color(StyleColor::Button, TRANSPARENT);
                for id in NAV_LINKS {
                    let Some(label) = ctx
                        .layout
                        .index_of(id)
                        .map(|i| ctx.layout.sections()[i].nav_label)
                    else {
                        continue;
                    };
                    ui.same_line();
                    if ui.button(label) {
                        ctx.scroll_to_section(id);
                    }
                }
                drop(link);

                ui.same_line_with_pos((width - 330.0).max(0.0));
                match ctx.role() {
                    Some(role) => {
                        if ui.button("Dashboard") {
                            next = Some(Route::home_for(role));
                        }
                    }
                    None => {
                        if ui.button("Resident Login") {
                            self.open_login();
                        }
                    }
                }
                ui.same_line();
                if ui.button("Contact Us") {
                    self.open_contact();
                }
                ui.same_line();
                if ui.button(ctx.theme.toggled().label()) {
                    ctx.toggle_theme();
                }
            });
        next
    }

    fn render_hero(&self, ui: &Ui, ctx: &SiteContext, top: f32) {
        let palette = ctx.theme.palette();
        let display = ui.io().display_size;
        let size = [display[0], 260.0];
        let tower = &ctx.config.site.tower_name;
        let tagline = &ctx.config.site.tagline;

        ui.window("##hero")
            .position([0.0, top + (display[1] - size[1]) / 2.0], Condition::Always)
            .size(size, Condition::Always)
            .flags(overlay_flags() | WindowFlags::NO_INPUTS)
            .bg_alpha(0.0)
            .build(|| {
                widgets::centered_text(ui, tower, 4.0, palette.text);
                ui.spacing();
                widgets::centered_text(ui, tagline, 1.5, palette.text_muted);
                ui.spacing();
                widgets::centered_text(ui, "[ Now Selling ]", 1.2, palette.accent_soft);
            });

        if !ctx.scroll.is_scrolled() {
            let hint = [200.0, 40.0];
            ui.window("##scroll_hint")
                .position(
                    [(display[0] - hint[0]) / 2.0, display[1] - PROGRESS_HEIGHT - 90.0],
                    Condition::Always,
                )
                .size(hint, Condition::Always)
                .flags(overlay_flags() | WindowFlags::NO_INPUTS)
                .bg_alpha(0.0)
                .build(|| {
                    widgets::centered_text(ui, "Scroll to Explore", 1.0, palette.text_muted);
                });
        }
    }

    fn render_card(&mut self, ui: &Ui, ctx: &SiteContext, position: usize, section: &Section, top: f32) {
        let Some(fade) = ctx.fade_for(position) else {
            return;
        };
        let opacity = fade.opacity();
        if opacity <= 0.01 {
            return;
        }

        let palette = ctx.theme.palette();
        let display = ui.io().display_size;
        let width = CARD_WIDTH.min(display[0] - 40.0);
        let height = if section.id == SectionId::Contact {
            CARD_HEIGHT + 90.0
        } else {
            CARD_HEIGHT
        };
        let x = (display[0] - width) / 2.0 + fade.slide_offset(width + (display[0] - width) / 2.0);
        let y = top + (display[1] - height) / 2.0;

        let _alpha = ui.push_style_var(StyleVar::Alpha(opacity));
        ui.window(format!("##section_{}", position))
            .position([x, y], Condition::Always)
            .size([width, height], Condition::Always)
            .flags(overlay_flags())
            .build(|| {
                widgets::heading(ui, section.title, 2.0, palette.text);
                ui.text_colored(palette.accent_soft, section.subtitle);
                ui.separator();
                ui.spacing();
                ui.text_wrapped(section.body);

                if section.id == SectionId::Contact {
                    ui.spacing();
                    ui.text_colored(palette.text_muted, ADDRESS);
                    ui.text_colored(palette.text_muted, PHONE);
                    ui.spacing();
                    if ui.button_with_size("Schedule a Visit", [200.0, 36.0]) {
                        self.open_contact();
                    }
                    ui.spacing();
                    ui.text_colored(
                        palette.text_muted,
                        "(c) 2024 Skyline Tower. All rights reserved.",
                    );
                }
            });
    }

    fn render_progress(&self, ui: &Ui, ctx: &mut SiteContext) {
        let palette = ctx.theme.palette();
        let display = ui.io().display_size;
        let width = (display[0] - 48.0).clamp(0.0, 900.0);
        let x = (display[0] - width) / 2.0;
        let y = display[1] - PROGRESS_HEIGHT - 20.0;
        let active = ctx.layout.active_section(&ctx.scroll);
        let mut jump = None;

        ui.window("##scroll_progress")
            .position([x, y], Condition::Always)
            .size([width, PROGRESS_HEIGHT], Condition::Always)
            .flags(overlay_flags())
            .build(|| {
                ProgressBar::new(ctx.scroll.fraction())
                    .size([-1.0, 4.0])
                    .overlay_text("")
                    .build(ui);
                ui.spacing();

                let count = ctx.layout.len().max(1) as f32;
                let button_width = (ui.content_region_avail()[0] - 8.0 * (count - 1.0)) / count;
                for (index, section) in ctx.layout.sections().iter().enumerate() {
                    if index > 0 {
                        ui.same_line();
                    }
                    let color = if active == Some(index) {
                        palette.accent
                    } else {
                        TRANSPARENT
                    };
                    let _color = ui.push_style_color(StyleColor::Button, color);
                    if ui.button_with_size(section.nav_label, [button_width, 40.0]) {
                        jump = Some(section.id);
                    }
                }
            });

        ui.window("##scroll_top")
            .position([display[0] - 84.0, y - 76.0], Condition::Always)
            .size([64.0, 64.0], Condition::Always)
            .flags(overlay_flags())
            .bg_alpha(0.0)
            .build(|| {
                if ui.button_with_size("Top", [48.0, 48.0]) {
                    ctx.scroll_to_top();
                }
            });

        if let Some(id) = jump {
            ctx.scroll_to_section(id);
        }
    }

    fn render_contact_dialog(&mut self, ui: &Ui, ctx: &mut SiteContext) {
        if !self.contact_open {
            return;
        }
        let palette = ctx.theme.palette();
        let size = [480.0, 620.0];
        let mut submitted = false;

        ui.window("Get in Touch")
            .position(widgets::centered_window_position(ui, size), Condition::Appearing)
            .size(size, Condition::Appearing)
            .collapsible(false)
            .opened(&mut self.contact_open)
            .build(|| {
                let form = &mut self.contact;
                let width = ui.content_region_avail()[0];

                ui.text("Full Name *");
                ui.set_next_item_width(width);
                ui.input_text("##contact_name", &mut form.name)
                    .hint("Enter your full name")
                    .build();

                ui.text("Email *");
                ui.set_next_item_width(width);
                ui.input_text("##contact_email", &mut form.email)
                    .hint("Enter your email")
                    .build();

                ui.text("Phone Number");
                ui.set_next_item_width(width);
                ui.input_text("##contact_phone", &mut form.phone)
                    .hint("Enter your phone number")
                    .build();

                ui.text("Interest");
                let mut interest = Interest::ALL
                    .iter()
                    .position(|i| *i == form.interest)
                    .unwrap_or_default();
                ui.set_next_item_width(width);
                if ui.combo("##contact_interest", &mut interest, &Interest::ALL, |i| {
                    Cow::Borrowed(i.label())
                }) {
                    form.interest = Interest::ALL[interest];
                }

                ui.text("Budget Range");
                let mut budget = Budget::ALL
                    .iter()
                    .position(|b| *b == form.budget)
                    .unwrap_or_default();
                ui.set_next_item_width(width);
                if ui.combo("##contact_budget", &mut budget, &Budget::ALL, |b| {
                    Cow::Borrowed(b.label())
                }) {
                    form.budget = Budget::ALL[budget];
                }

                ui.text("Message");
                ui.input_text_multiline("##contact_message", &mut form.message, [width, 100.0])
                    .build();
                ui.text_disabled("Tell us about your requirements...");

                if let Some(error) = &self.contact_error {
                    ui.text_colored(palette.danger, error.to_string());
                }

                ui.spacing();
                if ui.button_with_size("Submit Inquiry", [width, 40.0]) {
                    submitted = true;
                }
            });

        if submitted {
            self.submit_contact(ctx);
        }
    }

    /// Sends the inquiry; the dialog stays open with its contents either way
    fn submit_contact(&mut self, ctx: &mut SiteContext) {
        match self.contact.submit() {
            Ok(thanks) => {
                self.contact_error = None;
                ctx.notices.push(thanks);
            }
            Err(e) => self.contact_error = Some(e),
        }
    }

    fn render_login_dialog(&mut self, ui: &Ui, ctx: &mut SiteContext) {
        if !self.login_open {
            return;
        }
        let size = [460.0, 480.0];

        ui.window("Resident Login")
            .position(widgets::centered_window_position(ui, size), Condition::Appearing)
            .size(size, Condition::Appearing)
            .collapsible(false)
            .opened(&mut self.login_open)
            .build(|| {
                ui.text_wrapped("Access your apartment dashboard and stay updated with the latest information");
                ui.separator();
                login_form(ui, &mut self.login, ctx);
                ui.spacing();
                demo_credentials(ui, ctx);
            });
    }
}

impl Default for TourScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TourScreen {
    fn name(&self) -> &str {
        "Tour"
    }

    fn shows_scene(&self) -> bool {
        true
    }

    fn accepts_scroll(&self) -> bool {
        !self.dialog_open()
    }

    fn dismiss(&mut self) -> bool {
        if self.login_open {
            self.login_open = false;
        } else if self.contact_open {
            self.contact_open = false;
        } else {
            return false;
        }
        true
    }

    fn update(&mut self, dt: f32, ctx: &mut SiteContext) -> Option<Route> {
        ctx.advance_page(dt);
        if self.login_open {
            let next = poll_login(&mut self.login, dt, ctx);
            if next.is_some() {
                self.login_open = false;
            }
            return next;
        }
        None
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let viewport = ctx.scroll.viewport_height();
        let offset = ctx.scroll.offset();

        let sections = ctx.layout.sections().to_vec();
        for (position, section) in sections.iter().enumerate() {
            let placement = place_section(position, offset, viewport);
            if !placement.on_screen {
                continue;
            }
            match section.id {
                SectionId::Hero => self.render_hero(ui, ctx, placement.top),
                _ => self.render_card(ui, ctx, position, section, placement.top),
            }
        }

        let next = self.render_navigation(ui, ctx);
        self.render_progress(ui, ctx);
        self.render_contact_dialog(ui, ctx);
        self.render_login_dialog(ui, ctx);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::portal::forms::CONTACT_THANKS;
    use crate::portal::SessionStore;

    #[test]
    fn sections_are_placed_from_the_scroll_offset() {
        let hero = place_section(0, 0.0, 800.0);
        assert_eq!(hero.top, 0.0);
        assert!(hero.on_screen);

        let entrance = place_section(1, 0.0, 800.0);
        assert_eq!(entrance.top, 800.0);
        assert!(!entrance.on_screen);

        let entrance = place_section(1, 400.0, 800.0);
        assert_eq!(entrance.top, 400.0);
        assert!(entrance.on_screen);
        assert!(!place_section(0, 800.0, 800.0).on_screen);
    }

    #[test]
    fn dismiss_closes_one_dialog_at_a_time() {
        let mut tour = TourScreen::new();
        assert!(!tour.dismiss());

        tour.open_contact();
        tour.open_login();
        assert!(tour.dismiss());
        assert!(!tour.login_open);
        assert!(tour.contact_open);
        assert!(tour.dismiss());
        assert!(!tour.dialog_open());
        assert!(!tour.dismiss());
    }

    #[test]
    fn submitted_inquiry_keeps_the_dialog_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        let mut tour = TourScreen::new();
        tour.open_contact();

        tour.submit_contact(&mut ctx);
        assert_eq!(tour.contact_error, Some(ContactError::MissingName));
        assert!(ctx.notices.is_empty());

        tour.contact.name = "Ada".into();
        tour.contact.email = "ada@example.com".into();
        tour.submit_contact(&mut ctx);
        assert_eq!(tour.contact_error, None);
        assert_eq!(ctx.notices.current(), Some(CONTACT_THANKS));
        assert!(tour.contact_open);
        assert_eq!(tour.contact.name, "Ada");
    }

    #[test]
    fn dialogs_block_page_scrolling() {
        let mut tour = TourScreen::new();
        assert!(tour.accepts_scroll());
        tour.open_contact();
        assert!(!tour.accepts_scroll());
        tour.contact_open = false;
        tour.open_login();
        assert!(!tour.accepts_scroll());
    }
}
