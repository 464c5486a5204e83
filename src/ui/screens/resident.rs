//! Resident dashboard

use imgui::Ui;

use crate::portal::forms::SupportError;
use crate::portal::{SupportForm, User};
use crate::ui::context::SiteContext;
use crate::ui::widgets;

use super::{Route, Screen};

const QUICK_CONTACT: [&str; 3] = [
    "24/7 Concierge: +1 (555) 123-4567",
    "support@chermitibuilding.com",
    "Emergency: +1 (555) 911-HELP",
];

const SUPPORT_HOURS: [(&str, &str); 4] = [
    ("Concierge", "24/7"),
    ("Maintenance", "Mon-Fri 8AM-6PM"),
    ("Management", "Mon-Fri 9AM-5PM"),
    ("Emergency", "24/7"),
];

pub struct ResidentDashboardScreen {
    support: SupportForm,
    support_error: Option<SupportError>,
}

impl ResidentDashboardScreen {
    pub fn new() -> Self {
        Self {
            support: SupportForm::default(),
            support_error: None,
        }
    }

    fn apartment_card(ui: &Ui, ctx: &SiteContext, user: &User) {
        let palette = ctx.theme.palette();
        ui.child_window("##apartment")
            .size([0.0, 120.0])
            .border(true)
            .build(|| {
                widgets::heading(ui, "Your Apartment", 1.2, palette.text);
                ui.columns(4, "apartment_columns", false);
                let rows = [
                    ("Unit", user.apartment_number.clone().unwrap_or_else(|| "-".into())),
                    ("Floor", user.floor.map_or_else(|| "-".into(), |f| f.to_string())),
                    ("Status", user.status.clone()),
                    ("Since", user.purchase_date.clone().unwrap_or_else(|| "-".into())),
                ];
                for (label, value) in rows {
                    ui.text_colored(palette.text_muted, label);
                    ui.text(value);
                    ui.next_column();
                }
                ui.columns(1, "", false);
            });
    }

    fn overview_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        widgets::heading(ui, "Welcome to Your Dashboard", 1.3, palette.text);
        ui.text_wrapped(
            "Stay updated with the latest building news, maintenance schedules, and community announcements.",
        );
        ui.spacing();

        let tiles = [
            ("Recent Updates", format!("{} new updates available", ctx.feed.updates.len())),
            ("Announcements", format!("{} important notices", ctx.feed.important_count())),
            ("Support", "24/7 assistance available".to_string()),
        ];
        ui.columns(3, "overview_tiles", true);
        for (title, detail) in tiles {
            ui.text_colored(palette.accent_soft, title);
            ui.text(detail);
            ui.next_column();
        }
        ui.columns(1, "", false);
    }

    fn updates_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        widgets::heading(ui, "Apartment Updates", 1.3, palette.text);
        ui.separator();
        for update in &ctx.feed.updates {
            ui.text(&update.title);
            ui.same_line();
            widgets::badge(ui, update.status.label(), palette.accent_soft);
            ui.text_wrapped(&update.description);
            ui.text_colored(
                palette.text_muted,
                format!("{} | {}", update.kind.label(), update.date),
            );
            ui.separator();
        }
    }

    fn announcements_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        widgets::heading(ui, "Building Announcements", 1.3, palette.text);
        ui.separator();
        for announcement in &ctx.feed.announcements {
            ui.text(&announcement.title);
            ui.same_line();
            widgets::badge(
                ui,
                &format!("{} priority", announcement.priority.label()),
                widgets::priority_color(&palette, announcement.priority),
            );
            ui.text_wrapped(&announcement.content);
            ui.text_colored(palette.text_muted, &announcement.date);
            ui.separator();
        }
    }

    fn support_tab(&mut self, ui: &Ui, ctx: &mut SiteContext, from: &str) {
        let palette = ctx.theme.palette();
        widgets::heading(ui, "Contact Support", 1.3, palette.text);
        ui.separator();

        ui.columns(2, "support_info", false);
        ui.text_colored(palette.accent_soft, "Quick Contact");
        for line in QUICK_CONTACT {
            ui.bullet_text(line);
        }
        ui.next_column();
        ui.text_colored(palette.accent_soft, "Support Hours");
        for (desk, hours) in SUPPORT_HOURS {
            ui.bullet_text(format!("{}: {}", desk, hours));
        }
        ui.columns(1, "", false);
        ui.spacing();

        let width = ui.content_region_avail()[0];
        ui.text("Subject");
        ui.set_next_item_width(width);
        ui.input_text("##support_subject", &mut self.support.subject)
            .hint("Brief description of your request")
            .build();
        ui.text("Message");
        ui.input_text_multiline("##support_message", &mut self.support.message, [width, 120.0])
            .build();

        if let Some(error) = &self.support_error {
            ui.text_colored(palette.danger, error.to_string());
        }

        if ui.button_with_size("Submit Support Request", [260.0, 36.0]) {
            match self.support.submit(from) {
                Ok(thanks) => {
                    self.support_error = None;
                    ctx.notices.push(thanks);
                }
                Err(e) => self.support_error = Some(e),
            }
        }
    }
}

impl Default for ResidentDashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ResidentDashboardScreen {
    fn name(&self) -> &str {
        "Resident Dashboard"
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SiteContext) -> Option<Route> {
        None
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        // The router only shows this screen with a resident session.
        let Some(user) = ctx.session.clone() else {
            return Some(Route::Login);
        };
        let palette = ctx.theme.palette();
        let mut next = None;

        widgets::full_window(ui, "##resident_dashboard", || {
            widgets::heading(ui, "Resident Dashboard", 1.8, palette.text);
            ui.text_colored(palette.text_muted, format!("Welcome back, {}", user.name));
            ui.same_line_with_pos((ui.window_size()[0] - 360.0).max(0.0));
            if ui.button("Back to Site") {
                next = Some(Route::Tour);
            }
            ui.same_line();
            if ui.button(ctx.theme.toggled().label()) {
                ctx.toggle_theme();
            }
            ui.same_line();
            if ui.button("Logout") {
                ctx.sign_out();
                next = Some(Route::Tour);
            }
            ui.separator();

            Self::apartment_card(ui, ctx, &user);
            ui.spacing();

            if let Some(_tabs) = ui.tab_bar("##resident_tabs") {
                if let Some(_tab) = ui.tab_item("Overview") {
                    Self::overview_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Updates") {
                    Self::updates_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Announcements") {
                    Self::announcements_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Support") {
                    self.support_tab(ui, ctx, &user.email);
                }
            }
        });
        next
    }
}
