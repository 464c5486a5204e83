//! Admin dashboard

use std::borrow::Cow;

use imgui::Ui;

use crate::portal::dashboard::{
    DashboardError, PaymentStatus, Priority, Tenure, UpdateKind, ANALYTICS, RECENT_ACTIVITY, REVENUE,
};
use crate::ui::context::SiteContext;
use crate::ui::widgets;

use super::{Route, Screen};

pub const UPDATE_PUBLISHED: &str = "Update published successfully!";
pub const ANNOUNCEMENT_PUBLISHED: &str = "Announcement published successfully!";
pub const UPDATE_DELETED: &str = "Update deleted successfully!";
pub const ANNOUNCEMENT_DELETED: &str = "Announcement deleted successfully!";

#[derive(Debug, Default)]
struct UpdateDraft {
    title: String,
    description: String,
    kind: usize,
    error: Option<DashboardError>,
}

#[derive(Debug)]
struct AnnouncementDraft {
    title: String,
    content: String,
    priority: usize,
    error: Option<DashboardError>,
}

impl Default for AnnouncementDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            // Medium
            priority: 1,
            error: None,
        }
    }
}

pub struct AdminDashboardScreen {
    update: UpdateDraft,
    announcement: AnnouncementDraft,
}

impl AdminDashboardScreen {
    pub fn new() -> Self {
        Self {
            update: UpdateDraft::default(),
            announcement: AnnouncementDraft::default(),
        }
    }

    /// Publishes the update draft; clears it on success
    fn publish_update(&mut self, ctx: &mut SiteContext) {
        let kind = UpdateKind::ALL[self.update.kind.min(UpdateKind::ALL.len() - 1)];
        match ctx
            .board
            .publish_update(&self.update.title, &self.update.description, kind)
        {
            Ok(_) => {
                self.update = UpdateDraft::default();
                ctx.notices.push(UPDATE_PUBLISHED);
            }
            Err(e) => self.update.error = Some(e),
        }
    }

    /// Publishes the announcement draft; clears it on success
    fn publish_announcement(&mut self, ctx: &mut SiteContext) {
        let priority = Priority::ALL[self.announcement.priority.min(Priority::ALL.len() - 1)];
        match ctx.board.publish_announcement(
            &self.announcement.title,
            &self.announcement.content,
            priority,
        ) {
            Ok(_) => {
                self.announcement = AnnouncementDraft::default();
                ctx.notices.push(ANNOUNCEMENT_PUBLISHED);
            }
            Err(e) => self.announcement.error = Some(e),
        }
    }

    fn overview_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        let stats = ctx.board.stats();
        let tiles = [
            ("Total Residents", stats.residents.to_string()),
            ("Active Updates", stats.updates.to_string()),
            ("Announcements", stats.announcements.to_string()),
            ("Revenue", REVENUE.to_string()),
        ];

        ui.columns(4, "admin_stats", true);
        for (title, value) in tiles {
            ui.text_colored(palette.text_muted, title);
            widgets::heading(ui, &value, 1.6, palette.text);
            ui.next_column();
        }
        ui.columns(1, "", false);

        ui.spacing();
        widgets::heading(ui, "Recent Activity", 1.2, palette.text);
        for activity in RECENT_ACTIVITY {
            ui.bullet_text(activity);
        }
    }

    fn residents_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        widgets::heading(ui, "Resident Management", 1.2, palette.text);
        ui.separator();

        ui.columns(5, "residents_table", true);
        for header in ["Name", "Email", "Apartment", "Status", "Payment"] {
            ui.text_colored(palette.accent_soft, header);
            ui.next_column();
        }
        ui.separator();
        for resident in &ctx.board.residents {
            ui.text(&resident.name);
            ui.next_column();
            ui.text(&resident.email);
            ui.next_column();
            ui.text(format!("{} (Floor {})", resident.apartment_number, resident.floor));
            ui.next_column();
            ui.text(match resident.tenure {
                Tenure::Owner => "Owner",
                Tenure::Renter => "Renter",
            });
            ui.next_column();
            match resident.payment {
                PaymentStatus::Current => ui.text_colored(palette.success, "Current"),
                PaymentStatus::Overdue => ui.text_colored(palette.danger, "Overdue"),
            }
            ui.next_column();
        }
        ui.columns(1, "", false);
    }

    fn updates_tab(&mut self, ui: &Ui, ctx: &mut SiteContext) {
        let palette = ctx.theme.palette();
        let width = ui.content_region_avail()[0];

        widgets::heading(ui, "Publish New Update", 1.2, palette.text);
        ui.text("Title");
        ui.set_next_item_width(width);
        ui.input_text("##update_title", &mut self.update.title)
            .hint("Update title")
            .build();
        ui.text("Description");
        ui.input_text_multiline("##update_description", &mut self.update.description, [width, 80.0])
            .build();
        ui.text("Type");
        ui.set_next_item_width(240.0);
        ui.combo("##update_type", &mut self.update.kind, &UpdateKind::ALL, |kind| {
            Cow::Borrowed(kind.label())
        });
        if let Some(error) = &self.update.error {
            ui.text_colored(palette.danger, error.to_string());
        }
        if ui.button("Publish Update") {
            self.publish_update(ctx);
        }

        ui.spacing();
        ui.separator();
        widgets::heading(ui, "Published Updates", 1.2, palette.text);
        let mut deleted = None;
        for update in &ctx.board.updates {
            ui.text(&update.title);
            ui.same_line();
            widgets::badge(ui, update.kind.label(), palette.accent_soft);
            ui.same_line();
            if ui.small_button(format!("Delete##update_{}", update.id)) {
                deleted = Some(update.id);
            }
            ui.text_wrapped(&update.description);
            ui.text_colored(palette.text_muted, &update.date);
            ui.separator();
        }
        if let Some(id) = deleted {
            if ctx.board.delete_update(id) {
                log::info!("Update {} deleted", id);
                ctx.notices.push(UPDATE_DELETED);
            }
        }
    }

    fn announcements_tab(&mut self, ui: &Ui, ctx: &mut SiteContext) {
        let palette = ctx.theme.palette();
        let width = ui.content_region_avail()[0];

        widgets::heading(ui, "Create New Announcement", 1.2, palette.text);
        ui.text("Title");
        ui.set_next_item_width(width);
        ui.input_text("##announcement_title", &mut self.announcement.title)
            .hint("Announcement title")
            .build();
        ui.text("Content");
        ui.input_text_multiline(
            "##announcement_content",
            &mut self.announcement.content,
            [width, 80.0],
        )
        .build();
        ui.text("Priority");
        ui.set_next_item_width(240.0);
        ui.combo(
            "##announcement_priority",
            &mut self.announcement.priority,
            &Priority::ALL,
            |priority| Cow::Borrowed(priority.label()),
        );
        if let Some(error) = &self.announcement.error {
            ui.text_colored(palette.danger, error.to_string());
        }
        if ui.button("Publish Announcement") {
            self.publish_announcement(ctx);
        }

        ui.spacing();
        ui.separator();
        widgets::heading(ui, "Published Announcements", 1.2, palette.text);
        let mut deleted = None;
        for announcement in &ctx.board.announcements {
            ui.text(&announcement.title);
            ui.same_line();
            widgets::badge(
                ui,
                &format!("{} priority", announcement.priority.label()),
                widgets::priority_color(&palette, announcement.priority),
            );
            ui.same_line();
            if ui.small_button(format!("Delete##announcement_{}", announcement.id)) {
                deleted = Some(announcement.id);
            }
            ui.text_wrapped(&announcement.content);
            ui.text_colored(palette.text_muted, &announcement.date);
            ui.separator();
        }
        if let Some(id) = deleted {
            if ctx.board.delete_announcement(id) {
                log::info!("Announcement {} deleted", id);
                ctx.notices.push(ANNOUNCEMENT_DELETED);
            }
        }
    }

    fn analytics_tab(ui: &Ui, ctx: &SiteContext) {
        let palette = ctx.theme.palette();
        ui.columns(2, "analytics", true);
        for metric in ANALYTICS {
            ui.text_colored(palette.text_muted, metric.title);
            widgets::heading(ui, metric.value, 1.6, palette.text);
            ui.text(metric.detail);
            ui.spacing();
            ui.next_column();
        }
        ui.columns(1, "", false);
    }
}

impl Default for AdminDashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AdminDashboardScreen {
    fn name(&self) -> &str {
        "Admin Dashboard"
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SiteContext) -> Option<Route> {
        None
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let Some(user) = ctx.session.clone() else {
            return Some(Route::Login);
        };
        let palette = ctx.theme.palette();
        let mut next = None;

        widgets::full_window(ui, "##admin_dashboard", || {
            widgets::heading(ui, "Admin Dashboard", 1.8, palette.text);
            ui.text_colored(palette.text_muted, format!("Admin Panel | {}", user.name));
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

            if let Some(_tabs) = ui.tab_bar("##admin_tabs") {
                if let Some(_tab) = ui.tab_item("Overview") {
                    Self::overview_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Residents") {
                    Self::residents_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Manage Updates") {
                    self.updates_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Announcements") {
                    self.announcements_tab(ui, ctx);
                }
                if let Some(_tab) = ui.tab_item("Analytics") {
                    Self::analytics_tab(ui, ctx);
                }
            }
        });
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::portal::SessionStore;

    fn context(dir: &std::path::Path) -> SiteContext {
        SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir))
    }

    #[test]
    fn publishing_prepends_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        let mut screen = AdminDashboardScreen::new();

        screen.update.title = "  Lobby repaint ".into();
        screen.update.kind = 2;
        screen.publish_update(&mut ctx);

        let newest = &ctx.board.updates[0];
        assert_eq!(newest.title, "Lobby repaint");
        assert_eq!(newest.kind, UpdateKind::Security);
        assert_eq!(ctx.notices.current(), Some(UPDATE_PUBLISHED));
        assert!(screen.update.title.is_empty());
    }

    #[test]
    fn empty_titles_stay_in_the_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        let mut screen = AdminDashboardScreen::new();
        let before = ctx.board.stats();

        screen.announcement.content = "No title".into();
        screen.publish_announcement(&mut ctx);

        assert_eq!(ctx.board.stats(), before);
        assert_eq!(screen.announcement.error, Some(DashboardError::EmptyTitle));
        assert_eq!(screen.announcement.content, "No title");
        assert!(ctx.notices.is_empty());
    }

    #[test]
    fn announcement_draft_defaults_to_medium_priority() {
        let draft = AnnouncementDraft::default();
        assert_eq!(Priority::ALL[draft.priority], Priority::Medium);
    }
}
