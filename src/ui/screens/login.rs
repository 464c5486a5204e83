//! Sign-in page and the login form it shares with the tour's dialog

use imgui::{Condition, Ui, WindowFlags};

use crate::portal::forms::PASSWORD_RESET;
use crate::portal::{LoginForm, LoginOutcome, Role};
use crate::ui::context::SiteContext;
use crate::ui::widgets;

use super::{Route, Screen};

/// Resolves a pending sign-in; a success stores the session and routes by role
pub fn poll_login(form: &mut LoginForm, dt: f32, ctx: &mut SiteContext) -> Option<Route> {
    match form.update(dt, &ctx.directory) {
        LoginOutcome::Success(user) => {
            let route = Route::home_for(user.role);
            ctx.sign_in(user);
            Some(route)
        }
        LoginOutcome::Idle | LoginOutcome::Pending | LoginOutcome::Failed(_) => None,
    }
}

/// Email, password, error line and the sign-in button
pub fn login_form(ui: &Ui, form: &mut LoginForm, ctx: &mut SiteContext) {
    let palette = ctx.theme.palette();
    let width = ui.content_region_avail()[0];

    ui.text("Email Address");
    ui.set_next_item_width(width);
    let mut submitted = ui
        .input_text("##login_email", &mut form.email)
        .hint("Enter your email")
        .enter_returns_true(true)
        .build();

    ui.text("Password");
    ui.set_next_item_width(width);
    submitted |= ui
        .input_text("##login_password", &mut form.password)
        .hint("Enter your password")
        .password(true)
        .enter_returns_true(true)
        .build();

    if let Some(error) = &form.error {
        ui.spacing();
        ui.text_colored(palette.danger, error.to_string());
    }

    ui.spacing();
    let loading = form.is_loading();
    let label = if loading { "Signing In..." } else { "Sign In" };
    ui.disabled(loading, || {
        if ui.button_with_size(label, [width, 40.0]) {
            submitted = true;
        }
    });
    if submitted && !loading {
        form.submit();
    }

    ui.spacing();
    if ui.small_button("Forgot your password?") {
        ctx.notices.push(PASSWORD_RESET);
    }
}

/// The boxed list of demo accounts
pub fn demo_credentials(ui: &Ui, ctx: &SiteContext) {
    let palette = ctx.theme.palette();
    ui.child_window("##demo_credentials")
        .size([0.0, 84.0])
        .border(true)
        .build(|| {
            ui.text_colored(palette.accent_soft, "Demo Credentials:");
            for (role, email, password) in ctx.directory.demo_credentials() {
                let label = match role {
                    Role::Admin => "Admin",
                    Role::Resident => "User",
                };
                ui.text_colored(
                    palette.text_muted,
                    format!("{}: {} / {}", label, email, password),
                );
            }
        });
}

pub struct LoginScreen {
    form: LoginForm,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: LoginForm::default(),
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn name(&self) -> &str {
        "Login"
    }

    fn update(&mut self, dt: f32, ctx: &mut SiteContext) -> Option<Route> {
        poll_login(&mut self.form, dt, ctx)
    }

    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route> {
        let palette = ctx.theme.palette();
        let site_name = ctx.config.site.name.clone();
        let size = [440.0, 520.0];
        let mut next = None;

        ui.window("##login_page")
            .position(widgets::centered_window_position(ui, size), Condition::Always)
            .size(size, Condition::Always)
            .flags(WindowFlags::NO_DECORATION | WindowFlags::NO_MOVE | WindowFlags::NO_SAVED_SETTINGS)
            .build(|| {
                widgets::centered_text(ui, &site_name, 1.8, palette.text);
                widgets::centered_text(ui, "Sign in to access your dashboard", 1.0, palette.text_muted);
                ui.separator();
                ui.spacing();

                login_form(ui, &mut self.form, ctx);

                ui.spacing();
                demo_credentials(ui, ctx);

                ui.spacing();
                if ui.button("< Back to Main Site") {
                    next = Some(Route::Tour);
                }
            });
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::portal::forms::LOGIN_LATENCY;
    use crate::portal::SessionStore;

    #[test]
    fn successful_login_routes_by_role_and_saves_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        let mut form = LoginForm::default();
        form.email = "admin@chermiti.com".into();
        form.password = "admin123".into();

        form.submit();
        assert_eq!(poll_login(&mut form, LOGIN_LATENCY / 2.0, &mut ctx), None);
        assert_eq!(
            poll_login(&mut form, LOGIN_LATENCY, &mut ctx),
            Some(Route::AdminDashboard)
        );
        assert_eq!(ctx.role(), Some(Role::Admin));
        assert!(ctx.store.load().is_some());
    }

    #[test]
    fn failed_login_stays_put() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        let mut form = LoginForm::default();
        form.email = "john@example.com".into();
        form.password = "wrong".into();
        form.submit();
        assert_eq!(poll_login(&mut form, LOGIN_LATENCY, &mut ctx), None);
        assert!(form.error.is_some());
        assert_eq!(ctx.session, None);
    }
}
