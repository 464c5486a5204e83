//! Screens and the router that switches between them
//!
//! Each [`Screen`] owns its transient widget state and reports navigation by
//! returning the next [`Route`]. The [`Router`] applies route guards and
//! replaces the active screen.

use imgui::Ui;

use crate::portal::{Role, User};

use super::context::SiteContext;

pub mod admin;
pub mod login;
pub mod preloader;
pub mod resident;
pub mod tour;
pub mod welcome;

pub use admin::AdminDashboardScreen;
pub use login::LoginScreen;
pub use preloader::PreloaderScreen;
pub use resident::ResidentDashboardScreen;
pub use tour::TourScreen;
pub use welcome::WelcomeScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Preloader,
    Welcome,
    Tour,
    Login,
    ResidentDashboard,
    AdminDashboard,
}

impl Route {
    /// Where a freshly signed-in user lands
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Resident => Route::ResidentDashboard,
        }
    }

    /// First route at startup
    pub fn initial(skip_intro: bool) -> Route {
        if skip_intro {
            Route::Tour
        } else {
            Route::Preloader
        }
    }

    fn screen(self) -> Box<dyn Screen> {
        match self {
            Route::Preloader => Box::new(PreloaderScreen::new()),
            Route::Welcome => Box::new(WelcomeScreen::new()),
            Route::Tour => Box::new(TourScreen::new()),
            Route::Login => Box::new(LoginScreen::new()),
            Route::ResidentDashboard => Box::new(ResidentDashboardScreen::new()),
            Route::AdminDashboard => Box::new(AdminDashboardScreen::new()),
        }
    }
}

/// Applies route guards: dashboards need a session with the matching role
pub fn resolve(route: Route, session: Option<&User>) -> Route {
    let required = match route {
        Route::ResidentDashboard => Role::Resident,
        Route::AdminDashboard => Role::Admin,
        other => return other,
    };
    match session {
        Some(user) if user.role == required => route,
        _ => Route::Login,
    }
}

/// One full-window view of the site
pub trait Screen {
    fn name(&self) -> &str;

    /// Whether the 3D tower is drawn behind this screen
    fn shows_scene(&self) -> bool {
        false
    }

    /// Whether wheel and page keys should scroll the page right now
    fn accepts_scroll(&self) -> bool {
        false
    }

    /// Closes the topmost dialog; returns false if none was open
    fn dismiss(&mut self) -> bool {
        false
    }

    /// Advances timers; returns a route to navigate to
    fn update(&mut self, dt: f32, ctx: &mut SiteContext) -> Option<Route>;

    /// Builds this frame's widgets; returns a route to navigate to
    fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) -> Option<Route>;
}

/// Owns the active screen and performs guarded navigation
pub struct Router {
    current: Route,
    screen: Box<dyn Screen>,
}

impl Router {
    pub fn new(initial: Route, ctx: &SiteContext) -> Self {
        let current = resolve(initial, ctx.session.as_ref());
        log::info!("Starting at {:?}", current);
        Self {
            current,
            screen: current.screen(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn shows_scene(&self) -> bool {
        self.screen.shows_scene()
    }

    pub fn accepts_scroll(&self) -> bool {
        self.screen.accepts_scroll()
    }

    /// Switches to `route` after applying the guards
    pub fn navigate(&mut self, route: Route, ctx: &SiteContext) {
        let resolved = resolve(route, ctx.session.as_ref());
        if resolved != route {
            log::info!("{:?} requires sign-in, showing {:?}", route, resolved);
        }
        self.current = resolved;
        self.screen = resolved.screen();
        log::info!("Showing {} ({:?})", self.screen.name(), resolved);
    }

    /// Closes the pending notice, else the screen's topmost dialog
    ///
    /// Returns false when nothing was open.
    pub fn dismiss(&mut self, ctx: &mut SiteContext) -> bool {
        ctx.notices.dismiss().is_some() || self.screen.dismiss()
    }

    pub fn update(&mut self, dt: f32, ctx: &mut SiteContext) {
        if let Some(route) = self.screen.update(dt, ctx) {
            self.navigate(route, ctx);
        }
    }

    /// Draws the active screen and any pending notice
    pub fn render_ui(&mut self, ui: &Ui, ctx: &mut SiteContext) {
        let next = self.screen.render_ui(ui, ctx);
        ctx.notices.render(ui);
        if let Some(route) = next {
            self.navigate(route, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::portal::{MockDirectory, SessionStore};
    use std::sync::Mutex;

    /// Only one imgui context may exist at a time
    static IMGUI: Mutex<()> = Mutex::new(());

    /// Builds one headless imgui frame of `screen`
    fn render_headless(screen: &mut dyn Screen, ctx: &mut SiteContext) -> Option<Route> {
        let _guard = IMGUI.lock().unwrap_or_else(|e| e.into_inner());
        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        imgui.io_mut().display_size = [1280.0, 800.0];
        imgui.fonts().build_rgba32_texture();

        let ui = imgui.frame();
        let next = screen.render_ui(ui, ctx);
        ctx.notices.render(ui);
        imgui.render();
        next
    }

    fn user(email: &str, password: &str) -> User {
        MockDirectory::new().authenticate(email, password).unwrap()
    }

    #[test]
    fn dashboards_require_a_matching_role() {
        let admin = user("admin@chermiti.com", "admin123");
        let resident = user("john@example.com", "user123");

        assert_eq!(resolve(Route::AdminDashboard, None), Route::Login);
        assert_eq!(resolve(Route::ResidentDashboard, None), Route::Login);
        assert_eq!(
            resolve(Route::AdminDashboard, Some(&resident)),
            Route::Login
        );
        assert_eq!(
            resolve(Route::ResidentDashboard, Some(&admin)),
            Route::Login
        );
        assert_eq!(
            resolve(Route::AdminDashboard, Some(&admin)),
            Route::AdminDashboard
        );
        assert_eq!(
            resolve(Route::ResidentDashboard, Some(&resident)),
            Route::ResidentDashboard
        );
    }

    #[test]
    fn public_routes_are_never_redirected() {
        for route in [Route::Preloader, Route::Welcome, Route::Tour, Route::Login] {
            assert_eq!(resolve(route, None), route);
        }
    }

    #[test]
    fn login_lands_on_the_role_home() {
        assert_eq!(Route::home_for(Role::Admin), Route::AdminDashboard);
        assert_eq!(Route::home_for(Role::Resident), Route::ResidentDashboard);
        assert_eq!(Route::initial(true), Route::Tour);
        assert_eq!(Route::initial(false), Route::Preloader);
    }

    #[test]
    fn router_redirects_and_reports_scene_visibility() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        let mut router = Router::new(Route::Tour, &ctx);
        assert!(router.shows_scene());
        assert!(router.accepts_scroll());

        router.navigate(Route::AdminDashboard, &ctx);
        assert_eq!(router.current(), Route::Login);
        assert!(!router.shows_scene());

        ctx.sign_in(user("admin@chermiti.com", "admin123"));
        router.navigate(Route::AdminDashboard, &ctx);
        assert_eq!(router.current(), Route::AdminDashboard);
    }

    #[test]
    fn dismiss_closes_notices_before_reporting_nothing_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        let mut router = Router::new(Route::Tour, &ctx);
        ctx.notices.push("first");
        ctx.notices.push("second");

        assert!(router.dismiss(&mut ctx));
        assert_eq!(ctx.notices.current(), Some("second"));
        assert!(router.dismiss(&mut ctx));
        assert!(ctx.notices.is_empty());
        assert!(!router.dismiss(&mut ctx));
    }

    #[test]
    fn every_screen_builds_a_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir.path()));
        ctx.notices.push("Pending notice");

        let mut preloader = PreloaderScreen::new();
        preloader.update(0.5, &mut ctx);
        assert_eq!(render_headless(&mut preloader, &mut ctx), None);

        let mut tour = TourScreen::new();
        ctx.scroll.scroll_to(ctx.scroll.viewport_height() * 1.5);
        tour.update(1.0, &mut ctx);
        assert_eq!(render_headless(&mut tour, &mut ctx), None);

        for route in [Route::Welcome, Route::Login] {
            let mut screen = route.screen();
            assert_eq!(render_headless(screen.as_mut(), &mut ctx), None);
        }

        ctx.sign_in(user("john@example.com", "user123"));
        let mut resident = ResidentDashboardScreen::new();
        assert_eq!(render_headless(&mut resident, &mut ctx), None);

        ctx.sign_in(user("admin@chermiti.com", "admin123"));
        let mut admin = AdminDashboardScreen::new();
        assert_eq!(render_headless(&mut admin, &mut ctx), None);
    }
}
