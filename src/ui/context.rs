//! State shared by every screen
//!
//! Screens are recreated on each route change; anything that must survive a
//! navigation (theme, session, page scroll, admin edits) lives here.

use crate::config::SiteConfig;
use crate::portal::{AdminBoard, MockDirectory, ResidentFeed, Role, SessionStore, User};
use crate::scroll::{FadeTransition, PageLayout, ScrollState, SectionId, VisibilityObserver};

use super::notice::NoticeQueue;
use super::theme::Theme;

pub struct SiteContext {
    pub config: SiteConfig,
    pub theme: Theme,
    pub session: Option<User>,
    pub store: SessionStore,
    pub directory: MockDirectory,
    pub notices: NoticeQueue,
    pub layout: PageLayout,
    pub scroll: ScrollState,
    pub observer: VisibilityObserver,
    /// One fade per observed section, indexed like the observer
    pub fades: Vec<FadeTransition>,
    pub feed: ResidentFeed,
    pub board: AdminBoard,
}

impl SiteContext {
    /// Builds the context and restores any stored session
    pub fn new(config: SiteConfig, store: SessionStore) -> Self {
        let layout = PageLayout::showcase();
        let viewport = config.window.height as f32;
        let scroll = ScrollState::new(
            viewport,
            layout.content_height(viewport),
            config.scroll.smooth_factor,
        );
        let observer = VisibilityObserver::new(config.scroll.visibility_threshold);
        let fades = vec![FadeTransition::default(); layout.observed_count()];

        let session = store.load();
        if let Some(user) = &session {
            log::info!("Restored session for {}", user.email);
        }

        Self {
            theme: config.site.theme,
            session,
            store,
            directory: MockDirectory::new(),
            notices: NoticeQueue::new(),
            layout,
            scroll,
            observer,
            fades,
            feed: ResidentFeed::demo(),
            board: AdminBoard::demo(),
            config,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            log::info!("Theme: {:?}", theme);
            self.theme = theme;
        }
    }

    /// Stores the signed-in user; a failed write keeps the in-memory session
    pub fn sign_in(&mut self, user: User) {
        if let Err(e) = self.store.save(&user) {
            log::error!("Failed to persist session: {}", e);
        }
        self.session = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.session.take() {
            log::info!("{} logged out", user.email);
        }
        if let Err(e) = self.store.clear() {
            log::error!("Failed to clear session: {}", e);
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|user| user.role)
    }

    /// Advances scrolling and the section fades by one frame
    pub fn advance_page(&mut self, dt: f32) {
        self.scroll.update();
        for change in self.observer.observe(&self.layout, &self.scroll) {
            if let Some(fade) = self.fades.get_mut(change.index) {
                fade.set_visible(change.visible);
            }
        }
        for fade in &mut self.fades {
            fade.update(dt);
        }
    }

    /// Opacity of the card for the section at `position` in the layout
    pub fn section_opacity(&self, position: usize) -> f32 {
        self.layout
            .sections()
            .get(position)
            .and_then(|section| section.observed)
            .and_then(|index| self.fades.get(index))
            .map_or(1.0, FadeTransition::opacity)
    }

    pub fn fade_for(&self, position: usize) -> Option<&FadeTransition> {
        self.layout
            .sections()
            .get(position)
            .and_then(|section| section.observed)
            .and_then(|index| self.fades.get(index))
    }

    /// Starts a smooth scroll to the top of a section
    pub fn scroll_to_section(&mut self, id: SectionId) {
        if let Some(offset) = self.layout.offset_of(id, self.scroll.viewport_height()) {
            self.scroll.smooth_scroll_to(offset);
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.smooth_scroll_to(0.0);
    }

    /// Keeps the page one viewport per section after a window resize
    pub fn resize(&mut self, height: u32) {
        let viewport = height as f32;
        if viewport <= 0.0 {
            return;
        }
        self.scroll
            .resize(viewport, self.layout.content_height(viewport));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &std::path::Path) -> SiteContext {
        SiteContext::new(SiteConfig::default(), SessionStore::in_dir(dir))
    }

    #[test]
    fn sign_in_persists_and_sign_out_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        assert_eq!(ctx.role(), None);

        let user = ctx
            .directory
            .authenticate("john@example.com", "user123")
            .unwrap();
        ctx.sign_in(user.clone());
        assert_eq!(ctx.role(), Some(Role::Resident));

        let restored = context(dir.path());
        assert_eq!(restored.session, Some(user));

        ctx.sign_out();
        assert_eq!(ctx.session, None);
        assert_eq!(context(dir.path()).session, None);
    }

    #[test]
    fn scrolling_into_a_section_fades_its_card_in() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        let entrance = ctx.layout.index_of(SectionId::Entrance).unwrap();
        assert_eq!(ctx.section_opacity(entrance), 0.0);
        assert_eq!(ctx.section_opacity(0), 1.0);

        let offset = ctx
            .layout
            .offset_of(SectionId::Entrance, ctx.scroll.viewport_height())
            .unwrap();
        ctx.scroll.scroll_to(offset);
        for _ in 0..20 {
            ctx.advance_page(0.1);
        }
        assert_eq!(ctx.section_opacity(entrance), 1.0);
    }

    #[test]
    fn resize_keeps_one_viewport_per_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.resize(1000);
        assert_eq!(ctx.scroll.content_height(), 6000.0);
        ctx.resize(0);
        assert_eq!(ctx.scroll.viewport_height(), 1000.0);
    }
}
