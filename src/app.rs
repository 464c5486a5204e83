//! Application shell
//!
//! Owns the window, renderer, UI and scene and drives them from the winit
//! event loop.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::gfx::{rendering::RenderEngine, scene::Scene};
use crate::portal::SessionStore;
use crate::ui::{Route, Router, SiteContext, Theme, UiManager};
use crate::world;

/// Longest frame step fed to timers, so a stalled frame does not skip animations
const MAX_FRAME_TIME: f32 = 0.1;

pub struct SiteApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    /// Theme the scene materials were last built for
    scene_theme: Theme,
    ctx: SiteContext,
    router: Router,
    started: Instant,
    last_frame: Instant,
    /// Error that stopped the event loop
    fatal: Option<SiteError>,
}

impl SiteApp {
    /// Builds the scene and restores the session; the window opens in [`SiteApp::run`]
    pub fn new(config: SiteConfig, store: SessionStore) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let theme = config.site.theme;
        let scene = world::build_world(&config, theme);
        let ctx = SiteContext::new(config, store);
        let router = Router::new(Route::initial(ctx.config.site.skip_intro), &ctx);

        Ok(Self {
            event_loop,
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                scene_theme: theme,
                ctx,
                router,
                started: Instant::now(),
                last_frame: Instant::now(),
                fatal: None,
            },
        })
    }

    /// Runs the event loop until the window closes
    pub fn run(self) -> Result<()> {
        let SiteApp {
            event_loop,
            mut app_state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut app_state)?;

        match app_state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.ctx.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| SiteError::Renderer(format!("window creation: {e}")))?,
        );

        let (width, height) = window.inner_size().into();
        let vsync = window_config.vsync;
        let target = window.clone();
        let renderer =
            pollster::block_on(async move { RenderEngine::new(target, width, height, vsync).await })?;
        renderer.prepare_scene(&mut self.scene);

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
            self.ctx.theme,
        );

        self.ctx.resize(height);
        let camera = &mut self.scene.camera_manager.camera;
        camera.resize_projection(width, height);
        camera.snap_to(self.ctx.scroll.fraction());
        camera.update_view_proj();

        log::info!("Window ready at {}x{}", width, height);
        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.ui_manager = Some(ui_manager);
        Ok(())
    }

    /// Whether wheel and page keys should move the page this frame
    fn page_scrollable(&self) -> bool {
        self.router.accepts_scroll() && self.ctx.notices.is_empty()
    }

    /// Escape closes the topmost notice or dialog; with nothing open it quits
    fn handle_escape(&mut self, event_loop: &ActiveEventLoop) {
        if self.router.dismiss(&mut self.ctx) {
            return;
        }
        log::info!("Escape pressed, exiting");
        event_loop.exit();
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if self.page_scrollable() {
            self.scene
                .camera_manager
                .process_keyboard_event(event, &mut self.ctx.scroll);
        }
    }

    /// Syncs the scene, renderer and overlay to the current theme
    fn sync_theme(&mut self) {
        let theme = self.ctx.theme;
        if theme == self.scene_theme {
            return;
        }
        world::apply_theme(&mut self.scene, theme);
        if let Some(render_engine) = self.render_engine.as_ref() {
            render_engine.refresh_materials(&mut self.scene);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.set_theme(theme);
        }
        self.scene_theme = theme;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_TIME);
        self.last_frame = now;

        self.router.update(dt, &mut self.ctx);
        self.sync_theme();

        let show_scene = self.router.shows_scene();
        if show_scene {
            self.scene.update(self.ctx.scroll.fraction());
            self.scene.animate(self.started.elapsed().as_secs_f32());
        }

        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.clone(),
        ) else {
            return;
        };

        render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lighting);

        let clear_color = self.ctx.theme.palette().background;
        let router = &mut self.router;
        let ctx = &mut self.ctx;
        let result = render_engine.render_frame(
            &self.scene,
            show_scene,
            clear_color,
            |device, queue, encoder, color_attachment| {
                ui_manager.draw(device, queue, encoder, &window, color_attachment, |ui| {
                    router.render_ui(ui, ctx);
                })
            },
        );

        match result {
            Ok(()) => {}
            Err(SiteError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                log::error!("Surface out of memory, exiting");
                self.fatal = Some(SiteError::Surface(wgpu::SurfaceError::OutOfMemory));
                event_loop.exit();
            }
            Err(e) => log::error!("Frame failed: {}", e),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to start renderer: {}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        let captured = match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                let ui_event: Event<()> = Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                ui_manager.handle_input(&window, &ui_event)
            }
            None => false,
        };

        match event {
            // Section cards are ImGui windows, so the wheel scrolls the page
            // even while one of them is hovered.
            WindowEvent::MouseWheel { delta, .. } => {
                if self.page_scrollable() {
                    self.scene
                        .camera_manager
                        .process_wheel(&delta, &mut self.ctx.scroll);
                }
            }
            // Escape reaches the app even while a dialog's text field has focus
            WindowEvent::KeyboardInput { event, .. } => {
                if is_escape_press(&event) {
                    self.handle_escape(event_loop);
                } else if !captured {
                    self.handle_key(&event);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.ctx.resize(height);
            }
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        if captured {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}
