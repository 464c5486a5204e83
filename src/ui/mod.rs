//! # User Interface Module
//!
//! Everything drawn with Dear ImGui on top of the scene: the intro screens,
//! the scrolling tour with its dialogs and the mock portals.
//!
//! ## Architecture
//!
//! - [`UiManager`] handles ImGui integration with winit and wgpu
//! - [`SiteContext`] holds state shared across screens (theme, session, page)
//! - [`Router`] owns the active [`Screen`] and guards the dashboard routes
//! - [`NoticeQueue`] shows confirmation messages one at a time
//!
//! Screens never touch the renderer. They report navigation by returning a
//! [`Route`], and the app reads `SiteContext` to drive the camera and theme.

pub mod context;
pub mod manager;
pub mod notice;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use context::SiteContext;
pub use manager::UiManager;
pub use notice::NoticeQueue;
pub use screens::{Route, Router, Screen};
pub use theme::{Palette, Theme};
