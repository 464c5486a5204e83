// src/lib.rs
//! Chermiti Building showcase
//!
//! A scroll-driven 3D tour of a residential tower built on wgpu and winit,
//! with an ImGui overlay for the page content, dialogs and resident portals.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod portal;
pub mod scroll;
pub mod ui;
pub mod wgpu_utils;
pub mod world;

// Re-export main types for convenience
pub use app::SiteApp;
pub use config::SiteConfig;
pub use error::{Result, SiteError};
