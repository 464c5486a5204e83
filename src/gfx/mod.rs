//! # Graphics Module
//!
//! Everything that puts the tower on screen.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Scroll-driven camera that spirals up the tower
//! - **Geometry** ([`geometry`]) - Procedural boxes, spheres, planes and cylinders
//! - **Rendering Pipeline** ([`rendering`]) - Sky gradient, shadow-mapped lighting, fog and blending
//! - **Scene Management** ([`scene`]) - Objects, animations and the scene container
//! - **Resource Management** ([`resources`]) - Materials, global uniforms and depth targets
//!
//! ## Usage
//!
//! The graphics system is driven by the application loop through [`RenderEngine`]
//! and [`Scene`]:
//!
//! ```no_run
//! use chermiti::gfx::{RenderEngine, scene::Scene};
//!
//! // The render engine is created once the window exists
//! // let render_engine = RenderEngine::new(window, width, height, true).await?;
//!
//! // The scene comes from the world builder
//! // let scene = chermiti::world::build_world(&config, theme);
//! ```
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::ScrollCamera;
pub use rendering::render_engine::RenderEngine;
