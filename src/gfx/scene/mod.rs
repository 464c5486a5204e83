//! # Scene Management Module
//!
//! Objects with meshes, materials and optional animations, gathered into a
//! [`Scene`] together with the camera and lighting.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{Animation, DrawObject, Mesh, Object, Transform};
pub use scene::Scene;
pub use vertex::Vertex3D;
