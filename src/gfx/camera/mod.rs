pub mod camera_utils;
pub mod scroll_camera;
pub mod scroll_controller;

// Re-export main types
pub use camera_utils::{CameraManager, CameraUniform};
pub use scroll_camera::{CameraPath, CameraTarget, ScrollCamera};
pub use scroll_controller::ScrollController;
