use cgmath::{Matrix4, SquareMatrix};
use winit::event::{KeyEvent, MouseScrollDelta};

use crate::scroll::ScrollState;

use super::{scroll_camera::ScrollCamera, scroll_controller::ScrollController};

/// Maps OpenGL clip depth [-1, 1] onto wgpu's [0, 1]; arguments are column-major
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pairs the scroll-following camera with the input mapping that moves the page
pub struct CameraManager {
    pub camera: ScrollCamera,
    pub controller: ScrollController,
}

impl CameraManager {
    pub fn new(camera: ScrollCamera, controller: ScrollController) -> Self {
        Self { camera, controller }
    }

    pub fn process_wheel(&mut self, delta: &MouseScrollDelta, scroll: &mut ScrollState) {
        self.controller.process_wheel(delta, scroll);
    }

    /// Returns true if the key moved the page
    pub fn process_keyboard_event(&mut self, event: &KeyEvent, scroll: &mut ScrollState) -> bool {
        self.controller.process_key(event, scroll)
    }

    /// Advances the camera one frame toward the position for `fraction`
    pub fn update(&mut self, fraction: f32) {
        self.camera.follow(fraction);
        self.camera.update_view_proj();
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn gl_depth_range_maps_onto_zero_to_one() {
        for (gl_z, wgpu_z) in [(-1.0, 0.0), (0.0, 0.5), (1.0, 1.0)] {
            let clip = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.5, -0.25, gl_z, 1.0);
            assert!((clip.w - 1.0).abs() < 1e-6);
            assert!((clip.x - 0.5).abs() < 1e-6);
            assert!((clip.y + 0.25).abs() < 1e-6);
            assert!((clip.z - wgpu_z).abs() < 1e-6, "z {} mapped to {}", gl_z, clip.z);
        }
    }

    #[test]
    fn depth_conversion_keeps_perspective_divide() {
        // w of 2: depth halves after the divide, x and y untouched
        let clip = OPENGL_TO_WGPU_MATRIX * Vector4::new(1.0, 1.0, 2.0, 2.0);
        assert_eq!(clip.w, 2.0);
        assert_eq!(clip.x / clip.w, 0.5);
        assert_eq!(clip.z / clip.w, 1.0);
    }
}
