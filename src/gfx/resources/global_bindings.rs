//! Global uniform bindings for camera and scene data
//!
//! One uniform buffer at group 0 carries everything that is shared by every
//! draw: camera, sun (with its shadow matrix), ambient and point light, fog
//! and the sky gradient.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

use crate::{
    gfx::camera::camera_utils::{CameraUniform, OPENGL_TO_WGPU_MATRIX},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Point the shadow camera is centred on
const SHADOW_FOCUS: [f32; 3] = [0.0, 12.0, 0.0];

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in the shaders. Every field is a vec4 or
/// mat4 so the Rust and WGSL layouts agree without manual padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    /// xyz: unit vector toward the sun, w: intensity
    sun_direction: [f32; 4],
    sun_color: [f32; 4],
    /// rgb: colour, a: intensity
    ambient: [f32; 4],
    /// xyz: position, w: intensity
    point_position: [f32; 4],
    point_color: [f32; 4],
    fog_color: [f32; 4],
    /// x: start, y: end
    fog_range: [f32; 4],
    sky_top: [f32; 4],
    sky_horizon: [f32; 4],
}

/// Lights, fog and sky for one frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneLighting {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub sun_position: [f32; 3],
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub point_position: [f32; 3],
    pub point_color: [f32; 3],
    pub point_intensity: f32,
    pub fog_color: [f32; 3],
    pub fog_start: f32,
    pub fog_end: f32,
    pub sky_top: [f32; 3],
    pub sky_horizon: [f32; 3],
    /// Half-size of the orthographic shadow frustum
    pub shadow_extent: f32,
    pub shadow_far: f32,
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.4,
            sun_position: [10.0, 20.0, 5.0],
            sun_color: [1.0, 1.0, 1.0],
            sun_intensity: 1.0,
            point_position: [-10.0, 10.0, -10.0],
            point_color: [0.4, 0.5, 0.95],
            point_intensity: 0.3,
            fog_color: [0.102, 0.102, 0.180],
            fog_start: 30.0,
            fog_end: 100.0,
            sky_top: [0.02, 0.03, 0.09],
            sky_horizon: [0.102, 0.102, 0.180],
            shadow_extent: 30.0,
            shadow_far: 50.0,
        }
    }
}

impl SceneLighting {
    /// View-projection of the sun's shadow camera
    ///
    /// The camera sits on the sun direction, half the shadow depth away from
    /// the middle of the tower, so the whole building fits its depth range.
    pub fn light_view_proj(&self) -> Matrix4<f32> {
        let focus = Point3::from(SHADOW_FOCUS);
        let eye = focus + self.sun_direction() * (self.shadow_far * 0.5);
        let view = Matrix4::look_at_rh(eye, focus, Vector3::unit_y());
        let e = self.shadow_extent;
        let proj = cgmath::ortho(-e, e, -e, e, 0.5, self.shadow_far);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Unit vector from the scene toward the sun
    pub fn sun_direction(&self) -> Vector3<f32> {
        let direction = Vector3::from(self.sun_position);
        if direction.magnitude2() <= f32::EPSILON {
            return Vector3::unit_y();
        }
        direction.normalize()
    }

    fn content(&self, camera: &CameraUniform) -> GlobalUBOContent {
        let sun = self.sun_direction();
        let vec4 = |rgb: [f32; 3], w: f32| [rgb[0], rgb[1], rgb[2], w];

        GlobalUBOContent {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: self.light_view_proj().into(),
            sun_direction: [sun.x, sun.y, sun.z, self.sun_intensity],
            sun_color: vec4(self.sun_color, 1.0),
            ambient: vec4(self.ambient_color, self.ambient_intensity),
            point_position: vec4(self.point_position, self.point_intensity),
            point_color: vec4(self.point_color, 1.0),
            fog_color: vec4(self.fog_color, 1.0),
            fog_range: [self.fog_start, self.fog_end, 0.0, 0.0],
            sky_top: vec4(self.sky_top, 1.0),
            sky_horizon: vec4(self.sky_horizon, 1.0),
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes camera and lighting into the global uniform buffer
///
/// Called once per frame before any pass is recorded.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &SceneLighting,
) {
    ubo.update_content(queue, lighting.content(&camera));
}

/// Bind group layout and bind group for the global uniforms (group 0)
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn uniform_layout_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 288);
    }

    #[test]
    fn shadow_frustum_contains_the_tower() {
        let lighting = SceneLighting::default();
        let light = lighting.light_view_proj();
        for point in [
            Vector4::new(0.0, 0.0, 0.0, 1.0),
            Vector4::new(6.0, -0.5, 5.0, 1.0),
            Vector4::new(0.0, 30.0, 0.0, 1.0),
            Vector4::new(-6.0, 1.0, -5.0, 1.0),
        ] {
            let clip = light * point;
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{ndc:?} outside");
            assert!((0.0..=1.0).contains(&ndc.z), "{ndc:?} clipped");
        }
    }
}
