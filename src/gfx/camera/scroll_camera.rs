//! Camera that spirals up the tower as the page scrolls

use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX};
use crate::config::CameraConfig;

/// Where the camera should be for a given scroll fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub eye: Vector3<f32>,
    pub look_at: Vector3<f32>,
}

/// Pure mapping from scroll fraction to camera placement
///
/// The eye orbits the tower `orbits` times over the page while the radius
/// shrinks and the height climbs. The look-at point rises along the Y axis.
#[derive(Debug, Clone)]
pub struct CameraPath {
    pub orbits: f32,
    pub radius: (f32, f32),
    pub height: (f32, f32),
    pub look: (f32, f32),
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraPath {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            orbits: config.orbits,
            radius: (config.radius_start, config.radius_end),
            height: (config.height_start, config.height_end),
            look: (config.look_start, config.look_end),
        }
    }

    pub fn target(&self, fraction: f32) -> CameraTarget {
        let t = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let angle = t * self.orbits * std::f32::consts::TAU;
        let radius = lerp(self.radius.0, self.radius.1, t);
        let height = lerp(self.height.0, self.height.1, t);

        CameraTarget {
            eye: Vector3::new(radius * angle.sin(), height, radius * angle.cos()),
            look_at: Vector3::new(0.0, lerp(self.look.0, self.look.1, t), 0.0),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Debug, Clone)]
pub struct ScrollCamera {
    pub path: CameraPath,
    pub eye: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Per-frame approach factor toward the path target
    pub damping: f32,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for ScrollCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl ScrollCamera {
    /// Creates a camera resting at the top-of-page position
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let path = CameraPath::from_config(config);
        let start = path.target(0.0);
        let mut camera = Self {
            path,
            eye: start.eye,
            look_at: start.look_at,
            up: Vector3::unit_y(),
            damping: config.damping.clamp(f32::EPSILON, 1.0),
            aspect,
            fovy: Deg(config.fov_degrees.clamp(10.0, 120.0)).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    /// Moves the eye a `damping` step toward the target for `fraction`
    pub fn follow(&mut self, fraction: f32) {
        let target = self.path.target(fraction);
        self.eye += (target.eye - self.eye) * self.damping;
        self.look_at = target.look_at;
    }

    /// Jumps straight to the target for `fraction`
    pub fn snap_to(&mut self, fraction: f32) {
        let target = self.path.target(fraction);
        self.eye = target.eye;
        self.look_at = target.look_at;
    }

    pub fn distance_to(&self, fraction: f32) -> f32 {
        (self.path.target(fraction).eye - self.eye).magnitude()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.look_at),
            self.up,
        )
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_starts_and_ends_at_configured_points() {
        let path = CameraPath::default();

        let start = path.target(0.0);
        assert!((start.eye - Vector3::new(0.0, 2.0, 15.0)).magnitude() < 1e-5);
        assert_eq!(start.look_at, Vector3::new(0.0, 0.0, 0.0));

        // Two full orbits end where the first one began, only closer and higher
        let end = path.target(1.0);
        assert!((end.eye - Vector3::new(0.0, 27.0, 7.0)).magnitude() < 1e-4);
        assert_eq!(end.look_at, Vector3::new(0.0, 12.0, 0.0));
    }

    #[test]
    fn path_clamps_out_of_range_fractions() {
        let path = CameraPath::default();
        assert_eq!(path.target(-0.5), path.target(0.0));
        assert_eq!(path.target(1.5), path.target(1.0));
        assert_eq!(path.target(f32::NAN), path.target(0.0));
    }

    #[test]
    fn path_is_continuous_and_bounded() {
        let path = CameraPath::default();
        let steps = 4000;
        let mut previous = path.target(0.0);
        for i in 1..=steps {
            let target = path.target(i as f32 / steps as f32);
            assert!((target.eye - previous.eye).magnitude() < 0.1);

            let horizontal = (target.eye.x * target.eye.x + target.eye.z * target.eye.z).sqrt();
            assert!((7.0 - 1e-4..=15.0 + 1e-4).contains(&horizontal));
            assert!((2.0..=27.0).contains(&target.eye.y));
            previous = target;
        }
    }

    #[test]
    fn follow_converges_without_overshoot() {
        let mut camera = ScrollCamera::new(&CameraConfig::default(), 1.6);
        let fraction = 0.63;

        let mut previous = camera.distance_to(fraction);
        for _ in 0..300 {
            camera.follow(fraction);
            let distance = camera.distance_to(fraction);
            assert!(distance <= previous);
            previous = distance;
        }
        assert!(previous < 0.01);
    }

    #[test]
    fn follow_looks_at_fraction_height() {
        let mut camera = ScrollCamera::new(&CameraConfig::default(), 1.6);
        camera.follow(0.5);
        assert!((camera.look_at.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_tracks_eye() {
        let mut camera = ScrollCamera::new(&CameraConfig::default(), 1.6);
        camera.snap_to(1.0);
        camera.update_view_proj();
        assert!((camera.uniform.view_position[1] - 27.0).abs() < 1e-5);
        assert_eq!(camera.uniform.view_position[3], 1.0);
    }
}
