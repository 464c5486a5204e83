use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::gfx::{geometry::GeometryData, resources::material::MaterialId};
use crate::wgpu_utils::BindGroupLayoutWithDesc;

use super::vertex::Vertex3D;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::new(vertices, indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    fn upload(&mut self, device: &wgpu::Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Translation, Euler rotation (radians, applied Y then X then Z) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Time-driven motion applied on top of an object's base transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Rotation about the world Y axis at `speed` rad/s
    Spin { speed: f32 },
    /// Rotation about the world Y axis of `sin(t * frequency) * amplitude`
    Sway { frequency: f32, amplitude: f32 },
    /// Vertical bobbing around `base_height` plus a tumble about the local X axis
    Bob {
        phase: f32,
        frequency: f32,
        base_height: f32,
        amplitude: f32,
        spin: f32,
    },
}

impl Animation {
    /// World transform at `elapsed` seconds
    pub fn apply(&self, base: &Transform, elapsed: f32) -> Matrix4<f32> {
        match *self {
            Animation::Spin { speed } => {
                Matrix4::from_angle_y(Rad(elapsed * speed)) * base.matrix()
            }
            Animation::Sway {
                frequency,
                amplitude,
            } => Matrix4::from_angle_y(Rad((elapsed * frequency).sin() * amplitude)) * base.matrix(),
            Animation::Bob {
                phase,
                frequency,
                base_height,
                amplitude,
                spin,
            } => {
                let mut moved = *base;
                moved.translation.y = (elapsed * frequency + phase).sin() * amplitude + base_height;
                moved.rotation.x = elapsed * spin + phase;
                moved.matrix()
            }
        }
    }
}

pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub base_transform: Transform,
    /// World matrix, recomputed by [`Object::animate`]
    pub transform: Matrix4<f32>,
    pub animation: Option<Animation>,
    pub material_id: Option<MaterialId>,
    pub visible: bool,
    pub transparent: bool,
    pub casts_shadow: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            base_transform: Transform::default(),
            transform: Matrix4::identity(),
            animation: None,
            material_id: None,
            visible: true,
            transparent: false,
            casts_shadow: true,
            gpu_resources: None,
        }
    }

    pub fn from_geometry(name: &str, geometry: &GeometryData) -> Self {
        Self::new(name, vec![Mesh::from_geometry(geometry)])
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.base_transform = transform;
        self.transform = transform.matrix();
        self
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn without_shadow(mut self) -> Self {
        self.casts_shadow = false;
        self
    }

    pub fn get_material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    pub fn animate(&mut self, elapsed: f32) {
        self.transform = match &self.animation {
            Some(animation) => animation.apply(&self.base_transform, elapsed),
            None => self.base_transform.matrix(),
        };
    }

    /// Syncs the world matrix to the GPU if resources exist
    pub fn update_transform(&self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let transform_data: &[f32; 16] = self.transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        for mesh in &mut self.meshes {
            mesh.upload(device, &self.name);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Transform", self.name)),
            contents: bytemuck::cast_slice(transform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group = crate::wgpu_utils::BindGroupBuilder::new(layout)
            .resource(transform_buffer.as_entire_binding())
            .create(device, "Transform Bind Group");

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    /// Binds the object's transform at group 1 and draws all of its meshes
    fn draw_object(&mut self, object: &'b Object) {
        let Some(transform_bind_group) = object.get_transform_bind_group() else {
            return;
        };
        self.set_bind_group(1, transform_bind_group, &[]);
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn spin_orbits_about_world_origin() {
        let base = Transform::at(40.0, 15.0, 0.0);
        let spin = Animation::Spin { speed: 0.02 };
        let quarter_turn = std::f32::consts::FRAC_PI_2 / 0.02;

        let moved = spin.apply(&base, quarter_turn).w.truncate();
        assert!((moved - Vector3::new(0.0, 15.0, -40.0)).magnitude() < 1e-3);
    }

    #[test]
    fn sway_stays_within_amplitude() {
        let base = Transform::at(0.0, 3.0, 4.0);
        let sway = Animation::Sway {
            frequency: 0.05,
            amplitude: 0.005,
        };
        for step in 0..100 {
            let moved = sway.apply(&base, step as f32 * 3.0).w.truncate();
            let angle = moved.x.atan2(moved.z).abs();
            assert!(angle <= 0.005 + 1e-5);
        }
    }

    #[test]
    fn bob_oscillates_around_base_height() {
        let base = Transform::at(3.0, 0.0, -2.0);
        let bob = Animation::Bob {
            phase: 1.0,
            frequency: 0.5,
            base_height: 10.0,
            amplitude: 2.0,
            spin: 0.3,
        };
        for step in 0..50 {
            let y = bob.apply(&base, step as f32 * 0.7).w.y;
            assert!((8.0 - 1e-4..=12.0 + 1e-4).contains(&y));
        }
        let at_zero = bob.apply(&base, 0.0).w;
        assert!((at_zero.y - (1.0f32.sin() * 2.0 + 10.0)).abs() < 1e-5);
        assert_eq!((at_zero.x, at_zero.z), (3.0, -2.0));
    }

    #[test]
    fn animate_without_animation_uses_base_transform() {
        let mut object = Object::new("static", Vec::new()).with_transform(Transform::at(1.0, 2.0, 3.0));
        object.animate(12.0);
        assert_eq!(object.translation(), Vector3::new(1.0, 2.0, 3.0));
    }
}
