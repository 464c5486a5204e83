use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::{
        global_bindings::SceneLighting,
        material::{Material, MaterialManager},
    },
};
use crate::wgpu_utils::BindGroupLayoutWithDesc;

use super::object::Object;

/// Main scene containing objects, materials, lighting and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lighting: SceneLighting,
    elapsed: f32,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting: SceneLighting::default(),
            elapsed: 0.0,
        }
    }

    /// Moves the camera one step along the scroll path
    pub fn update(&mut self, scroll_fraction: f32) {
        self.camera_manager.update(scroll_fraction);
    }

    /// Recomputes every object's world transform for `elapsed` seconds
    pub fn animate(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        for object in &mut self.objects {
            object.animate(elapsed);
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Adds an object; its transparency follows the assigned material
    pub fn add_object(&mut self, mut object: Object) {
        object.transparent = self
            .material_manager
            .get_material_for_object(object.get_material_id())
            .is_transparent();
        self.objects.push(object);
    }

    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Objects named `prefix` or `prefix-*`
    pub fn objects_named<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.objects.iter().filter(move |o| {
            o.name == prefix
                || o
                    .name
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('-'))
        })
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &BindGroupLayoutWithDesc,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        for object in &mut self.objects {
            object.animate(self.elapsed);
            object.init_gpu_resources(device, transform_layout);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
        log::info!(
            "Scene uploaded: {} objects, {} triangles",
            self.objects.len(),
            self.get_statistics().total_triangles
        );
    }

    /// Syncs material changes (e.g. after a theme switch) to the GPU
    pub fn update_materials(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        material_layout: &BindGroupLayoutWithDesc,
    ) {
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
    }

    /// Writes every animated object's transform to the GPU
    pub fn update_all_transforms(&self, queue: &wgpu::Queue) {
        for object in self.objects.iter().filter(|o| o.animation.is_some()) {
            object.update_transform(queue);
        }
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles = self
            .objects
            .iter()
            .flat_map(|obj| obj.meshes.iter())
            .map(|m| m.triangle_count())
            .sum();
        let total_vertices = self
            .objects
            .iter()
            .flat_map(|obj| obj.meshes.iter())
            .map(|m| m.vertex_count())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: usize,
}
