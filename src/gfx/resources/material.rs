//! Material system
//!
//! Materials live in a [`MaterialManager`] and objects reference them by ID.
//! Lookups that miss fall back to the default material.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

pub const DEFAULT_MATERIAL: &str = "default";

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub metallic: f32,
    pub roughness: f32,
    _padding: [f32; 2],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Layout shared by every material bind group (group 2)
pub fn material_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::uniform())
        .create(device, "Material Bind Group Layout")
}

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialProperties {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL, [0.8, 0.8, 0.8, 1.0], 0.0, 0.5)
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
            gpu: None,
        }
    }

    /// Builds a material from a `#rrggbb` hex colour
    pub fn from_hex(name: &str, hex: &str, metallic: f32, roughness: f32) -> Self {
        let rgb = hex_to_rgb(hex).unwrap_or([0.8, 0.8, 0.8]);
        Self::new(name, [rgb[0], rgb[1], rgb[2], 1.0], metallic, roughness)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_emission(mut self, hex: &str, intensity: f32) -> Self {
        self.emissive = hex_to_rgb(hex).unwrap_or([0.0, 0.0, 0.0]);
        self.emissive_intensity = intensity.max(0.0);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.base_color[3] < 1.0
    }

    pub fn properties(&self) -> MaterialProperties {
        MaterialProperties {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
        }
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
            metallic: self.metallic,
            roughness: self.roughness,
            _padding: [0.0; 2],
        }
    }

    /// Creates GPU resources on first use and uploads the current properties
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = self.uniform();
        let gpu = self.gpu.get_or_insert_with(|| {
            let ubo = MaterialUBO::new(device);
            let bind_group = BindGroupBuilder::new(layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group");
            MaterialGpu { ubo, bind_group }
        });
        gpu.ubo.update_content(queue, uniform);
    }

    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Parses `#rrggbb` (leading `#` optional)
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Centralized storage for all materials
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Material for an object, falling back to the default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or(&self.default_material)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        let rgb = hex_to_rgb("#2d3748").unwrap();
        assert!((rgb[0] - 45.0 / 255.0).abs() < 1e-6);
        assert!((rgb[2] - 72.0 / 255.0).abs() < 1e-6);
        assert_eq!(hex_to_rgb("ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
    }

    #[test]
    fn unknown_material_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::from_hex("glass", "#1a365d", 0.9, 0.1).with_alpha(0.8));

        let missing = "missing".to_string();
        assert_eq!(
            manager.get_material_for_object(Some(&missing)).name,
            DEFAULT_MATERIAL
        );
        assert_eq!(manager.get_material_for_object(None).name, DEFAULT_MATERIAL);

        let glass = "glass".to_string();
        assert!(manager.get_material_for_object(Some(&glass)).is_transparent());
    }
}
