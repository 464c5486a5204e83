//! WGPU-based rendering engine for the showcase
//!
//! Owns the surface, device and every pipeline. A frame is recorded as a
//! shadow pass from the sun, then one main pass drawing the sky gradient,
//! opaque geometry and blended geometry (back to front), then the UI overlay.

use cgmath::InnerSpace;
use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::error::{Result, SiteError};
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, SceneLighting},
        material::material_bind_group_layout,
        texture_resource::TextureResource,
    },
    scene::{
        object::{DrawObject, Object},
        scene::Scene,
    },
};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADOW_MAP_SIZE: u32 = 2048;

const SKY_PIPELINE: &str = "Sky";
const SHADOW_PIPELINE: &str = "Shadow";
const SCENE_PIPELINE: &str = "Scene";
const TRANSPARENT_PIPELINE: &str = "SceneTransparent";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    transform_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Fails if no adapter or device is available or the surface reports no
    /// usable format.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| SiteError::Renderer(format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SiteError::Renderer(format!("adapter: {e}")))?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| SiteError::Renderer(format!("device: {e}")))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| SiteError::Renderer("surface has no supported formats".into()))?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let shadow_map = TextureResource::create_shadow_map(&device, SHADOW_MAP_SIZE);

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(&device, "Transform Bind Group Layout");
        let material_layout = material_bind_group_layout(&device);
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::comparison_sampler())
            .create(&device, "Shadow Bind Group Layout");

        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow.wgsl"));
        pipeline_manager.load_shader("sky", include_str!("sky.wgsl"));

        let globals = global_bindings.bind_group_layout().clone();
        let depth = TextureResource::DEPTH_FORMAT;

        pipeline_manager.register_pipeline(
            SKY_PIPELINE,
            PipelineConfig::default()
                .with_label("SKY")
                .with_shader("sky")
                .with_bind_group_layouts(vec![globals.clone()])
                .with_color_target(format, Some(wgpu::BlendState::REPLACE))
                .with_depth_stencil(depth)
                .with_depth_read_only()
                .with_depth_compare(wgpu::CompareFunction::Always)
                .with_cull_mode(None)
                .with_no_vertex_buffers(),
        );

        // No culling so thin and open geometry still casts
        pipeline_manager.register_pipeline(
            SHADOW_PIPELINE,
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_bind_group_layouts(vec![
                    globals.clone(),
                    transform_layout.layout.clone(),
                ])
                .with_depth_stencil(depth)
                .with_depth_bias(wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                })
                .with_cull_mode(None)
                .with_vertex_only(),
        );

        let scene_layouts = vec![
            globals,
            transform_layout.layout.clone(),
            material_layout.layout.clone(),
            shadow_layout.layout.clone(),
        ];

        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE")
                .with_shader("scene")
                .with_bind_group_layouts(scene_layouts.clone())
                .with_color_target(format, Some(wgpu::BlendState::REPLACE))
                .with_depth_stencil(depth),
        );

        // Glass, clouds and leaves: blended, depth-tested, both faces
        pipeline_manager.register_pipeline(
            TRANSPARENT_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE TRANSPARENT")
                .with_shader("scene")
                .with_bind_group_layouts(scene_layouts)
                .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING))
                .with_depth_stencil(depth)
                .with_depth_read_only()
                .with_cull_mode(None),
        );

        pipeline_manager.create_all_pipelines()?;

        log::info!(
            "Render engine ready: {}x{} {:?}, vsync {}",
            config.width,
            config.height,
            format,
            vsync
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            transform_layout,
            material_layout,
            shadow_map,
            shadow_bind_group,
        })
    }

    /// Uploads GPU buffers for every object and material in `scene`
    pub fn prepare_scene(&self, scene: &mut Scene) {
        scene.init_gpu_resources(
            &self.device,
            &self.queue,
            &self.transform_layout,
            &self.material_layout,
        );
    }

    /// Re-uploads material properties, e.g. after a theme change
    pub fn refresh_materials(&self, scene: &mut Scene) {
        scene.update_materials(&self.device, &self.queue, &self.material_layout);
    }

    /// Renders one frame
    ///
    /// With `show_scene` false only the clear colour and the UI are drawn.
    /// A lost or outdated surface is reconfigured and the frame skipped; a
    /// timeout just skips the frame.
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        show_scene: bool,
        clear_color: [f32; 3],
        ui_callback: F,
    ) -> Result<()>
    where
        F: FnOnce(
            &wgpu::Device,
            &wgpu::Queue,
            &mut wgpu::CommandEncoder,
            &wgpu::TextureView,
        ) -> Result<()>,
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if show_scene {
            scene.update_all_transforms(&self.queue);
            self.record_shadow_pass(&mut encoder, scene);
        }

        // Main pass: sky, opaque, transparent
        {
            let [r, g, b] = clear_color.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if show_scene {
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                if let Some(sky) = self.pipeline_manager.pipeline(SKY_PIPELINE) {
                    render_pass.set_pipeline(sky);
                    render_pass.draw(0..3, 0..1);
                }

                render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

                if let Some(pipeline) = self.pipeline_manager.pipeline(SCENE_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    for object in scene.objects.iter().filter(|o| o.visible && !o.transparent) {
                        draw_with_material(&mut render_pass, scene, object);
                    }
                }

                if let Some(pipeline) = self.pipeline_manager.pipeline(TRANSPARENT_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    for object in back_to_front(scene) {
                        draw_with_material(&mut render_pass, scene, object);
                    }
                }
            }
        }

        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        )?;

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn record_shadow_pass(&self, encoder: &mut wgpu::CommandEncoder, scene: &Scene) {
        let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Depth Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(shadow_pipeline) = self.pipeline_manager.pipeline(SHADOW_PIPELINE) else {
            log::warn!("Shadow pipeline missing, skipping shadow pass");
            return;
        };
        shadow_pass.set_pipeline(shadow_pipeline);
        shadow_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

        for object in scene.objects.iter().filter(|o| o.visible && o.casts_shadow) {
            shadow_pass.draw_object(object);
        }
    }

    /// Writes the camera and lighting uniforms for the next frame
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &SceneLighting) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lighting);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}

fn draw_with_material<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    scene: &'a Scene,
    object: &'a Object,
) {
    let material = scene.get_material_for_object(object);
    match material.get_bind_group() {
        Some(material_bind_group) => {
            render_pass.set_bind_group(2, material_bind_group, &[]);
            render_pass.draw_object(object);
        }
        None => log::trace!(
            "Skipping '{}': material '{}' has no GPU resources",
            object.name,
            material.name
        ),
    }
}

/// Visible blended objects, farthest from the camera first
fn back_to_front(scene: &Scene) -> Vec<&Object> {
    let eye = scene.camera_manager.camera.eye;
    let distance = |o: &Object| (o.translation() - eye).magnitude2();
    let mut objects: Vec<_> = scene
        .objects
        .iter()
        .filter(|o| o.visible && o.transparent)
        .collect();
    objects.sort_by(|a, b| distance(b).total_cmp(&distance(a)));
    objects
}
