//! Frame graph: shadow pass, forward scene pass, optional bloom and outline
//! chains, then a blit to the swapchain with the UI drawn on top.

use std::sync::Arc;

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::geometry::{primitives, GeometryData};
use crate::gfx::resources::{
    GlobalBindings, GlobalUniforms, MaterialUniform, ModelUniform, Texture, TextureKind,
    TextureSet,
};
use crate::gfx::scene::{LineVertex, Scene, ShapeKind};
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout};
use super::post::{PingPong, PostStack, COLOR_FORMAT, MASK_FORMAT};

const SHADOW_MAP_SIZE: u32 = 2048;

/// Background color, linear space
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0116,
    g: 0.0116,
    b: 0.0116,
    a: 1.0,
};

/// Indexed mesh uploaded to the GPU
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let vertices = geometry.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} indices")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// GPU state for one drawable: mesh, transform and material
struct DrawableResources {
    mesh: GpuMesh,
    model_uniform: UniformBuffer<ModelUniform>,
    material_uniform: UniformBuffer<MaterialUniform>,
    model_bind_group: wgpu::BindGroup,
    material_bind_group: wgpu::BindGroup,
}

impl DrawableResources {
    #[allow(clippy::too_many_arguments)]
    fn new(
        device: &wgpu::Device,
        model_layout: &BindGroupLayoutWithDesc,
        material_layout: &BindGroupLayoutWithDesc,
        texture_set: &TextureSet,
        geometry: &GeometryData,
        model: Matrix4<f32>,
        material: MaterialUniform,
        texture: TextureKind,
        label: &str,
    ) -> Self {
        let mesh = GpuMesh::upload(device, geometry, label);
        let model_uniform = UniformBuffer::new_with_data(
            device,
            &ModelUniform {
                model: convert_matrix4_to_array(model),
            },
        );
        let material_uniform = UniformBuffer::new_with_data(device, &material);

        let model_bind_group = BindGroupBuilder::new(model_layout)
            .resource(model_uniform.binding_resource())
            .create(device, &format!("{label} model bind group"));
        let material_bind_group = Self::material_bind_group(
            device,
            material_layout,
            &material_uniform,
            texture_set,
            texture,
            label,
        );

        Self {
            mesh,
            model_uniform,
            material_uniform,
            model_bind_group,
            material_bind_group,
        }
    }

    fn material_bind_group(
        device: &wgpu::Device,
        material_layout: &BindGroupLayoutWithDesc,
        material_uniform: &UniformBuffer<MaterialUniform>,
        texture_set: &TextureSet,
        texture: TextureKind,
        label: &str,
    ) -> wgpu::BindGroup {
        let pair = texture_set.pair(texture);
        BindGroupBuilder::new(material_layout)
            .resource(material_uniform.binding_resource())
            .texture(&pair.diffuse.view)
            .sampler(&pair.diffuse.sampler)
            .texture(&pair.normal.view)
            .sampler(&pair.normal.sampler)
            .create(device, &format!("{label} material bind group"))
    }
}

/// Grid lines have no material, only a transform
struct GridResources {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    model_bind_group: wgpu::BindGroup,
    _model_uniform: UniformBuffer<ModelUniform>,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    pub pipeline_manager: PipelineManager,

    depth_texture: Texture,
    shadow_map: Texture,

    global_bindings: GlobalBindings,
    frame_uniform_layout: BindGroupLayoutWithDesc,
    frame_uniform_bind_group: wgpu::BindGroup,
    model_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,

    texture_set: TextureSet,
    shapes: Vec<DrawableResources>,
    ground: DrawableResources,
    grid: GridResources,

    post: PostStack,
}

impl RenderEngine {
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .expect("Failed to request a device!");
        let device = Arc::new(device);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            // Vsync: the redraw loop doubles as the animation clock.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = Texture::create_depth_texture(&device, width, height, "scene depth");
        let shadow_map =
            Texture::create_depth_texture(&device, SHADOW_MAP_SIZE, SHADOW_MAP_SIZE, "shadow map");

        let global_bindings = GlobalBindings::new(&device, &shadow_map);

        // Group 0 variant without the shadow map, for passes that render it
        // or only need the frame uniforms.
        let frame_uniform_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "frame uniform layout");
        let frame_uniform_bind_group = BindGroupBuilder::new(&frame_uniform_layout)
            .resource(global_bindings.uniform_buffer.binding_resource())
            .create(&device, "frame uniform bind group");

        let model_layout = ModelUniform::bind_group_layout(&device);
        let material_layout = MaterialUniform::bind_group_layout(&device);

        let texture_set = TextureSet::load(&device, &queue, std::path::Path::new("assets/textures"));

        let shapes = ShapeKind::ALL
            .iter()
            .map(|&kind| {
                DrawableResources::new(
                    &device,
                    &model_layout,
                    &material_layout,
                    &texture_set,
                    &kind.geometry(),
                    Matrix4::from_translation(kind.home_position()),
                    MaterialUniform::new(kind.default_color(), false),
                    TextureKind::None,
                    kind.label(),
                )
            })
            .collect();

        let ground = DrawableResources::new(
            &device,
            &model_layout,
            &material_layout,
            &texture_set,
            &primitives::plane(20.0, 20.0),
            Matrix4::from_translation(Vector3::new(0.0, -2.0, 0.0)),
            MaterialUniform::new([0.667, 0.667, 0.667], false),
            TextureKind::None,
            "ground",
        );

        let grid = Self::create_grid(&device, &model_layout);

        let post = PostStack::new(&device, width, height);

        let mut engine = Self {
            surface,
            device: device.clone(),
            queue,
            config,
            format,
            pipeline_manager: PipelineManager::new(device),
            depth_texture,
            shadow_map,
            global_bindings,
            frame_uniform_layout,
            frame_uniform_bind_group,
            model_layout,
            material_layout,
            texture_set,
            shapes,
            ground,
            grid,
            post,
        };
        engine.setup_pipelines();
        engine
    }

    fn create_grid(
        device: &wgpu::Device,
        model_layout: &BindGroupLayoutWithDesc,
    ) -> GridResources {
        // GridHelper colors 0x444444 / 0x888888, converted to linear.
        let center = [0.0557, 0.0557, 0.0557];
        let lines = [0.2195, 0.2195, 0.2195];
        let vertices = primitives::grid(20.0, 20, center, lines);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid vertices"),
            contents: bytemuck::cast_slice::<LineVertex, u8>(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let model_uniform = UniformBuffer::new_with_data(
            device,
            &ModelUniform {
                model: convert_matrix4_to_array(Matrix4::from_translation(Vector3::new(
                    0.0, -1.99, 0.0,
                ))),
            },
        );
        let model_bind_group = BindGroupBuilder::new(model_layout)
            .resource(model_uniform.binding_resource())
            .create(device, "grid model bind group");

        GridResources {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            model_bind_group,
            _model_uniform: model_uniform,
        }
    }

    fn setup_pipelines(&mut self) {
        let pm = &mut self.pipeline_manager;
        pm.load_shader("scene", include_str!("shaders/scene.wgsl"));
        pm.load_shader("shadow", include_str!("shaders/shadow.wgsl"));
        pm.load_shader("line", include_str!("shaders/line.wgsl"));
        pm.load_shader("bloom_extract", include_str!("shaders/bloom_extract.wgsl"));
        pm.load_shader("bloom_blur", include_str!("shaders/bloom_blur.wgsl"));
        pm.load_shader(
            "bloom_composite",
            include_str!("shaders/bloom_composite.wgsl"),
        );
        pm.load_shader("outline_mask", include_str!("shaders/outline_mask.wgsl"));
        pm.load_shader(
            "outline_composite",
            include_str!("shaders/outline_composite.wgsl"),
        );
        pm.load_shader("blit", include_str!("shaders/blit.wgsl"));

        pm.register_pipeline(
            "shadow",
            PipelineConfig::new("shadow")
                .with_label("shadow pipeline")
                .with_bind_group_layouts(vec![
                    self.frame_uniform_layout.layout.clone(),
                    self.model_layout.layout.clone(),
                ])
                .with_depth(Texture::DEPTH_FORMAT)
                .with_vertex_only(),
        );

        pm.register_pipeline(
            "scene",
            PipelineConfig::new("scene")
                .with_label("scene pipeline")
                .with_bind_group_layouts(vec![
                    self.global_bindings.layout.layout.clone(),
                    self.model_layout.layout.clone(),
                    self.material_layout.layout.clone(),
                ])
                .with_depth(Texture::DEPTH_FORMAT)
                .with_color_target(COLOR_FORMAT, None),
        );

        pm.register_pipeline(
            "line",
            PipelineConfig::new("line")
                .with_label("grid pipeline")
                .with_bind_group_layouts(vec![
                    self.global_bindings.layout.layout.clone(),
                    self.model_layout.layout.clone(),
                ])
                .with_depth(Texture::DEPTH_FORMAT)
                .with_color_target(COLOR_FORMAT, None)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_vertex_layout(VertexLayout::Line),
        );

        pm.register_pipeline(
            "bloom_extract",
            PipelineConfig::new("bloom_extract")
                .with_label("bloom extract pipeline")
                .with_bind_group_layouts(vec![self.post.sample_layout.layout.clone()])
                .with_color_target(COLOR_FORMAT, None)
                .with_vertex_layout(VertexLayout::None),
        );

        pm.register_pipeline(
            "bloom_blur",
            PipelineConfig::new("bloom_blur")
                .with_label("bloom blur pipeline")
                .with_bind_group_layouts(vec![self.post.sample_layout.layout.clone()])
                .with_color_target(COLOR_FORMAT, None)
                .with_vertex_layout(VertexLayout::None),
        );

        pm.register_pipeline(
            "bloom_composite",
            PipelineConfig::new("bloom_composite")
                .with_label("bloom composite pipeline")
                .with_bind_group_layouts(vec![self.post.composite_layout.layout.clone()])
                .with_color_target(COLOR_FORMAT, None)
                .with_vertex_layout(VertexLayout::None),
        );

        pm.register_pipeline(
            "outline_mask",
            PipelineConfig::new("outline_mask")
                .with_label("outline mask pipeline")
                .with_bind_group_layouts(vec![
                    self.frame_uniform_layout.layout.clone(),
                    self.model_layout.layout.clone(),
                ])
                .with_color_target(MASK_FORMAT, None),
        );

        pm.register_pipeline(
            "outline_composite",
            PipelineConfig::new("outline_composite")
                .with_label("outline composite pipeline")
                .with_bind_group_layouts(vec![self.post.composite_layout.layout.clone()])
                .with_color_target(COLOR_FORMAT, None)
                .with_vertex_layout(VertexLayout::None),
        );

        pm.register_pipeline(
            "blit",
            PipelineConfig::new("blit")
                .with_label("blit pipeline")
                .with_bind_group_layouts(vec![self.post.blit_layout.layout.clone()])
                .with_color_target(self.format, None)
                .with_vertex_layout(VertexLayout::None),
        );
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

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, width, height, "scene depth");
        self.post.resize(&self.device, &self.queue, width, height);
    }

    /// Uploads everything that changed this frame: camera, ambient light and
    /// per-object transforms and materials
    pub fn prepare(&mut self, scene: &mut Scene) {
        scene.camera_manager.camera.update_view_proj();
        self.global_bindings.update(
            &self.queue,
            GlobalUniforms {
                camera: scene.camera_manager.camera.uniform,
                ambient: [scene.ambient_intensity, 0.0, 0.0, 0.0],
                ..GlobalUniforms::default()
            },
        );

        for (object, resources) in scene.objects_mut().iter_mut().zip(self.shapes.iter_mut()) {
            resources.model_uniform.update_content(
                &self.queue,
                ModelUniform {
                    model: convert_matrix4_to_array(object.model_matrix()),
                },
            );

            if object.material_dirty {
                resources.material_uniform.update_content(
                    &self.queue,
                    MaterialUniform::new(object.color, object.texture != TextureKind::None),
                );
            }
            if object.texture_dirty {
                resources.material_bind_group = DrawableResources::material_bind_group(
                    &self.device,
                    &self.material_layout,
                    &resources.material_uniform,
                    &self.texture_set,
                    object.texture,
                    object.kind.label(),
                );
            }
            object.clear_dirty();
        }
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        overlay: impl FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        self.shadow_pass(&mut encoder);
        self.scene_pass(&mut encoder);

        let mut current = PingPong::A;
        if scene.bloom_enabled {
            self.bloom_chain(&mut encoder, &mut current);
        }
        if let Some(kind) = scene.outline_target() {
            self.outline_chain(&mut encoder, &mut current, kind);
        }

        self.blit_pass(&mut encoder, &surface_view, current);
        overlay(&self.device, &self.queue, &mut encoder, &surface_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn shadow_pass(&mut self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shadow pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let Some(pipeline) = self.pipeline_manager.get_pipeline("shadow") else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.frame_uniform_bind_group, &[]);
        for resources in &self.shapes {
            pass.set_bind_group(1, &resources.model_bind_group, &[]);
            pass.set_vertex_buffer(0, resources.mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(
                resources.mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..resources.mesh.index_count, 0, 0..1);
        }
    }

    fn scene_pass(&mut self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.post.color_view(PingPong::A),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(pipeline) = self.pipeline_manager.get_pipeline("scene") {
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &self.global_bindings.bind_group, &[]);
            for resources in self.shapes.iter().chain(std::iter::once(&self.ground)) {
                pass.set_bind_group(1, &resources.model_bind_group, &[]);
                pass.set_bind_group(2, &resources.material_bind_group, &[]);
                pass.set_vertex_buffer(0, resources.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    resources.mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..resources.mesh.index_count, 0, 0..1);
            }
        }

        if let Some(pipeline) = self.pipeline_manager.get_pipeline("line") {
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &self.global_bindings.bind_group, &[]);
            pass.set_bind_group(1, &self.grid.model_bind_group, &[]);
            pass.set_vertex_buffer(0, self.grid.vertex_buffer.slice(..));
            pass.draw(0..self.grid.vertex_count, 0..1);
        }
    }

    fn fullscreen_pass(
        pipeline: &wgpu::RenderPipeline,
        bind_group: &wgpu::BindGroup,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        label: &str,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn bloom_chain(&mut self, encoder: &mut wgpu::CommandEncoder, current: &mut PingPong) {
        if let Some(pipeline) = self.pipeline_manager.get_pipeline("bloom_extract") {
            Self::fullscreen_pass(
                pipeline,
                self.post.extract_bind_group(*current),
                encoder,
                self.post.bloom_view(0),
                "bloom extract",
            );
        }
        if let Some(pipeline) = self.pipeline_manager.get_pipeline("bloom_blur") {
            Self::fullscreen_pass(
                pipeline,
                self.post.blur_h_bind_group(),
                encoder,
                self.post.bloom_view(1),
                "bloom blur horizontal",
            );
        }
        if let Some(pipeline) = self.pipeline_manager.get_pipeline("bloom_blur") {
            Self::fullscreen_pass(
                pipeline,
                self.post.blur_v_bind_group(),
                encoder,
                self.post.bloom_view(0),
                "bloom blur vertical",
            );
        }
        if let Some(pipeline) = self.pipeline_manager.get_pipeline("bloom_composite") {
            Self::fullscreen_pass(
                pipeline,
                self.post.bloom_composite_bind_group(*current),
                encoder,
                self.post.color_view(current.other()),
                "bloom composite",
            );
            *current = current.other();
        }
    }

    fn outline_chain(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        current: &mut PingPong,
        kind: ShapeKind,
    ) {
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("outline mask pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.post.mask_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline("outline_mask") {
                let index = ShapeKind::ALL.iter().position(|&k| k == kind).unwrap_or(0);
                let resources = &self.shapes[index];
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.frame_uniform_bind_group, &[]);
                pass.set_bind_group(1, &resources.model_bind_group, &[]);
                pass.set_vertex_buffer(0, resources.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    resources.mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..resources.mesh.index_count, 0, 0..1);
            }
        }

        if let Some(pipeline) = self.pipeline_manager.get_pipeline("outline_composite") {
            Self::fullscreen_pass(
                pipeline,
                self.post.outline_composite_bind_group(*current),
                encoder,
                self.post.color_view(current.other()),
                "outline composite",
            );
            *current = current.other();
        }
    }

    fn blit_pass(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        current: PingPong,
    ) {
        if let Some(pipeline) = self.pipeline_manager.get_pipeline("blit") {
            Self::fullscreen_pass(
                pipeline,
                self.post.blit_bind_group(current),
                encoder,
                surface_view,
                "blit",
            );
        }
    }
}
