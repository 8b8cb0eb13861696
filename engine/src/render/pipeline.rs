//! Forward Render Pipeline
//!
//! One pipeline draws the entire playground: shared unit geometries drawn
//! instanced, grouped by geometry, with depth testing. The scene is flattened
//! into a single instance buffer each frame.

use std::ops::Range;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use winit::window::Window;

use super::gpu_context::{GpuContext, GpuContextConfig};
use super::mesh::{build_geometry, MeshBuffer, MeshVertex};
use super::uniforms::{instance_buffer_layout, MeshInstanceGpu, SceneUniforms};
use crate::scene::{GeometryId, Scene};

/// Cap on drawn instances per frame. The playground never gets close.
pub const MAX_INSTANCES: usize = 1024;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.016,
    g: 0.020,
    b: 0.032,
    a: 1.0,
};

/// All GPU state needed to draw a [`Scene`].
pub struct RenderState {
    pub gpu: GpuContext,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniforms: SceneUniforms,
    meshes: Vec<(GeometryId, MeshBuffer)>,
    instance_buffer: wgpu::Buffer,
    instance_scratch: Vec<MeshInstanceGpu>,
}

impl RenderState {
    pub fn new(window: Arc<Window>, config: GpuContextConfig) -> Self {
        let gpu = GpuContext::new(window, config);

        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Playground Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("shaders/playground.wgsl").into(),
                ),
            });

        let uniforms = SceneUniforms::default();
        let uniform_buffer = gpu.create_uniform_buffer("Playground Uniform Buffer", &uniforms);

        let bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Playground Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Playground Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Playground Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline = gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Playground Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<MeshVertex>() as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &[
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x3,
                                    offset: 0,
                                    shader_location: 0,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x3,
                                    offset: 12,
                                    shader_location: 1,
                                },
                            ],
                        },
                        instance_buffer_layout(),
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let meshes = GeometryId::ALL
            .iter()
            .map(|&id| (id, build_geometry(id).upload(&gpu.device, geometry_label(id))))
            .collect();

        let instance_buffer = gpu.create_dynamic_vertex_buffer(
            "Playground Instance Buffer",
            (MAX_INSTANCES * std::mem::size_of::<MeshInstanceGpu>()) as u64,
        );

        Self {
            gpu,
            pipeline,
            bind_group,
            uniform_buffer,
            uniforms,
            meshes,
            instance_buffer,
            instance_scratch: Vec::with_capacity(MAX_INSTANCES),
        }
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Update per-frame camera state (call before `render`).
    pub fn update_camera(&mut self, view_proj: Mat4, camera_pos: Vec3, time: f32) {
        self.uniforms.view_proj = view_proj.to_cols_array_2d();
        self.uniforms.camera_pos = camera_pos.to_array();
        self.uniforms.time = time;
    }

    /// Draw the scene to the surface.
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.gpu
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        // Flatten the scene into one instance buffer, grouped by geometry so
        // each geometry draws with a single instanced call.
        self.instance_scratch.clear();
        let mut batches: Vec<(GeometryId, Range<u32>)> = Vec::with_capacity(GeometryId::ALL.len());
        for geometry in GeometryId::ALL {
            let start = self.instance_scratch.len() as u32;
            for (_, mesh) in scene.iter().filter(|(_, m)| m.geometry == geometry) {
                if self.instance_scratch.len() >= MAX_INSTANCES {
                    break;
                }
                self.instance_scratch.push(MeshInstanceGpu::from_instance(mesh));
            }
            let end = self.instance_scratch.len() as u32;
            if end > start {
                batches.push((geometry, start..end));
            }
        }
        if !self.instance_scratch.is_empty() {
            self.gpu
                .write_buffer(&self.instance_buffer, &self.instance_scratch);
        }

        let frame = self.gpu.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Playground Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Playground Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for (geometry, instances) in &batches {
                let Some((_, mesh)) = self.meshes.iter().find(|(id, _)| id == geometry) else {
                    continue;
                };
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, instances.clone());
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn geometry_label(id: GeometryId) -> &'static str {
    match id {
        GeometryId::Sphere => "Sphere",
        GeometryId::Cube => "Cube",
        GeometryId::Icosahedron => "Icosahedron",
        GeometryId::Floor => "Floor",
    }
}
