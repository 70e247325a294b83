use std::collections::HashMap;

use graph_core::{
    Camera, DispatchPlan, DrawParams, GraphBackend, KernelIndex, KernelParams, CLEAR_COLOR,
    KERNELS_WGSL, POINTS_WGSL,
};
use wgpu::util::DeviceExt;

use crate::mesh::{self, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    view_proj: [[f32; 4]; 4],
    step: f32,
    _pad: [f32; 3],
}

/// The position buffer plus the two bind groups that expose it: read-write to
/// the kernels, read-only to the point shader.
pub(crate) struct PositionBuffer {
    buffer: wgpu::Buffer,
    kernel_bind_group: wgpu::BindGroup,
    draw_bind_group: wgpu::BindGroup,
}

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Surface texture and command encoder for the frame being recorded.
struct Frame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

pub(crate) struct WgpuBackend<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    kernels: Vec<wgpu::ComputePipeline>,
    kernel_bgl: wgpu::BindGroupLayout,
    kernel_params: wgpu::Buffer,
    draw_pipeline: wgpu::RenderPipeline,
    draw_bgl: wgpu::BindGroupLayout,
    draw_uniforms: wgpu::Buffer,
    mesh: Mesh,
    camera: Camera,
    frame: Option<Frame>,
}

impl<'w> WgpuBackend<'w> {
    pub(crate) async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        // Kernels: one pipeline per (from, to) pair, specialized by override constants.
        let kernel_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kernels"),
            source: wgpu::ShaderSource::Wgsl(KERNELS_WGSL.into()),
        });
        let kernel_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kernel_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::COMPUTE),
                storage_entry(1, wgpu::ShaderStages::COMPUTE, false),
            ],
        });
        let kernel_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kernel_pl"),
            bind_group_layouts: &[&kernel_bgl],
            push_constant_ranges: &[],
        });
        let kernels = KernelIndex::all()
            .map(|index| {
                let constants = HashMap::from([
                    ("FUNCTION".to_string(), index.function().ordinal() as f64),
                    (
                        "BLEND_FUNCTION".to_string(),
                        index.blend_function().ordinal() as f64,
                    ),
                ]);
                let label = format!("kernel_{}_to_{}", index.blend_function(), index.function());
                device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some(label.as_str()),
                    layout: Some(&kernel_pl),
                    module: &kernel_shader,
                    entry_point: Some("main"),
                    compilation_options: wgpu::PipelineCompilationOptions {
                        constants: &constants,
                        zero_initialize_workgroup_memory: true,
                    },
                    cache: None,
                })
            })
            .collect::<Vec<_>>();
        log::info!("compiled {} compute kernels", kernels.len());
        let kernel_params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kernel_params"),
            size: std::mem::size_of::<KernelParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Instanced point draw
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX),
                storage_entry(1, wgpu::ShaderStages::VERTEX, true),
            ],
        });
        let draw_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("draw_pl"),
            bind_group_layouts: &[&draw_bgl],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
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
        }];
        let draw_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&draw_pl),
            vertex: wgpu::VertexState {
                module: &points_shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &points_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let draw_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: std::mem::size_of::<DrawUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (vertices, indices) = mesh::cube();
        let mesh = Mesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cube_vb"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cube_ib"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
        };

        let mut camera = Camera::new(1.0);
        camera.set_aspect(config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_view,
            kernels,
            kernel_bgl,
            kernel_params,
            draw_pipeline,
            draw_bgl,
            draw_uniforms,
            mesh,
            camera,
            frame: None,
        })
    }

    pub(crate) fn window(&self) -> &'w winit::window::Window {
        self.window
    }

    pub(crate) fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub(crate) fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure();
    }

    pub(crate) fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
        self.camera.set_aspect(self.config.width, self.config.height);
    }

    /// Acquire the next surface texture and open a command encoder. The
    /// engine's dispatch and draw for this frame are recorded into it.
    pub(crate) fn begin_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let texture = self.surface.get_current_texture()?;
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.frame = Some(Frame {
            texture,
            view,
            encoder,
        });
        Ok(())
    }

    /// Submit everything recorded since `begin_frame` and present.
    pub(crate) fn end_frame(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.queue.submit(Some(frame.encoder.finish()));
            frame.texture.present();
        }
    }
}

impl GraphBackend for WgpuBackend<'_> {
    type Buffer = PositionBuffer;

    fn kernel_count(&self) -> usize {
        self.kernels.len()
    }

    fn allocate_positions(&mut self, capacity: usize, element_size: usize) -> PositionBuffer {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("positions"),
            size: (capacity * element_size) as u64,
            usage: wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });
        let kernel_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kernel_bg"),
            layout: &self.kernel_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.kernel_params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
            ],
        });
        let draw_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bg"),
            layout: &self.draw_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.draw_uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
            ],
        });
        PositionBuffer {
            buffer,
            kernel_bind_group,
            draw_bind_group,
        }
    }

    fn release_positions(&mut self, positions: PositionBuffer) {
        positions.buffer.destroy();
    }

    fn dispatch(&mut self, positions: &PositionBuffer, plan: &DispatchPlan) {
        self.queue
            .write_buffer(&self.kernel_params, 0, bytemuck::bytes_of(&plan.params));
        let pipeline = &self.kernels[plan.kernel.as_usize()];
        let frame = self
            .frame
            .as_mut()
            .expect("graph frame recorded outside begin_frame/end_frame");
        let mut cpass = frame
            .encoder
            .begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("graph_kernel"),
                timestamp_writes: None,
            });
        cpass.set_pipeline(pipeline);
        cpass.set_bind_group(0, &positions.kernel_bind_group, &[]);
        let [x, y, z] = plan.groups;
        cpass.dispatch_workgroups(x, y, z);
    }

    fn draw_instanced(&mut self, positions: &PositionBuffer, draw: &DrawParams) {
        let visible = self.camera.sees(&draw.bounds);
        self.queue.write_buffer(
            &self.draw_uniforms,
            0,
            bytemuck::bytes_of(&DrawUniforms {
                view_proj: self.camera.view_projection().to_cols_array_2d(),
                step: draw.step,
                _pad: [0.0; 3],
            }),
        );
        let [r, g, b, a] = CLEAR_COLOR;
        let frame = self
            .frame
            .as_mut()
            .expect("graph frame recorded outside begin_frame/end_frame");
        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("graph_points"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        // Still clear the target when the graph is off-screen.
        if !visible {
            return;
        }
        rpass.set_pipeline(&self.draw_pipeline);
        rpass.set_bind_group(0, &positions.draw_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.mesh.index_count, 0, 0..draw.instance_count);
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn storage_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    read_only: bool,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_tex"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
