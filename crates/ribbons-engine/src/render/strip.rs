use wgpu::util::DeviceExt;

use crate::geometry::{StripVertex, strip_index_count, strip_indices};
use crate::render::{RenderCtx, RenderTarget, StripUniforms};
use crate::ribbon::{Ribbon, Scene};

/// Renderer for ribbon strips.
///
/// Every ribbon owns a vertex buffer, a uniform buffer and a bind group,
/// kept in ribbon order and rewritten in place each frame. All ribbons share
/// one index buffer since they have the same point count. The whole scene is
/// recorded into a single render pass that also clears the target.
#[derive(Default)]
pub struct StripRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    index_buffer: Option<wgpu::Buffer>,
    index_points: usize,

    meshes: Vec<StripMesh>,
}

/// GPU resources of one ribbon.
struct StripMesh {
    point_count: usize,
    vbo: wgpu::Buffer,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl StripRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &Scene) {
        self.ensure_pipeline(ctx);

        let ribbons = scene.ribbons();
        let point_count = ribbons.first().map(|r| r.points().len()).unwrap_or(0);
        self.ensure_index_buffer(ctx, point_count);
        self.ensure_meshes(ctx, ribbons);

        for (mesh, ribbon) in self.meshes.iter().zip(ribbons) {
            ctx.queue.write_buffer(&mesh.vbo, 0, bytemuck::cast_slice(ribbon.geometry().vertices()));
            ctx.queue.write_buffer(&mesh.ubo, 0, bytemuck::bytes_of(ribbon.uniforms()));
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ribbons strip pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.background().to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let index_count = strip_index_count(point_count);
        if index_count == 0 {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(ibo) = self.index_buffer.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        for mesh in &self.meshes {
            rpass.set_bind_group(0, &mesh.bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ribbons strip shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ribbon.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ribbons strip bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<StripUniforms>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ribbons strip pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ribbons strip pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[StripVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        // Bind groups reference the old layout.
        self.meshes.clear();
    }

    fn ensure_index_buffer(&mut self, ctx: &RenderCtx<'_>, point_count: usize) {
        if self.index_buffer.is_some() && self.index_points == point_count {
            return;
        }
        let indices = strip_indices(point_count);
        if indices.is_empty() {
            self.index_buffer = None;
            self.index_points = point_count;
            return;
        }
        self.index_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ribbons strip ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_points = point_count;
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>, ribbons: &[Ribbon]) {
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        self.meshes.truncate(ribbons.len());
        for (i, ribbon) in ribbons.iter().enumerate() {
            let n = ribbon.points().len();
            match self.meshes.get(i).map(|m| m.point_count == n) {
                Some(true) => {}
                Some(false) => self.meshes[i] = StripMesh::new(ctx, bgl, n),
                None => self.meshes.push(StripMesh::new(ctx, bgl, n)),
            }
        }
    }
}

impl StripMesh {
    fn new(ctx: &RenderCtx<'_>, bgl: &wgpu::BindGroupLayout, point_count: usize) -> Self {
        let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbons strip vbo"),
            size: (point_count * 2 * std::mem::size_of::<StripVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ribbons strip ubo"),
            size: std::mem::size_of::<StripUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ribbons strip bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        Self { point_count, vbo, ubo, bind_group }
    }
}

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}
