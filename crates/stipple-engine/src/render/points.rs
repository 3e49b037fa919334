use super::ctx::begin_pass;
use super::{RenderCtx, RenderTarget};
use crate::error::Stage;
use crate::geometry::{VertexArray, VertexBuffer};
use crate::shader::{ProgramId, ShaderProgram};

/// What a built pipeline depends on.
#[derive(Debug, Clone, PartialEq)]
struct PipelineKey {
    format: wgpu::TextureFormat,
    program: ProgramId,
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl PipelineKey {
    fn new(format: wgpu::TextureFormat, program: ProgramId, layout: &VertexArray) -> Self {
        Self {
            format,
            program,
            stride: layout.stride(),
            attributes: layout.attributes().to_vec(),
        }
    }
}

/// Draws a vertex buffer as a point list.
///
/// The pipeline is built lazily from the program and vertex layout passed to
/// [`render`](Self::render) and rebuilt when the surface format, the program or
/// the vertex layout changes. Each call clears the target and redraws every
/// vertex in the buffer.
///
/// wgpu has no point-size state: every point rasterizes as a single physical
/// pixel, which is small on high-DPI displays.
#[derive(Default)]
pub struct PointRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl PointRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `target` to `clear` and draws all `vertices` as points.
    ///
    /// An empty buffer only clears.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        program: &ShaderProgram,
        layout: &VertexArray,
        vertices: &VertexBuffer,
        clear: wgpu::Color,
    ) {
        self.ensure_pipeline(ctx, program, layout);

        let mut rpass = begin_pass(target, "stipple points", clear);

        let (Some(pipeline), Some(slice)) = (self.pipeline.as_ref(), vertices.slice()) else {
            return;
        };

        let vp = ctx.viewport;
        if !vp.is_valid() {
            return;
        }

        rpass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, slice);
        rpass.draw(0..vertices.vertex_count(), 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, program: &ShaderProgram, layout: &VertexArray) {
        let key = PipelineKey::new(ctx.surface_format, program.id(), layout);
        if self.pipeline.is_some() && self.pipeline_key.as_ref() == Some(&key) {
            return;
        }

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("stipple points pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let (vs_module, vs_entry) = program.module(Stage::Vertex);
        let (fs_module, fs_entry) = program.module(Stage::Fragment);

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stipple points pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: vs_module,
                entry_point: Some(vs_entry),
                compilation_options: Default::default(),
                buffers: &[layout.layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: fs_module,
                entry_point: Some(fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
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

        log::debug!(
            "points pipeline built for program {} ({:?})",
            program.id(),
            ctx.surface_format
        );

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
    }
}
