use anyhow::{Context, Result};

use stipple_engine::coords::SurfaceSize;
use stipple_engine::core::{App, AppControl, EventCtx};
use stipple_engine::geometry::{AttributeFormat, VertexArray, VertexBuffer};
use stipple_engine::input::PointerButtonEvent;
use stipple_engine::render::PointRenderer;
use stipple_engine::shader::ShaderProgram;

use crate::canvas::{Canvas, PointList};
use crate::config::{CanvasConfig, POSITION_ATTRIBUTE};

/// GPU objects owned by the canvas between load and unload.
struct GpuResources {
    program: ShaderProgram,
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    renderer: PointRenderer,
}

impl GpuResources {
    fn load(device: &wgpu::Device, config: &CanvasConfig) -> Result<Self> {
        let program = ShaderProgram::from_files(device, &config.shaders)
            .context("failed to build the point shader program")?;

        let mut vertex_array = VertexArray::new("points");
        vertex_array
            .set_vertex_attribute(
                program.linked(),
                POSITION_ATTRIBUTE,
                AttributeFormat::float32(2),
                0,
                0,
            )
            .context("failed to describe the point layout")?;

        let vertex_buffer = VertexBuffer::new(device, "points");

        Ok(Self {
            program,
            vertex_array,
            vertex_buffer,
            renderer: PointRenderer::new(),
        })
    }

    /// Replaces the buffer contents with the whole point list.
    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &PointList) {
        self.vertex_buffer
            .upload(device, queue, points.as_bytes(), points.vertex_count());
    }

    fn draw(&mut self, ctx: &mut EventCtx<'_, '_>, clear: wgpu::Color) -> AppControl {
        let Self {
            program,
            vertex_array,
            vertex_buffer,
            renderer,
        } = self;

        ctx.render(|rctx, target| {
            renderer.render(rctx, target, program, vertex_array, vertex_buffer, clear);
        })
    }

    /// Buffer, then vertex array, then program.
    fn release(self) {
        let Self {
            program,
            vertex_array,
            vertex_buffer,
            renderer,
        } = self;

        drop(renderer);
        drop(vertex_buffer);
        drop(vertex_array);
        drop(program);
    }
}

/// Window shell: every left click adds a point and redraws all of them.
pub struct PointCanvasApp {
    config: CanvasConfig,
    canvas: Canvas,
    gpu: Option<GpuResources>,
}

impl PointCanvasApp {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            canvas: Canvas::new(),
            gpu: None,
        }
    }
}

impl App for PointCanvasApp {
    fn on_load(&mut self, ctx: &mut EventCtx<'_, '_>) -> Result<()> {
        let resources = GpuResources::load(ctx.gpu.device(), &self.config)?;
        log::info!(
            "point program {} ready ({} -> {})",
            resources.program.id(),
            self.config.shaders.vertex.display(),
            self.config.shaders.fragment.display()
        );
        self.gpu = Some(resources);
        Ok(())
    }

    fn on_pointer_button(
        &mut self,
        ctx: &mut EventCtx<'_, '_>,
        event: PointerButtonEvent,
    ) -> AppControl {
        // Window size at click time, not at creation.
        let size = ctx.window.size();
        let Some(point) = self.canvas.on_pointer_button(&event, size) else {
            return AppControl::Continue;
        };

        let Some(gpu) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let points = self.canvas.points();
        gpu.upload(ctx.gpu.device(), ctx.gpu.queue(), points);
        let control = gpu.draw(ctx, self.config.clear_color);

        log::debug!("placed ({:.3}, {:.3})", point.x, point.y);
        log::info!("point count: {}", points.len());

        control
    }

    fn on_resize(&mut self, _ctx: &mut EventCtx<'_, '_>, size: SurfaceSize) {
        log::debug!(
            "viewport {}x{}; {} point(s) unchanged",
            size.width,
            size.height,
            self.canvas.points().len()
        );
    }

    fn on_redraw(&mut self, ctx: &mut EventCtx<'_, '_>) -> AppControl {
        match self.gpu.as_mut() {
            Some(gpu) => gpu.draw(ctx, self.config.clear_color),
            None => ctx.clear(self.config.clear_color),
        }
    }

    fn on_unload(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.release();
        }
        log::info!("canvas closed with {} point(s)", self.canvas.points().len());
    }
}
