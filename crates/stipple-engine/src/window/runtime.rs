use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::core::{App, AppControl, EventCtx, Lifecycle, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputEvent, InputState};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "stipple".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single window: `App::on_load` once the window exists, input and
/// resize callbacks while running, `App::on_unload` when it closes.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes.
    ///
    /// Returns the error that stopped the loop, if any (a failed `on_load`,
    /// window or GPU creation failure).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    /// Runs `f` with an [`EventCtx`] built from this window's fields.
    fn dispatch<A, R>(&mut self, app: &mut A, f: impl FnOnce(&mut A, &mut EventCtx<'_, '_>) -> R) -> R
    where
        A: App,
    {
        self.with_mut(|fields| {
            let mut ctx = EventCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
            };
            f(app, &mut ctx)
        })
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    lifecycle: Lifecycle,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            lifecycle: Lifecycle::new(),
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    /// Loading phase: window + GPU, `on_load`, then one cleared frame.
    fn load(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut entry = self.create_window_entry(event_loop)?;

        entry
            .dispatch(&mut self.app, |app, ctx| app.on_load(ctx))
            .context("application failed to load")?;

        let control = entry.dispatch(&mut self.app, |app, ctx| app.on_redraw(ctx));
        self.window = Some(entry);

        if control == AppControl::Exit {
            anyhow::bail!("application exited while presenting its first frame");
        }

        self.lifecycle.finish_loading();
        Ok(())
    }

    fn unload(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.begin_unload() {
            self.app.on_unload();
        }
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.window = None;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(err) = self.load(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.lifecycle.is_running() {
            return;
        }

        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let input = entry.with_mut(|fields| {
            let ev = translate_window_event(fields.input_state, &event)?;
            fields.input_state.apply_event(&ev);
            Some(ev)
        });

        let control = match (&event, input) {
            (WindowEvent::CloseRequested, _) => AppControl::Exit,

            (_, Some(InputEvent::PointerButton(button))) => {
                entry.dispatch(app, |app, ctx| app.on_pointer_button(ctx, button))
            }

            (WindowEvent::Resized(new_size), _) => {
                let size = SurfaceSize::from(*new_size);
                entry.dispatch(app, |app, ctx| {
                    ctx.gpu.resize(size);
                    app.on_resize(ctx, size);
                    ctx.window.request_redraw();
                });
                AppControl::Continue
            }

            (WindowEvent::ScaleFactorChanged { .. }, _) => {
                entry.dispatch(app, |app, ctx| {
                    let size = ctx.window.size();
                    ctx.gpu.resize(size);
                    app.on_resize(ctx, size);
                    ctx.window.request_redraw();
                });
                AppControl::Continue
            }

            (WindowEvent::RedrawRequested, _) => {
                entry.dispatch(app, |app, ctx| app.on_redraw(ctx))
            }

            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.unload(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.lifecycle.begin_unload() {
            self.app.on_unload();
        }
        self.window = None;
    }
}
