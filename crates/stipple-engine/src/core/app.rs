use crate::coords::SurfaceSize;
use crate::input::PointerButtonEvent;

use super::ctx::EventCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
///
/// Callbacks run on the event-loop thread, one at a time.
pub trait App {
    /// Creates GPU resources. Runs once, before the first frame is shown.
    /// An error is fatal: the runtime stops and returns it.
    fn on_load(&mut self, ctx: &mut EventCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called for every mouse button press and release.
    fn on_pointer_button(
        &mut self,
        ctx: &mut EventCtx<'_, '_>,
        event: PointerButtonEvent,
    ) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called after the surface and viewport were resized.
    fn on_resize(&mut self, ctx: &mut EventCtx<'_, '_>, size: SurfaceSize) {
        let _ = (ctx, size);
    }

    /// Called when the window system asks for the contents to be redrawn.
    fn on_redraw(&mut self, ctx: &mut EventCtx<'_, '_>) -> AppControl;

    /// Releases resources. Runs once when the window closes; no further
    /// callbacks follow.
    fn on_unload(&mut self) {}
}
