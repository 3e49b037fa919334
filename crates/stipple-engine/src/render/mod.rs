//! GPU rendering.
//!
//! Geometry arrives in normalized device coordinates; the viewport maps it to
//! the surface. Renderers own their pipelines and record into a [`RenderTarget`].

mod ctx;
mod points;

pub use ctx::{RenderCtx, RenderTarget};
pub use points::PointRenderer;
