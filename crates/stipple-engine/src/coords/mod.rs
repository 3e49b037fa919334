//! Coordinate types.
//!
//! Conventions:
//! - window input arrives in physical pixels, top-left origin, +Y down
//! - geometry is stored in normalized device coordinates, bottom-left (-1, -1)

mod point;
mod viewport;

pub use point::{pixel_to_ndc, PixelPos, Point, SurfaceSize};
pub use viewport::Viewport;
