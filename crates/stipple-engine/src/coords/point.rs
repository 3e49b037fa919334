use bytemuck::{Pod, Zeroable};

/// Position in normalized device coordinates.
///
/// `(-1, -1)` is the bottom-left corner of the viewport, `(1, 1)` the top-right.
/// Layout matches a `vec2<f32>` vertex attribute so point lists can be uploaded
/// with a single `bytemuck` cast.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Cursor position in physical window pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PixelPos {
    pub x: f64,
    pub y: f64,
}

impl PixelPos {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawable size of a window in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimized window reports a zero dimension.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Converts a pixel position to normalized device coordinates for a surface of `size`.
///
/// `x' = 2x/W - 1`, `y' = 2(H - y)/H - 1`. The result is not clamped: positions
/// on or past the edge map to values at or beyond ±1.
///
/// Returns `None` for an empty surface.
pub fn pixel_to_ndc(pos: PixelPos, size: SurfaceSize) -> Option<Point> {
    if size.is_empty() {
        return None;
    }

    let w = size.width as f64;
    let h = size.height as f64;

    let x = 2.0 * pos.x / w - 1.0;
    let y = 2.0 * (h - pos.y) / h - 1.0;

    Some(Point::new(x as f32, y as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ndc(x: f64, y: f64, w: u32, h: u32) -> Point {
        pixel_to_ndc(PixelPos::new(x, y), SurfaceSize::new(w, h)).unwrap()
    }

    #[test]
    fn center_maps_to_origin() {
        assert_eq!(ndc(400.0, 300.0, 800, 600), Point::new(0.0, 0.0));
    }

    #[test]
    fn top_left_maps_to_minus_one_plus_one() {
        assert_eq!(ndc(0.0, 0.0, 800, 600), Point::new(-1.0, 1.0));
    }

    #[test]
    fn bottom_right_edge_maps_to_plus_one_minus_one() {
        assert_eq!(ndc(800.0, 600.0, 800, 600), Point::new(1.0, -1.0));
    }

    #[test]
    fn outside_positions_are_not_clamped() {
        let p = ndc(1200.0, -300.0, 800, 600);
        assert_eq!(p, Point::new(2.0, 2.0));
    }

    #[test]
    fn uses_the_size_it_is_given() {
        // Same pixel, different surface sizes -> different NDC.
        assert_eq!(ndc(100.0, 100.0, 200, 200), Point::new(0.0, 0.0));
        assert_eq!(ndc(100.0, 100.0, 400, 400), Point::new(-0.5, 0.5));
    }

    #[test]
    fn empty_surface_has_no_mapping() {
        assert!(pixel_to_ndc(PixelPos::new(1.0, 1.0), SurfaceSize::new(0, 600)).is_none());
        assert!(pixel_to_ndc(PixelPos::new(1.0, 1.0), SurfaceSize::new(800, 0)).is_none());
    }

    #[test]
    fn point_is_two_packed_floats() {
        assert_eq!(std::mem::size_of::<Point>(), 8);
        let pts = [Point::new(0.5, -0.25)];
        let floats: &[f32] = bytemuck::cast_slice(&pts);
        assert_eq!(floats, &[0.5, -0.25]);
    }
}
