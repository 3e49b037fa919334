//! Shell state that does not touch the GPU: the point list and the click rule.

use stipple_engine::coords::{pixel_to_ndc, Point, SurfaceSize};
use stipple_engine::input::{MouseButton, PointerButtonEvent};

/// Ordered, append-only list of placed points in NDC.
///
/// The length never exceeds `limit`, which itself fits a `u32` draw count.
#[derive(Debug)]
pub struct PointList {
    points: Vec<Point>,
    limit: u32,
}

impl Default for PointList {
    fn default() -> Self {
        Self::with_limit(u32::MAX)
    }
}

impl PointList {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            points: Vec::new(),
            limit,
        }
    }

    /// Appends `point`, or returns `false` once the list is full.
    pub fn push(&mut self, point: Point) -> bool {
        if self.vertex_count() >= self.limit {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of vertices to draw.
    pub fn vertex_count(&self) -> u32 {
        // `push` keeps the length within `limit`.
        u32::try_from(self.points.len()).unwrap_or(self.limit)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// The whole list as vertex data, two `f32` per point.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

/// Turns left-button releases into points.
#[derive(Debug)]
pub struct Canvas {
    points: PointList,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_limit(u32::MAX)
    }

    /// A canvas that holds at most `limit` points.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            points: PointList::with_limit(limit),
        }
    }

    pub fn points(&self) -> &PointList {
        &self.points
    }

    /// Places a point for a left-button release, converting with the surface
    /// size at the time of the click.
    ///
    /// Presses, other buttons, releases with no known pointer position and
    /// clicks on an empty surface are ignored, as is any click once the list
    /// is full. Returns the placed point.
    pub fn on_pointer_button(
        &mut self,
        event: &PointerButtonEvent,
        size: SurfaceSize,
    ) -> Option<Point> {
        if !event.is_release_of(MouseButton::Left) {
            return None;
        }

        let point = pixel_to_ndc(event.pos?, size)?;
        if !self.points.push(point) {
            log::warn!("point list is full ({} points); click ignored", self.points.len());
            return None;
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stipple_engine::coords::PixelPos;
    use stipple_engine::input::MouseButtonState;

    fn release(button: MouseButton, x: f64, y: f64) -> PointerButtonEvent {
        PointerButtonEvent {
            button,
            state: MouseButtonState::Released,
            pos: Some(PixelPos::new(x, y)),
        }
    }

    fn expected(x: f64, y: f64, w: u32, h: u32) -> Point {
        let (w, h) = (w as f64, h as f64);
        Point::new((2.0 * x / w - 1.0) as f32, (2.0 * (h - y) / h - 1.0) as f32)
    }

    #[test]
    fn left_releases_append_in_order() {
        let size = SurfaceSize::new(800, 600);
        let clicks = [(0.0, 0.0), (400.0, 300.0), (799.0, 1.0), (123.5, 456.25), (800.0, 600.0)];

        let mut canvas = Canvas::new();
        for (x, y) in clicks {
            canvas.on_pointer_button(&release(MouseButton::Left, x, y), size);
        }

        assert_eq!(canvas.points().len(), clicks.len());
        for (i, (x, y)) in clicks.into_iter().enumerate() {
            assert_eq!(canvas.points().as_slice()[i], expected(x, y, 800, 600), "click {i}");
        }
    }

    #[test]
    fn other_buttons_never_append() {
        let size = SurfaceSize::new(640, 480);
        let mut canvas = Canvas::new();

        for button in [MouseButton::Right, MouseButton::Middle, MouseButton::Back, MouseButton::Other(7)] {
            assert!(canvas.on_pointer_button(&release(button, 10.0, 10.0), size).is_none());
        }
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn presses_never_append() {
        let mut canvas = Canvas::new();
        let press = PointerButtonEvent {
            state: MouseButtonState::Pressed,
            ..release(MouseButton::Left, 5.0, 5.0)
        };
        assert!(canvas.on_pointer_button(&press, SurfaceSize::new(100, 100)).is_none());
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn empty_surface_never_appends() {
        let mut canvas = Canvas::new();
        let placed = canvas.on_pointer_button(&release(MouseButton::Left, 0.0, 0.0), SurfaceSize::new(0, 0));
        assert!(placed.is_none());
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn release_without_position_never_appends() {
        let mut canvas = Canvas::new();
        let unknown = PointerButtonEvent {
            pos: None,
            ..release(MouseButton::Left, 0.0, 0.0)
        };
        assert!(canvas.on_pointer_button(&unknown, SurfaceSize::new(800, 600)).is_none());
        assert!(canvas.points().is_empty());
    }

    #[test]
    fn full_list_ignores_further_clicks() {
        let size = SurfaceSize::new(100, 100);
        let mut canvas = Canvas::with_limit(2);

        for _ in 0..3 {
            canvas.on_pointer_button(&release(MouseButton::Left, 50.0, 50.0), size);
        }

        assert_eq!(canvas.points().len(), 2);
        assert_eq!(canvas.points().vertex_count(), 2);
    }

    #[test]
    fn resizing_keeps_placed_points() {
        let mut canvas = Canvas::new();
        canvas.on_pointer_button(&release(MouseButton::Left, 100.0, 50.0), SurfaceSize::new(200, 100));
        let before = canvas.points().as_slice()[0];

        // A later click after a resize uses the new size; the first point is untouched.
        canvas.on_pointer_button(&release(MouseButton::Left, 100.0, 50.0), SurfaceSize::new(400, 200));

        assert_eq!(canvas.points().as_slice()[0], before);
        assert_eq!(before, Point::new(0.0, 0.0));
        assert_eq!(canvas.points().as_slice()[1], Point::new(-0.5, 0.5));
    }

    #[test]
    fn bytes_cover_every_point() {
        let mut list = PointList::default();
        assert!(list.push(Point::new(0.25, -0.5)));
        assert!(list.push(Point::new(1.0, 1.0)));

        assert_eq!(list.as_bytes().len(), 16);
        let floats: &[f32] = bytemuck::cast_slice(list.as_bytes());
        assert_eq!(floats, &[0.25, -0.5, 1.0, 1.0]);
    }
}
