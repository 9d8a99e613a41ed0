//! Outline capture into quadratic kurbo paths.

use kurbo::{BezPath, CubicBez, PathEl, Point};
use skrifa::outline::OutlinePen;

/// Maximum distance, in font units, between a cubic and its quadratic approximation.
pub const CUBIC_TO_QUAD_ACCURACY: f64 = 1.0;

/// Records drawing commands as a `BezPath` holding only lines and quadratics.
///
/// Cubic segments (CFF outlines) are approximated by quadratic splines.
/// Contours without any segment are dropped.
#[derive(Debug, Default)]
pub struct QuadPathPen {
    elements: Vec<PathEl>,
    contour_start: usize,
    current: Point,
}

impl QuadPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_path(mut self) -> BezPath {
        self.drop_empty_contour();
        BezPath::from_vec(self.elements)
    }

    fn drop_empty_contour(&mut self) {
        if self.elements.len() == self.contour_start + 1 {
            self.elements.truncate(self.contour_start);
        }
    }
}

impl OutlinePen for QuadPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.drop_empty_contour();
        self.contour_start = self.elements.len();
        self.current = Point::new(x as f64, y as f64);
        self.elements.push(PathEl::MoveTo(self.current));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current = Point::new(x as f64, y as f64);
        self.elements.push(PathEl::LineTo(self.current));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.current = Point::new(x as f64, y as f64);
        self.elements
            .push(PathEl::QuadTo(Point::new(cx0 as f64, cy0 as f64), self.current));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let end = Point::new(x as f64, y as f64);
        let cubic = CubicBez::new(
            self.current,
            Point::new(cx0 as f64, cy0 as f64),
            Point::new(cx1 as f64, cy1 as f64),
            end,
        );
        for (_, _, quad) in cubic.to_quads(CUBIC_TO_QUAD_ACCURACY) {
            self.elements.push(PathEl::QuadTo(quad.p1, quad.p2));
        }
        self.current = end;
    }

    fn close(&mut self) {
        if self.elements.len() == self.contour_start + 1 {
            self.elements.truncate(self.contour_start);
            return;
        }
        self.elements.push(PathEl::ClosePath);
        self.contour_start = self.elements.len();
    }
}
