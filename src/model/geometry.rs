//! Plane geometry for label placement.
//!
//! Coordinates are `f64` in canvas units. Rectangles are axis-aligned and
//! stored by center, matching how the spiral search moves labels around.

use serde::Serialize;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Rendered extent of a label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Footprint {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Footprint {
    /// Construct a footprint.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Rectangle of this footprint centered on `center`.
    pub fn centered_at(self, center: Point) -> Rect {
        Rect {
            center,
            footprint: self,
        }
    }
}

/// Axis-aligned rectangle stored as center plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Center of the rectangle.
    pub center: Point,
    /// Width and height.
    pub footprint: Footprint,
}

impl Rect {
    /// Smallest x.
    pub fn left(&self) -> f64 {
        self.center.x - self.footprint.width / 2.0
    }

    /// Largest x.
    pub fn right(&self) -> f64 {
        self.center.x + self.footprint.width / 2.0
    }

    /// Smallest y.
    pub fn top(&self) -> f64 {
        self.center.y - self.footprint.height / 2.0
    }

    /// Largest y.
    pub fn bottom(&self) -> f64 {
        self.center.y + self.footprint.height / 2.0
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Tolerance for containment checks against the canvas boundary.
const CONTAINMENT_EPSILON: f64 = 1e-9;

/// The area labels are laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    /// Top-left corner.
    pub origin: Point,
    /// Width of the canvas.
    pub width: f64,
    /// Height of the canvas.
    pub height: f64,
}

impl Canvas {
    /// Canvas with its top-left corner at (0, 0).
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            width,
            height,
        }
    }

    /// Canvas at an arbitrary origin.
    pub const fn at(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Spiral origin for every search.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    /// Finite, non-negative extent.
    pub fn is_valid(&self) -> bool {
        self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Whether `rect` lies entirely inside the canvas (edges inclusive).
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= self.origin.x - CONTAINMENT_EPSILON
            && rect.top() >= self.origin.y - CONTAINMENT_EPSILON
            && rect.right() <= self.origin.x + self.width + CONTAINMENT_EPSILON
            && rect.bottom() <= self.origin.y + self.height + CONTAINMENT_EPSILON
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(80.0, 24.0)
    }
}

/// Presentation transform attached to a placed label.
///
/// The layout core never reads these values; animations write them and the
/// presentation layer maps them onto whatever it can draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// Uniform scale around the label center.
    pub zoom: f64,
    /// Rotation in degrees around the label center.
    pub angle: f64,
    /// Horizontal translation.
    pub offset_x: f64,
    /// Vertical translation.
    pub offset_y: f64,
    /// Brightness multiplier (1.0 is untinted).
    pub tint: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            angle: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            tint: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> Rect {
        Footprint::new(side, side).centered_at(Point::new(x, y))
    }

    #[test]
    fn overlapping_rects_collide() {
        assert!(square(0.0, 0.0, 10.0).overlaps(&square(5.0, 5.0, 10.0)));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        assert!(!square(0.0, 0.0, 10.0).overlaps(&square(10.0, 0.0, 10.0)));
        assert!(!square(0.0, 0.0, 10.0).overlaps(&square(0.0, 10.0, 10.0)));
    }

    #[test]
    fn separated_rects_do_not_collide() {
        assert!(!square(0.0, 0.0, 4.0).overlaps(&square(20.0, 20.0, 4.0)));
    }

    #[test]
    fn canvas_center_accounts_for_origin() {
        let canvas = Canvas::at(Point::new(10.0, 20.0), 100.0, 50.0);
        assert_eq!(canvas.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn canvas_contains_rect_touching_boundary() {
        let canvas = Canvas::new(100.0, 100.0);
        assert!(canvas.contains(&square(5.0, 5.0, 10.0)));
        assert!(!canvas.contains(&square(4.0, 50.0, 10.0)));
    }

    #[test]
    fn oversized_rect_never_fits_canvas() {
        let canvas = Canvas::new(100.0, 100.0);
        assert!(!canvas.contains(&square(50.0, 50.0, 150.0)));
    }

    #[test]
    fn footprint_validity_rejects_nan_and_negative() {
        assert!(Footprint::new(1.0, 0.0).is_valid());
        assert!(!Footprint::new(-1.0, 1.0).is_valid());
        assert!(!Footprint::new(f64::NAN, 1.0).is_valid());
    }
}
