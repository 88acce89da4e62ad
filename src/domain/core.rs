//! Core geometry types
//!
//! This module defines pure value types with no knowledge of Win32 or of
//! which monitor a rectangle belongs to. A `Rect` carries no frame tag:
//! absolute-pixel and monitor-unit rectangles share the type, and callers
//! move between the two frames only through [`Rect::renormalize`].

use thiserror::Error;

/// A point in whatever frame its producer used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle stored as origin plus extent
///
/// No validation happens on construction. Zero-area and even negative
/// extents are representable so that intermediate unit-frame math never
/// has to be rejected half way through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// The canonical (0, 0, 1, 1) frame: "fraction of a monitor"
pub const UNIT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 1.0,
    h: 1.0,
};

/// Errors raised by frame transforms
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("Frame {width}x{height} is degenerate; cannot renormalize against it")]
    DegenerateFrame { width: f64, height: f64 },
    #[error("Rectangle ({x}, {y}) {w}x{h} has a non-finite component")]
    NonFiniteRect { x: f64, y: f64, w: f64, h: f64 },
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rectangle from integer edges, as the OS reports window and
    /// monitor bounds
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (left, top) = (left as f64, top as f64);
        Self::new(left, top, right as f64 - left, bottom as f64 - top)
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Returns `(left, top, width, height)`
    pub fn ltwh(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.w, self.h)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Midpoint of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns true if the point lies inside the half-open area
    /// `[left, right) x [top, bottom)`
    ///
    /// Excluding the right and bottom edges means a point on the seam
    /// between two edge-adjacent monitors belongs to exactly one of them.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Re-expresses this rectangle, currently relative to `source`, as the
    /// equivalent rectangle relative to `target`
    ///
    /// Offsets and sizes are taken as fractions of `source` and scaled onto
    /// `target`. Both frames must have a non-zero, finite width and height,
    /// and every component of `self` must be finite.
    ///
    /// # Example
    /// ```rust
    /// use winframe::domain::core::{Rect, UNIT};
    ///
    /// let monitor = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    /// let window = Rect::new(960.0, 0.0, 960.0, 1080.0);
    /// let unit = window.renormalize(&monitor, &UNIT)?;
    /// assert_eq!(unit, Rect::new(0.5, 0.0, 0.5, 1.0));
    /// # Ok::<(), winframe::domain::core::GeometryError>(())
    /// ```
    pub fn renormalize(&self, source: &Rect, target: &Rect) -> Result<Rect, GeometryError> {
        self.ensure_finite()?;
        source.ensure_frame()?;
        target.ensure_frame()?;

        let fx = (self.x - source.x) / source.w;
        let fy = (self.y - source.y) / source.h;
        let fw = self.w / source.w;
        let fh = self.h / source.h;

        Ok(Rect::new(
            target.x + fx * target.w,
            target.y + fy * target.h,
            fw * target.w,
            fh * target.h,
        ))
    }

    /// Snaps the edges to the nearest whole pixel, returning
    /// `(left, top, width, height)`
    ///
    /// Edges are rounded rather than extents so that rectangles sharing an
    /// edge still share it after snapping. Callers must pass a finite
    /// rectangle; out-of-range values saturate.
    pub fn to_pixels(&self) -> (i32, i32, i32, i32) {
        let left = self.x.round();
        let top = self.y.round();
        (
            left as i32,
            top as i32,
            (self.right().round() - left) as i32,
            (self.bottom().round() - top) as i32,
        )
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Component-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.w - other.w).abs() <= tolerance
            && (self.h - other.h).abs() <= tolerance
    }

    fn ensure_finite(&self) -> Result<(), GeometryError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GeometryError::NonFiniteRect {
                x: self.x,
                y: self.y,
                w: self.w,
                h: self.h,
            })
        }
    }

    fn ensure_frame(&self) -> Result<(), GeometryError> {
        let usable = |extent: f64| extent != 0.0 && extent.is_finite();
        if usable(self.w) && usable(self.h) {
            Ok(())
        } else {
            Err(GeometryError::DegenerateFrame {
                width: self.w,
                height: self.h,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn rect_basic_properties() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.ltwh(), (10.0, 20.0, 100.0, 50.0));
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert_eq!(rect.bottom_right(), Point::new(110.0, 70.0));
        assert_eq!(rect.top_right(), Point::new(110.0, 20.0));
        assert_eq!(rect.bottom_left(), Point::new(10.0, 70.0));
    }

    #[test]
    fn from_ltrb_matches_os_edges() {
        let rect = Rect::from_ltrb(-1920, 0, 0, 1080);
        assert_eq!(rect, Rect::new(-1920.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 5.0))); // Left edge
        assert!(rect.contains(Point::new(5.0, 0.0))); // Top edge
        assert!(!rect.contains(Point::new(10.0, 5.0))); // Right edge
        assert!(!rect.contains(Point::new(5.0, 10.0))); // Bottom edge
        assert!(!rect.contains(Point::new(-0.5, 5.0)));
    }

    #[test]
    fn degenerate_rect_contains_nothing() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!rect.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn renormalize_right_half_into_unit() {
        let monitor = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let window = Rect::new(960.0, 0.0, 960.0, 1080.0);
        let unit = window.renormalize(&monitor, &UNIT).unwrap();
        assert!(unit.approx_eq(&Rect::new(0.5, 0.0, 0.5, 1.0), EPS));
    }

    #[test]
    fn renormalize_unit_onto_offset_monitor() {
        let monitor = Rect::new(1920.0, 0.0, 1920.0, 1080.0);
        let left_half = Rect::new(0.0, 0.0, 0.5, 1.0);
        let absolute = left_half.renormalize(&UNIT, &monitor).unwrap();
        assert_eq!(absolute, Rect::new(1920.0, 0.0, 960.0, 1080.0));
        assert_eq!(absolute.to_pixels(), (1920, 0, 960, 1080));
    }

    #[test]
    fn renormalize_round_trips() {
        let frames = [
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
            Rect::new(-1280.0, -200.0, 1280.0, 1024.0),
            Rect::new(3840.0, 0.0, 2560.0, 1440.0),
            UNIT,
        ];
        let rect = Rect::new(123.0, -45.0, 777.0, 333.0);

        for a in &frames {
            for b in &frames {
                let back = rect.renormalize(a, b).unwrap().renormalize(b, a).unwrap();
                assert!(back.approx_eq(&rect, 1e-6), "{a:?} -> {b:?} gave {back:?}");
            }
        }
    }

    #[test]
    fn renormalize_rejects_degenerate_source() {
        let rect = Rect::new(1.0, 1.0, 1.0, 1.0);
        let flat = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(
            rect.renormalize(&flat, &UNIT),
            Err(GeometryError::DegenerateFrame {
                width: 100.0,
                height: 0.0
            })
        );
    }

    #[test]
    fn renormalize_rejects_zero_width_target() {
        let rect = Rect::new(0.25, 0.25, 0.5, 0.5);
        let target = Rect::new(0.0, 0.0, 0.0, 1080.0);
        let result = rect.renormalize(&UNIT, &target);
        assert!(matches!(result, Err(GeometryError::DegenerateFrame { .. })));
    }

    #[test]
    fn renormalize_rejects_non_finite_frame() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let frame = Rect::new(0.0, 0.0, f64::INFINITY, 1.0);
        assert!(rect.renormalize(&frame, &UNIT).is_err());
    }

    #[test]
    fn from_ltrb_handles_extreme_edges() {
        let rect = Rect::from_ltrb(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(rect.w, i32::MAX as f64 - i32::MIN as f64);
        assert_eq!(rect.h, rect.w);
    }

    #[test]
    fn renormalize_rejects_non_finite_rect() {
        let frame = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        for rect in [
            Rect::new(f64::NAN, 0.0, 0.5, 1.0),
            Rect::new(0.0, 0.0, f64::INFINITY, 1.0),
            Rect::new(0.0, f64::NEG_INFINITY, 0.5, 1.0),
        ] {
            assert!(matches!(
                rect.renormalize(&UNIT, &frame),
                Err(GeometryError::NonFiniteRect { .. })
            ));
        }
    }

    #[test]
    fn to_pixels_keeps_shared_edges_together() {
        // Halves of a 1921px-wide monitor
        let monitor = Rect::new(0.0, 0.0, 1921.0, 1080.0);
        let left = Rect::new(0.0, 0.0, 0.5, 1.0).renormalize(&UNIT, &monitor).unwrap();
        let right = Rect::new(0.5, 0.0, 0.5, 1.0).renormalize(&UNIT, &monitor).unwrap();

        let (lx, _, lw, _) = left.to_pixels();
        let (rx, _, rw, _) = right.to_pixels();

        assert_eq!(lx + lw, rx);
        assert_eq!(rx + rw, 1921);
    }

    #[test]
    fn to_pixels_rounds_to_nearest() {
        let rect = Rect::new(10.4, 10.6, 99.5, 0.49);
        assert_eq!(rect.to_pixels(), (10, 11, 100, 0));
    }
}
