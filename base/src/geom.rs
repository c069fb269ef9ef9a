/*!
 * Geometric primitives.
 *
 * Paths and transforms are publicly imported from tiny-skia-path.
 *
 * Y low coordinates are at the top.
 */

use strict_num::{FiniteF32, PositiveF32};
pub use tiny_skia_path::{Path, PathBuilder, PathSegment, Point, Transform};

/// A size in 2D space reprensented by width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    /// Build a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// The width
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height
    pub const fn height(&self) -> f32 {
        self.h
    }

    /// Whether either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

/// A rectangle in 2D space reprensented by x, y, width and height
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    x: FiniteF32,
    y: FiniteF32,
    w: PositiveF32,
    h: PositiveF32,
}

impl Rect {
    /// Build a rectangle from x, y, width and height
    ///
    /// Panics if a coordinate is not finite or a dimension is negative.
    /// See [`Rect::try_from_xywh`] for a fallible version.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect::try_from_xywh(x, y, w, h).expect("Rect should have finite position and positive size")
    }

    /// Build a rectangle from x, y, width and height,
    /// or `None` if a coordinate is not finite or a dimension is negative.
    pub fn try_from_xywh(x: f32, y: f32, w: f32, h: f32) -> Option<Self> {
        Some(Rect {
            x: FiniteF32::new(x)?,
            y: FiniteF32::new(y)?,
            w: PositiveF32::new(w)?,
            h: PositiveF32::new(h)?,
        })
    }

    /// The size of the rectangle
    pub const fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// The X coordinate of the left side
    pub const fn x(&self) -> f32 {
        self.x.get()
    }

    /// The Y coordinate of the top side
    pub const fn y(&self) -> f32 {
        self.y.get()
    }

    /// The vertical center Y coordinate
    pub const fn center_y(&self) -> f32 {
        self.y() + self.height() / 2.0
    }

    /// The width of the rectangle
    pub const fn width(&self) -> f32 {
        self.w.get()
    }

    /// The height of the rectangle
    pub const fn height(&self) -> f32 {
        self.h.get()
    }

    /// The top Y coordinate
    pub const fn top(&self) -> f32 {
        self.y.get()
    }

    /// The right X coordinate
    pub const fn right(&self) -> f32 {
        self.x.get() + self.w.get()
    }

    /// The bottom Y coordinate
    pub const fn bottom(&self) -> f32 {
        self.y.get() + self.h.get()
    }

    /// The left X coordinate
    pub const fn left(&self) -> f32 {
        self.x.get()
    }

    /// Whether the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Build a path from the rectangle, or `None` if it has no area
    pub fn to_path(&self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }
        let rect =
            tiny_skia_path::Rect::from_xywh(self.x.get(), self.y.get(), self.w.get(), self.h.get())?;
        Some(PathBuilder::from_rect(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_sides() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn rect_invalid() {
        assert!(Rect::try_from_xywh(f32::NAN, 0.0, 1.0, 1.0).is_none());
        assert!(Rect::try_from_xywh(0.0, 0.0, -1.0, 1.0).is_none());
        assert!(Rect::try_from_xywh(0.0, 0.0, 0.0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn rect_path() {
        let r = Rect::from_xywh(1.0, 2.0, 3.0, 4.0);
        let b = r.to_path().unwrap().bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (1.0, 2.0, 4.0, 6.0));
        assert!(Rect::from_xywh(1.0, 2.0, 3.0, 0.0).to_path().is_none());
    }
}
