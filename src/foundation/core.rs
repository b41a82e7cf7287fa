use crate::foundation::fixed::{Fixed, SFixed};

/// Integer pixel rectangle, half-open: `[left, right) x [top, bottom)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Inclusive left edge.
    pub left: i32,
    /// Inclusive top edge.
    pub top: i32,
    /// Exclusive right edge.
    pub right: i32,
    /// Exclusive bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// Build a rectangle from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The empty rectangle at the origin.
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Return `true` when the rectangle covers no pixel.
    pub const fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Width in pixels (zero when empty, saturating at `i32::MAX`).
    pub const fn width(self) -> i32 {
        span(self.left, self.right)
    }

    /// Height in pixels (zero when empty, saturating at `i32::MAX`).
    pub const fn height(self) -> i32 {
        span(self.top, self.bottom)
    }

    /// Intersection of two rectangles. The result may be empty.
    pub fn intersect(self, other: Rect) -> Rect {
        Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Smallest rectangle covering both. Empty inputs are ignored.
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Shift by `(dx, dy)`, saturating at the `i32` range.
    pub const fn translate(self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Return `true` when `(x, y)` lies inside.
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

const fn span(lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return 0;
    }
    let d = hi as i64 - lo as i64;
    if d > i32::MAX as i64 { i32::MAX } else { d as i32 }
}

/// Point in the public 16.16 coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Fixed,
    /// Vertical coordinate.
    pub y: Fixed,
}

impl Point {
    /// Build a point from 16.16 coordinates.
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Build a point from whole pixel coordinates.
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_int(x), Fixed::from_int(y))
    }
}

/// Point in 28.4 path space; flattened paths store these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SPoint {
    /// Horizontal coordinate.
    pub x: SFixed,
    /// Vertical coordinate.
    pub y: SFixed,
}

impl SPoint {
    /// Build a point from 28.4 coordinates.
    pub const fn new(x: SFixed, y: SFixed) -> Self {
        Self { x, y }
    }

    /// Build a point from whole pixel coordinates.
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self::new(SFixed::from_int(x), SFixed::from_int(y))
    }

    /// Component-wise sum.
    #[inline]
    pub fn offset(self, by: SPoint) -> SPoint {
        SPoint::new(self.x + by.x, self.y + by.y)
    }
}

/// Pixel encodings understood by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// 8-bit alpha only.
    A8,
    /// 16-bit 5-6-5 RGB, implicitly opaque.
    Rgb16,
    /// 32-bit premultiplied ARGB in host byte order.
    Argb32,
}

impl Format {
    /// Bytes used by one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Format::A8 => 1,
            Format::Rgb16 => 2,
            Format::Argb32 => 4,
        }
    }

    /// Dispatch-table index of this format.
    pub(crate) const fn index(self) -> usize {
        match self {
            Format::A8 => 0,
            Format::Rgb16 => 1,
            Format::Argb32 => 2,
        }
    }
}

/// Compositing operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Porter-Duff source-over.
    #[default]
    Over,
    /// Replace the destination with the source.
    Source,
}

impl Operator {
    pub(crate) const fn index(self) -> usize {
        match self {
            Operator::Over => 0,
            Operator::Source => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
