//! Append-only paths of path-space points split into sub-paths.

use smallvec::SmallVec;

use crate::config::PathOpts;
use crate::foundation::core::{Rect, SPoint};
use crate::foundation::fixed::Fixed;
use crate::foundation::trig::Angle;
use crate::geometry::matrix::Matrix;
use crate::geometry::spline::{Spline, flatten};

/// How the open ends of a stroke are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    /// Follow the pen outline around the end point.
    #[default]
    Round,
    /// Cut the stroke off at the end point.
    Butt,
    /// Extend the stroke by half the pen past the end point.
    Projecting,
}

/// Transient drawing state carried by a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathState {
    /// User space to path space.
    pub matrix: Matrix,
    /// Cap style used when this path receives a stroke outline.
    pub cap_style: CapStyle,
}

/// Cubic approximation of a quarter circle: `4/3 * (sqrt(2) - 1)` in 16.16.
const CIRCLE_KAPPA: Fixed = Fixed(36195);

/// Ordered point list with a table of sub-path end offsets.
///
/// `sublen` holds strictly increasing cumulative point counts; points after the last entry
/// form the current, still open sub-path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    points: Vec<SPoint>,
    sublen: SmallVec<[usize; 8]>,
    state: PathState,
    opts: PathOpts,
}

impl Path {
    /// Create an empty path with default options.
    pub fn new() -> Self {
        Self::with_opts(PathOpts::default())
    }

    /// Create an empty path with explicit options.
    pub fn with_opts(opts: PathOpts) -> Self {
        Self {
            points: Vec::new(),
            sublen: SmallVec::new(),
            state: PathState {
                matrix: Matrix::IDENTITY,
                cap_style: opts.cap_style,
            },
            opts,
        }
    }

    /// Options this path was created with.
    pub fn opts(&self) -> &PathOpts {
        &self.opts
    }

    /// All points in order.
    pub fn points(&self) -> &[SPoint] {
        &self.points
    }

    /// Cumulative end offsets of finished sub-paths.
    pub fn sublen(&self) -> &[usize] {
        &self.sublen
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when no point has been added.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate sub-paths as point slices, including a trailing open one.
    pub fn subpaths(&self) -> impl Iterator<Item = &[SPoint]> + '_ {
        let tail = self.sublen.last().copied().unwrap_or(0);
        let ends = self
            .sublen
            .iter()
            .copied()
            .chain((tail < self.points.len()).then_some(self.points.len()));
        let mut start = 0usize;
        ends.map(move |end| {
            let s = &self.points[start..end];
            start = end;
            s
        })
    }

    fn subpath_start(&self) -> usize {
        self.sublen.last().copied().unwrap_or(0)
    }

    fn current_subpath_len(&self) -> usize {
        self.points.len() - self.subpath_start()
    }

    /// Last point, or the origin for an empty path.
    pub fn current_point(&self) -> SPoint {
        self.points.last().copied().unwrap_or_default()
    }

    /// End the current sub-path without closing it.
    pub fn finish(&mut self) {
        if self.current_subpath_len() > 0 {
            self.sublen.push(self.points.len());
        }
    }

    /// Start a new sub-path at a path-space point.
    ///
    /// A sub-path holding only a previous move point is replaced rather than kept.
    pub fn smove(&mut self, p: SPoint) {
        match self.current_subpath_len() {
            0 => {}
            1 => {
                self.points.pop();
            }
            _ => self.finish(),
        }
        self.sdraw(p);
    }

    /// Append a path-space point, dropping it if it repeats the previous one.
    pub fn sdraw(&mut self, p: SPoint) {
        if self.current_subpath_len() > 0 && self.points.last() == Some(&p) {
            return;
        }
        self.points.push(p);
    }

    /// Start a new sub-path at a user-space point.
    pub fn move_to(&mut self, x: Fixed, y: Fixed) {
        let p = self.state.matrix.transform_to_path(x, y);
        self.smove(p);
    }

    /// Start a new sub-path relative to the current point.
    pub fn rmove(&mut self, dx: Fixed, dy: Fixed) {
        let p = self
            .current_point()
            .offset(self.state.matrix.transform_delta(dx, dy));
        self.smove(p);
    }

    /// Line to a user-space point.
    pub fn draw_to(&mut self, x: Fixed, y: Fixed) {
        let p = self.state.matrix.transform_to_path(x, y);
        self.sdraw(p);
    }

    /// Line relative to the current point.
    pub fn rdraw(&mut self, dx: Fixed, dy: Fixed) {
        let p = self
            .current_point()
            .offset(self.state.matrix.transform_delta(dx, dy));
        self.sdraw(p);
    }

    /// Close the current sub-path back to its first point and finish it.
    pub fn close(&mut self) {
        if self.current_subpath_len() < 2 {
            return;
        }
        let first = self.points[self.subpath_start()];
        self.sdraw(first);
        self.finish();
    }

    /// Cubic Bezier from the current point, flattened into line segments.
    pub fn curve_to(&mut self, x1: Fixed, y1: Fixed, x2: Fixed, y2: Fixed, x3: Fixed, y3: Fixed) {
        let m = self.state.matrix;
        self.scurve(
            m.transform_to_path(x1, y1),
            m.transform_to_path(x2, y2),
            m.transform_to_path(x3, y3),
        );
    }

    /// Path-space variant of [`Path::curve_to`].
    pub fn scurve(&mut self, b: SPoint, c: SPoint, d: SPoint) {
        if self.points.is_empty() {
            self.smove(SPoint::default());
        }
        let spline = Spline {
            a: self.current_point(),
            b,
            c,
            d,
        };
        for p in flatten(spline, self.opts.tolerance, self.opts.max_curve_segments) {
            self.sdraw(p);
        }
    }

    /// Closed ellipse centred on a user-space point.
    pub fn ellipse(&mut self, cx: Fixed, cy: Fixed, rx: Fixed, ry: Fixed) {
        let kx = rx * CIRCLE_KAPPA;
        let ky = ry * CIRCLE_KAPPA;
        self.move_to(cx + rx, cy);
        self.curve_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.curve_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.curve_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.curve_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.close();
    }

    /// Closed circle centred on a user-space point.
    pub fn circle(&mut self, cx: Fixed, cy: Fixed, radius: Fixed) {
        self.ellipse(cx, cy, radius, radius);
    }

    /// Closed axis-aligned rectangle in user space.
    pub fn rectangle(&mut self, x: Fixed, y: Fixed, w: Fixed, h: Fixed) {
        self.move_to(x, y);
        self.draw_to(x + w, y);
        self.draw_to(x + w, y + h);
        self.draw_to(x, y + h);
        self.close();
    }

    /// Drop every point and sub-path; drawing state is kept.
    pub fn empty(&mut self) {
        self.points.clear();
        self.sublen.clear();
    }

    /// Integer pixel rectangle covering every point.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::empty();
        };
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Rect::new(
            left.floor().to_int(),
            top.floor().to_int(),
            right.ceil().to_int(),
            bottom.ceil().to_int(),
        )
    }

    /// Append every sub-path of `src` as new sub-paths of this path.
    pub fn append(&mut self, src: &Path) {
        for sub in src.subpaths() {
            let Some((&first, rest)) = sub.split_first() else {
                continue;
            };
            self.smove(first);
            for &p in rest {
                self.sdraw(p);
            }
        }
    }

    /// Append `outline` as one closed sub-path.
    pub(crate) fn append_closed(&mut self, outline: &[SPoint]) {
        let Some((&first, rest)) = outline.split_first() else {
            return;
        };
        self.smove(first);
        for &p in rest {
            self.sdraw(p);
        }
        self.close();
        self.finish();
    }

    /// Current user-to-path matrix.
    pub fn current_matrix(&self) -> Matrix {
        self.state.matrix
    }

    /// Replace the user-to-path matrix.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.state.matrix = matrix;
    }

    /// Reset the matrix to identity.
    pub fn identity(&mut self) {
        self.state.matrix = Matrix::IDENTITY;
    }

    /// Prepend a translation to the matrix.
    pub fn translate(&mut self, tx: Fixed, ty: Fixed) {
        self.state.matrix.translate(tx, ty);
    }

    /// Prepend a scale to the matrix.
    pub fn scale(&mut self, sx: Fixed, sy: Fixed) {
        self.state.matrix.scale(sx, sy);
    }

    /// Prepend a rotation to the matrix.
    pub fn rotate(&mut self, a: Angle) {
        self.state.matrix.rotate(a);
    }

    /// Current cap style.
    pub fn cap_style(&self) -> CapStyle {
        self.state.cap_style
    }

    /// Replace the cap style.
    pub fn set_cap_style(&mut self, cap_style: CapStyle) {
        self.state.cap_style = cap_style;
    }

    /// Snapshot the drawing state.
    pub fn save(&self) -> PathState {
        self.state
    }

    /// Restore a snapshot taken with [`Path::save`].
    pub fn restore(&mut self, state: PathState) {
        self.state = state;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
