//! Adaptive cubic Bezier flattening.
//!
//! Instead of always halving, each step binary-searches the largest `t` whose left
//! sub-curve is within tolerance of its chord, emits that end point and continues with the
//! right sub-curve. The search takes at most `T_SEARCH_STEPS` probes and the walk emits
//! at most `max_segments` points, so flattening terminates for any input.

use crate::foundation::core::SPoint;
use crate::foundation::fixed::{DFixed, SFixed};

/// `t` is a 56.8 value in `[0, 1]`; halving an interval of 256 steps ends after 9 probes.
const T_ONE: i64 = DFixed::ONE.0;
const T_SEARCH_STEPS: u32 = DFixed::FRAC_BITS + 1;

/// Cubic Bezier control points in path space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spline {
    /// Start point.
    pub a: SPoint,
    /// First control handle.
    pub b: SPoint,
    /// Second control handle.
    pub c: SPoint,
    /// End point.
    pub d: SPoint,
}

fn lerp(a: SPoint, b: SPoint, t: DFixed) -> SPoint {
    SPoint::new(
        a.x + ((b.x - a.x).to_dfixed() * t).to_sfixed(),
        a.y + ((b.y - a.y).to_dfixed() * t).to_sfixed(),
    )
}

impl Spline {
    /// Split at `t` with de Casteljau's construction.
    pub fn split(&self, t: DFixed) -> (Spline, Spline) {
        let ab = lerp(self.a, self.b, t);
        let bc = lerp(self.b, self.c, t);
        let cd = lerp(self.c, self.d, t);
        let abbc = lerp(ab, bc, t);
        let bccd = lerp(bc, cd, t);
        let mid = lerp(abbc, bccd, t);
        (
            Spline {
                a: self.a,
                b: ab,
                c: abbc,
                d: mid,
            },
            Spline {
                a: mid,
                b: bccd,
                c: cd,
                d: self.d,
            },
        )
    }

    /// Upper bound on the squared error of replacing the curve by its chord.
    pub fn distance_squared(&self) -> DFixed {
        let berr = distance_to_line_squared(self.b, self.a, self.d);
        let cerr = distance_to_line_squared(self.c, self.a, self.d);
        berr.max(cerr)
    }

    fn is_flat(&self, tolerance_squared: DFixed) -> bool {
        self.distance_squared() <= tolerance_squared
    }
}

/// Squared distance between two path-space points, in 56.8.
pub(crate) fn distance_squared(a: SPoint, b: SPoint) -> DFixed {
    let dx = i64::from(a.x.0 - b.x.0);
    let dy = i64::from(a.y.0 - b.y.0);
    DFixed(dx * dx + dy * dy)
}

/// Squared distance from `p` to the line through `p1` and `p2`, in 56.8.
///
/// Degenerate lines (`p1 == p2`) fall back to the point distance.
pub(crate) fn distance_to_line_squared(p: SPoint, p1: SPoint, p2: SPoint) -> DFixed {
    // Normal form Ax + By + C = 0 of the line.
    let a = i128::from(p2.y.0) - i128::from(p1.y.0);
    let b = i128::from(p1.x.0) - i128::from(p2.x.0);
    let c = i128::from(p1.y.0) * i128::from(p2.x.0) - i128::from(p1.x.0) * i128::from(p2.y.0);
    let den = a * a + b * b;
    if den == 0 {
        return distance_squared(p, p1);
    }
    let num = a * i128::from(p.x.0) + b * i128::from(p.y.0) + c;
    let d = (num * num) / den;
    DFixed(d.min(i128::from(i64::MAX)) as i64)
}

/// Flatten a cubic into a polyline starting at `spline.a` and ending at `spline.d`.
///
/// Consecutive duplicate points are dropped, so a curve whose control points all coincide
/// yields a single point and a collinear curve yields just its two end points.
pub fn flatten(spline: Spline, tolerance: SFixed, max_segments: u32) -> Vec<SPoint> {
    let tolerance_squared = DFixed(i64::from(tolerance.0) * i64::from(tolerance.0));
    let mut out = Vec::new();
    push_distinct(&mut out, spline.a);

    let mut spline = spline;
    let mut segments = 0u32;
    while !spline.is_flat(tolerance_squared) {
        if segments >= max_segments {
            tracing::trace!(max_segments, "curve hit segment cap");
            break;
        }

        let t = largest_flat_t(&spline, tolerance_squared);
        let (left, right) = spline.split(t);
        if right == spline {
            // no progress is possible at this resolution
            break;
        }
        push_distinct(&mut out, left.d);
        spline = right;
        segments += 1;
    }

    push_distinct(&mut out, spline.d);
    out
}

/// Binary search for the largest `t` whose left sub-curve is flat enough.
fn largest_flat_t(spline: &Spline, tolerance_squared: DFixed) -> DFixed {
    let mut hi = T_ONE;
    let mut lo = 0i64;
    let mut t_optimal = 0i64;
    let mut max_distance = DFixed::ZERO;

    for _ in 0..T_SEARCH_STEPS {
        let t = (hi + lo) >> 1;
        if t == t_optimal {
            break;
        }

        let (left, _) = spline.split(DFixed(t));
        let distance = left.distance_squared();
        if distance < max_distance {
            break;
        }

        if distance <= tolerance_squared {
            max_distance = distance;
            t_optimal = t;
            lo = t;
        } else {
            if t_optimal != 0 {
                break;
            }
            hi = t;
        }
    }

    // Always advance by at least one step of t.
    DFixed(t_optimal.max(1))
}

fn push_distinct(out: &mut Vec<SPoint>, p: SPoint) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/spline.rs"]
mod tests;
