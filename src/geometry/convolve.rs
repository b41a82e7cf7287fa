//! Stroke outlines by convolving a polyline with a convex pen.

use std::cmp::Ordering;

use crate::foundation::core::SPoint;
use crate::foundation::error::PaintResult;
use crate::geometry::hull::convex_hull;
use crate::geometry::path::{CapStyle, Path};

#[inline]
fn wrap_next(i: usize, n: usize) -> usize {
    if i + 1 == n { 0 } else { i + 1 }
}

#[inline]
fn wrap_prev(i: usize, n: usize) -> usize {
    if i == 0 { n - 1 } else { i - 1 }
}

/// Index of the pen vertex furthest left of the directed line `p1 -> p2`.
fn leftpoint(pen: &[SPoint], p1: SPoint, p2: SPoint) -> usize {
    // Normal form Ax + By + C = 0; C is the same for every vertex.
    let a = i128::from(p2.y.0) - i128::from(p1.y.0);
    let b = i128::from(p1.x.0) - i128::from(p2.x.0);
    let mut best = 0;
    let mut max = i128::MIN;
    for (i, p) in pen.iter().enumerate() {
        let v = a * i128::from(p.x.0) + b * i128::from(p.y.0);
        if v > max {
            max = v;
            best = i;
        }
    }
    best
}

/// Sign of the turn from direction `a1 -> a2` to direction `b1 -> b2`.
fn around_order(a1: SPoint, a2: SPoint, b1: SPoint, b2: SPoint) -> Ordering {
    let adx = i128::from(a2.x.0) - i128::from(a1.x.0);
    let ady = i128::from(a2.y.0) - i128::from(a1.y.0);
    let bdx = i128::from(b2.x.0) - i128::from(b1.x.0);
    let bdy = i128::from(b2.y.0) - i128::from(b1.y.0);
    (ady * bdx - bdy * adx).cmp(&0)
}

struct Outline {
    points: Vec<SPoint>,
}

impl Outline {
    fn push(&mut self, p: SPoint) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    fn replace_last(&mut self, p: SPoint) {
        self.points.pop();
        self.push(p);
    }
}

/// Outline one sub-path of at least two points. `pen` is a non-empty convex polygon.
fn convolve_subpath(outline: &mut Outline, sp: &[SPoint], pen: &[SPoint], cap_style: CapStyle) {
    let ns = sp.len();
    let np = pen.len();
    let start = leftpoint(pen, sp[0], sp[1]);
    let ret = leftpoint(pen, sp[ns - 1], sp[ns - 2]);

    let at = |s: usize, p: usize| sp[s].offset(pen[p]);

    let mut s = 0usize;
    let mut p = start;
    outline.push(at(s, p));
    let first = outline.points.len() - 1;

    let mut forward = true;
    let mut starget = ns - 1;
    let mut ptarget = ret;
    loop {
        let mut pen_steps = 0usize;
        loop {
            let sn = if forward { s + 1 } else { s - 1 };
            let pn = wrap_next(p, np);
            let pm = wrap_prev(p, np);

            // A convex pen never needs a full turn between two stroke vertices.
            if pen_steps < np && around_order(sp[s], sp[sn], pen[p], pen[pn]) == Ordering::Greater {
                p = pn;
                pen_steps += 1;
            } else if pen_steps < np
                && around_order(sp[s], sp[sn], pen[pm], pen[p]) == Ordering::Less
            {
                p = pm;
                pen_steps += 1;
            } else {
                s = sn;
                pen_steps = 0;
            }
            outline.push(at(s, p));
            if s == starget {
                break;
            }
        }

        match cap_style {
            CapStyle::Projecting => {
                let mid = if p <= ptarget {
                    (ptarget + p) >> 1
                } else {
                    ((ptarget + np + p) >> 1) % np
                };
                let corner = |q: usize| sp[s].offset(pen[mid]).offset(pen[q]);
                outline.replace_last(corner(p));
                p = ptarget;
                if forward {
                    outline.push(corner(p));
                } else if let Some(initial) = outline.points.get_mut(first) {
                    *initial = corner(p);
                }
            }
            CapStyle::Butt => {
                p = ptarget;
                outline.push(at(s, p));
            }
            CapStyle::Round => {
                while p != ptarget {
                    p = wrap_next(p, np);
                    outline.push(at(s, p));
                }
            }
        }

        if !forward {
            break;
        }
        forward = false;
        ptarget = start;
        starget = 0;
    }
}

/// Append the outline of `stroke` swept by the convex hull of `pen` to `dest`.
///
/// Each sub-path of two or more points becomes one closed contour; shorter sub-paths are
/// skipped. Caps follow `dest`'s cap style.
#[tracing::instrument(skip_all, fields(stroke = stroke.len(), pen = pen.len()))]
pub fn convolve(dest: &mut Path, stroke: &Path, pen: &Path) -> PaintResult<()> {
    let hull = convex_hull(pen)?;
    if hull.is_empty() {
        tracing::debug!("empty pen, nothing to stroke");
        return Ok(());
    }
    let cap_style = dest.cap_style();

    for sub in stroke.subpaths().filter(|sub| sub.len() > 1) {
        let mut outline = Outline { points: Vec::new() };
        convolve_subpath(&mut outline, sub, hull.points(), cap_style);
        dest.append_closed(&outline.points);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/convolve.rs"]
mod tests;
