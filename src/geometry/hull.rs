//! Graham-scan convex hull of a path's points.

use std::cmp::Ordering;

use crate::foundation::core::SPoint;
use crate::foundation::error::{PaintResult, try_with_capacity};
use crate::geometry::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slope {
    dx: i64,
    dy: i64,
}

impl Slope {
    fn between(a: SPoint, b: SPoint) -> Self {
        Self {
            dx: i64::from(b.x.0) - i64::from(a.x.0),
            dy: i64::from(b.y.0) - i64::from(a.y.0),
        }
    }

    fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    fn length_squared(self) -> i128 {
        i128::from(self.dx) * i128::from(self.dx) + i128::from(self.dy) * i128::from(self.dy)
    }

    /// Angular order of two slopes, valid while they are less than half a turn apart.
    ///
    /// Angles start along +x and grow toward +y. A zero slope sorts after everything.
    fn compare(self, other: Slope) -> Ordering {
        let diff = i128::from(self.dy) * i128::from(other.dx)
            - i128::from(other.dy) * i128::from(self.dx);
        match diff.cmp(&0) {
            Ordering::Equal => match (self.is_zero(), other.is_zero()) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            },
            ord => ord,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct HullEntry {
    point: SPoint,
    slope: Slope,
    discard: bool,
}

/// Build the convex hull of every point in `path`.
///
/// The result is a single open sub-path listing hull vertices in increasing angle around
/// the lowest point (minimum y, then minimum x), which comes first. Degenerate inputs give
/// a hull of zero, one or two points.
#[tracing::instrument(skip(path), fields(points = path.len()))]
pub fn convex_hull(path: &Path) -> PaintResult<Path> {
    let mut out = Path::with_opts(*path.opts());
    let Some(mut hull) = hull_entries(path.points())? else {
        return Ok(out);
    };

    // The pivot is the lowest point, so every other slope lies in [0, 180) degrees.
    hull[1..].sort_by(|a, b| {
        a.slope
            .compare(b.slope)
            .then_with(|| a.slope.length_squared().cmp(&b.slope.length_squared()))
    });
    // Of several points at the same angle only the farthest can be on the hull.
    for i in 1..hull.len().saturating_sub(1) {
        if hull[i].slope.compare(hull[i + 1].slope) == Ordering::Equal {
            hull[i].discard = true;
        }
    }

    eliminate_concave(&mut hull);

    for entry in hull.iter().filter(|e| !e.discard) {
        out.sdraw(entry.point);
    }
    tracing::trace!(vertices = out.len(), "hull built");
    Ok(out)
}

fn hull_entries(points: &[SPoint]) -> PaintResult<Option<Vec<HullEntry>>> {
    let Some(pivot) = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.cmp(&b.y).then(a.x.cmp(&b.x)))
        .map(|(i, _)| i)
    else {
        return Ok(None);
    };

    let mut hull = try_with_capacity(points.len(), "hull scratch")?;

    let e = points[pivot];
    hull.push(HullEntry {
        point: e,
        slope: Slope { dx: 0, dy: 0 },
        discard: false,
    });
    for (i, &p) in points.iter().enumerate() {
        if i == pivot {
            continue;
        }
        let slope = Slope::between(e, p);
        hull.push(HullEntry {
            point: p,
            slope,
            discard: slope.is_zero(),
        });
    }
    Ok(Some(hull))
}

fn next_valid(hull: &[HullEntry], mut index: usize) -> usize {
    loop {
        index = (index + 1) % hull.len();
        if !hull[index].discard {
            return index;
        }
    }
}

fn prev_valid(hull: &[HullEntry], mut index: usize) -> usize {
    loop {
        index = (index + hull.len() - 1) % hull.len();
        if !hull[index].discard {
            return index;
        }
    }
}

/// Graham scan: drop every vertex where the boundary does not turn strictly left.
fn eliminate_concave(hull: &mut [HullEntry]) {
    // hull[0] is the pivot and is never discarded, so the lookups always terminate.
    let mut i = 0;
    let mut j = next_valid(hull, i);
    let mut k = next_valid(hull, j);

    loop {
        let ij = Slope::between(hull[i].point, hull[j].point);
        let jk = Slope::between(hull[j].point, hull[k].point);

        if ij.compare(jk) != Ordering::Less {
            if i == k {
                break;
            }
            hull[j].discard = true;
            j = i;
            i = prev_valid(hull, j);
        } else {
            i = j;
            j = k;
            k = next_valid(hull, j);
        }

        if j == 0 {
            break;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/hull.rs"]
mod tests;
