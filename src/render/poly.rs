//! Polygon scan conversion and the path/stroke painting entry points.

use crate::foundation::core::{Format, Operator, Rect};
use crate::foundation::error::{PaintError, PaintResult, try_with_capacity, try_zeroed};
use crate::foundation::fixed::{Fixed, SFixed};
use crate::geometry::convolve::convolve;
use crate::geometry::path::Path;
use crate::render::composite::{Composite, composite};
use crate::render::pixmap::{Operand, Pixmap};

const SHIFT: u32 = SFixed::FRAC_BITS;
const HALF: i64 = 1 << (SHIFT - 1);

#[derive(Clone, Copy, Debug)]
struct Edge {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    /// +1 for downward edges, -1 for upward ones.
    dir: i32,
}

impl Edge {
    fn x_at(&self, y: i64) -> i64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    n.div_euclid(d) + i64::from(n.rem_euclid(d) != 0)
}

fn collect_edges(path: &Path, dx: i32, dy: i32) -> PaintResult<Vec<Edge>> {
    let mut edges = try_with_capacity(path.len() + path.sublen().len() + 1, "polygon edges")?;
    let ox = i64::from(dx) << SHIFT;
    let oy = i64::from(dy) << SHIFT;
    for sub in path.subpaths().filter(|s| s.len() > 1) {
        // Every contour is implicitly closed.
        let closing = sub.last().zip(sub.first());
        for (a, b) in sub.windows(2).map(|w| (&w[0], &w[1])).chain(closing) {
            let (ay, by) = (i64::from(a.y.0) + oy, i64::from(b.y.0) + oy);
            if ay == by {
                continue;
            }
            let (ax, bx) = (i64::from(a.x.0) + ox, i64::from(b.x.0) + ox);
            edges.push(if ay < by {
                Edge {
                    x0: ax,
                    y0: ay,
                    x1: bx,
                    y1: by,
                    dir: 1,
                }
            } else {
                Edge {
                    x0: bx,
                    y0: by,
                    x1: ax,
                    y1: ay,
                    dir: -1,
                }
            });
        }
    }
    Ok(edges)
}

/// Scan-convert `path`, offset by `(dx, dy)` pixels, into an A8 pixmap.
///
/// Pixels whose centre lies inside the path under the non-zero winding rule are set to
/// 0xff; there is no edge antialiasing. Only pixels inside the clip are written.
#[tracing::instrument(skip(pixmap, path), fields(points = path.len()))]
pub fn fill_path(pixmap: &mut Pixmap<'_>, path: &Path, dx: i32, dy: i32) -> PaintResult<()> {
    if pixmap.format() != Format::A8 {
        return Err(PaintError::validation(format!(
            "polygon fill needs an A8 pixmap, got {:?}",
            pixmap.format()
        )));
    }
    let edges = collect_edges(path, dx, dy)?;
    let clip = pixmap.clip();
    let (Some(ymin), Some(ymax)) = (
        edges.iter().map(|e| e.y0).min(),
        edges.iter().map(|e| e.y1).max(),
    ) else {
        return Ok(());
    };
    let mut crossings: Vec<(i64, i32)> = try_with_capacity(edges.len(), "polygon crossings")?;

    let one = 1i64 << SHIFT;
    let top = (ymin >> SHIFT).max(i64::from(clip.top));
    let bottom = ceil_div(ymax, one).min(i64::from(clip.bottom));
    let mut damage = Rect::empty();

    for y in top..bottom {
        let cy = (y << SHIFT) + HALF;
        crossings.clear();
        crossings.extend(
            edges
                .iter()
                .filter(|e| e.y0 <= cy && cy < e.y1)
                .map(|e| (e.x_at(cy), e.dir)),
        );
        crossings.sort_unstable_by_key(|c| c.0);

        let mut winding = 0;
        let mut span_start = 0i64;
        for &(x, dir) in &crossings {
            let was_inside = winding != 0;
            winding += dir;
            if !was_inside && winding != 0 {
                span_start = x;
            } else if was_inside && winding == 0 {
                let x0 = ceil_div(span_start - HALF, one).max(i64::from(clip.left));
                let x1 = ceil_div(x - HALF, one).min(i64::from(clip.right));
                if x0 < x1 {
                    let (x0, x1, yi) = (x0 as i32, x1 as i32, y as i32);
                    pixmap.row_mut(yi, x0, x1).fill(0xff);
                    damage = damage.union(Rect::new(x0, yi, x1, yi + 1));
                }
            }
        }
    }
    pixmap.damage(damage);
    Ok(())
}

/// Composite `src` through the coverage of `path` onto `dst`.
///
/// Path coordinates are relative to the destination origin; `src_x`/`src_y` give the source
/// position that lines up with that origin.
#[tracing::instrument(skip(dst, src, path), fields(points = path.len()))]
pub fn composite_path(
    dst: &mut Pixmap<'_>,
    src: Operand<'_>,
    src_x: i32,
    src_y: i32,
    path: &Path,
    operator: Operator,
) -> PaintResult<()> {
    let (ox, oy) = dst.origin();
    let bounds = path.bounds().intersect(dst.clip().translate(-ox, -oy));
    if bounds.is_empty() {
        return Ok(());
    }
    let (w, h) = (bounds.width(), bounds.height());
    let mut coverage = try_zeroed(w as usize * h as usize, "path mask")?;
    let mut mask = Pixmap::packed(Format::A8, w as u32, h as u32, &mut coverage)?;
    fill_path(&mut mask, path, -bounds.left, -bounds.top)?;

    let req = Composite::new(src, w, h)
        .at(bounds.left, bounds.top)
        .src_offset(src_x.saturating_add(bounds.left), src_y.saturating_add(bounds.top))
        .mask(Operand::Pixmap(&mask), 0, 0)
        .operator(operator);
    composite(dst, &req)
}

/// Paint `path` with a solid colour using over.
pub fn paint_path(dst: &mut Pixmap<'_>, argb: u32, path: &Path) -> PaintResult<()> {
    composite_path(dst, Operand::Solid(argb), 0, 0, path, Operator::Over)
}

/// Composite `src` through the outline of `stroke` drawn with a round pen `pen_width` wide.
///
/// The pen follows the stroke's matrix without its translation, and the caps follow the
/// stroke's cap style.
#[tracing::instrument(skip(dst, src, stroke), fields(points = stroke.len()))]
pub fn composite_stroke(
    dst: &mut Pixmap<'_>,
    src: Operand<'_>,
    src_x: i32,
    src_y: i32,
    stroke: &Path,
    pen_width: Fixed,
    operator: Operator,
) -> PaintResult<()> {
    let mut pen = Path::with_opts(*stroke.opts());
    pen.set_matrix(stroke.current_matrix().without_translation());
    pen.circle(Fixed::ZERO, Fixed::ZERO, pen_width / Fixed::from_int(2));

    let mut outline = Path::with_opts(*stroke.opts());
    outline.set_cap_style(stroke.cap_style());
    convolve(&mut outline, stroke, &pen)?;
    composite_path(dst, src, src_x, src_y, &outline, operator)
}

/// Stroke `stroke` with a solid colour using over.
pub fn paint_stroke(
    dst: &mut Pixmap<'_>,
    argb: u32,
    stroke: &Path,
    pen_width: Fixed,
) -> PaintResult<()> {
    composite_stroke(dst, Operand::Solid(argb), 0, 0, stroke, pen_width, Operator::Over)
}

#[cfg(test)]
#[path = "../../tests/unit/render/poly.rs"]
mod tests;
