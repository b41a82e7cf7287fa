//! The composite engine: clipping, simple and resampled paths, fills, premultiply.

use crate::foundation::core::{Format, Operator, Rect};
use crate::foundation::error::{PaintResult, try_zeroed};
use crate::foundation::math::{channel, mul_div255_u8, pack_argb, rgb16_to_argb32};
use crate::render::pixmap::{Operand, Pixmap, SOLID_INDEX};
use crate::render::span::{COMP2, COMP3, Span};
use crate::render::xform::Resampler;

/// An operand placed at an offset.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'p> {
    /// What to read.
    pub operand: Operand<'p>,
    /// Horizontal offset added to the operand's origin.
    pub x: i32,
    /// Vertical offset added to the operand's origin.
    pub y: i32,
}

/// One composite request: `dst = (src IN mask) OP dst` over a `width` x `height` rectangle.
#[derive(Clone, Copy, Debug)]
pub struct Composite<'p> {
    /// Destination x, relative to the destination origin.
    pub dst_x: i32,
    /// Destination y, relative to the destination origin.
    pub dst_y: i32,
    /// Source operand.
    pub src: Layer<'p>,
    /// Optional mask; only its alpha is used.
    pub mask: Option<Layer<'p>>,
    /// Blend operator.
    pub operator: Operator,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl<'p> Composite<'p> {
    /// Composite `src` at the destination origin with [`Operator::Over`].
    pub fn new(src: Operand<'p>, width: i32, height: i32) -> Self {
        Self {
            dst_x: 0,
            dst_y: 0,
            src: Layer {
                operand: src,
                x: 0,
                y: 0,
            },
            mask: None,
            operator: Operator::Over,
            width,
            height,
        }
    }

    /// Place the request at `(x, y)` in the destination.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.dst_x = x;
        self.dst_y = y;
        self
    }

    /// Read the source starting at `(x, y)`.
    pub fn src_offset(mut self, x: i32, y: i32) -> Self {
        self.src.x = x;
        self.src.y = y;
        self
    }

    /// Attenuate the source by `mask` read starting at `(x, y)`.
    pub fn mask(mut self, mask: Operand<'p>, x: i32, y: i32) -> Self {
        self.mask = Some(Layer {
            operand: mask,
            x,
            y,
        });
        self
    }

    /// Use `operator` instead of over.
    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }
}

/// Rows of a pixmap operand for the untransformed path.
enum RowSource<'p> {
    Solid(u32),
    /// Every row read lies inside the source clip.
    Direct {
        pixmap: &'p Pixmap<'p>,
        dx: i32,
        dy: i32,
    },
    /// Some reads fall outside the source clip and are zero-padded through `scratch`.
    ///
    /// RGB16 rows are widened to ARGB32 so the padding stays transparent.
    Padded {
        pixmap: &'p Pixmap<'p>,
        dx: i32,
        dy: i32,
        scratch: Vec<u8>,
    },
}

impl<'p> RowSource<'p> {
    /// `dst_x`/`dst_y` include the destination origin.
    fn prepare(layer: &Layer<'p>, rect: Rect, dst_x: i32, dst_y: i32) -> PaintResult<Self> {
        let pixmap = match layer.operand {
            Operand::Solid(c) => return Ok(RowSource::Solid(c)),
            Operand::Pixmap(p) => p,
        };
        let (ox, oy) = pixmap.origin();
        let dx = layer.x.saturating_add(ox).saturating_sub(dst_x);
        let dy = layer.y.saturating_add(oy).saturating_sub(dst_y);
        let needed = rect.translate(dx, dy);
        if pixmap.clip().intersect(needed) == needed {
            return Ok(RowSource::Direct { pixmap, dx, dy });
        }
        let len = rect.width() as usize * padded_format(pixmap).bytes_per_pixel();
        Ok(RowSource::Padded {
            pixmap,
            dx,
            dy,
            scratch: try_zeroed(len, "padded source row")?,
        })
    }

    /// Dispatch-table index of the rows this source yields.
    fn index(&self) -> usize {
        match self {
            RowSource::Solid(_) => SOLID_INDEX,
            RowSource::Direct { pixmap, .. } => pixmap.format().index(),
            RowSource::Padded { pixmap, .. } => padded_format(pixmap).index(),
        }
    }

    fn span(&mut self, y: i32, left: i32, right: i32) -> Span<'_> {
        match self {
            RowSource::Solid(c) => Span::Solid(*c),
            RowSource::Direct { pixmap, dx, dy } => {
                let (sy, sx) = (y.saturating_add(*dy), left.saturating_add(*dx));
                Span::Row(pixmap.row(sy, sx, right.saturating_add(*dx)))
            }
            RowSource::Padded {
                pixmap,
                dx,
                dy,
                scratch,
            } => {
                scratch.fill(0);
                let clip = pixmap.clip();
                let sy = y.saturating_add(*dy);
                let (x0, x1) = (left.saturating_add(*dx), right.saturating_add(*dx));
                let (a, b) = (x0.max(clip.left), x1.min(clip.right));
                if sy >= clip.top && sy < clip.bottom && a < b {
                    let src = pixmap.row(sy, a, b);
                    let skip = (a - x0) as usize;
                    if pixmap.format() == Format::Rgb16 {
                        let out = scratch[skip * 4..].chunks_exact_mut(4);
                        for (px, word) in out.zip(src.chunks_exact(2)) {
                            let v = rgb16_to_argb32(u16::from_ne_bytes([word[0], word[1]]));
                            px.copy_from_slice(&v.to_ne_bytes());
                        }
                    } else {
                        let at = skip * pixmap.format().bytes_per_pixel();
                        scratch[at..at + src.len()].copy_from_slice(src);
                    }
                }
                Span::Row(scratch)
            }
        }
    }
}

fn padded_format(pixmap: &Pixmap<'_>) -> Format {
    match pixmap.format() {
        Format::Rgb16 => Format::Argb32,
        f => f,
    }
}

/// Clip `(x, y, width, height)`, given relative to the origin, against `dst`.
fn clip_request(dst: &Pixmap<'_>, x: i32, y: i32, width: i32, height: i32) -> (i32, i32, Rect) {
    let (ox, oy) = dst.origin();
    let x = x.saturating_add(ox);
    let y = y.saturating_add(oy);
    let rect = Rect::new(x, y, x.saturating_add(width), y.saturating_add(height));
    (x, y, rect.intersect(dst.clip()))
}

/// Clip a rectangle, given relative to the origin, against `dst`.
fn clip_rect(dst: &Pixmap<'_>, rect: Rect) -> Rect {
    let (ox, oy) = dst.origin();
    rect.translate(ox, oy).intersect(dst.clip())
}

/// Composite one request into `dst` and report the touched rectangle as damage.
///
/// Nothing is drawn and no damage is reported when the clipped rectangle is empty or a
/// scratch buffer cannot be allocated.
#[tracing::instrument(skip_all, fields(op = ?req.operator, width = req.width, height = req.height))]
pub fn composite(dst: &mut Pixmap<'_>, req: &Composite<'_>) -> PaintResult<()> {
    let (dst_x, dst_y, rect) = clip_request(dst, req.dst_x, req.dst_y, req.width, req.height);
    if rect.is_empty() {
        tracing::debug!("composite clipped away");
        return Ok(());
    }

    let transformed = req.src.operand.is_transformed()
        || req.mask.is_some_and(|m| m.operand.is_transformed());
    if transformed {
        composite_xform(dst, req, dst_x, dst_y, rect)?;
    } else {
        composite_simple(dst, req, dst_x, dst_y, rect)?;
    }
    dst.damage(rect);
    Ok(())
}

fn composite_simple(
    dst: &mut Pixmap<'_>,
    req: &Composite<'_>,
    dst_x: i32,
    dst_y: i32,
    rect: Rect,
) -> PaintResult<()> {
    let op = req.operator.index();
    let d = dst.format().index();
    let width = rect.width() as usize;
    let mut src = RowSource::prepare(&req.src, rect, dst_x, dst_y)?;

    match &req.mask {
        Some(mask) => {
            let mut msk = RowSource::prepare(mask, rect, dst_x, dst_y)?;
            let blend = COMP3[op][src.index()][msk.index()][d];
            for y in rect.top..rect.bottom {
                let row = dst.row_mut(y, rect.left, rect.right);
                blend(
                    row,
                    src.span(y, rect.left, rect.right),
                    msk.span(y, rect.left, rect.right),
                    width,
                );
            }
        }
        None => {
            let blend = COMP2[op][src.index()][d];
            for y in rect.top..rect.bottom {
                let row = dst.row_mut(y, rect.left, rect.right);
                blend(row, src.span(y, rect.left, rect.right), width);
            }
        }
    }
    Ok(())
}

fn resampler<'p>(
    layer: &Layer<'p>,
    rect: Rect,
    dst_x: i32,
) -> PaintResult<Option<Resampler<'p>>> {
    match layer.operand {
        Operand::Solid(_) => Ok(None),
        Operand::Pixmap(p) => {
            let (ox, oy) = p.origin();
            Resampler::new(
                p,
                rect.width(),
                rect.left.saturating_sub(dst_x),
                layer.x.saturating_add(ox),
                layer.y.saturating_add(oy),
            )
            .map(Some)
        }
    }
}

fn layer_span<'s>(layer: &Layer<'_>, rs: &'s mut Option<Resampler<'_>>, line: i32) -> Span<'s> {
    match (layer.operand, rs) {
        (_, Some(rs)) => {
            rs.read_row(line);
            rs.span()
        }
        (Operand::Solid(c), None) => Span::Solid(c),
        (Operand::Pixmap(_), None) => Span::Solid(0),
    }
}

fn composite_xform(
    dst: &mut Pixmap<'_>,
    req: &Composite<'_>,
    dst_x: i32,
    dst_y: i32,
    rect: Rect,
) -> PaintResult<()> {
    let op = req.operator.index();
    let d = dst.format().index();
    let width = rect.width() as usize;
    // Allocate every row buffer before touching the destination.
    let mut src_rs = resampler(&req.src, rect, dst_x)?;
    let mut msk_rs = match &req.mask {
        Some(mask) => resampler(mask, rect, dst_x)?,
        None => None,
    };

    match &req.mask {
        Some(mask) => {
            let blend = COMP3[op][req.src.operand.xindex()][mask.operand.xindex()][d];
            for y in rect.top..rect.bottom {
                let line = y.saturating_sub(dst_y);
                let s = layer_span(&req.src, &mut src_rs, line);
                let m = layer_span(mask, &mut msk_rs, line);
                blend(dst.row_mut(y, rect.left, rect.right), s, m, width);
            }
        }
        None => {
            let blend = COMP2[op][req.src.operand.xindex()][d];
            for y in rect.top..rect.bottom {
                let s = layer_span(&req.src, &mut src_rs, y.saturating_sub(dst_y));
                blend(dst.row_mut(y, rect.left, rect.right), s, width);
            }
        }
    }
    Ok(())
}

/// Fill a rectangle, given relative to the origin, with a solid colour.
#[tracing::instrument(skip(dst))]
pub fn fill(dst: &mut Pixmap<'_>, argb: u32, operator: Operator, rect: Rect) {
    let clipped = clip_rect(dst, rect);
    if clipped.is_empty() {
        tracing::debug!("fill clipped away");
        return;
    }
    fill_rows(dst, argb, operator, clipped);
    dst.damage(clipped);
}

/// Fill the whole pixmap, ignoring the clip, when `rect` is not clipped away entirely.
///
/// Used for full-surface overlays; the whole pixmap is reported as damage.
#[tracing::instrument(skip(dst))]
pub fn fill_unclipped(dst: &mut Pixmap<'_>, argb: u32, operator: Operator, rect: Rect) {
    let clipped = clip_rect(dst, rect);
    if clipped.is_empty() {
        return;
    }
    let all = dst.bounds();
    fill_rows(dst, argb, operator, all);
    dst.damage(all);
}

fn fill_rows(dst: &mut Pixmap<'_>, argb: u32, operator: Operator, rect: Rect) {
    let blend = COMP2[operator.index()][Operand::Solid(argb).index()][dst.format().index()];
    let width = rect.width() as usize;
    for y in rect.top..rect.bottom {
        blend(dst.row_mut(y, rect.left, rect.right), Span::Solid(argb), width);
    }
}

/// Scale the colour channels of straight-alpha ARGB32 pixels by their alpha.
///
/// Pixels with zero alpha become zero. Other formats are left untouched. Applying this
/// twice attenuates colour twice.
#[tracing::instrument(skip(dst))]
pub fn premultiply(dst: &mut Pixmap<'_>) {
    if dst.format() != Format::Argb32 {
        return;
    }
    let clip = dst.clip();
    for y in clip.top..clip.bottom {
        for px in dst.row_mut(y, clip.left, clip.right).chunks_exact_mut(4) {
            let v = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&premultiply_pixel(v).to_ne_bytes());
        }
    }
    dst.damage(clip);
}

pub(crate) fn premultiply_pixel(v: u32) -> u32 {
    let a = channel(v, 24);
    if a == 0 {
        return 0;
    }
    let mul = |shift: u32| mul_div255_u8(u16::from(channel(v, shift)), u16::from(a));
    pack_argb(a, mul(16), mul(8), mul(0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
