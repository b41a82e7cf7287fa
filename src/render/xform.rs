//! Bilinear resampling of transformed pixmaps into scanline buffers.

use crate::foundation::core::Format;
use crate::foundation::error::{PaintResult, try_zeroed};
use crate::foundation::fixed::Fixed;
use crate::render::pixmap::Pixmap;
use crate::render::span::Span;

const ONE: u32 = 1 << Fixed::FRAC_BITS;
const FRAC_MASK: i64 = (1 << Fixed::FRAC_BITS) - 1;

/// Bilinear blend of one channel; weights are 16-bit fractions.
#[inline]
fn mix(tl: u32, tr: u32, bl: u32, br: u32, wx: u32, wy: u32) -> u32 {
    let bottom = (br * wx + bl * (ONE - wx)) >> 16;
    let top = (tr * wx + tl * (ONE - wx)) >> 16;
    (bottom * wy + top * (ONE - wy)) >> 16
}

/// Per-composite row buffer for one transformed pixmap operand.
///
/// A8 pixmaps resample into one byte per pixel; RGB16 and ARGB32 pixmaps resample into
/// ARGB32 words.
pub(crate) struct Resampler<'p> {
    pixmap: &'p Pixmap<'p>,
    row: Vec<u8>,
    width: i32,
    first_col: i32,
    src_x: i32,
    src_y: i32,
}

impl<'p> Resampler<'p> {
    /// Allocate the row buffer. `first_col` is the offset of the first clipped destination
    /// column from the request's destination origin; `src_x`/`src_y` already include the
    /// source pixmap's origin.
    pub(crate) fn new(
        pixmap: &'p Pixmap<'p>,
        width: i32,
        first_col: i32,
        src_x: i32,
        src_y: i32,
    ) -> PaintResult<Self> {
        let bpp = match pixmap.format() {
            Format::A8 => 1,
            Format::Rgb16 | Format::Argb32 => 4,
        };
        let row = try_zeroed(width.max(0) as usize * bpp, "resample row")?;
        Ok(Self {
            pixmap,
            row,
            width,
            first_col,
            src_x,
            src_y,
        })
    }

    /// Sample the pixmap as ARGB32, treating anything outside its clip as zero.
    fn sample(&self, x: i64, y: i64) -> u32 {
        let clip = self.pixmap.clip();
        let (left, right) = (i64::from(clip.left) << 16, i64::from(clip.right) << 16);
        let (top, bottom) = (i64::from(clip.top) << 16, i64::from(clip.bottom) << 16);
        if x < left || x >= right || y < top || y >= bottom {
            return 0;
        }
        self.pixmap
            .pixel((x >> 16) as i32, (y >> 16) as i32)
            .map_or(0, |p| p.to_argb32())
    }

    /// Fill the row buffer for destination row `line`, counted from the request origin.
    pub(crate) fn read_row(&mut self, line: i32) {
        let tfm = *self.pixmap.transform();
        let dy = Fixed::from_int(line);
        let sx0 = i64::from(self.src_x) << 16;
        let sy0 = i64::from(self.src_y) << 16;
        let one = i64::from(ONE);

        for col in 0..self.width {
            let dx = Fixed::from_int(self.first_col.saturating_add(col));
            let sx = i64::from(tfm.fx(dx, dy).0) + sx0;
            let sy = i64::from(tfm.fy(dx, dy).0) + sy0;
            let tl = self.sample(sx, sy);
            let tr = self.sample(sx + one, sy);
            let bl = self.sample(sx, sy + one);
            let br = self.sample(sx + one, sy + one);
            let wx = (sx & FRAC_MASK) as u32;
            let wy = (sy & FRAC_MASK) as u32;
            let channel = |shift: u32| {
                let c = |p: u32| (p >> shift) & 0xff;
                mix(c(tl), c(tr), c(bl), c(br), wx, wy)
            };

            let i = col as usize;
            if self.pixmap.format() == Format::A8 {
                self.row[i] = channel(24) as u8;
            } else {
                let v = (channel(24) << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0);
                self.row[4 * i..4 * i + 4].copy_from_slice(&v.to_ne_bytes());
            }
        }
    }

    /// The most recently read row.
    pub(crate) fn span(&self) -> Span<'_> {
        Span::Row(&self.row)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/xform.rs"]
mod tests;
