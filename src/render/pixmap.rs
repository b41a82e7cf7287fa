//! Externally owned pixel buffers with a clip rectangle, an origin and a damage hook.

use std::fmt;

use crate::foundation::core::{Format, Rect};
use crate::foundation::error::{PaintError, PaintResult};
use crate::foundation::math::{argb32_to_rgb16, rgb16_to_argb32};
use crate::geometry::matrix::Matrix;

/// One pixel in its storage format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// Alpha only.
    A8(u8),
    /// Packed 5-6-5 RGB.
    Rgb16(u16),
    /// Premultiplied ARGB.
    Argb32(u32),
}

impl Pixel {
    /// Storage format of this value.
    pub fn format(self) -> Format {
        match self {
            Pixel::A8(_) => Format::A8,
            Pixel::Rgb16(_) => Format::Rgb16,
            Pixel::Argb32(_) => Format::Argb32,
        }
    }

    /// Widen to premultiplied ARGB. A8 becomes black with that alpha, RGB16 is opaque.
    pub fn to_argb32(self) -> u32 {
        match self {
            Pixel::A8(a) => u32::from(a) << 24,
            Pixel::Rgb16(p) => rgb16_to_argb32(p),
            Pixel::Argb32(p) => p,
        }
    }

    /// Narrow a premultiplied ARGB value to `format`.
    pub fn from_argb32(format: Format, argb: u32) -> Pixel {
        match format {
            Format::A8 => Pixel::A8((argb >> 24) as u8),
            Format::Rgb16 => Pixel::Rgb16(argb32_to_rgb16(argb)),
            Format::Argb32 => Pixel::Argb32(argb),
        }
    }
}

/// Hook invoked with the rectangle touched by every mutating draw call.
pub type DamageHook<'a> = Box<dyn FnMut(Rect) + 'a>;

/// A rectangular array of pixels borrowed from the caller.
///
/// Rows are `stride` bytes apart. Every read and write made by this crate stays inside
/// [`Pixmap::clip`], which is always contained in the buffer bounds.
pub struct Pixmap<'a> {
    format: Format,
    width: i32,
    height: i32,
    stride: usize,
    clip: Rect,
    origin_x: i32,
    origin_y: i32,
    transform: Matrix,
    pixels: &'a mut [u8],
    damage: Option<DamageHook<'a>>,
}

impl fmt::Debug for Pixmap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("clip", &self.clip)
            .field("origin", &(self.origin_x, self.origin_y))
            .field("transform", &self.transform)
            .field("damage_hook", &self.damage.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Pixmap<'a> {
    /// Describe `pixels` as a `width` x `height` image with rows `stride` bytes apart.
    pub fn new(
        format: Format,
        width: u32,
        height: u32,
        stride: usize,
        pixels: &'a mut [u8],
    ) -> PaintResult<Self> {
        let w = i32::try_from(width)
            .map_err(|_| PaintError::validation(format!("pixmap width {width} too large")))?;
        let h = i32::try_from(height)
            .map_err(|_| PaintError::validation(format!("pixmap height {height} too large")))?;
        let row_bytes = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| PaintError::validation("pixmap row size overflows"))?;
        if stride < row_bytes {
            return Err(PaintError::validation(format!(
                "stride {stride} is smaller than a row of {row_bytes} bytes"
            )));
        }
        let needed = stride
            .checked_mul(height as usize)
            .ok_or_else(|| PaintError::validation("pixmap size overflows"))?;
        if pixels.len() < needed {
            return Err(PaintError::validation(format!(
                "pixel buffer holds {} bytes, {needed} required",
                pixels.len()
            )));
        }

        Ok(Self {
            format,
            width: w,
            height: h,
            stride,
            clip: Rect::new(0, 0, w, h),
            origin_x: 0,
            origin_y: 0,
            transform: Matrix::IDENTITY,
            pixels,
            damage: None,
        })
    }

    /// Like [`Pixmap::new`] with rows packed back to back.
    pub fn packed(
        format: Format,
        width: u32,
        height: u32,
        pixels: &'a mut [u8],
    ) -> PaintResult<Self> {
        let stride = (width as usize).saturating_mul(format.bytes_per_pixel());
        Self::new(format, width, height, stride, pixels)
    }

    /// Install a damage hook, replacing any previous one.
    pub fn with_damage_hook(mut self, hook: impl FnMut(Rect) + 'a) -> Self {
        self.damage = Some(Box::new(hook));
        self
    }

    /// Pixel format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row pitch in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whole-buffer rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Current clip rectangle in pixmap coordinates.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Intersect the clip with a rectangle given relative to the origin.
    pub fn clip_to(&mut self, rect: Rect) {
        let rect = rect.translate(self.origin_x, self.origin_y);
        let clip = self.clip.intersect(rect);
        self.clip = if clip.is_empty() { Rect::empty() } else { clip };
    }

    /// Snapshot of the clip for a later [`Pixmap::restore_clip`].
    pub fn current_clip(&self) -> Rect {
        self.clip
    }

    /// Replace the clip with a saved rectangle, clamped to the buffer.
    pub fn restore_clip(&mut self, rect: Rect) {
        let clip = rect.intersect(self.bounds());
        self.clip = if clip.is_empty() { Rect::empty() } else { clip };
    }

    /// Reset the clip to the whole buffer.
    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    /// Drawing origin added to every destination coordinate.
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Set the drawing origin.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Move the drawing origin to the top-left corner of the clip.
    pub fn origin_to_clip(&mut self) {
        self.origin_x = self.clip.left;
        self.origin_y = self.clip.top;
    }

    /// Matrix mapping destination coordinates into this pixmap when it is used as a source.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Replace the source transform.
    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    /// Notify the damage hook, if any, that `rect` changed.
    pub fn damage(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if let Some(hook) = self.damage.as_mut() {
            hook(rect);
        }
    }

    fn offset_of(&self, x: i32, y: i32) -> usize {
        y as usize * self.stride + x as usize * self.format.bytes_per_pixel()
    }

    /// Read a pixel. Returns `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let at = self.offset_of(x, y);
        let bytes = &self.pixels[at..at + self.format.bytes_per_pixel()];
        Some(match self.format {
            Format::A8 => Pixel::A8(bytes[0]),
            Format::Rgb16 => Pixel::Rgb16(u16::from_ne_bytes([bytes[0], bytes[1]])),
            Format::Argb32 => {
                Pixel::Argb32(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
        })
    }

    /// Write a pixel of the pixmap's own format.
    ///
    /// Returns `Ok(false)` when `(x, y)` lies outside the clip and nothing was written.
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) -> PaintResult<bool> {
        if pixel.format() != self.format {
            return Err(PaintError::validation(format!(
                "{:?} pixel written to {:?} pixmap",
                pixel.format(),
                self.format
            )));
        }
        if !self.clip.contains(x, y) {
            return Ok(false);
        }
        let at = self.offset_of(x, y);
        match pixel {
            Pixel::A8(a) => self.pixels[at] = a,
            Pixel::Rgb16(p) => self.pixels[at..at + 2].copy_from_slice(&p.to_ne_bytes()),
            Pixel::Argb32(p) => self.pixels[at..at + 4].copy_from_slice(&p.to_ne_bytes()),
        }
        Ok(true)
    }

    /// Return `true` when `(x, y)` is outside the buffer or has zero alpha.
    ///
    /// RGB16 pixels are always opaque.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        match self.pixel(x, y) {
            None => true,
            Some(Pixel::A8(a)) => a == 0,
            Some(Pixel::Rgb16(_)) => false,
            Some(Pixel::Argb32(p)) => p >> 24 == 0,
        }
    }

    /// Bytes of row `y` between columns `x0` and `x1`. The caller keeps the span in bounds.
    pub(crate) fn row(&self, y: i32, x0: i32, x1: i32) -> &[u8] {
        let start = self.offset_of(x0, y);
        let end = self.offset_of(x1, y);
        &self.pixels[start..end]
    }

    /// Mutable variant of [`Pixmap::row`].
    pub(crate) fn row_mut(&mut self, y: i32, x0: i32, x1: i32) -> &mut [u8] {
        let start = self.offset_of(x0, y);
        let end = self.offset_of(x1, y);
        &mut self.pixels[start..end]
    }
}

/// Something that can be composited: a solid colour or another pixmap.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'p> {
    /// Premultiplied ARGB colour of unbounded extent.
    Solid(u32),
    /// Pixels of another pixmap, sampled through its transform.
    Pixmap(&'p Pixmap<'p>),
}

impl Operand<'_> {
    /// Dispatch-table index: the pixmap format, or 3 for a solid colour.
    pub(crate) fn index(&self) -> usize {
        match self {
            Operand::Solid(_) => SOLID_INDEX,
            Operand::Pixmap(p) => p.format().index(),
        }
    }

    /// Index after resampling, where RGB16 rows are widened to ARGB32.
    pub(crate) fn xindex(&self) -> usize {
        match self {
            Operand::Pixmap(p) if p.format() == Format::Rgb16 => Format::Argb32.index(),
            _ => self.index(),
        }
    }

    /// Return `true` when this operand needs the resampling path.
    pub(crate) fn is_transformed(&self) -> bool {
        matches!(self, Operand::Pixmap(p) if !p.transform().is_identity())
    }
}

/// Table index used for solid operands.
pub(crate) const SOLID_INDEX: usize = 3;

#[cfg(test)]
#[path = "../../tests/unit/render/pixmap.rs"]
mod tests;
