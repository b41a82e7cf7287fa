//! Moving pixels between [`Pixmap`]s and `image` buffers.

use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::Format;
use crate::foundation::error::{PaintError, PaintResult, try_zeroed};
use crate::foundation::math::{channel, pack_argb};
use crate::render::composite::premultiply_pixel;
use crate::render::pixmap::Pixmap;

/// Owned, tightly packed premultiplied ARGB32 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argb32Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Native-endian `u32` pixels, `width * 4` bytes per row.
    pub pixels: Vec<u8>,
}

impl Argb32Image {
    /// Convert a straight-alpha RGBA image, premultiplying every pixel.
    pub fn from_rgba(img: &image::RgbaImage) -> PaintResult<Self> {
        let (width, height) = img.dimensions();
        let mut pixels = try_zeroed::<u8>(img.as_raw().len(), "image import")?;
        for (dst, src) in pixels.chunks_exact_mut(4).zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            dst.copy_from_slice(&premultiply_pixel(pack_argb(a, r, g, b)).to_ne_bytes());
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an encoded image (PNG) and premultiply it.
    pub fn decode(bytes: &[u8]) -> PaintResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Self::from_rgba(&img.to_rgba8())
    }

    /// Borrow the pixels as a drawable pixmap.
    pub fn pixmap(&mut self) -> PaintResult<Pixmap<'_>> {
        Pixmap::packed(Format::Argb32, self.width, self.height, &mut self.pixels)
    }
}

/// Copy a pixmap into a straight-alpha RGBA image.
///
/// A8 pixmaps come out black with the stored alpha; RGB16 pixmaps are opaque. The clip is
/// ignored.
#[tracing::instrument(skip(pixmap), fields(format = ?pixmap.format()))]
pub fn to_rgba_image(pixmap: &Pixmap<'_>) -> PaintResult<image::RgbaImage> {
    let (w, h) = (pixmap.width() as u32, pixmap.height() as u32);
    let mut raw = try_zeroed::<u8>(w as usize * h as usize * 4, "image export")?;
    for (i, px) in raw.chunks_exact_mut(4).enumerate() {
        let (x, y) = ((i % w as usize) as i32, (i / w as usize) as i32);
        let argb = pixmap.pixel(x, y).map_or(0, |p| p.to_argb32());
        px.copy_from_slice(&unpremultiply(argb));
    }
    image::RgbaImage::from_raw(w, h, raw)
        .ok_or_else(|| PaintError::validation("image export buffer does not match dimensions"))
}

/// Encode a pixmap as PNG bytes.
pub fn encode_png(pixmap: &Pixmap<'_>) -> PaintResult<Vec<u8>> {
    let img = to_rgba_image(pixmap)?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = channel(argb, 24);
    if a == 0 {
        return [0; 4];
    }
    let a16 = u16::from(a);
    let un = |shift: u32| ((u16::from(channel(argb, shift)) * 255 + a16 / 2) / a16).min(255) as u8;
    [un(16), un(8), un(0), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/image_io.rs"]
mod tests;
