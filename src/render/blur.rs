//! Small separable blur over the clip of an ARGB32 pixmap.

use crate::foundation::core::Format;
use crate::foundation::error::{PaintResult, try_zeroed};
use crate::render::pixmap::Pixmap;

const KERNEL: [u32; 5] = [1, 2, 3, 2, 1];
const KERNEL_SUM: u32 = 9;

/// Blur the clipped region with a 5-tap `[1 2 3 2 1] / 9` kernel, horizontally then
/// vertically.
///
/// All four channels are filtered, so premultiplied pixels stay premultiplied. Samples past
/// the clip edge repeat the edge pixel. Pixmaps that are not ARGB32 are left untouched.
#[tracing::instrument(skip(pixmap), fields(clip = ?pixmap.clip()))]
pub fn stack_blur(pixmap: &mut Pixmap<'_>) -> PaintResult<()> {
    if pixmap.format() != Format::Argb32 {
        tracing::debug!(format = ?pixmap.format(), "blur skipped");
        return Ok(());
    }
    let clip = pixmap.clip();
    if clip.is_empty() {
        return Ok(());
    }
    let (w, h) = (clip.width() as usize, clip.height() as usize);
    let mut src = try_zeroed::<u8>(w * h * 4, "blur source")?;
    let mut tmp = try_zeroed::<u8>(w * h * 4, "blur scratch")?;

    for (y, chunk) in (clip.top..clip.bottom).zip(src.chunks_exact_mut(w * 4)) {
        chunk.copy_from_slice(pixmap.row(y, clip.left, clip.right));
    }
    horizontal_pass(&src, &mut tmp, w, h);
    vertical_pass(&tmp, &mut src, w, h);
    for (y, chunk) in (clip.top..clip.bottom).zip(src.chunks_exact(w * 4)) {
        pixmap.row_mut(y, clip.left, clip.right).copy_from_slice(chunk);
    }
    pixmap.damage(clip);
    Ok(())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize) {
    let radius = (KERNEL.len() / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u32; 4];
            for (ki, &kw) in KERNEL.iter().enumerate() {
                let sx = (x as isize + ki as isize - radius).clamp(0, w as isize - 1) as usize;
                let idx = (y * w + sx) * 4;
                for c in 0..4 {
                    acc[c] += kw * u32::from(src[idx + c]);
                }
            }
            store(&mut dst[(y * w + x) * 4..][..4], acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], w: usize, h: usize) {
    let radius = (KERNEL.len() / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u32; 4];
            for (ki, &kw) in KERNEL.iter().enumerate() {
                let sy = (y as isize + ki as isize - radius).clamp(0, h as isize - 1) as usize;
                let idx = (sy * w + x) * 4;
                for c in 0..4 {
                    acc[c] += kw * u32::from(src[idx + c]);
                }
            }
            store(&mut dst[(y * w + x) * 4..][..4], acc);
        }
    }
}

fn store(px: &mut [u8], acc: [u32; 4]) {
    for (out, sum) in px.iter_mut().zip(acc) {
        *out = ((sum + KERNEL_SUM / 2) / KERNEL_SUM).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
