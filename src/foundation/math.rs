//! Integer pixel arithmetic shared by the span routines and resampler.

/// `x * y / 255`, rounded to nearest.
#[inline]
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[inline]
pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Extract the 8-bit channel at bit offset `shift` of a packed ARGB value.
#[inline]
pub(crate) const fn channel(v: u32, shift: u32) -> u8 {
    (v >> shift) as u8
}

/// Pack four 8-bit channels into an ARGB value.
#[inline]
pub(crate) const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Expand 5-6-5 RGB to opaque ARGB by replicating the high bits into the low bits.
#[inline]
pub(crate) const fn rgb16_to_argb32(p: u16) -> u32 {
    let p = p as u32;
    let r5 = (p >> 11) & 0x1f;
    let g6 = (p >> 5) & 0x3f;
    let b5 = p & 0x1f;
    let r = (r5 << 3) | (r5 >> 2);
    let g = (g6 << 2) | (g6 >> 4);
    let b = (b5 << 3) | (b5 >> 2);
    0xff00_0000 | (r << 16) | (g << 8) | b
}

/// Pack ARGB to 5-6-5 RGB, rounding each channel to the nearest representable level.
#[inline]
pub(crate) const fn argb32_to_rgb16(v: u32) -> u16 {
    let r = ((v >> 16) & 0xff) * 31;
    let g = ((v >> 8) & 0xff) * 63;
    let b = (v & 0xff) * 31;
    let r5 = (r + 127) / 255;
    let g6 = (g + 127) / 255;
    let b5 = (b + 127) / 255;
    ((r5 << 11) | (g6 << 5) | b5) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
