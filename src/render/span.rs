//! Scanline blend routines and the operator dispatch tables.
//!
//! Each routine is one instantiation of a generic loop over `(operator, source, [mask],
//! destination)`. Source and mask kinds index `[A8, RGB16, ARGB32, solid]`; destination
//! kinds index `[A8, RGB16, ARGB32]`. All arithmetic happens on premultiplied ARGB words.

use crate::foundation::math::{
    argb32_to_rgb16, channel, mul_div255_u8, pack_argb, rgb16_to_argb32,
};

const OVER: u8 = 0;
const SOURCE: u8 = 1;

const A8: u8 = 0;
const RGB16: u8 = 1;
const ARGB32: u8 = 2;
const SOLID: u8 = 3;

/// Source or mask data for one scanline.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Span<'s> {
    /// A single colour repeated across the span.
    Solid(u32),
    /// Packed pixels in the format selected by the table index.
    Row(&'s [u8]),
}

/// Two-operand blend: `dst = src OP dst` over `width` pixels.
pub(crate) type SrcOp = fn(dst: &mut [u8], src: Span<'_>, width: usize);
/// Three-operand blend: `dst = (src IN msk) OP dst` over `width` pixels.
pub(crate) type SrcMskOp = fn(dst: &mut [u8], src: Span<'_>, msk: Span<'_>, width: usize);

#[inline]
fn load<const K: u8>(row: &[u8], i: usize) -> u32 {
    match K {
        A8 => u32::from(row[i]) << 24,
        RGB16 => rgb16_to_argb32(u16::from_ne_bytes([row[2 * i], row[2 * i + 1]])),
        ARGB32 => u32::from_ne_bytes([row[4 * i], row[4 * i + 1], row[4 * i + 2], row[4 * i + 3]]),
        _ => unreachable!("solid operands never arrive as rows"),
    }
}

#[inline]
fn store<const K: u8>(row: &mut [u8], i: usize, v: u32) {
    match K {
        A8 => row[i] = (v >> 24) as u8,
        RGB16 => row[2 * i..2 * i + 2].copy_from_slice(&argb32_to_rgb16(v).to_ne_bytes()),
        ARGB32 => row[4 * i..4 * i + 4].copy_from_slice(&v.to_ne_bytes()),
        _ => unreachable!("solid is not a destination kind"),
    }
}

#[inline]
fn fetch<const K: u8>(span: Span<'_>, i: usize) -> u32 {
    match span {
        Span::Solid(c) => c,
        Span::Row(row) => load::<K>(row, i),
    }
}

/// Porter-Duff over on premultiplied pixels, rounding each product to nearest.
#[inline]
pub(crate) fn over(src: u32, dst: u32) -> u32 {
    let ia = 255 - u16::from(channel(src, 24));
    if ia == 0 {
        return src;
    }
    let mix = |shift: u32| {
        channel(src, shift).saturating_add(mul_div255_u8(u16::from(channel(dst, shift)), ia))
    };
    pack_argb(mix(24), mix(16), mix(8), mix(0))
}

/// Scale every channel of `src` by `alpha / 255`.
#[inline]
pub(crate) fn in_alpha(src: u32, alpha: u8) -> u32 {
    match alpha {
        0 => 0,
        255 => src,
        a => {
            let a = u16::from(a);
            let mul = |shift: u32| mul_div255_u8(u16::from(channel(src, shift)), a);
            pack_argb(mul(24), mul(16), mul(8), mul(0))
        }
    }
}

#[inline]
fn apply<const OP: u8, const D: u8>(dst: &mut [u8], i: usize, s: u32) {
    let v = if OP == SOURCE {
        s
    } else {
        over(s, load::<D>(dst, i))
    };
    store::<D>(dst, i, v);
}

fn src_op<const OP: u8, const S: u8, const D: u8>(dst: &mut [u8], src: Span<'_>, width: usize) {
    for i in 0..width {
        apply::<OP, D>(dst, i, fetch::<S>(src, i));
    }
}

fn src_msk_op<const OP: u8, const S: u8, const M: u8, const D: u8>(
    dst: &mut [u8],
    src: Span<'_>,
    msk: Span<'_>,
    width: usize,
) {
    for i in 0..width {
        let alpha = channel(fetch::<M>(msk, i), 24);
        apply::<OP, D>(dst, i, in_alpha(fetch::<S>(src, i), alpha));
    }
}

macro_rules! src_row {
    ($op:tt, $s:tt) => {
        [
            src_op::<$op, $s, { A8 }>,
            src_op::<$op, $s, { RGB16 }>,
            src_op::<$op, $s, { ARGB32 }>,
        ]
    };
}

macro_rules! src_table {
    ($op:tt) => {
        [
            src_row!($op, { A8 }),
            src_row!($op, { RGB16 }),
            src_row!($op, { ARGB32 }),
            src_row!($op, { SOLID }),
        ]
    };
}

macro_rules! msk_row {
    ($op:tt, $s:tt, $m:tt) => {
        [
            src_msk_op::<$op, $s, $m, { A8 }>,
            src_msk_op::<$op, $s, $m, { RGB16 }>,
            src_msk_op::<$op, $s, $m, { ARGB32 }>,
        ]
    };
}

macro_rules! msk_src {
    ($op:tt, $s:tt) => {
        [
            msk_row!($op, $s, { A8 }),
            msk_row!($op, $s, { RGB16 }),
            msk_row!($op, $s, { ARGB32 }),
            msk_row!($op, $s, { SOLID }),
        ]
    };
}

macro_rules! msk_table {
    ($op:tt) => {
        [
            msk_src!($op, { A8 }),
            msk_src!($op, { RGB16 }),
            msk_src!($op, { ARGB32 }),
            msk_src!($op, { SOLID }),
        ]
    };
}

/// `[operator][source][destination]`.
pub(crate) static COMP2: [[[SrcOp; 3]; 4]; 2] = [src_table!({ OVER }), src_table!({ SOURCE })];

/// `[operator][source][mask][destination]`.
pub(crate) static COMP3: [[[[SrcMskOp; 3]; 4]; 4]; 2] =
    [msk_table!({ OVER }), msk_table!({ SOURCE })];

#[cfg(test)]
#[path = "../../tests/unit/render/span.rs"]
mod tests;
