//! Fixed-point numeric model.
//!
//! Three widths share one contract:
//!
//! - [`Fixed`]: 16.16 in an `i32`, used by the public coordinate API and matrices.
//! - [`SFixed`]: 28.4 in an `i32`, the path-space format flattened points are stored in.
//! - [`DFixed`]: 56.8 in an `i64`, an accumulator for products of two path-space values
//!   (squared distances, cross products) that would overflow `SFixed`.
//!
//! Conversions shift between fractional widths; they are exact whenever the value is
//! representable in the target format. No floating point is used at call time.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

macro_rules! fixed_type {
    ($(#[$meta:meta])* $name:ident, $repr:ty, $wide:ty, $frac:expr) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            /// Number of fractional bits.
            pub const FRAC_BITS: u32 = $frac;
            /// Zero.
            pub const ZERO: Self = Self(0);
            /// One.
            pub const ONE: Self = Self(1 << $frac);
            /// One half.
            pub const HALF: Self = Self(1 << ($frac - 1));
            /// Largest representable value.
            pub const MAX: Self = Self(<$repr>::MAX);
            /// Smallest representable value (kept symmetric with [`Self::MAX`]).
            pub const MIN: Self = Self(-<$repr>::MAX);

            /// Convert an integer to fixed point.
            #[inline]
            pub const fn from_int(i: i32) -> Self {
                Self((i as $repr) << $frac)
            }

            /// Integer part, rounding toward negative infinity.
            #[inline]
            pub const fn to_int(self) -> i32 {
                (self.0 >> $frac) as i32
            }

            /// Round down to a whole value.
            #[inline]
            pub const fn floor(self) -> Self {
                Self(self.0 & !((1 << $frac) - 1))
            }

            /// Round up to a whole value.
            #[inline]
            pub const fn ceil(self) -> Self {
                Self((self.0 + ((1 << $frac) - 1)) & !((1 << $frac) - 1))
            }

            /// Fractional bits as an unsigned weight in `[0, ONE)`.
            #[inline]
            pub const fn frac(self) -> $repr {
                self.0 & ((1 << $frac) - 1)
            }

            /// Absolute value.
            #[inline]
            pub const fn abs(self) -> Self {
                Self(self.0.abs())
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        /// Truncating multiply: the double-width product shifted right by the fractional width.
        impl Mul for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self(((<$wide>::from(self.0) * <$wide>::from(rhs.0)) >> $frac) as $repr)
            }
        }

        /// Truncating divide. A zero divisor saturates toward the dividend's sign.
        impl Div for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self {
                if rhs.0 == 0 {
                    return if self.0 < 0 { Self::MIN } else { Self::MAX };
                }
                let q = (<$wide>::from(self.0) << $frac) / <$wide>::from(rhs.0);
                Self(q.clamp(<$wide>::from(-<$repr>::MAX), <$wide>::from(<$repr>::MAX)) as $repr)
            }
        }
    };
}

fixed_type!(
    /// 16.16 fixed point used by the public coordinate API and affine matrices.
    Fixed, i32, i64, 16
);
fixed_type!(
    /// 28.4 fixed point used for stored path points.
    SFixed, i32, i64, 4
);
fixed_type!(
    /// 56.8 accumulator for products of path-space values.
    DFixed, i64, i128, 8
);

const SHIFT_FIXED_TO_S: u32 = Fixed::FRAC_BITS - SFixed::FRAC_BITS;
const SHIFT_S_TO_D: u32 = DFixed::FRAC_BITS - SFixed::FRAC_BITS;

impl Fixed {
    /// Narrow to path space, truncating toward negative infinity.
    #[inline]
    pub const fn to_sfixed(self) -> SFixed {
        SFixed(self.0 >> SHIFT_FIXED_TO_S)
    }
}

impl SFixed {
    /// Widen to the public 16.16 format.
    #[inline]
    pub const fn to_fixed(self) -> Fixed {
        Fixed(self.0 << SHIFT_FIXED_TO_S)
    }

    /// Widen to the accumulator format.
    #[inline]
    pub const fn to_dfixed(self) -> DFixed {
        DFixed((self.0 as i64) << SHIFT_S_TO_D)
    }

    /// Square root. Negative inputs yield zero.
    pub fn sqrt(self) -> SFixed {
        if self.0 <= 0 {
            return SFixed::ZERO;
        }
        // sqrt(v / 2^f) * 2^f == sqrt(v * 2^f)
        let scaled = (self.0 as u64) << Self::FRAC_BITS;
        SFixed(isqrt_u64(scaled) as i32)
    }
}

impl DFixed {
    /// Narrow to path space, truncating toward negative infinity.
    #[inline]
    pub const fn to_sfixed(self) -> SFixed {
        SFixed((self.0 >> SHIFT_S_TO_D) as i32)
    }
}

impl From<SFixed> for DFixed {
    fn from(v: SFixed) -> Self {
        v.to_dfixed()
    }
}

impl From<SFixed> for Fixed {
    fn from(v: SFixed) -> Self {
        v.to_fixed()
    }
}

/// Integer square root, rounding down.
pub(crate) fn isqrt_u64(v: u64) -> u64 {
    if v < 2 {
        return v;
    }
    let mut bit = 1u64 << ((63 - v.leading_zeros()) & !1);
    let mut rem = v;
    let mut root = 0u64;
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/fixed.rs"]
mod tests;
