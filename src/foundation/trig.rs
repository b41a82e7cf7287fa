//! Fixed-point angles and trigonometry.
//!
//! Angles are measured in 1/4096 of a full turn. Sines come from a pre-baked quarter-wave
//! table (`sin(k * 90° / 64) * 65536`), linearly interpolated between entries.

use crate::foundation::fixed::Fixed;

/// An angle where 4096 units make a full turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Angle(pub i16);

impl Angle {
    /// A full turn.
    pub const DEG_360: i32 = 4096;
    /// Half a turn.
    pub const DEG_180: Angle = Angle((Self::DEG_360 >> 1) as i16);
    /// Quarter turn.
    pub const DEG_90: Angle = Angle((Self::DEG_360 >> 2) as i16);
    /// Eighth of a turn.
    pub const DEG_45: Angle = Angle((Self::DEG_360 >> 3) as i16);
    /// Zero angle.
    pub const ZERO: Angle = Angle(0);

    /// Convert whole degrees to an angle.
    pub const fn from_degrees(d: i32) -> Angle {
        Angle((d * Self::DEG_360 / 360) as i16)
    }

    /// Position within one turn, in `[0, 4096)`.
    #[inline]
    fn turn_units(self) -> i32 {
        i32::from(self.0) & (Self::DEG_360 - 1)
    }
}

const QUARTER_STEPS: i32 = 64;
const UNITS_PER_STEP: i32 = (Angle::DEG_360 / 4) / QUARTER_STEPS;

static SIN_TABLE: [i32; (QUARTER_STEPS + 1) as usize] = [
    0x00000, 0x00648, 0x00c90, 0x012d5, 0x01918, 0x01f56, 0x02590, 0x02bc4,
    0x031f1, 0x03817, 0x03e34, 0x04447, 0x04a50, 0x0504d, 0x0563e, 0x05c22,
    0x061f8, 0x067be, 0x06d74, 0x0731a, 0x078ad, 0x07e2f, 0x0839c, 0x088f6,
    0x08e3a, 0x09368, 0x09880, 0x09d80, 0x0a268, 0x0a736, 0x0abeb, 0x0b086,
    0x0b505, 0x0b968, 0x0bdaf, 0x0c1d8, 0x0c5e4, 0x0c9d1, 0x0cd9f, 0x0d14d,
    0x0d4db, 0x0d848, 0x0db94, 0x0debe, 0x0e1c6, 0x0e4aa, 0x0e76c, 0x0ea0a,
    0x0ec83, 0x0eed9, 0x0f109, 0x0f314, 0x0f4fa, 0x0f6ba, 0x0f854, 0x0f9c8,
    0x0fb15, 0x0fc3b, 0x0fd3b, 0x0fe13, 0x0fec4, 0x0ff4e, 0x0ffb1, 0x0ffec,
    0x10000,
];

/// Sine of a quarter-wave position in `[0, 1024]`.
fn quarter_sin(units: i32) -> i32 {
    let idx = (units / UNITS_PER_STEP) as usize;
    let frac = units % UNITS_PER_STEP;
    if frac == 0 {
        return SIN_TABLE[idx];
    }
    let lo = SIN_TABLE[idx];
    let hi = SIN_TABLE[idx + 1];
    lo + (hi - lo) * frac / UNITS_PER_STEP
}

/// Sine of `a` in 16.16.
pub fn sin(a: Angle) -> Fixed {
    let quarter = Angle::DEG_360 / 4;
    let u = a.turn_units();
    let v = match u / quarter {
        0 => quarter_sin(u),
        1 => quarter_sin(2 * quarter - u),
        2 => -quarter_sin(u - 2 * quarter),
        _ => -quarter_sin(Angle::DEG_360 - u),
    };
    Fixed(v)
}

/// Cosine of `a` in 16.16.
pub fn cos(a: Angle) -> Fixed {
    sin(Angle(a.0.wrapping_add(Angle::DEG_90.0)))
}

/// Tangent of `a` in 16.16, saturating where the cosine vanishes.
pub fn tan(a: Angle) -> Fixed {
    sin(a) / cos(a)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/trig.rs"]
mod tests;
