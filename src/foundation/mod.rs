//! Numeric and value types shared by every other module.

/// Integer rectangles, points and pixel enums.
pub mod core;
/// Error type and allocation helpers.
pub mod error;
/// 16.16, 28.4 and 56.8 fixed point.
pub mod fixed;
pub(crate) mod math;
/// Table-driven trigonometry on 12-bit angles.
pub mod trig;
