//! softpaint is a fixed-point 2-D software rendering core.
//!
//! It composites A8, RGB16 and ARGB32 pixmaps with optional masks and affine resampling,
//! builds polyline paths from lines and flattened cubic curves, and turns paths into stroke
//! outlines by sweeping a convex pen along them:
//!
//! - Wrap caller-owned pixels in a [`Pixmap`]
//! - Describe a [`Composite`] request and run [`composite`], or [`fill`] rectangles
//! - Build a [`Path`], then [`paint_path`] or [`paint_stroke`] it
//!
//! All coordinates are integers or fixed point ([`Fixed`], [`SFixed`], [`DFixed`]); there is
//! no floating point on the drawing paths.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Path construction options.
pub mod config;
/// Numeric types, errors and trigonometry.
pub mod foundation;
/// Matrices, paths, hulls and pen convolution.
pub mod geometry;
/// Pixmaps, compositing and rasterization.
pub mod render;

pub use crate::config::PathOpts;
pub use crate::foundation::core::{Format, Operator, Point, Rect, SPoint};
pub use crate::foundation::error::{PaintError, PaintResult};
pub use crate::foundation::fixed::{DFixed, Fixed, SFixed};
pub use crate::foundation::trig::Angle;
pub use crate::geometry::convolve::convolve;
pub use crate::geometry::hull::convex_hull;
pub use crate::geometry::matrix::Matrix;
pub use crate::geometry::path::{CapStyle, Path, PathState};
pub use crate::geometry::spline::{Spline, flatten};
pub use crate::render::blur::stack_blur;
pub use crate::render::composite::{
    Composite, Layer, composite, fill, fill_unclipped, premultiply,
};
pub use crate::render::image_io::{Argb32Image, encode_png, to_rgba_image};
pub use crate::render::pixmap::{DamageHook, Operand, Pixel, Pixmap};
pub use crate::render::poly::{
    composite_path, composite_stroke, fill_path, paint_path, paint_stroke,
};
