//! Path construction and vector geometry.
//!
//! Curves are flattened into [`path::Path`] polylines as they are added; strokes are produced
//! by sweeping a convex pen along those polylines with [`convolve::convolve`].

/// Pen convolution.
pub mod convolve;
/// Graham-scan convex hull.
pub mod hull;
/// Affine matrices.
pub mod matrix;
/// Paths and drawing state.
pub mod path;
/// Cubic Bezier flattening.
pub mod spline;
