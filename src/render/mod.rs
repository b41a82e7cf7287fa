//! Pixel storage and everything that writes to it.

/// Separable blur.
pub mod blur;
/// Compositing requests and solid fills.
pub mod composite;
/// Conversion to and from `image` buffers.
pub mod image_io;
/// Pixmaps, pixels and compositing operands.
pub mod pixmap;
/// Polygon scan conversion, path and stroke painting.
pub mod poly;
pub(crate) mod span;
pub(crate) mod xform;
