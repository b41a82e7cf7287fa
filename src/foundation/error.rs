/// Convenience result type used across the crate.
pub type PaintResult<T> = Result<T, PaintError>;

/// Top-level error taxonomy used by the painting and path APIs.
#[derive(thiserror::Error, Debug)]
pub enum PaintError {
    /// Invalid caller-provided data (buffer descriptors, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A transient scratch allocation could not be satisfied. Nothing was drawn.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintError {
    /// Build a [`PaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PaintError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }
}

/// Allocate an empty scratch vector with room for `len` elements, reporting failure instead
/// of aborting.
pub(crate) fn try_with_capacity<T>(len: usize, what: &str) -> PaintResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| {
        tracing::debug!(len, what, "scratch allocation failed");
        PaintError::allocation(format!("{what}: cannot reserve {len} elements"))
    })?;
    Ok(v)
}

/// Allocate a zeroed scratch vector.
pub(crate) fn try_zeroed<T: Copy + Default>(len: usize, what: &str) -> PaintResult<Vec<T>> {
    let mut v = try_with_capacity(len, what)?;
    v.resize(len, T::default());
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
