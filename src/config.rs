//! Path construction options.

use crate::foundation::error::{PaintError, PaintResult};
use crate::foundation::fixed::SFixed;
use crate::geometry::path::CapStyle;

/// Options a [`Path`](crate::Path) is built with.
///
/// JSON form (all fields optional):
///
/// ```json
/// { "tolerance": 4, "cap_style": "round", "max_curve_segments": 4096 }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathOpts {
    /// Maximum chord deviation when flattening curves, in 1/16 pixel units.
    pub tolerance: SFixed,
    /// Cap style new paths start with.
    pub cap_style: CapStyle,
    /// Hard bound on the number of segments a single curve may emit.
    pub max_curve_segments: u32,
}

impl Default for PathOpts {
    fn default() -> Self {
        Self {
            // a quarter pixel
            tolerance: SFixed(SFixed::ONE.0 >> 2),
            cap_style: CapStyle::Round,
            max_curve_segments: 4096,
        }
    }
}

impl PathOpts {
    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> PaintResult<Self> {
        let opts: PathOpts = serde_json::from_str(json)
            .map_err(|e| PaintError::validation(format!("invalid path options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject options that would make flattening meaningless.
    pub fn validate(&self) -> PaintResult<()> {
        if self.tolerance <= SFixed::ZERO {
            return Err(PaintError::validation("tolerance must be > 0"));
        }
        if self.max_curve_segments == 0 {
            return Err(PaintError::validation("max_curve_segments must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
