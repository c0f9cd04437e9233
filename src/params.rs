use crate::error::{ParamsError, Result};
use crate::math::Tolerances;

/// Horizontal pixel scale of the full-size projection display.
pub const DEFAULT_PIXEL_SCALE_X: f64 = 681.0;

/// Vertical pixel scale of the full-size projection display.
pub const DEFAULT_PIXEL_SCALE_Y: f64 = 705.0;

/// How rays travel from the viewer to the projection plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Rays converge at the eye.
    Perspective,
    /// Rays run parallel to the plane normal.
    #[default]
    Orthographic,
}

/// Factors mapping unit plane coordinates to display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    /// Scale along the plane's X axis.
    pub x: f64,
    /// Scale along the plane's Y axis.
    pub y: f64,
}

impl PixelScale {
    /// Creates a new pixel scale.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for PixelScale {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_SCALE_X, DEFAULT_PIXEL_SCALE_Y)
    }
}

/// Configuration of one projection pass.
///
/// Snapshotted once per refresh and handed to every stage of the pass, so
/// nothing read mid-pass can change under it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionParams {
    /// Projection mode.
    pub mode: ProjectionMode,
    /// Display scale of the projected coordinates.
    pub scale: PixelScale,
    /// Tolerance classes used throughout the pass.
    pub tolerances: Tolerances,
}

impl ProjectionParams {
    /// Creates parameters for `mode` with default scale and tolerances.
    #[must_use]
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Replaces the pixel scale.
    #[must_use]
    pub fn with_scale(mut self, scale: PixelScale) -> Self {
        self.scale = scale;
        self
    }

    /// Replaces the tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Checks that every scale factor and tolerance is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::NotPositive`] naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        let t = &self.tolerances;
        let checks = [
            ("scale.x", self.scale.x),
            ("scale.y", self.scale.y),
            ("tolerances.solver", t.solver),
            ("tolerances.world", t.world),
            ("tolerances.plane", t.plane),
            ("tolerances.merge", t.merge),
            ("tolerances.angle", t.angle),
        ];
        for (parameter, value) in checks {
            ensure_positive(parameter, value)?;
        }
        Ok(())
    }
}

/// Fails with [`ParamsError::NotPositive`] unless `value` is finite and positive.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NotPositive { parameter, value }.into())
    }
}
