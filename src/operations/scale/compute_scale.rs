use tracing::debug;

use crate::scale::{CanvasSize, Extents, ScaleConfig, ScaleSpec};

/// Picks the diagram unit that fits a scene's extents onto a canvas.
pub struct ComputeScale<'a> {
    extents: &'a Extents,
    canvas: CanvasSize,
    config: ScaleConfig,
}

impl<'a> ComputeScale<'a> {
    /// Creates a new `ComputeScale` operation with the default options.
    #[must_use]
    pub fn new(extents: &'a Extents, canvas: CanvasSize) -> Self {
        Self {
            extents,
            canvas,
            config: ScaleConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ScaleConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the operation.
    ///
    /// Never fails: empty extents or an unusable canvas produce a unit of 1
    /// with a [`DegenerateScaleWarning`](crate::error::DegenerateScaleWarning)
    /// attached.
    #[must_use]
    pub fn execute(&self) -> ScaleSpec {
        let CanvasSize { width, height } = self.canvas;
        let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        let raw = if usable {
            self.extents.raw_scale(&self.canvas) * self.config.effective_margin()
        } else {
            f64::NAN
        };
        let spec = ScaleSpec::from_raw(raw, self.config.quantize);
        debug!(raw, unit = spec.unit, width, height, "scale selected");
        spec
    }
}
