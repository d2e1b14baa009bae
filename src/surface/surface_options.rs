use crate::misc::FloatingPoint;

/// Smallest accepted sample step; the grid holds `(1 / step + 1)^2` points
pub const MIN_SAMPLE_STEP: f64 = 1e-3;

/// Options for a Coons surface
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceOptions<T: FloatingPoint> {
    /// Parameter increment between samples of the iso-curve grid, in [`MIN_SAMPLE_STEP`, 1].
    /// Smaller values are raised to the minimum when the grid is built.
    pub sample_step: T,
}

impl<T: FloatingPoint> SurfaceOptions<T> {
    /// Create options with a custom sample step
    /// # Failures
    /// - if the step is not in [`MIN_SAMPLE_STEP`, 1]
    pub fn try_new(sample_step: T) -> anyhow::Result<Self> {
        let options = Self { sample_step };
        options.validate()?;
        Ok(options)
    }

    /// Check that the sample step is in [`MIN_SAMPLE_STEP`, 1]
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.sample_step >= T::lit(MIN_SAMPLE_STEP) && self.sample_step <= T::one(),
            "Sample step must be in [{}, 1], got {:?}",
            MIN_SAMPLE_STEP,
            self.sample_step
        );
        Ok(())
    }
}

impl<T: FloatingPoint> Default for SurfaceOptions<T> {
    fn default() -> Self {
        Self {
            sample_step: T::lit(0.04),
        }
    }
}
