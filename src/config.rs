use crate::error::{ConfigError, Result};
use crate::operations::displace::RadiusSearch;
use crate::operations::falloff::IndentProfile;
use crate::operations::redistribute::IndentRange;

/// Parameters controlling a denting run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DentConfig {
    /// Extra distance displaced vertices are pushed past the hard surface.
    pub displace_increase: f64,
    /// Smoothness of the shoulder's indentation curve, in `[0, 1]`.
    pub indent_smoothness: f64,
    /// Radius of the shoulder when `calculate_indent_range` is off.
    pub indent_range: f64,
    /// Derive the shoulder radius as `sqrt(indent_depth)`.
    pub calculate_indent_range: bool,
    /// Initial radius of the hard-vertex search.
    pub delta_initial: f64,
    /// Growth of the search radius per retry.
    pub delta_increase: f64,
    /// Radius past which the search gives up on a vertex.
    pub delta_ceiling: f64,
    /// Fraction of the lost volume pushed back into the shoulder.
    pub volume_preservation: f64,
    /// Distance over which the volume curve ramps up to 1.
    pub volume_ramp: f64,
    /// Also treat vertices of soft polygons crossing the hard surface as inside.
    pub add_overlap: bool,
}

impl Default for DentConfig {
    fn default() -> Self {
        Self {
            displace_increase: 0.02,
            indent_smoothness: 0.95,
            indent_range: 1.2,
            calculate_indent_range: true,
            delta_initial: 5.0,
            delta_increase: 0.1,
            delta_ceiling: 100.0,
            volume_preservation: 1.0,
            volume_ramp: 0.8,
            add_overlap: false,
        }
    }
}

/// Smallest accepted search radius and radius step.
const MIN_DELTA: f64 = 1e-4;

impl DentConfig {
    #[must_use]
    pub fn with_displace_increase(mut self, value: f64) -> Self {
        self.displace_increase = value;
        self
    }

    #[must_use]
    pub fn with_indent_smoothness(mut self, value: f64) -> Self {
        self.indent_smoothness = value;
        self
    }

    /// Uses a fixed shoulder radius instead of deriving it from the depth.
    #[must_use]
    pub fn with_fixed_indent_range(mut self, value: f64) -> Self {
        self.indent_range = value;
        self.calculate_indent_range = false;
        self
    }

    #[must_use]
    pub fn with_search(mut self, initial: f64, increase: f64, ceiling: f64) -> Self {
        self.delta_initial = initial;
        self.delta_increase = increase;
        self.delta_ceiling = ceiling;
        self
    }

    #[must_use]
    pub fn with_volume_preservation(mut self, value: f64) -> Self {
        self.volume_preservation = value;
        self
    }

    #[must_use]
    pub fn with_volume_ramp(mut self, value: f64) -> Self {
        self.volume_ramp = value;
        self
    }

    #[must_use]
    pub fn with_add_overlap(mut self, value: bool) -> Self {
        self.add_overlap = value;
        self
    }

    /// Checks every parameter against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] for the first parameter
    /// that is non-finite or outside its range.
    pub fn validate(&self) -> Result<()> {
        check("displace_increase", self.displace_increase, f64::MIN, f64::MAX)?;
        check("indent_smoothness", self.indent_smoothness, 0.0, 1.0)?;
        check("indent_range", self.indent_range, 0.0, f64::MAX)?;
        check("delta_initial", self.delta_initial, MIN_DELTA, f64::MAX)?;
        check("delta_increase", self.delta_increase, MIN_DELTA, f64::MAX)?;
        check(
            "delta_ceiling",
            self.delta_ceiling,
            self.delta_initial,
            f64::MAX,
        )?;
        check("volume_preservation", self.volume_preservation, f64::MIN, f64::MAX)?;
        check("volume_ramp", self.volume_ramp, 0.0, f64::MAX)?;
        Ok(())
    }

    /// The adaptive search derived from the `delta_*` parameters.
    #[must_use]
    pub fn radius_search(&self) -> RadiusSearch {
        RadiusSearch {
            initial: self.delta_initial,
            step: self.delta_increase,
            ceiling: self.delta_ceiling,
        }
    }

    /// How the shoulder radius is chosen.
    #[must_use]
    pub fn indent_range_mode(&self) -> IndentRange {
        if self.calculate_indent_range {
            IndentRange::FromDepth
        } else {
            IndentRange::Fixed(self.indent_range)
        }
    }

    /// Shoulder curves for a given effective range.
    #[must_use]
    pub fn indent_profile(&self, range: f64) -> IndentProfile {
        IndentProfile {
            range,
            smoothness: self.indent_smoothness,
            volume_ramp: self.volume_ramp,
        }
    }
}

fn check(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        }
        .into())
    }
}
