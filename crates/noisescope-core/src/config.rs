//! Analysis configuration.
//!
//! Every field has a default matching the reference configuration, so a config
//! file only needs the keys it overrides:
//!
//! ```json
//! { "window_size": 1024, "window": "blackman" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::segment::{DEFAULT_WINDOW_SIZE, DftMode, RAW_MAX_LEN, RAW_OFFSET_DIVISOR};
use crate::window::{InterpolationKind, WindowKind};

/// Bias policy used for the spectra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumBias {
    /// Subtract the series mean.
    #[default]
    Debiased,
    /// Subtract the midpoint of the view's nominal bit width.
    Nominal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub raw_max_len: usize,
    pub raw_offset_divisor: usize,
    pub window_size: usize,
    pub window: WindowKind,
    pub interpolation: InterpolationKind,
    pub spectrum_bias: SpectrumBias,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            raw_max_len: RAW_MAX_LEN,
            raw_offset_divisor: RAW_OFFSET_DIVISOR,
            window_size: DEFAULT_WINDOW_SIZE,
            window: WindowKind::Hann,
            interpolation: InterpolationKind::Identity,
            spectrum_bias: SpectrumBias::Debiased,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        log::debug!("loaded analysis config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let InterpolationKind::Linear { factor: 0 } = self.interpolation {
            return Err(AnalysisError::InvalidConfig(
                "interpolation factor must be at least 1".to_string(),
            ));
        }
        self.raw_mode().validate()?;
        self.windowed_mode()?.validate()
    }

    pub fn raw_mode(&self) -> DftMode {
        DftMode::Raw {
            max_len: self.raw_max_len,
            offset_divisor: self.raw_offset_divisor,
        }
    }

    pub fn windowed_mode(&self) -> Result<DftMode> {
        Ok(DftMode::Windowed {
            window_size: self.window_size,
            window: self.window.strategy(),
            interpolator: self.interpolation.strategy()?,
        })
    }
}
