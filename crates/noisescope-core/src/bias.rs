//! DC offset removal and amplitude normalization ahead of spectral analysis.

use serde::{Deserialize, Serialize};

use crate::decode::Sample;
use crate::error::{AnalysisError, Result};

/// How the DC offset is chosen before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasMode {
    /// Subtract the empirical mean of the whole series.
    Debiased,
    /// Subtract the midpoint `2^(bits-1) - 1` of an unsigned `bits`-wide range.
    Nominal { bits: u32 },
}

impl BiasMode {
    /// DC offset for `series` under this mode.
    pub fn offset(&self, series: &[Sample]) -> Result<f64> {
        if series.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        match *self {
            BiasMode::Debiased => mean(series),
            BiasMode::Nominal { bits } => nominal_midpoint(bits),
        }
    }
}

impl std::fmt::Display for BiasMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debiased => write!(f, "debiased"),
            Self::Nominal { bits } => write!(f, "nominal({bits})"),
        }
    }
}

/// Arithmetic mean of the series.
pub fn mean(series: &[Sample]) -> Result<f64> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    let sum: f64 = series.iter().map(|&s| s as f64).sum();
    Ok(sum / series.len() as f64)
}

/// `2^(bits-1) - 1`.
pub fn nominal_midpoint(bits: u32) -> Result<f64> {
    if bits == 0 || bits > 32 {
        return Err(AnalysisError::InvalidBitWidth(bits));
    }
    Ok(2f64.powi(bits as i32 - 1) - 1.0)
}

/// Subtract the DC offset and divide by the full series length.
///
/// The divisor is always `series.len()`, even when callers later take the DFT
/// of a shorter slice of the result.
pub fn normalize(series: &[Sample], mode: BiasMode) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    let offset = mode.offset(series)?;
    let n = series.len() as f64;
    log::debug!(
        "normalizing {} samples, bias={mode}, offset={offset:.4}",
        series.len()
    );
    Ok(series.iter().map(|&s| (s as f64 - offset) / n).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debiased_offset_is_mean() {
        assert_eq!(BiasMode::Debiased.offset(&[0, 1, 2, 3]).unwrap(), 1.5);
    }

    #[test]
    fn test_debiased_normalization() {
        let norm = normalize(&[0, 1, 2, 3], BiasMode::Debiased).unwrap();
        assert_eq!(norm, vec![-0.375, -0.125, 0.125, 0.375]);
        assert!(norm.iter().sum::<f64>().abs() < 1e-15);
    }

    #[test]
    fn test_nominal_midpoints() {
        assert_eq!(nominal_midpoint(1).unwrap(), 0.0);
        assert_eq!(nominal_midpoint(2).unwrap(), 1.0);
        assert_eq!(nominal_midpoint(8).unwrap(), 127.0);
        assert_eq!(nominal_midpoint(12).unwrap(), 2047.0);
    }

    #[test]
    fn test_nominal_normalization() {
        let norm = normalize(&[127, 255], BiasMode::Nominal { bits: 8 }).unwrap();
        assert_eq!(norm, vec![0.0, 64.0]);
    }

    #[test]
    fn test_nominal_ignores_data() {
        let mode = BiasMode::Nominal { bits: 12 };
        assert_eq!(mode.offset(&[0, 0, 0]).unwrap(), 2047.0);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(matches!(
            normalize(&[], BiasMode::Debiased),
            Err(AnalysisError::EmptySeries)
        ));
        assert!(matches!(
            normalize(&[], BiasMode::Nominal { bits: 8 }),
            Err(AnalysisError::EmptySeries)
        ));
        assert!(matches!(mean(&[]), Err(AnalysisError::EmptySeries)));
        assert!(matches!(
            BiasMode::Nominal { bits: 8 }.offset(&[]),
            Err(AnalysisError::EmptySeries)
        ));
        assert!(matches!(
            BiasMode::Debiased.offset(&[]),
            Err(AnalysisError::EmptySeries)
        ));
    }

    #[test]
    fn test_invalid_bits_rejected() {
        assert!(matches!(
            nominal_midpoint(0),
            Err(AnalysisError::InvalidBitWidth(0))
        ));
        assert!(nominal_midpoint(33).is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BiasMode::Debiased).unwrap();
        assert_eq!(json, "\"debiased\"");
        let mode: BiasMode = serde_json::from_str(r#"{"nominal":{"bits":8}}"#).unwrap();
        assert_eq!(mode, BiasMode::Nominal { bits: 8 });
    }
}
