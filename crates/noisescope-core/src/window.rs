//! Window and interpolation strategies for segmented spectra.
//!
//! Both are injected into [`crate::segment::DftMode::Windowed`] so the segmenter
//! never branches on a particular taper or resampling scheme.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A taper generated purely from its length.
pub trait WindowFunction: Send + Sync {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Coefficients for a window of `len` samples.
    fn coefficients(&self, len: usize) -> Vec<f64>;
}

/// Identity taper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rectangular;

/// Raised cosine, `0.5 * (1 - cos(2πn / (M - 1)))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hann;

#[derive(Debug, Clone, Copy, Default)]
pub struct Hamming;

#[derive(Debug, Clone, Copy, Default)]
pub struct Blackman;

/// Evaluate `f(n / (M - 1))` for every position; a single-point window is 1.0.
fn symmetric(len: usize, f: impl Fn(f64) -> f64) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let denom = (len - 1) as f64;
    (0..len).map(|n| f(n as f64 / denom)).collect()
}

impl WindowFunction for Rectangular {
    fn name(&self) -> &'static str {
        "rectangular"
    }

    fn coefficients(&self, len: usize) -> Vec<f64> {
        vec![1.0; len]
    }
}

impl WindowFunction for Hann {
    fn name(&self) -> &'static str {
        "hann"
    }

    fn coefficients(&self, len: usize) -> Vec<f64> {
        symmetric(len, |x| 0.5 * (1.0 - (2.0 * PI * x).cos()))
    }
}

impl WindowFunction for Hamming {
    fn name(&self) -> &'static str {
        "hamming"
    }

    fn coefficients(&self, len: usize) -> Vec<f64> {
        symmetric(len, |x| 0.54 - 0.46 * (2.0 * PI * x).cos())
    }
}

impl WindowFunction for Blackman {
    fn name(&self) -> &'static str {
        "blackman"
    }

    fn coefficients(&self, len: usize) -> Vec<f64> {
        symmetric(len, |x| {
            0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
        })
    }
}

/// Window selection as it appears in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Rectangular,
    #[default]
    Hann,
    Hamming,
    Blackman,
}

impl WindowKind {
    pub fn strategy(self) -> Box<dyn WindowFunction> {
        match self {
            WindowKind::Rectangular => Box::new(Rectangular),
            WindowKind::Hann => Box::new(Hann),
            WindowKind::Hamming => Box::new(Hamming),
            WindowKind::Blackman => Box::new(Blackman),
        }
    }

    /// Parse a window name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Some(WindowKind::Rectangular),
            "hann" | "hanning" => Some(WindowKind::Hann),
            "hamming" => Some(WindowKind::Hamming),
            "blackman" => Some(WindowKind::Blackman),
            _ => None,
        }
    }
}

/// Resampling applied to the whole normalized series before segmentation.
pub trait Interpolator: Send + Sync {
    fn name(&self) -> &'static str;

    fn interpolate(&self, series: &[f64]) -> Vec<f64>;
}

/// Leaves the series untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Interpolator for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn interpolate(&self, series: &[f64]) -> Vec<f64> {
        series.to_vec()
    }
}

/// Linear upsampling: `factor - 1` evenly spaced points between each pair of
/// neighbours. Output length is `(n - 1) * factor + 1`.
#[derive(Debug, Clone, Copy)]
pub struct Linear {
    factor: usize,
}

impl Linear {
    pub fn new(factor: usize) -> Result<Self> {
        if factor == 0 {
            return Err(AnalysisError::InvalidConfig(
                "interpolation factor must be at least 1".to_string(),
            ));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> usize {
        self.factor
    }
}

impl Interpolator for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn interpolate(&self, series: &[f64]) -> Vec<f64> {
        if series.len() < 2 || self.factor == 1 {
            return series.to_vec();
        }
        let mut out = Vec::with_capacity((series.len() - 1) * self.factor + 1);
        for pair in series.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            for step in 0..self.factor {
                let t = step as f64 / self.factor as f64;
                out.push(a + (b - a) * t);
            }
        }
        out.push(series[series.len() - 1]);
        out
    }
}

/// Interpolation selection as it appears in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    #[default]
    Identity,
    Linear { factor: usize },
}

impl InterpolationKind {
    pub fn strategy(self) -> Result<Box<dyn Interpolator>> {
        Ok(match self {
            InterpolationKind::Identity => Box::new(Identity),
            InterpolationKind::Linear { factor } => Box::new(Linear::new(factor)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_endpoints_and_peak() {
        let w = Hann.coefficients(512);
        assert_eq!(w.len(), 512);
        assert!(w[0].abs() < 1e-15);
        assert!(w[511].abs() < 1e-12);
        let mid = Hann.coefficients(5);
        assert!((mid[2] - 1.0).abs() < 1e-15);
        assert!((mid[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hann_is_symmetric() {
        let w = Hann.coefficients(64);
        for n in 0..32 {
            assert!((w[n] - w[63 - n]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_point_windows() {
        for kind in [
            WindowKind::Rectangular,
            WindowKind::Hann,
            WindowKind::Hamming,
            WindowKind::Blackman,
        ] {
            assert_eq!(kind.strategy().coefficients(1), vec![1.0]);
        }
    }

    #[test]
    fn test_rectangular_all_ones() {
        assert_eq!(Rectangular.coefficients(4), vec![1.0; 4]);
    }

    #[test]
    fn test_parse_window_names() {
        assert_eq!(WindowKind::parse("Hann"), Some(WindowKind::Hann));
        assert_eq!(WindowKind::parse("hanning"), Some(WindowKind::Hann));
        assert_eq!(WindowKind::parse("rect"), Some(WindowKind::Rectangular));
        assert_eq!(WindowKind::parse("kaiser"), None);
    }

    #[test]
    fn test_identity_interpolation() {
        let s = [1.0, -2.0, 3.5];
        assert_eq!(Identity.interpolate(&s), s.to_vec());
    }

    #[test]
    fn test_linear_interpolation() {
        let lin = Linear::new(2).unwrap();
        assert_eq!(lin.interpolate(&[0.0, 1.0, 3.0]), vec![0.0, 0.5, 1.0, 2.0, 3.0]);
        assert_eq!(lin.interpolate(&[4.0]), vec![4.0]);
        assert!(lin.interpolate(&[]).is_empty());
    }

    #[test]
    fn test_linear_zero_factor_rejected() {
        assert!(Linear::new(0).is_err());
        assert!(InterpolationKind::Linear { factor: 0 }.strategy().is_err());
    }
}
