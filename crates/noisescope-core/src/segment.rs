//! Raw and windowed/averaged spectral modes.

use serde::{Deserialize, Serialize};

use crate::dft::DftEngine;
use crate::error::{AnalysisError, Result};
use crate::window::{Hann, Identity, Interpolator, WindowFunction};

/// Cap on the raw-mode segment length.
pub const RAW_MAX_LEN: usize = 10_000;
/// Raw-mode start offset is `(N - L) / RAW_OFFSET_DIVISOR`.
pub const RAW_OFFSET_DIVISOR: usize = 3;
/// Segment length of the reference windowed configuration.
pub const DEFAULT_WINDOW_SIZE: usize = 512;

/// A magnitude spectrum and the number of segments averaged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub magnitudes: Vec<f64>,
    /// 1 in raw mode; 0 marks a windowed run with no full segment.
    pub segments: usize,
}

impl Spectrum {
    /// Empty result of a windowed run over a series shorter than one window.
    pub fn degenerate() -> Self {
        Self {
            magnitudes: Vec::new(),
            segments: 0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.segments == 0
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Index and magnitude of the strongest bin in `1..=len/2`.
    ///
    /// DC and the mirrored upper half are skipped; ties keep the lowest bin.
    pub fn peak(&self) -> Option<(usize, f64)> {
        let half = self.magnitudes.len() / 2;
        self.magnitudes
            .iter()
            .copied()
            .enumerate()
            .take(half + 1)
            .skip(1)
            .fold(None, |best, (bin, m)| match best {
                Some((_, top)) if top >= m => best,
                _ => Some((bin, m)),
            })
    }
}

/// How a normalized series is turned into one spectrum.
pub enum DftMode {
    /// One unwindowed segment from the middle-ish of the series.
    Raw {
        max_len: usize,
        offset_divisor: usize,
    },
    /// Non-overlapping tapered segments, spectra averaged bin-wise.
    Windowed {
        window_size: usize,
        window: Box<dyn WindowFunction>,
        interpolator: Box<dyn Interpolator>,
    },
}

impl DftMode {
    /// Raw mode with the reference constants.
    pub fn raw() -> Self {
        DftMode::Raw {
            max_len: RAW_MAX_LEN,
            offset_divisor: RAW_OFFSET_DIVISOR,
        }
    }

    /// 512-sample Hann windows, no interpolation.
    pub fn windowed() -> Self {
        DftMode::Windowed {
            window_size: DEFAULT_WINDOW_SIZE,
            window: Box::new(Hann),
            interpolator: Box::new(Identity),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            DftMode::Raw {
                max_len,
                offset_divisor,
            } => {
                if *max_len == 0 {
                    return Err(AnalysisError::InvalidConfig(
                        "raw segment length must be positive".to_string(),
                    ));
                }
                if *offset_divisor == 0 {
                    return Err(AnalysisError::InvalidConfig(
                        "raw offset divisor must be positive".to_string(),
                    ));
                }
            }
            DftMode::Windowed { window_size, .. } => {
                if *window_size == 0 {
                    return Err(AnalysisError::InvalidConfig(
                        "window size must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Compute the spectrum of an already normalized series.
    pub fn spectrum(&self, normalized: &[f64], engine: &mut DftEngine) -> Result<Spectrum> {
        self.validate()?;
        match self {
            DftMode::Raw {
                max_len,
                offset_divisor,
            } => {
                let segment = raw_segment(normalized, *max_len, *offset_divisor);
                Ok(Spectrum {
                    magnitudes: engine.magnitude_spectrum(segment),
                    segments: 1,
                })
            }
            DftMode::Windowed {
                window_size,
                window,
                interpolator,
            } => {
                let series = interpolator.interpolate(normalized);
                let coefficients = window.coefficients(*window_size);
                Ok(averaged_spectrum(&series, &coefficients, engine))
            }
        }
    }
}

/// Contiguous slice of length `min(max_len, N)` starting at
/// `(N - L) / offset_divisor`.
pub fn raw_segment(series: &[f64], max_len: usize, offset_divisor: usize) -> &[f64] {
    let len = max_len.min(series.len());
    let start = (series.len() - len) / offset_divisor;
    &series[start..start + len]
}

/// Number of full segments of `window_size` in `len` samples.
pub fn segment_count(len: usize, window_size: usize) -> usize {
    len / window_size
}

/// Bin-wise mean of the tapered segment spectra.
///
/// The trailing remainder shorter than one window is dropped. With no full
/// segment the result is [`Spectrum::degenerate`].
pub fn averaged_spectrum(series: &[f64], window: &[f64], engine: &mut DftEngine) -> Spectrum {
    let window_size = window.len();
    if window_size == 0 {
        return Spectrum::degenerate();
    }
    let count = segment_count(series.len(), window_size);
    if count == 0 {
        return Spectrum::degenerate();
    }

    let mut sums = vec![0.0f64; window_size];
    let mut tapered = vec![0.0f64; window_size];
    for seg in 0..count {
        let start = seg * window_size;
        let segment = &series[start..start + window_size];
        for (i, (&x, &w)) in segment.iter().zip(window).enumerate() {
            tapered[i] = x * w;
        }
        let magnitudes = engine.magnitude_spectrum(&tapered);
        for (sum, m) in sums.iter_mut().zip(magnitudes) {
            *sum += m;
        }
    }

    log::debug!(
        "averaged {count} segments of {window_size} samples ({} discarded)",
        series.len() - count * window_size
    );
    let n = count as f64;
    Spectrum {
        magnitudes: sums.into_iter().map(|s| s / n).collect(),
        segments: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Linear, Rectangular};

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i % 17) as f64 - 8.0).collect()
    }

    #[test]
    fn test_segment_counts() {
        assert_eq!(segment_count(1000, 512), 1);
        assert_eq!(segment_count(512, 512), 1);
        assert_eq!(segment_count(511, 512), 0);
        assert_eq!(segment_count(1024, 512), 2);
    }

    #[test]
    fn test_windowed_discards_remainder() {
        let mut engine = DftEngine::new();
        let spectrum = DftMode::windowed()
            .spectrum(&ramp(1000), &mut engine)
            .unwrap();
        assert_eq!(spectrum.segments, 1);
        assert_eq!(spectrum.len(), 512);

        let first_only = averaged_spectrum(&ramp(512), &Hann.coefficients(512), &mut engine);
        assert_eq!(spectrum, first_only);
    }

    #[test]
    fn test_windowed_exact_fit() {
        let mut engine = DftEngine::new();
        let spectrum = DftMode::windowed().spectrum(&ramp(512), &mut engine).unwrap();
        assert_eq!(spectrum.segments, 1);
        assert_eq!(spectrum.len(), 512);
    }

    #[test]
    fn test_windowed_short_series_is_degenerate() {
        let mut engine = DftEngine::new();
        let spectrum = DftMode::windowed().spectrum(&ramp(511), &mut engine).unwrap();
        assert!(spectrum.is_degenerate());
        assert!(spectrum.is_empty());
    }

    #[test]
    fn test_average_of_identical_segments() {
        let mut engine = DftEngine::new();
        let one = ramp(64);
        let mut two = one.clone();
        two.extend_from_slice(&one);
        let window = Rectangular.coefficients(64);
        let single = averaged_spectrum(&one, &window, &mut engine);
        let double = averaged_spectrum(&two, &window, &mut engine);
        assert_eq!(double.segments, 2);
        for (a, b) in single.magnitudes.iter().zip(&double.magnitudes) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_average_is_binwise_mean() {
        let mut engine = DftEngine::new();
        let mut series = vec![1.0, 1.0, 1.0, 1.0];
        series.extend_from_slice(&[3.0, 3.0, 3.0, 3.0]);
        let spectrum = averaged_spectrum(&series, &Rectangular.coefficients(4), &mut engine);
        // DC bins are 4 and 12
        assert!((spectrum.magnitudes[0] - 8.0).abs() < 1e-12);
        assert!(spectrum.magnitudes[1] < 1e-12);
    }

    #[test]
    fn test_raw_segment_short_series() {
        let series = ramp(100);
        let seg = raw_segment(&series, RAW_MAX_LEN, RAW_OFFSET_DIVISOR);
        assert_eq!(seg.len(), 100);
        assert_eq!(seg, &series[..]);
    }

    #[test]
    fn test_raw_segment_offset() {
        let series: Vec<f64> = (0..10_300).map(|i| i as f64).collect();
        let seg = raw_segment(&series, RAW_MAX_LEN, RAW_OFFSET_DIVISOR);
        assert_eq!(seg.len(), 10_000);
        assert_eq!(seg[0], 100.0);

        // floor(302 / 3) = 100
        let series: Vec<f64> = (0..10_302).map(|i| i as f64).collect();
        let seg = raw_segment(&series, RAW_MAX_LEN, RAW_OFFSET_DIVISOR);
        assert_eq!(seg.len(), 10_000);
        assert_eq!(seg[0], 100.0);
        assert_eq!(seg[9_999], 10_099.0);
    }

    #[test]
    fn test_raw_mode_spectrum_length() {
        let mut engine = DftEngine::new();
        let spectrum = DftMode::raw().spectrum(&ramp(12_345), &mut engine).unwrap();
        assert_eq!(spectrum.len(), 10_000);
        assert_eq!(spectrum.segments, 1);

        let spectrum = DftMode::raw().spectrum(&ramp(300), &mut engine).unwrap();
        assert_eq!(spectrum.len(), 300);
    }

    #[test]
    fn test_interpolation_feeds_segmenter() {
        let mut engine = DftEngine::new();
        let mode = DftMode::Windowed {
            window_size: 512,
            window: Box::new(Hann),
            interpolator: Box::new(Linear::new(2).unwrap()),
        };
        // 300 samples upsample to 599, enough for one window
        let spectrum = mode.spectrum(&ramp(300), &mut engine).unwrap();
        assert_eq!(spectrum.segments, 1);
    }

    #[test]
    fn test_invalid_modes_rejected() {
        let mut engine = DftEngine::new();
        let mode = DftMode::Windowed {
            window_size: 0,
            window: Box::new(Hann),
            interpolator: Box::new(Identity),
        };
        assert!(mode.spectrum(&ramp(10), &mut engine).is_err());
        let mode = DftMode::Raw {
            max_len: 10,
            offset_divisor: 0,
        };
        assert!(mode.spectrum(&ramp(10), &mut engine).is_err());
    }

    #[test]
    fn test_peak_skips_dc() {
        let spectrum = Spectrum {
            magnitudes: vec![100.0, 1.0, 5.0, 2.0],
            segments: 1,
        };
        assert_eq!(spectrum.peak(), Some((2, 5.0)));
    }

    #[test]
    fn test_peak_ignores_mirrored_half() {
        // Symmetric magnitudes of a real signal: bin 6 mirrors bin 2.
        let spectrum = Spectrum {
            magnitudes: vec![0.0, 1.0, 7.0, 0.5, 0.2, 0.5, 7.0, 1.0],
            segments: 1,
        };
        assert_eq!(spectrum.peak(), Some((2, 7.0)));
    }

    #[test]
    fn test_peak_of_windowed_square_wave() {
        let mut engine = DftEngine::new();
        let series: Vec<f64> = (0..1024)
            .map(|i| if (i / 4) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let spectrum = DftMode::windowed().spectrum(&series, &mut engine).unwrap();
        assert_eq!(spectrum.peak().map(|(bin, _)| bin), Some(64));
    }

    #[test]
    fn test_peak_of_tiny_spectra() {
        let empty = Spectrum::degenerate();
        assert_eq!(empty.peak(), None);
        let dc_only = Spectrum {
            magnitudes: vec![3.0],
            segments: 1,
        };
        assert_eq!(dc_only.peak(), None);
    }
}
