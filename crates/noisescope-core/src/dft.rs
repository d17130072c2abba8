//! Magnitude spectra via rustfft.
//!
//! Output length equals input length: every bin `0..N` of the complex FFT of a
//! real sequence, in natural order. Bins above `N/2` mirror the lower half.

use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

/// Reusable FFT front end. The planner caches plans, so repeated segments of
/// the same length share one.
pub struct DftEngine {
    planner: FftPlanner<f64>,
}

impl DftEngine {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    fn plan(&mut self, len: usize) -> Arc<dyn Fft<f64>> {
        self.planner.plan_fft_forward(len)
    }

    /// `|X_k|` for every DFT bin of `signal`.
    pub fn magnitude_spectrum(&mut self, signal: &[f64]) -> Vec<f64> {
        if signal.is_empty() {
            return Vec::new();
        }
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex { re: x, im: 0.0 }).collect();
        self.plan(signal.len()).process(&mut buffer);
        buffer.iter().map(|c| c.norm()).collect()
    }
}

impl Default for DftEngine {
    fn default() -> Self {
        Self::new()
    }
}
