//! Per-series analysis: statistics, dense histogram and two spectra.
//!
//! [`Analyzer::analyze`] is the single entry point reporting code depends on.
//! Each call is pure; independent views can be fanned out with
//! [`Analyzer::analyze_all`].

use serde::{Deserialize, Serialize};

use crate::bias::{self, BiasMode};
use crate::config::{AnalysisConfig, SpectrumBias};
use crate::decode::Sample;
use crate::dft::DftEngine;
use crate::entropy;
use crate::error::{AnalysisError, Result};
use crate::histogram::{FrequencyTable, UniformityTest, min_max};
use crate::segment::Spectrum;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Summary statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub min: Sample,
    pub max: Sample,
    pub mean: f64,
    /// Shannon entropy scaled by `max(1, 8 / n_bits)`.
    pub entropy: f64,
}

impl Stats {
    pub fn compute(series: &[Sample], table: &FrequencyTable, n_bits: u32) -> Result<Self> {
        let (min, max) = min_max(series).ok_or(AnalysisError::EmptySeries)?;
        Ok(Self {
            min,
            max,
            mean: bias::mean(series)?,
            entropy: entropy::adjusted_entropy(&table.counts(), n_bits)?,
        })
    }
}

/// A labelled series awaiting analysis.
#[derive(Debug, Clone)]
pub struct SeriesInput {
    pub label: String,
    pub n_bits: u32,
    pub samples: Vec<Sample>,
}

impl SeriesInput {
    pub fn new(label: impl Into<String>, n_bits: u32, samples: Vec<Sample>) -> Self {
        Self {
            label: label.into(),
            n_bits,
            samples,
        }
    }
}

/// Full analysis of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub label: String,
    pub n_bits: u32,
    pub sample_count: usize,
    pub bias: BiasMode,
    pub stats: Stats,
    pub histogram: FrequencyTable,
    pub uniformity: Option<UniformityTest>,
    pub raw_spectrum: Spectrum,
    pub windowed_spectrum: Spectrum,
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Bias mode applied before the spectra of an `n_bits` series.
    pub fn bias_for(&self, n_bits: u32) -> BiasMode {
        match self.config.spectrum_bias {
            SpectrumBias::Debiased => BiasMode::Debiased,
            SpectrumBias::Nominal => BiasMode::Nominal { bits: n_bits },
        }
    }

    /// Stats, histogram, raw spectrum and windowed/averaged spectrum.
    pub fn analyze(&self, label: &str, n_bits: u32, series: &[Sample]) -> Result<SeriesAnalysis> {
        self.analyze_with(&mut DftEngine::new(), label, n_bits, series)
    }

    fn analyze_with(
        &self,
        engine: &mut DftEngine,
        label: &str,
        n_bits: u32,
        series: &[Sample],
    ) -> Result<SeriesAnalysis> {
        if series.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        entropy::entropy_adjustment(n_bits)?;

        let histogram = FrequencyTable::build(series)?;
        let stats = Stats::compute(series, &histogram, n_bits)?;
        log::debug!(
            "{label}: {} samples, range [{}, {}], {} bins",
            series.len(),
            stats.min,
            stats.max,
            histogram.len()
        );

        let bias = self.bias_for(n_bits);
        let normalized = bias::normalize(series, bias)?;
        let raw_spectrum = self.config.raw_mode().spectrum(&normalized, engine)?;
        let windowed_spectrum = self.config.windowed_mode()?.spectrum(&normalized, engine)?;
        if windowed_spectrum.is_degenerate() {
            log::warn!(
                "{label}: {} samples is less than one {}-sample window, windowed spectrum is empty",
                series.len(),
                self.config.window_size
            );
        }

        Ok(SeriesAnalysis {
            label: label.to_string(),
            n_bits,
            sample_count: series.len(),
            bias,
            stats,
            uniformity: histogram.chi_squared_uniformity(),
            histogram,
            raw_spectrum,
            windowed_spectrum,
        })
    }

    /// Analyze independent series in parallel. Results keep input order.
    pub fn analyze_all(&self, inputs: &[SeriesInput]) -> Vec<Result<SeriesAnalysis>> {
        std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| {
                    s.spawn(move || {
                        let mut engine = DftEngine::new();
                        self.analyze_with(&mut engine, &input.label, input.n_bits, &input.samples)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

/// Analyze with the reference configuration.
pub fn analyze_series(label: &str, n_bits: u32, series: &[Sample]) -> Result<SeriesAnalysis> {
    Analyzer::new(AnalysisConfig::default())?.analyze(label, n_bits, series)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
