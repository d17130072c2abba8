//! # noisescope-core
//!
//! **Is your hardware RNG as noisy as it claims?**
//!
//! `noisescope-core` characterizes a finite capture of samples from a hardware
//! random-number source: a dense value histogram with a bit-normalized Shannon
//! entropy estimate, plus raw and windowed/averaged magnitude spectra that
//! expose DC bias and periodic interference.
//!
//! ## Quick Start
//!
//! ```
//! use noisescope_core::{analyze_series, decode_samples};
//!
//! let samples = decode_samples(&[0x00, 0x00, 0x00, 0x00]).unwrap();
//! let result = analyze_series("raw", 12, &samples).unwrap();
//!
//! assert_eq!(result.stats.max, 0);
//! assert_eq!(result.histogram.iter().collect::<Vec<_>>(), vec![(0, 2)]);
//! // Too short for a 512-sample window.
//! assert!(result.windowed_spectrum.is_degenerate());
//! ```
//!
//! ## Architecture
//!
//! Bytes → decode → views → analysis → report
//!
//! Within one analysis:
//! - **Histogram → entropy**: every integer in `[min, max]` gets a bin; entropy
//!   is scaled by `max(1, 8 / n_bits)`.
//! - **Bias → segments → DFT → average**: samples are DC-corrected and divided
//!   by the full series length, then transformed either as one raw segment or as
//!   Hann-tapered 512-sample segments averaged bin-wise.

pub mod analysis;
pub mod bias;
pub mod config;
pub mod decode;
pub mod dft;
pub mod entropy;
pub mod error;
pub mod histogram;
pub mod report;
pub mod segment;
pub mod views;
pub mod window;

pub use analysis::{Analyzer, SeriesAnalysis, SeriesInput, Stats, analyze_series};
pub use bias::{BiasMode, normalize};
pub use config::{AnalysisConfig, SpectrumBias};
pub use decode::{Sample, decode_samples, encode_samples, read_samples};
pub use dft::DftEngine;
pub use entropy::{adjusted_entropy, entropy_adjustment, shannon_entropy};
pub use error::{AnalysisError, Result};
pub use histogram::{Bin, FrequencyTable, UniformityTest};
pub use report::{ReportConfig, ReportSummary, ReportWriter, ViewSummary, load_summary};
pub use segment::{DftMode, Spectrum};
pub use views::{DEFAULT_ADC_BITS, View};
pub use window::{InterpolationKind, Interpolator, WindowFunction, WindowKind};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
