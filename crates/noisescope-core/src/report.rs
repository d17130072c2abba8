//! On-disk analysis reports.
//!
//! # Storage Format
//!
//! A report is a directory containing:
//! - `summary.json`: capture metadata, config, per-view stats
//! - `<view>/histogram.csv`: `value,count`, one row per bin
//! - `<view>/spectrum_raw.csv`: `bin,magnitude`
//! - `<view>/spectrum_windowed.csv`: `bin,magnitude` (header only if degenerate)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::analysis::{SeriesAnalysis, Stats};
use crate::bias::BiasMode;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::histogram::{FrequencyTable, UniformityTest};
use crate::segment::Spectrum;

// ---------------------------------------------------------------------------
// Summary (summary.json)
// ---------------------------------------------------------------------------

/// Per-view entry of summary.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub label: String,
    pub n_bits: u32,
    pub sample_count: usize,
    pub bias: BiasMode,
    pub stats: Stats,
    pub uniformity: Option<UniformityTest>,
    pub histogram_bins: usize,
    pub raw_spectrum_bins: usize,
    pub windowed_segments: usize,
    /// Strongest non-DC bin of the windowed spectrum.
    pub windowed_peak_bin: Option<usize>,
}

impl From<&SeriesAnalysis> for ViewSummary {
    fn from(a: &SeriesAnalysis) -> Self {
        Self {
            label: a.label.clone(),
            n_bits: a.n_bits,
            sample_count: a.sample_count,
            bias: a.bias,
            stats: a.stats,
            uniformity: a.uniformity,
            histogram_bins: a.histogram.len(),
            raw_spectrum_bins: a.raw_spectrum.len(),
            windowed_segments: a.windowed_spectrum.segments,
            windowed_peak_bin: a.windowed_spectrum.peak().map(|(bin, _)| bin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub version: u32,
    pub created_unix_secs: u64,
    pub source: Option<String>,
    pub adc_bits: u32,
    pub config: AnalysisConfig,
    pub views: Vec<ViewSummary>,
    pub noisescope_version: String,
}

// ---------------------------------------------------------------------------
// Report writer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    /// Capture file the series were decoded from, if any.
    pub source: Option<String>,
    pub adc_bits: u32,
    pub analysis: AnalysisConfig,
}

/// Writes one report directory, view by view.
pub struct ReportWriter {
    report_dir: PathBuf,
    config: ReportConfig,
    views: Vec<ViewSummary>,
}

impl ReportWriter {
    /// Create the report directory.
    pub fn new(config: ReportConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self {
            report_dir: config.output_dir.clone(),
            config,
            views: Vec::new(),
        })
    }

    /// Write the CSV tables of one analyzed view.
    pub fn write_view(&mut self, analysis: &SeriesAnalysis) -> Result<()> {
        let view_dir = self.report_dir.join(&analysis.label);
        fs::create_dir_all(&view_dir)?;

        write_histogram(&view_dir.join("histogram.csv"), &analysis.histogram)?;
        write_spectrum(&view_dir.join("spectrum_raw.csv"), &analysis.raw_spectrum)?;
        write_spectrum(
            &view_dir.join("spectrum_windowed.csv"),
            &analysis.windowed_spectrum,
        )?;

        log::debug!("wrote view {} to {}", analysis.label, view_dir.display());
        self.views.push(ViewSummary::from(analysis));
        Ok(())
    }

    /// Write summary.json and return the report directory.
    pub fn finish(self) -> Result<PathBuf> {
        let summary = ReportSummary {
            version: 1,
            created_unix_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            source: self.config.source,
            adc_bits: self.config.adc_bits,
            config: self.config.analysis,
            views: self.views,
            noisescope_version: crate::VERSION.to_string(),
        };

        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(self.report_dir.join("summary.json"), json)?;
        Ok(self.report_dir)
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }
}

fn write_histogram(path: &Path, table: &FrequencyTable) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "value,count")?;
    for (value, count) in table.iter() {
        writeln!(w, "{value},{count}")?;
    }
    w.flush()?;
    Ok(())
}

fn write_spectrum(path: &Path, spectrum: &Spectrum) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "bin,magnitude")?;
    for (bin, m) in spectrum.magnitudes.iter().enumerate() {
        writeln!(w, "{bin},{m:e}")?;
    }
    w.flush()?;
    Ok(())
}

/// Read a report's summary.json back.
pub fn load_summary(report_dir: &Path) -> Result<ReportSummary> {
    let contents = fs::read_to_string(report_dir.join("summary.json"))?;
    Ok(serde_json::from_str(&contents)?)
}
