//! `noisescope analyze`: full per-view analysis of a capture.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use noisescope_core::{
    Analyzer, ReportConfig, ReportWriter, Sample, SeriesAnalysis, SeriesInput, ViewSummary,
    read_samples,
};

use super::ViewSelection;

pub struct AnalyzeCommandConfig<'a> {
    pub file: &'a str,
    pub adc_bits: u32,
    pub views: &'a str,
    pub seed: Option<u64>,
    pub config_path: Option<&'a str>,
    pub window_size: Option<usize>,
    pub window: Option<&'a str>,
    pub bias: Option<&'a str>,
    pub output_path: Option<&'a str>,
    pub json: bool,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) -> Result<()> {
    let config = super::build_config(cfg.config_path, cfg.window_size, cfg.window, cfg.bias)?;
    let views = super::parse_views(cfg.views)?;
    let samples =
        read_samples(Path::new(cfg.file)).with_context(|| format!("reading {}", cfg.file))?;

    let inputs = build_inputs(&samples, &views, cfg.adc_bits, cfg.seed)?;
    let analyzer = Analyzer::new(config)?;

    if !cfg.json {
        println!(
            "Analyzing {} ({} samples, {}-bit) across {} view(s)...\n",
            cfg.file,
            samples.len(),
            cfg.adc_bits,
            inputs.len()
        );
    }

    let t0 = Instant::now();
    let results = analyzer
        .analyze_all(&inputs)
        .into_iter()
        .zip(&inputs)
        .map(|(r, input)| r.with_context(|| format!("analyzing view {}", input.label)))
        .collect::<Result<Vec<_>>>()?;
    log::info!(
        "analyzed {} views in {:.2}s",
        results.len(),
        t0.elapsed().as_secs_f64()
    );

    if cfg.json {
        let summaries: Vec<ViewSummary> = results.iter().map(ViewSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_table(&results);
    }

    if let Some(path) = cfg.output_path {
        let dir = write_report(
            PathBuf::from(path),
            cfg.file,
            cfg.adc_bits,
            &analyzer,
            &results,
        )?;
        if !cfg.json {
            println!("\nReport written to {}", dir.display());
        }
    }
    Ok(())
}

/// Derive one labelled series per requested view.
fn build_inputs(
    samples: &[Sample],
    views: &[ViewSelection],
    adc_bits: u32,
    seed: Option<u64>,
) -> Result<Vec<SeriesInput>> {
    views
        .iter()
        .map(|&selection| {
            Ok(match selection {
                ViewSelection::Capture(view) => SeriesInput::new(
                    view.label(),
                    view.n_bits(adc_bits),
                    view.extract(samples, adc_bits),
                ),
                ViewSelection::Prng => SeriesInput::new(
                    selection.label(),
                    adc_bits,
                    super::control::prng_series(samples.len(), adc_bits, seed)?,
                ),
            })
        })
        .collect()
}

fn print_table(results: &[SeriesAnalysis]) {
    println!(
        "  {:<8} {:>4} {:>8} {:>8} {:>10} {:>9} {:>9} {:>10}",
        "view", "bits", "min", "max", "mean", "entropy", "segments", "peak bin"
    );
    println!("  {:-<74}", "");
    for r in results {
        let peak = match r.windowed_spectrum.peak() {
            Some((bin, _)) => bin.to_string(),
            None => "-".to_string(),
        };
        println!(
            "  {:<8} {:>4} {:>8} {:>8} {:>10.3} {:>9.4} {:>9} {:>10}",
            r.label,
            r.n_bits,
            r.stats.min,
            r.stats.max,
            r.stats.mean,
            r.stats.entropy,
            r.windowed_spectrum.segments,
            peak
        );
    }

    for r in results.iter().filter(|r| r.windowed_spectrum.is_degenerate()) {
        println!(
            "\n  ! {}: fewer samples than one window, windowed spectrum is empty",
            r.label
        );
    }
}

fn write_report(
    output_dir: PathBuf,
    source: &str,
    adc_bits: u32,
    analyzer: &Analyzer,
    results: &[SeriesAnalysis],
) -> Result<PathBuf> {
    let mut writer = ReportWriter::new(ReportConfig {
        output_dir,
        source: Some(source.to_string()),
        adc_bits,
        analysis: analyzer.config().clone(),
    })?;
    for result in results {
        writer.write_view(result)?;
    }
    Ok(writer.finish()?)
}
