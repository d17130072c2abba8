pub mod analyze;
pub mod control;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result, bail};
use noisescope_core::{AnalysisConfig, SpectrumBias, View, WindowKind};

/// A view requested on the command line. `Prng` is the generated control
/// series rather than a slice of the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection {
    Capture(View),
    Prng,
}

impl ViewSelection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Capture(view) => view.label(),
            Self::Prng => "prng",
        }
    }
}

/// Parse a comma-separated view list, keeping order and dropping duplicates.
pub fn parse_views(s: &str) -> Result<Vec<ViewSelection>> {
    let mut views = Vec::new();
    for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let selection = if name.eq_ignore_ascii_case("prng") {
            ViewSelection::Prng
        } else {
            match View::parse(name) {
                Some(view) => ViewSelection::Capture(view),
                None => bail!("unknown view '{name}' (expected raw, low, mid, twobit, prng)"),
            }
        };
        if !views.contains(&selection) {
            views.push(selection);
        }
    }
    if views.is_empty() {
        bail!("no views selected");
    }
    Ok(views)
}

/// Parse a bias policy name.
pub fn parse_bias(s: &str) -> Result<SpectrumBias> {
    match s {
        "debiased" => Ok(SpectrumBias::Debiased),
        "nominal" => Ok(SpectrumBias::Nominal),
        _ => bail!("unknown bias mode '{s}'"),
    }
}

/// Load the config file (if any) and apply command-line overrides.
pub fn build_config(
    config_path: Option<&str>,
    window_size: Option<usize>,
    window: Option<&str>,
    bias: Option<&str>,
) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::load(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => AnalysisConfig::default(),
    };
    if let Some(size) = window_size {
        config.window_size = size;
    }
    if let Some(name) = window {
        config.window = WindowKind::parse(name)
            .with_context(|| format!("unknown window function '{name}'"))?;
    }
    if let Some(name) = bias {
        config.spectrum_bias = parse_bias(name)?;
    }
    config.validate()?;
    Ok(config)
}
