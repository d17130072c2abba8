//! CLI for noisescope: histogram, entropy and spectral views of hardware RNG captures.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noisescope")]
#[command(about = "noisescope: characterize hardware RNG sample captures")]
#[command(version = noisescope_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a capture: stats, histogram, raw and windowed spectra per view.
    Analyze {
        /// Capture file of little-endian 16-bit samples
        file: String,

        /// ADC resolution of the capture in bits
        #[arg(long, default_value = "12")]
        bits: u32,

        /// Comma-separated views: raw, low, mid, twobit, prng
        #[arg(long, default_value = "raw,low,mid,twobit,prng")]
        views: String,

        /// Seed for the prng control series (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON analysis config; flags below override it
        #[arg(long)]
        config: Option<String>,

        /// Samples per windowed segment
        #[arg(long)]
        window_size: Option<usize>,

        /// Window function: hann, hamming, blackman, rectangular
        #[arg(long)]
        window: Option<String>,

        /// DC offset for spectra: debiased (series mean) or nominal (range midpoint)
        #[arg(long, value_parser = ["debiased", "nominal"])]
        bias: Option<String>,

        /// Write a report directory (summary.json + CSV tables)
        #[arg(long)]
        output: Option<String>,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print min, max, mean and entropy of a capture
    Stats {
        /// Capture file of little-endian 16-bit samples
        file: String,

        /// ADC resolution of the capture in bits
        #[arg(long, default_value = "12")]
        bits: u32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            bits,
            views,
            seed,
            config,
            window_size,
            window,
            bias,
            output,
            json,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            file: &file,
            adc_bits: bits,
            views: &views,
            seed,
            config_path: config.as_deref(),
            window_size,
            window: window.as_deref(),
            bias: bias.as_deref(),
            output_path: output.as_deref(),
            json,
        }),
        Commands::Stats { file, bits } => commands::stats::run(&file, bits),
    }
}
