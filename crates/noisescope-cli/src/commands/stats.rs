//! `noisescope stats`: quick summary of the raw view.

use std::path::Path;

use anyhow::{Context, Result};
use noisescope_core::{FrequencyTable, Stats, read_samples};

pub fn run(file: &str, adc_bits: u32) -> Result<()> {
    let samples = read_samples(Path::new(file)).with_context(|| format!("reading {file}"))?;
    let table = FrequencyTable::build(&samples)?;
    let stats = Stats::compute(&samples, &table, adc_bits)?;

    println!("{file}: {} samples, {adc_bits}-bit", samples.len());
    println!("  min      {}", stats.min);
    println!("  max      {}", stats.max);
    println!("  mean     {:.4}", stats.mean);
    println!("  entropy  {:.4} bits", stats.entropy);
    if let Some(test) = table.chi_squared_uniformity() {
        println!(
            "  chi²     {:.2} (df={}, p={:.4})",
            test.chi_squared, test.degrees_of_freedom, test.p_value
        );
    }
    Ok(())
}
