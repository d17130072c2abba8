//! Shannon entropy with bit-width normalization.
//!
//! Entropy measured over an alphabet narrower than a byte is rescaled by
//! `max(1, 8 / n_bits)` so that e.g. a perfect 2-bit source reports roughly
//! 8 bits per byte instead of 2.

use crate::error::{AnalysisError, Result};

/// Shannon entropy in bits of a histogram given as raw counts.
///
/// Zero bins contribute nothing. An empty or all-zero histogram has entropy 0.
pub fn shannon_entropy(counts: &[u64]) -> f64 {
    let weight: u64 = counts.iter().sum();
    if weight == 0 {
        return 0.0;
    }
    let weight = weight as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / weight;
            -p * p.log2()
        })
        .sum()
}

/// `max(1.0, 8.0 / n_bits)`.
pub fn entropy_adjustment(n_bits: u32) -> Result<f64> {
    if n_bits == 0 {
        return Err(AnalysisError::InvalidBitWidth(n_bits));
    }
    Ok((8.0 / n_bits as f64).max(1.0))
}

/// Shannon entropy scaled by [`entropy_adjustment`].
pub fn adjusted_entropy(counts: &[u64], n_bits: u32) -> Result<f64> {
    Ok(shannon_entropy(counts) * entropy_adjustment(n_bits)?)
}
