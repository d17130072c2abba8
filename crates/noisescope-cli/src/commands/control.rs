//! Pseudo-random control series for side-by-side comparison with a capture.

use anyhow::{Result, bail};
use noisescope_core::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform samples in `[0, 2^adc_bits)`, same length as the capture.
///
/// With a seed the series is reproducible; without one it is drawn from an
/// OS-seeded generator.
pub fn prng_series(len: usize, adc_bits: u32, seed: Option<u64>) -> Result<Vec<Sample>> {
    if adc_bits == 0 || adc_bits > 16 {
        bail!("prng control series needs 1..=16 bits, got {adc_bits}");
    }
    let upper = 1u32 << adc_bits;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok((0..len)
        .map(|_| rng.random_range(0..upper) as Sample)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let a = prng_series(1000, 12, Some(7)).unwrap();
        let b = prng_series(1000, 12, Some(7)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, prng_series(1000, 12, Some(8)).unwrap());
    }

    #[test]
    fn test_values_in_range() {
        let s = prng_series(5000, 2, Some(1)).unwrap();
        assert_eq!(s.len(), 5000);
        assert!(s.iter().all(|&v| v < 4));
        let full = prng_series(100, 16, None).unwrap();
        assert_eq!(full.len(), 100);
    }

    #[test]
    fn test_bad_widths_rejected() {
        assert!(prng_series(10, 0, None).is_err());
        assert!(prng_series(10, 17, None).is_err());
    }
}
