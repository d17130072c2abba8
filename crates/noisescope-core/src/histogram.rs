//! Dense value histograms.
//!
//! A [`FrequencyTable`] has one bin for every integer between the smallest and
//! largest observed sample, including values that never occurred.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::decode::Sample;
use crate::error::{AnalysisError, Result};

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub value: Sample,
    pub count: u64,
}

/// Chi-squared test of the histogram against a uniform distribution over the
/// observed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformityTest {
    pub chi_squared: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
}

/// Ordered `(value, count)` table over `[min, max]` with no gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    bins: Vec<Bin>,
}

impl FrequencyTable {
    /// Count every sample into a zero-initialized bin per value in range.
    pub fn build(series: &[Sample]) -> Result<Self> {
        let (min, max) = min_max(series).ok_or(AnalysisError::EmptySeries)?;

        let mut counts = vec![0u64; (max - min) as usize + 1];
        for &s in series {
            counts[(s - min) as usize] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(offset, count)| Bin {
                value: min + offset as Sample,
                count,
            })
            .collect();
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sample, u64)> + '_ {
        self.bins.iter().map(|b| (b.value, b.count))
    }

    /// Counts in ascending value order.
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// Number of bins (`max - min + 1`).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all counts; equals the series length.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn min_value(&self) -> Option<Sample> {
        self.bins.first().map(|b| b.value)
    }

    pub fn max_value(&self) -> Option<Sample> {
        self.bins.last().map(|b| b.value)
    }

    /// Chi-squared statistic against a flat histogram over the observed range.
    ///
    /// Returns `None` for a single-bin table (zero degrees of freedom).
    pub fn chi_squared_uniformity(&self) -> Option<UniformityTest> {
        if self.bins.len() < 2 {
            return None;
        }
        let expected = self.total() as f64 / self.bins.len() as f64;
        let chi_squared: f64 = self
            .bins
            .iter()
            .map(|b| {
                let diff = b.count as f64 - expected;
                diff * diff / expected
            })
            .sum();
        let degrees_of_freedom = self.bins.len() - 1;
        let dist = ChiSquared::new(degrees_of_freedom as f64).ok()?;
        Some(UniformityTest {
            chi_squared,
            degrees_of_freedom,
            p_value: dist.sf(chi_squared),
        })
    }
}

/// Smallest and largest sample, or `None` for an empty series.
pub fn min_max(series: &[Sample]) -> Option<(Sample, Sample)> {
    let first = *series.first()?;
    Some(
        series
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
    )
}
