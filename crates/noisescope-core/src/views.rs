//! Bit-extraction views of a decoded capture.
//!
//! Each view narrows the raw ADC samples to a sub-field and carries the bit
//! width the entropy estimator should assume for it.

use serde::{Deserialize, Serialize};

use crate::decode::Sample;

/// Nominal ADC resolution of the reference hardware.
pub const DEFAULT_ADC_BITS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Samples as captured.
    Raw,
    /// Least significant byte.
    Low,
    /// Byte centered in the ADC word.
    Mid,
    /// Two least significant bits.
    TwoBit,
}

impl View {
    pub const ALL: [View; 4] = [View::Raw, View::Low, View::Mid, View::TwoBit];

    pub fn label(self) -> &'static str {
        match self {
            View::Raw => "raw",
            View::Low => "low",
            View::Mid => "mid",
            View::TwoBit => "twobit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Some(View::Raw),
            "low" => Some(View::Low),
            "mid" => Some(View::Mid),
            "twobit" | "two_bit" | "2bit" => Some(View::TwoBit),
            _ => None,
        }
    }

    /// Bit width the entropy estimator assumes for this view.
    pub fn n_bits(self, adc_bits: u32) -> u32 {
        match self {
            View::Raw => adc_bits,
            View::Low | View::Mid => 8,
            View::TwoBit => 2,
        }
    }

    /// Derive this view from a raw series.
    pub fn extract(self, series: &[Sample], adc_bits: u32) -> Vec<Sample> {
        match self {
            View::Raw => series.to_vec(),
            View::Low => series.iter().map(|&s| s & 0xff).collect(),
            View::Mid => {
                let shift = mid_shift(adc_bits);
                series.iter().map(|&s| (s >> shift) & 0xff).collect()
            }
            View::TwoBit => series.iter().map(|&s| s & 0b11).collect(),
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Right shift that centers an 8-bit field in an `adc_bits` word.
fn mid_shift(adc_bits: u32) -> u32 {
    (adc_bits.saturating_sub(8) / 2).min(8)
}
