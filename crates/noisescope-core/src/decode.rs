//! Raw capture decoding.
//!
//! Captures are a flat byte stream of little-endian 16-bit samples: for each
//! pair `(lo, hi)` in stream order the sample is `(hi << 8) | lo`.

use std::path::Path;

use crate::error::{AnalysisError, Result};

/// A single decoded sample.
pub type Sample = u16;

/// Decode a byte stream into samples, two bytes at a time.
///
/// Odd-length input is rejected before anything is decoded.
pub fn decode_samples(bytes: &[u8]) -> Result<Vec<Sample>> {
    if bytes.len() % 2 != 0 {
        return Err(AnalysisError::OddLength { len: bytes.len() });
    }

    let mut samples = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        samples.push(((pair[1] as u16) << 8) | pair[0] as u16);
    }
    Ok(samples)
}

/// Read a capture file from disk and decode it.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>> {
    let bytes = std::fs::read(path)?;
    let samples = decode_samples(&bytes)?;
    log::debug!(
        "decoded {} samples from {} ({} bytes)",
        samples.len(),
        path.display(),
        bytes.len()
    );
    Ok(samples)
}

/// Encode samples back into the capture byte layout.
pub fn encode_samples(samples: &[Sample]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}
