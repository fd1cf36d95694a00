//! Reflected Gray code decoding of genotype chunks into normalized weights.
//!
//! Consecutive integers differ by a single bit in Gray order, so one bit flip
//! in a genotype moves the decoded weight by a small step instead of jumping
//! across the unit interval.

use crate::config::translator::MAX_BITS_PER_WEIGHT;
use log::warn;
use serde::{Deserialize, Serialize};

/// What to do with the final chunk when the genotype length is not a
/// multiple of the chunk size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBits {
    /// Decode the short chunk with the bits it has
    #[default]
    Decode,
    /// Discard the short chunk
    Drop,
}

/// Recover standard binary from a reflected Gray code, most significant bit first.
///
/// Each output bit is the input bit XOR the previous *output* bit.
fn gray_to_binary(bits: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len());
    for &bit in bits {
        let next = match out.last() {
            Some(&prev) => prev ^ bit,
            None => bit,
        };
        out.push(next);
    }
    out
}

/// Positional value of a binary sequence, most significant bit first
fn binary_to_int(bits: &[u8]) -> u64 {
    bits.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64)
}

/// Integer encoded by a Gray-coded chunk.
///
/// # Panics
///
/// If the chunk is longer than `MAX_BITS_PER_WEIGHT` bits.
pub fn decode_chunk(bits: &[u8]) -> u64 {
    assert!(
        bits.len() <= MAX_BITS_PER_WEIGHT,
        "chunk of {} bits exceeds the {} bit limit",
        bits.len(),
        MAX_BITS_PER_WEIGHT
    );
    binary_to_int(&gray_to_binary(bits))
}

/// Split `bits` into chunks of `bits_per_weight`, Gray-decode each, and
/// normalize by `2^bits_per_weight`.
///
/// # Panics
///
/// If `bits_per_weight` is outside `1..=MAX_BITS_PER_WEIGHT`.
/// `BinToWeightParams::validate` rejects such values before a translator
/// is built.
pub fn decode_weights(bits: &[u8], bits_per_weight: usize, trailing: TrailingBits) -> Vec<f64> {
    assert!(
        (1..=MAX_BITS_PER_WEIGHT).contains(&bits_per_weight),
        "bits per weight must be in 1..={}, got {}",
        MAX_BITS_PER_WEIGHT,
        bits_per_weight
    );
    let nr_of_values = (1u64 << bits_per_weight) as f64;
    let remainder = bits.len() % bits_per_weight;

    if remainder != 0 {
        match trailing {
            TrailingBits::Decode => warn!(
                "Genotype length {} is not a multiple of {}; decoding trailing {} bits",
                bits.len(),
                bits_per_weight,
                remainder
            ),
            TrailingBits::Drop => warn!(
                "Genotype length {} is not a multiple of {}; dropping trailing {} bits",
                bits.len(),
                bits_per_weight,
                remainder
            ),
        }
    }

    let usable = match trailing {
        TrailingBits::Decode => bits,
        TrailingBits::Drop => &bits[..bits.len() - remainder],
    };

    usable
        .chunks(bits_per_weight)
        .map(|chunk| decode_chunk(chunk) as f64 / nr_of_values)
        .collect()
}
