//! Empirical hash quality measurement
//!
//! Collision ratios are computed exactly by sorting the sampled keys and
//! counting duplicates, so a report is independent of any table size. For
//! `n` uniform draws from 32 bits the expected ratio is roughly `n / 2^33`,
//! about 0.2% at 2^24 samples.

use rand::Rng;
use tracing::debug;

use crate::hash::hash2;
use crate::io::configuration::PROGRESS_CHUNK;
use crate::io::error::{GridError, Result, invalid_parameter};

/// Receives progress notifications while keys are sampled
pub trait SampleObserver {
    /// Called after each chunk of `samples` keys has been hashed
    fn advance(&self, samples: usize);
}

impl SampleObserver for () {
    fn advance(&self, _samples: usize) {}
}

/// Collision statistics for one sampled workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionReport {
    /// Name of the sampled workload
    pub workload: &'static str,
    /// Number of keys hashed
    pub samples: usize,
    /// Number of distinct keys among them
    pub distinct: usize,
}

impl CollisionReport {
    /// Count distinct keys in a sample
    pub fn from_keys(workload: &'static str, mut keys: Vec<i32>) -> Self {
        let samples = keys.len();
        keys.sort_unstable();
        keys.dedup();

        Self {
            workload,
            samples,
            distinct: keys.len(),
        }
    }

    /// Keys that landed on an already-seen value
    pub const fn collisions(&self) -> usize {
        self.samples - self.distinct
    }

    /// Fraction of samples that collided, `0` for an empty sample
    pub fn ratio(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.collisions() as f64 / self.samples as f64
        }
    }

    /// Fail when the collision ratio exceeds `budget`
    ///
    /// # Errors
    ///
    /// Returns `GridError::CollisionBudgetExceeded` when the ratio is too high
    pub fn check(&self, budget: f64) -> Result<()> {
        let ratio = self.ratio();
        if ratio > budget {
            Err(GridError::CollisionBudgetExceeded {
                workload: self.workload,
                ratio,
                budget,
            })
        } else {
            Ok(())
        }
    }
}

/// Mean number of output bits flipped by single input bit flips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvalancheReport {
    /// Number of single-bit flips measured
    pub flips: usize,
    /// Mean Hamming distance between original and flipped hashes
    pub mean_flipped_bits: f64,
}

fn validate_span(span: f64) -> Result<f64> {
    if span.is_finite() && span > 0.0 {
        Ok(span)
    } else {
        Err(invalid_parameter(
            "span",
            &span,
            &"must be finite and positive",
        ))
    }
}

/// Hash uniformly random pairs drawn from `[-span, span)` on both axes
///
/// # Errors
///
/// Returns `GridError::InvalidParameter` if `span` is not finite and positive
pub fn random_pairs<R>(
    rng: &mut R,
    samples: usize,
    span: f64,
    observer: &impl SampleObserver,
) -> Result<CollisionReport>
where
    R: Rng,
{
    let span = validate_span(span)?;
    let mut keys = Vec::with_capacity(samples);

    while keys.len() < samples {
        let chunk = PROGRESS_CHUNK.min(samples - keys.len());
        keys.extend(
            (0..chunk).map(|_| hash2(rng.random_range(-span..span), rng.random_range(-span..span))),
        );
        observer.advance(chunk);
    }

    let report = CollisionReport::from_keys("random pairs", keys);
    debug!(
        samples = report.samples,
        collisions = report.collisions(),
        "sampled random pairs"
    );
    Ok(report)
}

/// Hash every integer pair in `[0, side) × [0, side)`
pub fn sequential_pairs(side: usize, observer: &impl SampleObserver) -> CollisionReport {
    let mut keys = Vec::with_capacity(side * side);

    for x in 0..side {
        keys.extend((0..side).map(|y| hash2(x as f64, y as f64)));
        observer.advance(side);
    }

    let report = CollisionReport::from_keys("sequential pairs", keys);
    debug!(
        samples = report.samples,
        collisions = report.collisions(),
        "sampled sequential pairs"
    );
    report
}

const fn flip_bit(value: f64, bit: u32) -> f64 {
    f64::from_bits(value.to_bits() ^ (1_u64 << bit))
}

/// Measure how many output bits change when one input bit flips
///
/// Each sample flips one random bit of `x` and, separately, the same bit of
/// `y`, so `samples` yields `2 * samples` flips.
///
/// # Errors
///
/// Returns `GridError::InvalidParameter` if `span` is not finite and positive
pub fn avalanche<R>(rng: &mut R, samples: usize, span: f64) -> Result<AvalancheReport>
where
    R: Rng,
{
    let span = validate_span(span)?;
    let mut flipped_bits = 0_u64;

    for _ in 0..samples {
        let x = rng.random_range(-span..span);
        let y = rng.random_range(-span..span);
        let bit = rng.random_range(0..64);
        let original = hash2(x, y);

        flipped_bits += u64::from((original ^ hash2(flip_bit(x, bit), y)).count_ones());
        flipped_bits += u64::from((original ^ hash2(x, flip_bit(y, bit))).count_ones());
    }

    let flips = samples * 2;
    let mean_flipped_bits = if flips == 0 {
        0.0
    } else {
        flipped_bits as f64 / flips as f64
    };

    debug!(flips, mean_flipped_bits, "measured avalanche");
    Ok(AvalancheReport {
        flips,
        mean_flipped_bits,
    })
}
