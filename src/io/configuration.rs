//! Analysis defaults and quality budgets

// Sampling sizes for the hash quality report
/// Random coordinate pairs sampled by default (2^24)
pub const DEFAULT_RANDOM_SAMPLES: usize = 16_777_216;
/// Side of the sequential integer domain sampled by default
pub const DEFAULT_SEQUENTIAL_SIDE: usize = 1000;
/// Random coordinates are drawn from `[-span, span)`
pub const DEFAULT_COORDINATE_SPAN: f64 = 1_000_000.0;
/// Single-bit flips sampled for the avalanche measurement
pub const DEFAULT_AVALANCHE_SAMPLES: usize = 100_000;

/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;

// Budgets follow the birthday bound for 2^24 draws from 32 bits (~0.2%)
/// Largest acceptable collision ratio over random pairs
pub const RANDOM_COLLISION_BUDGET: f64 = 0.002_5;
/// Largest acceptable collision ratio over the sequential integer domain
pub const SEQUENTIAL_COLLISION_BUDGET: f64 = 0.000_3;

/// Output bits an ideal 32-bit hash flips per flipped input bit
pub const IDEAL_AVALANCHE_BITS: f64 = 16.0;

// Progress bar display settings
/// Samples hashed between progress bar updates
pub const PROGRESS_CHUNK: usize = 65_536;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
