//! Diagnostics for coordinate hash quality

/// Collision ratio and avalanche measurement
pub mod collisions;
