//! Coordinate hash functions
//!
//! This module contains the hashing layer of the grid:
//! - Word mixing and the fixed-arity `hash2`/`hash3` functions
//! - Pairwise folding for arbitrary-length input
//! - Arity dispatch over numeric vectors

/// Word mixing and fixed-arity coordinate hashes
pub mod mixing;
/// Hashing of numeric vectors by arity
pub mod vector;

pub use mixing::{hash_n, hash2, hash3};
pub use vector::{HashVector, hash_x};
