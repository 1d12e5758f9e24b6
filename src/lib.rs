//! Spatial hash grid over floating-point coordinates
//!
//! Values are stored under exact `(x, y)` coordinates in a hash table keyed
//! by a bit-level coordinate hash. An optional cell size quantizes
//! coordinates so nearby points share a bucket, which turns radius and
//! nearest-neighbor searches into a walk over a handful of cells.

#![forbid(unsafe_code)]

/// Empirical hash quality measurement
pub mod analysis;
/// Coordinate hash functions over IEEE-754 bit patterns
pub mod hash;
/// Command-line interface, configuration, progress display and errors
pub mod io;
/// Grid storage, enumeration and proximity queries
pub mod spatial;

pub use hash::{HashVector, hash_n, hash_x, hash2, hash3};
pub use io::error::{GridError, Result};
pub use spatial::{Entry, SpatialHashGrid};
