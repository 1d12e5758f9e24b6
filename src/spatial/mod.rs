//! Spatial data structures and proximity queries
//!
//! This module contains the storage side of the crate:
//! - Inline-or-chained buckets for colliding keys
//! - The key to bucket index
//! - The grid itself, with CRUD and enumeration
//! - Radius, first-hit and nearest-neighbor queries

/// Inline entries and collision chains
pub mod bucket;
/// Grid construction, mutation, lookup and enumeration
pub mod grid;
/// Hash key to bucket storage
pub mod index;
/// Neighborhood iteration and radius queries
pub mod query;

pub use bucket::{Bucket, Entry};
pub use grid::SpatialHashGrid;
pub use index::HashKey;
