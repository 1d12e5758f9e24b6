//! Spatial hash grid with exact and cell-quantized addressing
//!
//! Every stored value is addressed by its exact coordinate. With a cell size
//! of zero the bucket key is the hash of that coordinate; with a positive
//! cell size coordinates are first floor-divided into cells, so several
//! coordinates may share a bucket while staying individually addressable.

use crate::hash::hash2;
use crate::io::error::{GridError, Result};
use crate::spatial::bucket::{Bucket, BucketIter, Entry, Removal};
use crate::spatial::index::{self, CellIndex, HashKey};

/// Hash-table-backed spatial index over `f64` coordinates
///
/// Buckets hold a single inline entry in the common case and escalate to a
/// collision chain only when distinct coordinates share a key. The grid is
/// single-threaded; share it behind a lock if several writers need it.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid<V> {
    cell_size: f64,
    cells: CellIndex<V>,
    value_count: usize,
}

impl<V> Default for SpatialHashGrid<V> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Accept finite, non-negative cell sizes
///
/// # Errors
///
/// Returns `GridError::InvalidCellSize` for negative, NaN or infinite sizes
pub fn validate_cell_size(cell_size: f64) -> Result<f64> {
    if cell_size.is_finite() && cell_size >= 0.0 {
        Ok(cell_size)
    } else {
        Err(GridError::InvalidCellSize { value: cell_size })
    }
}

impl<V> SpatialHashGrid<V> {
    /// Create a grid; a cell size of `0` hashes exact coordinates
    ///
    /// Invalid sizes (negative, NaN or infinite) fall back to exact hashing.
    /// Use [`Self::try_new`] to reject them instead.
    pub fn new(cell_size: f64) -> Self {
        Self::with_capacity(cell_size, 0)
    }

    /// Create a grid with room for `capacity` occupied cells
    pub fn with_capacity(cell_size: f64, capacity: usize) -> Self {
        Self {
            cell_size: validate_cell_size(cell_size).unwrap_or(0.0),
            cells: index::with_capacity(capacity),
            value_count: 0,
        }
    }

    /// Create a grid, rejecting invalid cell sizes
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidCellSize` for negative, NaN or infinite sizes
    pub fn try_new(cell_size: f64) -> Result<Self> {
        validate_cell_size(cell_size).map(Self::new)
    }

    /// Quantization unit; `0` means exact-coordinate hashing
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied buckets
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of live coordinates
    pub const fn value_count(&self) -> usize {
        self.value_count
    }

    /// Number of live coordinates
    pub const fn len(&self) -> usize {
        self.value_count
    }

    /// Whether the grid holds no values
    pub const fn is_empty(&self) -> bool {
        self.value_count == 0
    }

    /// Cell coordinates a point is hashed under
    ///
    /// Identity when the cell size is zero, otherwise the floor-divided cell
    /// index on each axis.
    pub fn cell_coordinates(&self, x: f64, y: f64) -> (f64, f64) {
        if self.cell_size > 0.0 {
            (self.quantize(x), self.quantize(y))
        } else {
            (x, y)
        }
    }

    /// Bucket key for a point under this grid's cell size
    pub fn cell_hash(&self, x: f64, y: f64) -> HashKey {
        let (cell_x, cell_y) = self.cell_coordinates(x, y);
        hash2(cell_x, cell_y)
    }

    pub(crate) fn quantize(&self, value: f64) -> f64 {
        // Adding zero folds -0.0 into the zero cell
        (value / self.cell_size).floor() + 0.0
    }

    /// Store or delete a value; `None` deletes the coordinate
    ///
    /// Returns the value previously stored at the exact coordinate.
    pub fn set(&mut self, x: f64, y: f64, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(x, y, value),
            None => self.remove(x, y),
        }
    }

    /// Store a value at an exact coordinate, returning any value it replaced
    pub fn insert(&mut self, x: f64, y: f64, value: V) -> Option<V> {
        let key = self.cell_hash(x, y);
        let entry = Entry::new(x, y, value);

        let previous = match self.cells.get_mut(&key) {
            Some(bucket) => bucket.insert(entry),
            None => {
                self.cells.insert(key, Bucket::Single(entry));
                None
            }
        };

        if previous.is_none() {
            self.value_count += 1;
        }
        previous
    }

    /// Remove the value at an exact coordinate, returning it
    pub fn remove(&mut self, x: f64, y: f64) -> Option<V> {
        let key = self.cell_hash(x, y);

        let outcome = self.cells.get_mut(&key)?.remove(x, y);
        let removed = match outcome {
            Removal::Missing => None,
            Removal::Removed(value) => Some(value),
            Removal::Vacated => self
                .cells
                .remove(&key)
                .map(|bucket| bucket.into_head().value),
        };

        if removed.is_some() {
            self.value_count -= 1;
        }
        removed
    }

    /// Remove the value at an exact coordinate; `false` if nothing was stored
    pub fn delete(&mut self, x: f64, y: f64) -> bool {
        self.remove(x, y).is_some()
    }

    /// Drop every stored value, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.cells.clear();
        self.value_count = 0;
    }

    pub(crate) fn bucket(&self, key: HashKey) -> Option<&Bucket<V>> {
        self.cells.get(&key)
    }

    /// Entry stored at an exact coordinate
    pub fn get_entry(&self, x: f64, y: f64) -> Option<&Entry<V>> {
        self.bucket(self.cell_hash(x, y))?.get(x, y)
    }

    /// Value stored at an exact coordinate
    pub fn get(&self, x: f64, y: f64) -> Option<&V> {
        self.get_entry(x, y).map(|entry| &entry.value)
    }

    /// Mutable value stored at an exact coordinate
    pub fn get_mut(&mut self, x: f64, y: f64) -> Option<&mut V> {
        let key = self.cell_hash(x, y);
        self.cells
            .get_mut(&key)?
            .get_mut(x, y)
            .map(|entry| &mut entry.value)
    }

    /// Whether a value is stored at the exact coordinate
    pub fn has(&self, x: f64, y: f64) -> bool {
        self.get_entry(x, y).is_some()
    }

    /// Whether the bucket the coordinate hashes to is occupied
    ///
    /// With a positive cell size this is true when any coordinate in the
    /// same cell is stored.
    pub fn has_cell(&self, x: f64, y: f64) -> bool {
        self.cells.contains_key(&self.cell_hash(x, y))
    }

    /// Lazily iterate over every entry, in no particular order
    pub fn entries(&self) -> Entries<'_, V> {
        Entries {
            buckets: self.cells.values(),
            current: None,
        }
    }

    /// Lazily iterate over every value, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|entry| &entry.value)
    }

    /// Entries sharing the bucket of a coordinate
    pub fn cell_entries(&self, x: f64, y: f64) -> impl Iterator<Item = &Entry<V>> {
        self.bucket(self.cell_hash(x, y))
            .into_iter()
            .flat_map(Bucket::iter)
    }

    /// Values sharing the bucket of a coordinate
    pub fn cell_values(&self, x: f64, y: f64) -> impl Iterator<Item = &V> {
        self.cell_entries(x, y).map(|entry| &entry.value)
    }

    /// Apply a function to every entry and collect the results
    pub fn map_entries<R, F>(&self, mut f: F) -> Vec<R>
    where
        F: FnMut(f64, f64, &V) -> R,
    {
        self.entries()
            .map(|entry| f(entry.x, entry.y, &entry.value))
            .collect()
    }

    /// Snap a scalar down to the nearest cell boundary
    ///
    /// Meaningless for a zero cell size, where the result is NaN.
    pub fn floor(&self, value: f64) -> f64 {
        (value / self.cell_size).floor() * self.cell_size
    }

    /// Snap a scalar up to the nearest cell boundary
    pub fn ceil(&self, value: f64) -> f64 {
        (value / self.cell_size).ceil() * self.cell_size
    }

    /// Snap a scalar to the closest cell boundary, ties going up
    pub fn round(&self, value: f64) -> f64 {
        let scaled = value / self.cell_size;
        let lower = scaled.floor();
        let cell = if scaled - lower >= 0.5 {
            lower + 1.0
        } else {
            lower
        };
        cell * self.cell_size
    }

    /// Length of the longest collision chain, `0` when empty
    pub fn compute_max_value_count_per_cell(&self) -> usize {
        self.cells.values().map(Bucket::len).max().unwrap_or(0)
    }
}

impl<V> Extend<(f64, f64, V)> for SpatialHashGrid<V> {
    fn extend<I: IntoIterator<Item = (f64, f64, V)>>(&mut self, iter: I) {
        for (x, y, value) in iter {
            self.insert(x, y, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a SpatialHashGrid<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Entries<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Borrowing iterator over every entry of a grid
#[derive(Debug)]
pub struct Entries<'a, V> {
    buckets: std::collections::hash_map::Values<'a, HashKey, Bucket<V>>,
    current: Option<BucketIter<'a, V>>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}
