//! Proximity queries over a spatial hash grid
//!
//! Radius queries visit only the cells a circle can reach: on each axis the
//! cells from `floor((v - radius) / cell_size)` to
//! `floor((v + radius) / cell_size)`, padded by one cell on both ends so that
//! rounding in a stored point's own quantization cannot push it outside the
//! walk. Candidates are then filtered by squared distance. When that block
//! would hold more cells than the grid occupies, or the grid hashes exact
//! coordinates, scanning every entry is cheaper and the query does that
//! instead.

use crate::hash::hash2;
use crate::spatial::bucket::{Bucket, BucketIter, Entry};
use crate::spatial::grid::{Entries, SpatialHashGrid};

/// Consecutive cells along one axis, stepped from an anchor cell
#[derive(Debug, Clone, Copy)]
struct AxisRange {
    anchor: f64,
    first: i64,
    count: u64,
}

impl AxisRange {
    const fn around(center: f64, extent: i64) -> Self {
        Self {
            anchor: center,
            first: -extent,
            count: extent.unsigned_abs() * 2 + 1,
        }
    }

    const fn cell(&self, index: u64) -> f64 {
        offset(self.anchor, self.first + index as i64)
    }

    // Beyond 2^53 neighboring steps round onto the same cell
    const fn repeats(&self, index: u64) -> bool {
        index > 0 && self.cell(index).to_bits() == self.cell(index - 1).to_bits()
    }
}

/// Step a cell coordinate, leaving the anchor's bit pattern untouched
const fn offset(cell: f64, delta: i64) -> f64 {
    if delta == 0 { cell } else { cell + delta as f64 }
}

/// Lazy iterator over the entries of a rectangular block of cells
///
/// Each distinct cell is visited once, even where stepping by one no longer
/// changes a large cell coordinate.
#[derive(Debug)]
pub struct NeighborEntries<'a, V> {
    grid: &'a SpatialHashGrid<V>,
    columns: AxisRange,
    rows: AxisRange,
    cell_total: u64,
    next_cell: u64,
    current: Option<BucketIter<'a, V>>,
}

impl<'a, V> NeighborEntries<'a, V> {
    const fn spanning(grid: &'a SpatialHashGrid<V>, columns: AxisRange, rows: AxisRange) -> Self {
        Self {
            grid,
            columns,
            rows,
            cell_total: columns.count.saturating_mul(rows.count),
            next_cell: 0,
            current: None,
        }
    }

    fn around(grid: &'a SpatialHashGrid<V>, x: f64, y: f64, extent: u32) -> Self {
        // Without quantization every neighbor collapses onto the same bucket
        let extent = if grid.cell_size() > 0.0 {
            i64::from(extent)
        } else {
            0
        };
        let (cell_x, cell_y) = grid.cell_coordinates(x, y);

        Self::spanning(
            grid,
            AxisRange::around(cell_x, extent),
            AxisRange::around(cell_y, extent),
        )
    }
}

impl<'a, V> Iterator for NeighborEntries<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some(entry);
            }
            if self.next_cell >= self.cell_total {
                return None;
            }
            let column = self.next_cell / self.rows.count;
            let row = self.next_cell % self.rows.count;
            self.next_cell += 1;

            if self.columns.repeats(column) || self.rows.repeats(row) {
                self.current = None;
                continue;
            }
            let key = hash2(self.columns.cell(column), self.rows.cell(row));
            self.current = self.grid.bucket(key).map(Bucket::iter);
        }
    }
}

/// Where a radius query draws its candidates from
#[derive(Debug)]
enum Candidates<'a, V> {
    Neighborhood(NeighborEntries<'a, V>),
    Everything(Entries<'a, V>),
    Nothing,
}

impl<'a, V> Iterator for Candidates<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Neighborhood(entries) => entries.next(),
            Self::Everything(entries) => entries.next(),
            Self::Nothing => None,
        }
    }
}

/// Lazy iterator over the entries within a radius of a point
#[derive(Debug)]
pub struct Query<'a, V> {
    candidates: Candidates<'a, V>,
    x: f64,
    y: f64,
    radius_squared: f64,
}

impl<'a, V> Iterator for Query<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (x, y, radius_squared) = (self.x, self.y, self.radius_squared);
        self.candidates
            .find(|entry| entry.distance_squared(x, y) <= radius_squared)
    }
}

impl<V> SpatialHashGrid<V> {
    /// Entries of the `(2 * extent + 1)²` block of cells around a point
    ///
    /// With a zero cell size only the point's own bucket is visited.
    pub fn cell_neighbor_entries(&self, x: f64, y: f64, extent: u32) -> NeighborEntries<'_, V> {
        NeighborEntries::around(self, x, y, extent)
    }

    /// Cells along one axis that can hold a point within `radius` of `value`
    ///
    /// `None` when the range is wider than the number of occupied cells, or
    /// not finite.
    fn covering(&self, value: f64, radius: f64) -> Option<AxisRange> {
        let low = self.quantize(value - radius);
        let width = self.quantize(value + radius) - low + 3.0;

        (width <= self.cell_count() as f64).then_some(AxisRange {
            anchor: low,
            first: -1,
            count: width as u64,
        })
    }

    /// Every entry within `radius` of a point, boundary included
    ///
    /// Non-positive and NaN radii yield nothing.
    pub fn query(&self, x: f64, y: f64, radius: f64) -> Query<'_, V> {
        let candidates = if radius.is_nan() || radius <= 0.0 {
            Candidates::Nothing
        } else if self.cell_size() > 0.0 {
            match (self.covering(x, radius), self.covering(y, radius)) {
                (Some(columns), Some(rows))
                    if columns.count as f64 * rows.count as f64 <= self.cell_count() as f64 =>
                {
                    Candidates::Neighborhood(NeighborEntries::spanning(self, columns, rows))
                }
                _ => Candidates::Everything(self.entries()),
            }
        } else {
            Candidates::Everything(self.entries())
        };

        Query {
            candidates,
            x,
            y,
            radius_squared: radius * radius,
        }
    }

    /// First entry found within `radius`
    ///
    /// Depends on iteration order and is not necessarily the nearest; use
    /// [`Self::query_nearest`] for that.
    pub fn query_first(&self, x: f64, y: f64, radius: f64) -> Option<&Entry<V>> {
        self.query(x, y, radius).next()
    }

    /// Closest entry within `radius`, ties going to the first one found
    pub fn query_nearest(&self, x: f64, y: f64, radius: f64) -> Option<&Entry<V>> {
        self.query(x, y, radius)
            .fold(None::<(&Entry<V>, f64)>, |nearest, entry| {
                let distance = entry.distance_squared(x, y);
                match nearest {
                    Some((_, best)) if best <= distance => nearest,
                    _ => Some((entry, distance)),
                }
            })
            .map(|(entry, _)| entry)
    }
}
