//! Tests for grid construction, CRUD, quantization and enumeration

#[cfg(test)]
mod tests {
    use hashgrid::GridError;
    use hashgrid::hash::hash2;
    use hashgrid::spatial::SpatialHashGrid;

    // Tests values round-trip and repeat sets overwrite without recounting
    // Verified by incrementing the count on overwrite
    #[test]
    fn test_insert_get_overwrite() {
        let mut grid = SpatialHashGrid::new(0.0);

        assert_eq!(grid.insert(1.0, 2.0, "a"), None);
        assert_eq!(grid.insert(1.0, 2.0, "b"), Some("a"));

        assert_eq!(grid.get(1.0, 2.0), Some(&"b"));
        assert_eq!(grid.value_count(), 1);
        assert_eq!(grid.cell_count(), 1);
    }

    // Tests an absent value deletes the coordinate
    // Verified by ignoring None in set
    #[test]
    fn test_set_none_deletes() {
        let mut grid = SpatialHashGrid::new(0.0);

        assert_eq!(grid.set(4.0, 5.0, Some(7)), None);
        assert_eq!(grid.set(4.0, 5.0, None), Some(7));
        assert!(!grid.has(4.0, 5.0));
        assert!(grid.is_empty());
        assert_eq!(grid.set(4.0, 5.0, None), None);
    }

    // Tests delete reports whether anything was removed
    // Verified by returning true unconditionally
    #[test]
    fn test_delete_idempotent() {
        let mut grid = SpatialHashGrid::new(0.0);
        grid.insert(3.0, 3.0, ());

        assert!(grid.delete(3.0, 3.0));
        assert!(!grid.delete(3.0, 3.0));
        assert_eq!(grid.value_count(), 0);
        assert_eq!(grid.cell_count(), 0);
    }

    // Tests quantized coordinates share a cell yet stay individually addressable
    // Verified by storing the quantized coordinate in the entry
    #[test]
    fn test_quantized_cell_sharing() {
        let mut grid = SpatialHashGrid::new(10.0);
        grid.insert(1.0, 2.0, 'a');
        grid.insert(3.0, 4.0, 'b');

        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.value_count(), 2);
        assert_eq!(grid.get(1.0, 2.0), Some(&'a'));
        assert_eq!(grid.get(3.0, 4.0), Some(&'b'));

        assert!(grid.has_cell(9.5, 0.0));
        assert!(!grid.has(9.5, 0.0));
        assert!(!grid.has_cell(10.0, 0.0));
        assert_eq!(grid.compute_max_value_count_per_cell(), 2);
    }

    // Tests cell coordinates floor toward negative infinity and fold -0.0
    // Verified by truncating instead of flooring
    #[test]
    fn test_cell_coordinates() {
        let grid = SpatialHashGrid::<()>::new(10.0);

        assert_eq!(grid.cell_coordinates(15.0, -5.0), (1.0, -1.0));
        assert_eq!(grid.cell_coordinates(-0.0, 0.0), (0.0, 0.0));
        assert_eq!(grid.cell_hash(-0.0, 3.0), grid.cell_hash(0.0, 3.0));
        assert_eq!(grid.cell_hash(25.0, 35.0), hash2(2.0, 3.0));

        let exact = SpatialHashGrid::<()>::new(0.0);
        assert_eq!(exact.cell_hash(25.0, 35.0), hash2(25.0, 35.0));
    }

    // Tests invalid cell sizes are rejected or fall back to exact hashing
    // Verified by accepting negative sizes
    #[test]
    fn test_cell_size_validation() {
        assert!(matches!(
            SpatialHashGrid::<()>::try_new(-1.0),
            Err(GridError::InvalidCellSize { .. })
        ));
        assert!(SpatialHashGrid::<()>::try_new(f64::NAN).is_err());
        assert!(SpatialHashGrid::<()>::try_new(f64::INFINITY).is_err());

        let fallback = SpatialHashGrid::<()>::new(-5.0);
        assert!(fallback.cell_size().abs() < f64::EPSILON);

        let grid = SpatialHashGrid::<()>::try_new(2.5);
        assert!(grid.is_ok_and(|grid| (grid.cell_size() - 2.5).abs() < f64::EPSILON));
        assert!(SpatialHashGrid::<()>::default().cell_size().abs() < f64::EPSILON);
    }

    // Tests scalars snap to cell boundaries, ties rounding up
    // Verified by rounding ties away from zero
    #[test]
    fn test_floor_ceil_round() {
        let grid = SpatialHashGrid::<()>::new(10.0);

        assert!((grid.floor(17.0) - 10.0).abs() < f64::EPSILON);
        assert!((grid.floor(-3.0) + 10.0).abs() < f64::EPSILON);
        assert!((grid.ceil(11.0) - 20.0).abs() < f64::EPSILON);
        assert!((grid.ceil(20.0) - 20.0).abs() < f64::EPSILON);
        assert!((grid.round(14.0) - 10.0).abs() < f64::EPSILON);
        assert!((grid.round(15.0) - 20.0).abs() < f64::EPSILON);
        assert!((grid.round(-25.0) + 20.0).abs() < f64::EPSILON);
    }

    // Tests quantization without a cell size surfaces NaN instead of panicking
    // Verified by treating zero as a unit cell
    #[test]
    fn test_zero_cell_size_quantization_is_nan() {
        let grid = SpatialHashGrid::<()>::new(0.0);

        assert!(grid.floor(5.0).is_nan());
        assert!(grid.ceil(0.0).is_nan());
        assert!(grid.round(-2.0).is_nan());
    }

    // Tests NaN and signed zero coordinates are distinct storable keys
    // Verified by comparing coordinates numerically
    #[test]
    fn test_special_coordinates() {
        let mut grid = SpatialHashGrid::new(0.0);
        grid.insert(f64::NAN, 1.0, "nan");
        grid.insert(0.0, 1.0, "zero");
        grid.insert(-0.0, 1.0, "negative zero");

        assert_eq!(grid.get(f64::NAN, 1.0), Some(&"nan"));
        assert_eq!(grid.get(0.0, 1.0), Some(&"zero"));
        assert_eq!(grid.get(-0.0, 1.0), Some(&"negative zero"));
        assert_eq!(grid.value_count(), 3);
        assert!(grid.delete(f64::NAN, 1.0));
    }

    // Tests chains grow and collapse as colliding coordinates come and go
    // Verified by leaving one-node chains in place
    #[test]
    fn test_collision_chain_lifecycle() {
        let mut grid = SpatialHashGrid::new(0.0);
        grid.insert(108.0, 249.0, 1);
        grid.insert(715.0, 901.0, 2);
        grid.insert(1830.0, 1881.0, 3);

        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.value_count(), 3);
        assert_eq!(grid.compute_max_value_count_per_cell(), 3);

        assert!(grid.delete(715.0, 901.0));
        assert_eq!(grid.compute_max_value_count_per_cell(), 2);
        assert!(grid.delete(108.0, 249.0));
        assert_eq!(grid.compute_max_value_count_per_cell(), 1);
        assert_eq!(grid.get(1830.0, 1881.0), Some(&3));
        assert!(grid.delete(1830.0, 1881.0));
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.compute_max_value_count_per_cell(), 0);
    }

    // Tests mutable access edits the stored value in place
    // Verified by returning a copy
    #[test]
    fn test_get_mut() {
        let mut grid = SpatialHashGrid::new(1.0);
        grid.insert(0.5, 0.5, vec![1]);

        if let Some(values) = grid.get_mut(0.5, 0.5) {
            values.push(2);
        }
        assert_eq!(grid.get(0.5, 0.5), Some(&vec![1, 2]));
        assert!(grid.get_mut(0.25, 0.25).is_none());
    }

    // Tests whole-grid enumeration visits every entry exactly once
    // Verified by skipping chained entries
    #[test]
    fn test_entries_and_values() {
        let mut grid = SpatialHashGrid::new(5.0);
        for i in 0..20 {
            grid.insert(f64::from(i), f64::from(i % 3), i);
        }

        let mut values: Vec<i32> = grid.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, (0..20).collect::<Vec<_>>());
        assert_eq!(grid.entries().count(), 20);
        assert_eq!((&grid).into_iter().count(), 20);
    }

    // Tests each enumeration call starts a fresh sequence
    // Verified by sharing one iterator between calls
    #[test]
    fn test_enumeration_restarts() {
        let mut grid = SpatialHashGrid::new(0.0);
        grid.extend([(1.0, 1.0, 'x'), (2.0, 2.0, 'y')]);

        let mut first = grid.entries();
        let _ = first.next();
        assert_eq!(grid.entries().count(), 2);
        assert_eq!(first.count(), 1);
    }

    // Tests cell enumeration only covers the bucket of the coordinate
    // Verified by enumerating neighboring cells too
    #[test]
    fn test_cell_entries() {
        let mut grid = SpatialHashGrid::new(10.0);
        grid.insert(1.0, 1.0, "a");
        grid.insert(9.0, 9.0, "b");
        grid.insert(11.0, 1.0, "c");

        let mut values: Vec<&str> = grid.cell_values(5.0, 5.0).copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(grid.cell_entries(15.0, 5.0).count(), 1);
        assert_eq!(grid.cell_entries(-5.0, 5.0).count(), 0);
    }

    // Tests eager mapping sees coordinates and values
    // Verified by passing quantized coordinates to the callback
    #[test]
    fn test_map_entries() {
        let mut grid = SpatialHashGrid::new(10.0);
        grid.insert(1.5, 2.0, 3.0);
        grid.insert(4.0, -1.0, 2.0);

        let mut sums = grid.map_entries(|x, y, value| x + y + value);
        sums.sort_by(f64::total_cmp);
        assert_eq!(sums, vec![5.0, 6.5]);
    }

    // Tests clearing resets both counts
    // Verified by leaving value_count untouched
    #[test]
    fn test_clear() {
        let mut grid = SpatialHashGrid::with_capacity(1.0, 16);
        grid.extend((0..10).map(|i| (f64::from(i), 0.0, i)));
        assert_eq!(grid.len(), 10);

        grid.clear();
        assert_eq!(grid.value_count(), 0);
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.entries().next().is_none());
    }
}
