// THEORY:
// The `Aggregator` is the single pass that turns a `PixelGrid` into a
// `FrequencyTable`. It is a stateless utility in the same spirit as the other
// scanning passes: one function in, one table out, no memory between calls.
//
// Algorithm:
// 1.  **Exhaustive Row-Major Scan**: `y` runs over `min_y..max_y` in the outer loop
//     and `x` over `min_x..max_x` in the inner loop. Every coordinate inside the
//     half-open bounds is visited exactly once.
// 2.  **Normalize then Count**: Each sample is reduced to its `ColorKey` and the
//     key's count is incremented.
// 3.  **Degenerate Grids**: Empty or inverted bounds produce empty ranges, so a
//     0x0 grid yields an empty table without any special casing.

use crate::core_modules::color_key::ColorKey;
use crate::core_modules::frequency_table::{Count, FrequencyTable};
use crate::core_modules::pixel_grid::PixelGrid;

pub mod aggregator {
    use super::*;

    /// Scans every pixel of `grid` and counts each distinct color.
    pub fn aggregate<G: PixelGrid + ?Sized>(grid: &G) -> FrequencyTable {
        let bounds = grid.bounds();
        let mut table = FrequencyTable::new();
        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                table.increment(ColorKey::from(grid.color_at(x, y)));
            }
        }
        table
    }

    /// Sum of all counts in `table`.
    pub fn total_count(table: &FrequencyTable) -> Count {
        table.total_count()
    }
}

#[cfg(test)]
mod tests {
    use super::aggregator::*;
    use super::*;
    use crate::core_modules::pixel_grid::{Bounds, Coordinate, Rgba16};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Synthetic grid: colors laid out row-major over arbitrary bounds.
    #[derive(Debug)]
    struct VecGrid {
        bounds: Bounds,
        samples: Vec<Rgba16>,
    }

    impl VecGrid {
        fn new(bounds: Bounds, samples: Vec<Rgba16>) -> Self {
            assert_eq!(samples.len() as u64, bounds.area());
            Self { bounds, samples }
        }
    }

    impl PixelGrid for VecGrid {
        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn color_at(&self, x: Coordinate, y: Coordinate) -> Rgba16 {
            let column = (x - self.bounds.min_x) as usize;
            let row = (y - self.bounds.min_y) as usize;
            self.samples[row * self.bounds.width() as usize + column]
        }
    }

    /// Records every coordinate it is asked about.
    struct RecordingGrid {
        bounds: Bounds,
        visits: RefCell<Vec<(Coordinate, Coordinate)>>,
    }

    impl PixelGrid for RecordingGrid {
        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn color_at(&self, x: Coordinate, y: Coordinate) -> Rgba16 {
            self.visits.borrow_mut().push((x, y));
            Rgba16::default()
        }
    }

    fn rgb(r: u8, g: u8, b: u8) -> Rgba16 {
        Rgba16::from_rgba8(r, g, b, 255)
    }

    #[test]
    fn single_pixel() {
        let grid = VecGrid::new(Bounds::from_size(1, 1), vec![rgb(255, 0, 163)]);
        let table = aggregate(&grid);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"FF00A3".parse().unwrap()), Some(1));
        assert_eq!(total_count(&table), 1);
    }

    #[test]
    fn four_black_pixels() {
        let grid = VecGrid::new(Bounds::from_size(2, 2), vec![rgb(0, 0, 0); 4]);
        let table = aggregate(&grid);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&ColorKey::from_rgb8(0, 0, 0)), Some(4));
        assert_eq!(total_count(&table), 4);
    }

    #[test]
    fn empty_grid_yields_empty_table() {
        let grid = VecGrid::new(Bounds::from_size(0, 0), Vec::new());
        let table = aggregate(&grid);
        assert!(table.is_empty());
        assert_eq!(total_count(&table), 0);
    }

    #[test]
    fn alpha_variants_share_a_key() {
        let grid = VecGrid::new(
            Bounds::from_size(3, 1),
            vec![
                Rgba16::from_rgba8(10, 20, 30, 0),
                Rgba16::from_rgba8(10, 20, 30, 128),
                Rgba16::from_rgba8(10, 20, 30, 255),
            ],
        );
        let table = aggregate(&grid);
        assert_eq!(table.get(&ColorKey::from_rgb8(10, 20, 30)), Some(3));
    }

    #[test]
    fn scan_is_row_major_over_offset_bounds() {
        let grid = RecordingGrid {
            bounds: Bounds::new(-1, 5, 1, 7),
            visits: RefCell::new(Vec::new()),
        };
        aggregate(&grid);
        assert_eq!(
            grid.visits.into_inner(),
            vec![(-1, 5), (0, 5), (-1, 6), (0, 6)]
        );
    }

    #[test]
    fn works_through_a_trait_object() {
        let grid: Box<dyn PixelGrid> =
            Box::new(VecGrid::new(Bounds::from_size(2, 1), vec![rgb(1, 1, 1), rgb(2, 2, 2)]));
        assert_eq!(aggregate(grid.as_ref()).len(), 2);
    }

    fn grid_strategy() -> impl Strategy<Value = VecGrid> {
        (-4i32..4, -4i32..4, 0u32..12, 0u32..12).prop_flat_map(|(min_x, min_y, width, height)| {
            let bounds = Bounds::new(
                min_x,
                min_y,
                min_x + width as i32,
                min_y + height as i32,
            );
            // A small palette so repeated colors are common.
            prop::collection::vec(0u8..4, (width * height) as usize).prop_map(move |shades| {
                let samples = shades
                    .into_iter()
                    .map(|shade| rgb(shade * 60, 255 - shade, shade))
                    .collect();
                VecGrid::new(bounds, samples)
            })
        })
    }

    proptest! {
        #[test]
        fn counts_sum_to_area(grid in grid_strategy()) {
            let table = aggregate(&grid);
            prop_assert_eq!(total_count(&table), grid.bounds().area());
        }

        #[test]
        fn aggregation_is_repeatable(grid in grid_strategy()) {
            prop_assert_eq!(aggregate(&grid), aggregate(&grid));
        }

        #[test]
        fn visits_each_coordinate_once(min_x in -3i32..3, min_y in -3i32..3, w in 0u32..8, h in 0u32..8) {
            let grid = RecordingGrid {
                bounds: Bounds::new(min_x, min_y, min_x + w as i32, min_y + h as i32),
                visits: RefCell::new(Vec::new()),
            };
            aggregate(&grid);
            let visits = grid.visits.into_inner();
            let unique: HashSet<_> = visits.iter().copied().collect();
            prop_assert_eq!(visits.len() as u64, grid.bounds.area());
            prop_assert_eq!(unique.len(), visits.len());
            prop_assert!(visits.iter().all(|&(x, y)| grid.bounds.contains(x, y)));
        }
    }
}
