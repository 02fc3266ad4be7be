use present_packing::{Cell, Region, Shape, ShapeSet};
use std::collections::BTreeSet;

/// Example puzzle with six 7-cell shapes and three regions, of which the
/// first two fit.
#[allow(dead_code)]
pub const SAMPLE_PUZZLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a shape from rows of `#` and `.`.
#[allow(dead_code)]
pub fn shape(id: usize, rows: &[&str]) -> Shape {
    let cells = rows.iter().enumerate().flat_map(|(row, line)| {
        line.char_indices()
            .filter(|(_, c)| *c == '#')
            .map(move |(col, _)| (row, col))
    });

    Shape::new(id, cells).expect("shape should have at least one cell")
}

#[allow(dead_code)]
pub fn shape_set(shapes: Vec<Shape>) -> ShapeSet {
    ShapeSet::try_from(shapes).expect("shape ids should be unique")
}

fn normalize(cells: impl IntoIterator<Item = (i64, i64)>) -> Vec<(i64, i64)> {
    let cells: Vec<_> = cells.into_iter().collect();
    let min_row = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_col = cells.iter().map(|c| c.1).min().unwrap_or(0);

    let normalized: BTreeSet<_> = cells
        .into_iter()
        .map(|(row, col)| (row - min_row, col - min_col))
        .collect();
    normalized.into_iter().collect()
}

/// Every layout of `cells` under rotation and reflection, computed on signed
/// coordinates without going through the crate.
#[allow(dead_code)]
pub fn reference_orientations(cells: &[Cell]) -> BTreeSet<Vec<(i64, i64)>> {
    let base: Vec<(i64, i64)> = cells
        .iter()
        .map(|&(row, col)| (row as i64, col as i64))
        .collect();
    let mirrored: Vec<(i64, i64)> = base.iter().map(|&(row, col)| (row, -col)).collect();

    let mut layouts = BTreeSet::new();
    for start in [base, mirrored] {
        let mut current = start;
        for _ in 0..4 {
            layouts.insert(normalize(current.iter().copied()));
            current = current.iter().map(|&(row, col)| (col, -row)).collect();
        }
    }

    layouts
}

/// Exhaustive packing check: every orientation at every position, no
/// pruning and no memo.
#[allow(dead_code)]
pub fn brute_force_fits(shapes: &ShapeSet, region: &Region) -> bool {
    fn place_all(
        filled: &mut Vec<bool>,
        width: i64,
        height: i64,
        presents: &[BTreeSet<Vec<(i64, i64)>>],
    ) -> bool {
        let Some((layouts, rest)) = presents.split_first() else {
            return true;
        };

        for layout in layouts {
            for anchor_row in 0..height {
                for anchor_col in 0..width {
                    let cells: Option<Vec<usize>> = layout
                        .iter()
                        .map(|&(row, col)| {
                            let (row, col) = (row + anchor_row, col + anchor_col);
                            let inside = row < height && col < width;
                            let index = (row * width + col) as usize;
                            (inside && !filled[index]).then_some(index)
                        })
                        .collect();

                    let Some(cells) = cells else {
                        continue;
                    };

                    for &index in &cells {
                        filled[index] = true;
                    }
                    if place_all(filled, width, height, rest) {
                        return true;
                    }
                    for &index in &cells {
                        filled[index] = false;
                    }
                }
            }
        }

        false
    }

    let presents: Vec<_> = region
        .requirements()
        .iter()
        .flat_map(|&(id, count)| {
            let layouts = reference_orientations(shapes.get(id).expect("known shape").cells());
            std::iter::repeat(layouts).take(count)
        })
        .collect();

    let (width, height) = (region.width() as i64, region.height() as i64);
    let mut filled = vec![false; (width * height) as usize];
    place_all(&mut filled, width, height, &presents)
}
