//! Occupancy of a rectangular region while presents are being placed.

use crate::shape::Cell;
use bitvec::prelude::*;

/// Immutable copy of a grid's occupancy, used as a memoization key.
///
/// Two snapshots compare equal iff the same cells are filled.
pub type Snapshot = BitBox;

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Dense `width * height` occupancy grid.
///
/// Cells are stored row by row: cell `(row, col)` lives at bit
/// `row * width + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    occupied: BitVec,
    filled: usize,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            occupied: bitvec![0; width * height],
            filled: 0,
        }
    }

    #[inline]
    fn index(&self, (row, col): Cell) -> usize {
        row * self.width + col
    }

    #[inline]
    fn to_cell(&self, index: usize) -> Cell {
        (index / self.width, index % self.width)
    }

    #[inline]
    fn translate(&self, (row, col): Cell, (anchor_row, anchor_col): Cell) -> Option<Cell> {
        let cell = (row + anchor_row, col + anchor_col);

        (cell.0 < self.height && cell.1 < self.width).then_some(cell)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Return true if the cell is covered by a placed present.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn is_filled(&self, cell: Cell) -> bool {
        assert!(
            cell.0 < self.height && cell.1 < self.width,
            "Cell {cell:?} is outside of the grid"
        );
        self.occupied[self.index(cell)]
    }

    /// Return true if every offset, moved by `anchor`, lands on an empty cell
    /// inside the grid.
    pub fn can_place(&self, offsets: &[Cell], anchor: Cell) -> bool {
        offsets.iter().all(|&offset| {
            self.translate(offset, anchor)
                .is_some_and(|cell| !self.occupied[self.index(cell)])
        })
    }

    /// Fill the cells covered by `offsets` moved by `anchor`.
    ///
    /// The caller must have checked [`Grid::can_place`] first.
    pub fn place(&mut self, offsets: &[Cell], anchor: Cell) {
        debug_assert!(
            self.can_place(offsets, anchor),
            "Placing {offsets:?} at {anchor:?} overlaps or leaves the grid"
        );

        for &offset in offsets {
            let index = self.index((offset.0 + anchor.0, offset.1 + anchor.1));
            self.occupied.set(index, true);
        }
        self.filled += offsets.len();
    }

    /// Undo a [`Grid::place`] made with the same arguments.
    pub fn remove(&mut self, offsets: &[Cell], anchor: Cell) {
        for &offset in offsets {
            let index = self.index((offset.0 + anchor.0, offset.1 + anchor.1));
            debug_assert!(
                self.occupied[index],
                "Removing {offsets:?} at {anchor:?} clears an empty cell"
            );
            self.occupied.set(index, false);
        }
        self.filled -= offsets.len();
    }

    /// Number of cells not covered by any present.
    pub fn empty_cell_count(&self) -> usize {
        self.area() - self.filled
    }

    /// Number of cells covered by presents.
    pub fn filled_cell_count(&self) -> usize {
        self.filled
    }

    /// Empty cells sharing an edge with a filled cell, in row-major order.
    ///
    /// While nothing is placed every cell is part of the frontier.
    pub fn adjacent_frontier(&self) -> Vec<Cell> {
        if self.filled == 0 {
            return (0..self.area()).map(|index| self.to_cell(index)).collect();
        }

        let mut frontier = bitvec![0; self.area()];
        for index in self.occupied.iter_ones() {
            let (row, col) = self.to_cell(index);

            for (d_row, d_col) in NEIGHBORS {
                let (Some(n_row), Some(n_col)) =
                    (row.checked_add_signed(d_row), col.checked_add_signed(d_col))
                else {
                    continue;
                };

                if n_row < self.height && n_col < self.width {
                    let neighbor = self.index((n_row, n_col));
                    if !self.occupied[neighbor] {
                        frontier.set(neighbor, true);
                    }
                }
            }
        }

        frontier
            .iter_ones()
            .map(|index| self.to_cell(index))
            .collect()
    }

    /// Copy the current occupancy.
    pub fn snapshot(&self) -> Snapshot {
        self.occupied.clone().into_boxed_bitslice()
    }
}
