//! Polyomino shapes and their orientations.
//!
//! A [`Shape`] is a set of unit cells. Every shape can be placed in any of
//! the 8 orientations produced by rotating it in 90 degree steps and
//! mirroring it. Orientations are generated the first time they are asked
//! for and then kept with the shape for the rest of the run.

use crate::error::{RegionError, ShapeError};
use std::{collections::BTreeMap, sync::OnceLock};

/// A `(row, column)` position, either an offset inside a shape or a cell of a
/// grid.
pub type Cell = (usize, usize);

/// Binary mask of a shape, truncated to its bounding box.
///
/// Rows are stored consecutively: the element of the `i`th row and `j`th
/// column lives at index `i * width + j`. 0 is an empty cell, 1 a filled
/// cell.
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Ord)]
struct Mask {
    width: usize,
    bits: Vec<u8>,
}

impl Mask {
    /// Create a mask, truncating empty rows and columns on every edge.
    fn new(init_width: usize, init_bits: Vec<u8>) -> Self {
        assert!(init_width != 0, "Width of mask must be non-zero.");
        assert!(
            init_bits.len() % init_width == 0,
            "Mask with incorrect length - incorrect number of elements supplied."
        );

        let init_height = init_bits.len() / init_width;
        let filled = |row: usize, col: usize| init_bits[row * init_width + col] != 0;

        let rows: Vec<usize> = (0..init_height)
            .filter(|&row| (0..init_width).any(|col| filled(row, col)))
            .collect();
        let cols: Vec<usize> = (0..init_width)
            .filter(|&col| (0..init_height).any(|row| filled(row, col)))
            .collect();

        let (Some(&r1), Some(&r2)) = (rows.first(), rows.last()) else {
            panic!("No ones found - mask empty!");
        };
        let (c1, c2) = (cols[0], cols[cols.len() - 1]);

        let width = c2 - c1 + 1;
        let mut bits = Vec::with_capacity(width * (r2 - r1 + 1));
        for row in r1..=r2 {
            bits.extend_from_slice(&init_bits[row * init_width + c1..=row * init_width + c2]);
        }

        Self { width, bits }
    }

    fn from_cells(cells: &[Cell]) -> Self {
        let height = cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let width = cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);

        let mut bits = vec![0; width * height];
        for &(row, col) in cells {
            bits[row * width + col] = 1;
        }

        Self::new(width, bits)
    }

    fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Rotate 90 degrees clockwise.
    fn rotate(&self) -> Self {
        let cols = self.width;
        let rows = self.height();
        let mut rotated = Vec::with_capacity(self.bits.len());

        for c in 0..cols {
            for r in (0..rows).rev() {
                rotated.push(self.bits[r * cols + c]);
            }
        }

        Self::new(rows, rotated)
    }

    /// Mirror across the horizontal axis.
    fn reflect(&self) -> Self {
        let reflected = self
            .bits
            .chunks(self.width)
            .rev()
            .flatten()
            .copied()
            .collect();

        Self::new(self.width, reflected)
    }

    fn rotations(&self) -> [Self; 4] {
        let quarter = self.rotate();
        let half = quarter.rotate();
        let three_quarters = half.rotate();

        [self.clone(), quarter, half, three_quarters]
    }

    /// All 8 symmetries, duplicates removed.
    fn symmetries(&self) -> Vec<Self> {
        let rotations = self.rotations();
        let mut symmetries: Vec<Self> = rotations
            .iter()
            .map(Self::reflect)
            .chain(rotations.iter().cloned())
            .collect();

        symmetries.sort();
        symmetries.dedup();
        symmetries
    }
}

/// One placement-ready layout of a shape.
///
/// The offsets are sorted in row-major order and normalized so that the
/// bounding box touches `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation {
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Orientation {
    fn from_mask(mask: &Mask) -> Self {
        let cells = mask
            .bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit != 0)
            .map(|(index, _)| (index / mask.width, index % mask.width))
            .collect();

        Self {
            cells,
            height: mask.height(),
            width: mask.width,
        }
    }

    /// Offsets of the filled cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Height of the bounding box.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the bounding box.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// A polyomino that presents are cut from.
#[derive(Debug, Clone)]
pub struct Shape {
    id: usize,
    cells: Vec<Cell>,
    height: usize,
    width: usize,
    orientations: OnceLock<Box<[Orientation]>>,
}

impl Shape {
    /// Create a shape from a set of cell offsets.
    ///
    /// The offsets are translated so the bounding box touches `(0, 0)`;
    /// repeated offsets are collapsed.
    pub fn new(id: usize, cells: impl IntoIterator<Item = Cell>) -> Result<Self, ShapeError> {
        let mut cells: Vec<Cell> = cells.into_iter().collect();

        let min_row = cells.iter().map(|&(row, _)| row).min();
        let min_col = cells.iter().map(|&(_, col)| col).min();
        let (Some(min_row), Some(min_col)) = (min_row, min_col) else {
            return Err(ShapeError::Empty { id });
        };

        for (row, col) in &mut cells {
            *row -= min_row;
            *col -= min_col;
        }
        cells.sort_unstable();
        cells.dedup();

        let height = cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let width = cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);

        Ok(Self {
            id,
            cells,
            height,
            width,
            orientations: OnceLock::new(),
        })
    }

    /// Create a shape from a 0/1 array literal, 1 marking a filled cell.
    pub fn from_rows<const W: usize, const H: usize>(
        id: usize,
        rows: [[u8; W]; H],
    ) -> Result<Self, ShapeError> {
        let cells = rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, bit)| **bit != 0)
                .map(move |(col, _)| (row, col))
        });

        Self::new(id, cells)
    }

    /// Identifier of the shape.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Normalized offsets of the filled cells, in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Height of the bounding box in the original orientation.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the bounding box in the original orientation.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Longest side of the bounding box, which is the same for every
    /// orientation.
    pub fn bounding_side(&self) -> usize {
        self.height.max(self.width)
    }

    /// Distinct orientations of this shape, generated on first use.
    pub fn orientations(&self) -> &[Orientation] {
        self.orientations.get_or_init(|| {
            let orientations: Box<[Orientation]> = Mask::from_cells(&self.cells)
                .symmetries()
                .iter()
                .map(Orientation::from_mask)
                .collect();

            log::trace!(
                "Generated [{}] orientations for shape [{}].",
                orientations.len(),
                self.id
            );

            orientations
        })
    }

    /// Return true if the orientations have already been generated.
    pub fn has_orientations(&self) -> bool {
        self.orientations.get().is_some()
    }
}

/// Collection of shapes addressed by id.
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    shapes: BTreeMap<usize, Shape>,
}

impl ShapeSet {
    /// Create an empty shape set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape, rejecting ids that are already taken.
    pub fn insert(&mut self, shape: Shape) -> Result<(), ShapeError> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return Err(ShapeError::DuplicateId { id });
        }

        self.shapes.insert(id, shape);
        Ok(())
    }

    /// Look up a shape.
    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Look up a shape that a region requires.
    pub fn require(&self, id: usize) -> Result<&Shape, RegionError> {
        self.get(id).ok_or(RegionError::UnknownShape { id })
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Return true if there are no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over shapes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }
}

impl TryFrom<Vec<Shape>> for ShapeSet {
    type Error = ShapeError;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, Self::Error> {
        let mut set = ShapeSet::new();
        for shape in shapes {
            set.insert(shape)?;
        }

        Ok(set)
    }
}
