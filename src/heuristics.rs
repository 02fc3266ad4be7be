//! Cheap checks that settle most regions without searching.

use crate::shape::Shape;

/// Result of the quick checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickCheck {
    /// The presents need more cells than the region has.
    AreaExceeded,
    /// Every present can get its own footprint block.
    LooselyFits,
    /// Only the exact search can tell.
    Uncertain,
}

/// Total number of cells covered by the presents.
pub fn required_area(instances: &[&Shape]) -> usize {
    instances.iter().map(|shape| shape.cell_count()).sum()
}

/// Side of the square footprint reserved per present.
///
/// This is `min_side` raised to the longest bounding box side of any present,
/// so every present fits inside its own block in its original orientation.
pub fn footprint_side(instances: &[&Shape], min_side: usize) -> usize {
    instances
        .iter()
        .map(|shape| shape.bounding_side())
        .fold(min_side.max(1), usize::max)
}

/// Number of disjoint `side * side` blocks a `width * height` region holds.
pub fn block_count(width: usize, height: usize, side: usize) -> usize {
    (width / side) * (height / side)
}

/// Run the area check, then the loose packing bound.
pub fn quick_check(width: usize, height: usize, instances: &[&Shape], min_side: usize) -> QuickCheck {
    if required_area(instances) > width * height {
        return QuickCheck::AreaExceeded;
    }

    let side = footprint_side(instances, min_side);
    if instances.len() <= block_count(width, height, side) {
        return QuickCheck::LooselyFits;
    }

    QuickCheck::Uncertain
}
