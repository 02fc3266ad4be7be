//! Exact depth-first search for a packing of presents into a grid.
//!
//! Presents are placed one at a time in the given order. Each step tries
//! every orientation of the next present at every candidate anchor, recurses,
//! and undoes the placement when the recursion fails. Placements are always
//! undone in reverse order, so the grid is back in the state it was in when a
//! frame returns `false`.

use crate::{
    config::{CandidatePolicy, SearchConfig},
    grid::{Grid, Snapshot},
    heuristics::required_area,
    shape::{Cell, Orientation, Shape},
};
use rustc_hash::FxHashSet;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every present was placed.
    Solved,
    /// The search space was exhausted without a packing.
    Exhausted,
    /// The node budget ran out before a decision.
    BudgetExceeded,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search frames entered, not counting the final "all placed" frame.
    pub nodes: u64,
    /// Frames cut short by the memo.
    pub memo_hits: u64,
    /// Dead states recorded in the memo.
    pub memo_entries: usize,
}

#[derive(Debug)]
struct OutOfBudget;

/// Backtracking search over one region.
///
/// The grid and the memo belong to this search alone; build a new `Search`
/// for every region.
#[derive(Debug)]
pub struct Search<'s> {
    grid: Grid,
    instances: Vec<&'s Shape>,
    /// `remaining_area[i]` is the number of cells the presents from `i`
    /// onwards cover.
    remaining_area: Vec<usize>,
    exhaustive: bool,
    memo: Option<FxHashSet<(Snapshot, usize)>>,
    node_budget: Option<u64>,
    stats: SearchStats,
}

impl<'s> Search<'s> {
    /// Prepare a search on an empty `width * height` grid.
    pub fn new(width: usize, height: usize, instances: Vec<&'s Shape>, config: &SearchConfig) -> Self {
        Self::with_grid(Grid::new(width, height), instances, config)
    }

    /// Prepare a search that continues from an already partially filled grid.
    pub fn with_grid(grid: Grid, instances: Vec<&'s Shape>, config: &SearchConfig) -> Self {
        let mut remaining_area = vec![0; instances.len() + 1];
        for (index, shape) in instances.iter().enumerate().rev() {
            remaining_area[index] = remaining_area[index + 1] + shape.cell_count();
        }

        let exhaustive = match config.candidates {
            CandidatePolicy::Adjacent => false,
            CandidatePolicy::Exhaustive => true,
            CandidatePolicy::AdjacentWhenTight => {
                required_area(&instances) < grid.empty_cell_count()
            }
        };

        Self {
            grid,
            instances,
            remaining_area,
            exhaustive,
            memo: config.memoize.then(FxHashSet::default),
            node_budget: config.node_budget,
            stats: SearchStats::default(),
        }
    }

    /// Run the search to a decision.
    ///
    /// On [`SearchOutcome::Solved`] the grid keeps the found packing;
    /// otherwise it is back to its starting state.
    pub fn run(&mut self) -> SearchOutcome {
        let outcome = match self.search(0) {
            Ok(true) => SearchOutcome::Solved,
            Ok(false) => SearchOutcome::Exhausted,
            Err(OutOfBudget) => SearchOutcome::BudgetExceeded,
        };

        self.stats.memo_entries = self.memo.as_ref().map_or(0, |memo| memo.len());
        log::trace!(
            "Search over {} presents finished as {:?} with {:?}.",
            self.instances.len(),
            outcome,
            self.stats
        );

        outcome
    }

    /// Counters of the last run.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The grid being packed.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Return true if this search tries every in-bounds anchor.
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    fn search(&mut self, idx: usize) -> Result<bool, OutOfBudget> {
        if idx == self.instances.len() {
            return Ok(true);
        }

        self.stats.nodes += 1;
        if self
            .node_budget
            .is_some_and(|budget| self.stats.nodes > budget)
        {
            return Err(OutOfBudget);
        }

        let empty = self.grid.empty_cell_count();
        if self.instances.len() - idx > empty || self.remaining_area[idx] > empty {
            return Ok(false);
        }

        let key = self.memo.is_some().then(|| (self.grid.snapshot(), idx));
        if let (Some(memo), Some(key)) = (&self.memo, &key) {
            if memo.contains(key) {
                self.stats.memo_hits += 1;
                return Ok(false);
            }
        }

        let shape = self.instances[idx];
        let frontier = if self.exhaustive {
            Vec::new()
        } else {
            self.grid.adjacent_frontier()
        };

        for orientation in shape.orientations() {
            for anchor in self.anchors(orientation, &frontier) {
                if !self.grid.can_place(orientation.cells(), anchor) {
                    continue;
                }

                self.grid.place(orientation.cells(), anchor);
                match self.search(idx + 1) {
                    Ok(true) => return Ok(true),
                    Ok(false) => self.grid.remove(orientation.cells(), anchor),
                    Err(out_of_budget) => {
                        self.grid.remove(orientation.cells(), anchor);
                        return Err(out_of_budget);
                    }
                }
            }
        }

        if let (Some(memo), Some(key)) = (&mut self.memo, key) {
            memo.insert(key);
        }

        Ok(false)
    }

    /// Anchors at which `orientation` stays inside the grid and, unless the
    /// search is exhaustive, covers at least one frontier cell.
    fn anchors(&self, orientation: &Orientation, frontier: &[Cell]) -> Vec<Cell> {
        let (Some(max_row), Some(max_col)) = (
            self.grid.height().checked_sub(orientation.height()),
            self.grid.width().checked_sub(orientation.width()),
        ) else {
            return Vec::new();
        };

        if self.exhaustive {
            return (0..=max_row)
                .flat_map(|row| (0..=max_col).map(move |col| (row, col)))
                .collect();
        }

        let mut anchors: Vec<Cell> = frontier
            .iter()
            .flat_map(|&(row, col)| {
                orientation
                    .cells()
                    .iter()
                    .filter_map(move |&(d_row, d_col)| {
                        Some((row.checked_sub(d_row)?, col.checked_sub(d_col)?))
                    })
            })
            .filter(|&(row, col)| row <= max_row && col <= max_col)
            .collect();

        anchors.sort_unstable();
        anchors.dedup();
        anchors
    }
}
