//! Knobs for region evaluation.

/// Default side of the square footprint reserved per present by the loose
/// packing bound.
pub const DEFAULT_BLOCK_SIDE: usize = 3;

/// Which anchors the search tries for the next present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CandidatePolicy {
    /// Only anchors that put some cell of the present on the frontier of
    /// already filled cells. Assumes the filled area stays connected.
    #[default]
    Adjacent,
    /// Every in-bounds anchor.
    Exhaustive,
    /// [`CandidatePolicy::Adjacent`] when the presents cover the region
    /// exactly, [`CandidatePolicy::Exhaustive`] when there is room to spare.
    AdjacentWhenTight,
}

/// Configuration shared by every region an
/// [`Evaluator`](crate::Evaluator) looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Candidate anchors for the exact search.
    pub candidates: CandidatePolicy,
    /// Remember dead search states within a region.
    pub memoize: bool,
    /// Give up after visiting this many search nodes.
    pub node_budget: Option<u64>,
    /// Minimum side of the per-present footprint of the loose packing
    /// bound. It is raised to the largest bounding box of the required
    /// shapes, so it can never make the bound unsound.
    pub block_side: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidates: CandidatePolicy::default(),
            memoize: true,
            node_budget: None,
            block_side: DEFAULT_BLOCK_SIDE,
        }
    }
}

impl SearchConfig {
    /// Set the candidate policy.
    pub fn with_candidates(mut self, candidates: CandidatePolicy) -> Self {
        self.candidates = candidates;
        self
    }

    /// Enable or disable memoization of dead states.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Limit the number of search nodes per region.
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = Some(node_budget);
        self
    }

    /// Set the minimum footprint side of the loose packing bound.
    pub fn with_block_side(mut self, block_side: usize) -> Self {
        self.block_side = block_side;
        self
    }
}
