//! Region queries and the evaluator that decides them.

use crate::{
    config::SearchConfig,
    error::RegionError,
    heuristics::{quick_check, QuickCheck},
    search::{Search, SearchOutcome, SearchStats},
    shape::{Shape, ShapeSet},
};
use rayon::prelude::*;
use std::cmp::Reverse;

/// A rectangular region and the presents that must go into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    requirements: Vec<(usize, usize)>,
}

impl Region {
    /// Create a region from `(shape id, count)` requirements.
    pub fn new(
        width: usize,
        height: usize,
        requirements: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::ZeroDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            requirements: requirements.into_iter().collect(),
        })
    }

    /// Create a region where `counts[i]` is the number of presents of shape
    /// `i`.
    pub fn from_counts(width: usize, height: usize, counts: &[usize]) -> Result<Self, RegionError> {
        Self::new(width, height, counts.iter().copied().enumerate())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The `(shape id, count)` requirements as given.
    pub fn requirements(&self) -> &[(usize, usize)] {
        &self.requirements
    }

    /// Total number of presents required.
    pub fn present_count(&self) -> usize {
        self.requirements.iter().map(|&(_, count)| count).sum()
    }
}

/// Final answer for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// All presents can be packed.
    Fits,
    /// No packing exists.
    DoesNotFit,
    /// The node budget ran out first.
    Undecided,
}

/// Stage that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// The presents cover more cells than the region has.
    Area,
    /// The loose packing bound proved a fit.
    LooseBound,
    /// The exact search decided (or ran out of budget).
    Search,
}

/// Verdict for a region along with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// The answer.
    pub verdict: Verdict,
    /// Which stage answered.
    pub tier: Tier,
    /// Search counters, present only for [`Tier::Search`].
    pub stats: Option<SearchStats>,
}

impl Evaluation {
    /// Return true if the region is known to fit.
    pub fn fits(&self) -> bool {
        self.verdict == Verdict::Fits
    }
}

/// Decides regions against a fixed set of shapes.
///
/// The evaluator only reads the shapes; every region gets a fresh grid and
/// memo, so one evaluator can be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'s> {
    shapes: &'s ShapeSet,
    config: SearchConfig,
}

impl<'s> Evaluator<'s> {
    /// Create an evaluator with the default configuration.
    pub fn new(shapes: &'s ShapeSet) -> Self {
        Self::with_config(shapes, SearchConfig::default())
    }

    /// Create an evaluator with a custom configuration.
    pub fn with_config(shapes: &'s ShapeSet, config: SearchConfig) -> Self {
        Self { shapes, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Expand the requirements of `region` into one entry per present,
    /// largest shapes first.
    pub fn present_instances(&self, region: &Region) -> Result<Vec<&'s Shape>, RegionError> {
        let mut instances = Vec::with_capacity(region.present_count());
        for &(id, count) in region.requirements() {
            if count == 0 {
                continue;
            }

            let shape = self.shapes.require(id)?;
            instances.extend(std::iter::repeat(shape).take(count));
        }

        instances.sort_by_key(|shape| (Reverse(shape.cell_count()), shape.id()));
        Ok(instances)
    }

    /// Decide whether every present of `region` fits.
    pub fn evaluate(&self, region: &Region) -> Result<Evaluation, RegionError> {
        let instances = self.present_instances(region)?;
        let (width, height) = (region.width(), region.height());

        let evaluation = match quick_check(width, height, &instances, self.config.block_side) {
            QuickCheck::AreaExceeded => Evaluation {
                verdict: Verdict::DoesNotFit,
                tier: Tier::Area,
                stats: None,
            },
            QuickCheck::LooselyFits => Evaluation {
                verdict: Verdict::Fits,
                tier: Tier::LooseBound,
                stats: None,
            },
            QuickCheck::Uncertain => {
                let mut search = Search::new(width, height, instances, &self.config);
                let verdict = match search.run() {
                    SearchOutcome::Solved => Verdict::Fits,
                    SearchOutcome::Exhausted => Verdict::DoesNotFit,
                    SearchOutcome::BudgetExceeded => Verdict::Undecided,
                };

                Evaluation {
                    verdict,
                    tier: Tier::Search,
                    stats: Some(search.stats()),
                }
            }
        };

        log::debug!(
            "Region {}x{}: {:?} by {:?}.",
            width,
            height,
            evaluation.verdict,
            evaluation.tier
        );

        Ok(evaluation)
    }

    /// Return true if `region` is known to fit.
    pub fn fits(&self, region: &Region) -> Result<bool, RegionError> {
        self.evaluate(region).map(|evaluation| evaluation.fits())
    }

    /// Count the regions that fit, one after the other.
    pub fn count_fitting<'r>(
        &self,
        regions: impl IntoIterator<Item = &'r Region>,
    ) -> Result<usize, RegionError> {
        let mut count = 0;
        let mut total = 0;
        for region in regions {
            total += 1;
            if self.fits(region)? {
                count += 1;
            }
        }

        log::info!("{} of {} regions fit.", count, total);
        Ok(count)
    }

    /// Count the regions that fit, evaluating them on the rayon thread pool.
    pub fn count_fitting_parallel(&self, regions: &[Region]) -> Result<usize, RegionError> {
        let count = regions
            .par_iter()
            .map(|region| self.fits(region).map(usize::from))
            .sum::<Result<usize, RegionError>>()?;

        log::info!("{} of {} regions fit.", count, regions.len());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> ShapeSet {
        ShapeSet::try_from(vec![
            Shape::from_rows(0, [[1]]).unwrap(),
            Shape::from_rows(1, [[1, 1], [1, 1]]).unwrap(),
            Shape::from_rows(2, [[1, 1, 1], [1, 0, 0]]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn zero_sized_region_is_rejected() {
        assert_eq!(
            Region::new(0, 3, [(0, 1)]).unwrap_err(),
            RegionError::ZeroDimension {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let shapes = shapes();
        let region = Region::new(3, 3, [(9, 1)]).unwrap();
        assert_eq!(
            Evaluator::new(&shapes).evaluate(&region).unwrap_err(),
            RegionError::UnknownShape { id: 9 }
        );
    }

    #[test]
    fn unused_unknown_shape_is_ignored() {
        let shapes = shapes();
        let region = Region::new(3, 3, [(9, 0), (0, 1)]).unwrap();
        assert!(Evaluator::new(&shapes).fits(&region).unwrap());
    }

    #[test]
    fn instances_are_largest_first() {
        let shapes = shapes();
        let region = Region::from_counts(5, 5, &[2, 1, 1]).unwrap();
        let ids: Vec<_> = Evaluator::new(&shapes)
            .present_instances(&region)
            .unwrap()
            .iter()
            .map(|shape| shape.id())
            .collect();
        assert_eq!(ids, vec![1, 2, 0, 0]);
        assert_eq!(region.present_count(), 4);
    }

    #[test]
    fn tiers_are_reported() {
        let shapes = shapes();
        let evaluator = Evaluator::new(&shapes);

        let area = evaluator
            .evaluate(&Region::from_counts(2, 2, &[1, 1]).unwrap())
            .unwrap();
        assert_eq!((area.verdict, area.tier), (Verdict::DoesNotFit, Tier::Area));
        assert!(area.stats.is_none());

        let loose = evaluator
            .evaluate(&Region::from_counts(6, 6, &[1, 1, 1]).unwrap())
            .unwrap();
        assert_eq!((loose.verdict, loose.tier), (Verdict::Fits, Tier::LooseBound));

        let search = evaluator
            .evaluate(&Region::from_counts(2, 4, &[0, 2]).unwrap())
            .unwrap();
        assert_eq!((search.verdict, search.tier), (Verdict::Fits, Tier::Search));
        assert!(search.stats.is_some());
    }

    #[test]
    fn budget_leaves_region_undecided() {
        let shapes = shapes();
        let config = SearchConfig::default().with_node_budget(1);
        let evaluator = Evaluator::with_config(&shapes, config);

        let evaluation = evaluator
            .evaluate(&Region::from_counts(4, 4, &[0, 4]).unwrap())
            .unwrap();
        assert_eq!(evaluation.verdict, Verdict::Undecided);
        assert!(!evaluation.fits());
    }

    #[test]
    fn counts_agree() {
        let shapes = shapes();
        let evaluator = Evaluator::new(&shapes);
        let regions = vec![
            Region::from_counts(2, 2, &[0, 1]).unwrap(),
            Region::from_counts(2, 2, &[1, 1]).unwrap(),
            Region::from_counts(3, 2, &[0, 0, 2]).unwrap(),
            Region::from_counts(4, 2, &[0, 0, 2]).unwrap(),
        ];

        assert_eq!(evaluator.count_fitting(&regions).unwrap(), 2);
        assert_eq!(evaluator.count_fitting_parallel(&regions).unwrap(), 2);
    }
}
