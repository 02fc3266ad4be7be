#![deny(missing_docs)]

//! Decide whether a multiset of [polyominoes](https://en.wikipedia.org/wiki/Polyomino)
//! can be packed, without overlap, into rectangular regions.
//!
//! Shapes may be rotated and mirrored. Regions are decided in up to three
//! tiers: an area check that rules out regions too small for the presents,
//! a loose packing bound that accepts regions roomy enough to give every
//! present its own block, and an exact backtracking search for the rest.
//!
//! ```
//! use present_packing::{Evaluator, Region, Shape, ShapeSet};
//!
//! let shapes = ShapeSet::try_from(vec![
//!     Shape::from_rows(0, [[1, 1, 1], [1, 0, 0]]).unwrap(),
//! ])
//! .unwrap();
//!
//! let evaluator = Evaluator::new(&shapes);
//! assert!(evaluator.fits(&Region::from_counts(4, 2, &[2]).unwrap()).unwrap());
//! assert!(!evaluator.fits(&Region::from_counts(3, 2, &[2]).unwrap()).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod heuristics;
pub mod parse;
pub mod region;
pub mod search;
pub mod shape;

pub use config::{CandidatePolicy, SearchConfig};
pub use error::{ParseError, RegionError, ShapeError};
pub use grid::Grid;
pub use parse::{parse_puzzle, Puzzle};
pub use region::{Evaluation, Evaluator, Region, Tier, Verdict};
pub use search::{Search, SearchOutcome, SearchStats};
pub use shape::{Cell, Orientation, Shape, ShapeSet};
