//! Errors raised when shapes, regions or puzzle input break the input
//! contract.
//!
//! A region that simply does not fit is never an error; see
//! [`Verdict`](crate::Verdict).

use std::num::ParseIntError;
use thiserror::Error;

/// A shape definition that cannot be used for packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The shape has no filled cells.
    #[error("shape {id} has no cells")]
    Empty {
        /// Identifier of the offending shape.
        id: usize,
    },
    /// Two shapes were registered under the same identifier.
    #[error("shape id {id} is defined more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: usize,
    },
}

/// A region query that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// Width or height of the region is zero.
    #[error("region dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The region requires a shape that is not part of the shape set.
    #[error("region requires unknown shape {id}")]
    UnknownShape {
        /// Identifier that could not be resolved.
        id: usize,
    },
}

/// Failure to read the puzzle text format.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A shape header was not of the form `<number>:`.
    #[error("line {line}: expected shape header '<number>:', got '{text}'")]
    InvalidHeader {
        /// Line of the header.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A shape row contained something other than `#` or `.`.
    #[error("line {line}: unexpected character '{found}' at column {column}")]
    UnexpectedTile {
        /// Line of the shape row.
        line: usize,
        /// 0-based column of the character.
        column: usize,
        /// The character found.
        found: char,
    },
    /// A region line was not of the form `<w>x<h>: <count>...`.
    #[error("line {line}: expected region '<width>x<height>: <counts>', got '{text}'")]
    InvalidRegion {
        /// Line of the region.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A shape row appeared before any shape header.
    #[error("line {line}: shape row '{text}' has no header")]
    MissingHeader {
        /// Line of the stray row.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A number could not be parsed.
    #[error("line {line}: could not parse number")]
    Number {
        /// Line containing the number.
        line: usize,
        /// Underlying integer error.
        #[source]
        source: ParseIntError,
    },
    /// A parsed shape was rejected.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// A parsed region was rejected.
    #[error(transparent)]
    Region(#[from] RegionError),
}
