//! Reader for the puzzle text format.
//!
//! A puzzle lists shapes first and regions after them:
//!
//! ```text
//! 0:
//! ###
//! ##.
//! ##.
//!
//! 4x4: 2
//! 12x5: 1 0
//! ```
//!
//! A shape is a `<id>:` header followed by rows of `#` (filled) and `.`
//! (empty). A region is `<width>x<height>:` followed by one count per shape,
//! the `i`th count referring to shape `i`.

use crate::{
    error::ParseError,
    region::Region,
    shape::{Cell, Shape, ShapeSet},
};
use std::str::FromStr;

/// Shapes and regions read from puzzle text.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// Every shape defined by the puzzle.
    pub shapes: ShapeSet,
    /// Region queries, in input order.
    pub regions: Vec<Region>,
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_puzzle(input)
    }
}

#[derive(Debug)]
struct PendingShape {
    id: usize,
    cells: Vec<Cell>,
    rows: usize,
}

impl PendingShape {
    fn finish(self, shapes: &mut ShapeSet) -> Result<(), ParseError> {
        shapes.insert(Shape::new(self.id, self.cells)?)?;
        Ok(())
    }
}

fn parse_number(text: &str, line: usize) -> Result<usize, ParseError> {
    text.trim()
        .parse()
        .map_err(|source| ParseError::Number { line, source })
}

fn parse_region(text: &str, line: usize) -> Result<Region, ParseError> {
    let invalid = || ParseError::InvalidRegion {
        line,
        text: text.to_string(),
    };

    let (size, counts) = text.split_once(':').ok_or_else(invalid)?;
    let (width, height) = size.split_once('x').ok_or_else(invalid)?;
    let (width, height) = (parse_number(width, line)?, parse_number(height, line)?);

    let counts = counts
        .split_whitespace()
        .map(|count| parse_number(count, line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Region::from_counts(width, height, &counts)?)
}

fn is_region_line(text: &str) -> bool {
    text.split_once(':')
        .is_some_and(|(size, _)| size.contains('x'))
}

/// Parse puzzle text into shapes and regions.
///
/// Every region is checked against the shape set, so a region that asks for
/// a missing shape is reported here rather than during evaluation.
pub fn parse_puzzle(input: &str) -> Result<Puzzle, ParseError> {
    let mut shapes = ShapeSet::new();
    let mut regions = Vec::new();
    let mut pending: Option<PendingShape> = None;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim_end();

        if text.trim().is_empty() {
            if let Some(shape) = pending.take() {
                shape.finish(&mut shapes)?;
            }
        } else if is_region_line(text) {
            if let Some(shape) = pending.take() {
                shape.finish(&mut shapes)?;
            }

            let region = parse_region(text, line)?;
            for &(id, count) in region.requirements() {
                if count > 0 {
                    shapes.require(id)?;
                }
            }
            regions.push(region);
        } else if let Some(header) = text.strip_suffix(':') {
            if let Some(shape) = pending.take() {
                shape.finish(&mut shapes)?;
            }

            let id = header.trim().parse().map_err(|_| ParseError::InvalidHeader {
                line,
                text: text.to_string(),
            })?;
            pending = Some(PendingShape {
                id,
                cells: Vec::new(),
                rows: 0,
            });
        } else {
            let Some(shape) = pending.as_mut() else {
                return Err(ParseError::MissingHeader {
                    line,
                    text: text.to_string(),
                });
            };

            for (column, found) in text.chars().enumerate() {
                match found {
                    '#' => shape.cells.push((shape.rows, column)),
                    '.' => {}
                    _ => {
                        return Err(ParseError::UnexpectedTile {
                            line,
                            column,
                            found,
                        })
                    }
                }
            }
            shape.rows += 1;
        }
    }

    if let Some(shape) = pending.take() {
        shape.finish(&mut shapes)?;
    }

    log::debug!(
        "Parsed [{}] shapes and [{}] regions.",
        shapes.len(),
        regions.len()
    );

    Ok(Puzzle { shapes, regions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RegionError, ShapeError};

    #[test]
    fn parses_shapes_and_regions() {
        let puzzle: Puzzle = "0:\n##\n#.\n\n1:\n###\n\n3x3: 1 2\n5x1: 0 1\n"
            .parse()
            .unwrap();

        assert_eq!(puzzle.shapes.len(), 2);
        assert_eq!(
            puzzle.shapes.get(0).unwrap().cells(),
            &[(0, 0), (0, 1), (1, 0)]
        );
        assert_eq!(puzzle.shapes.get(1).unwrap().cell_count(), 3);

        assert_eq!(puzzle.regions.len(), 2);
        assert_eq!(puzzle.regions[0].width(), 3);
        assert_eq!(puzzle.regions[0].requirements(), &[(0, 1), (1, 2)]);
        assert_eq!((puzzle.regions[1].width(), puzzle.regions[1].height()), (5, 1));
    }

    #[test]
    fn shape_block_may_end_at_next_header() {
        let puzzle = parse_puzzle("0:\n#\n1:\n##\n2x2: 1 1").unwrap();
        assert_eq!(puzzle.shapes.len(), 2);
        assert_eq!(puzzle.regions.len(), 1);
    }

    #[test]
    fn leading_blank_rows_are_trimmed() {
        let puzzle = parse_puzzle("0:\n...\n.#.\n.##\n").unwrap();
        assert_eq!(
            puzzle.shapes.get(0).unwrap().cells(),
            &[(0, 0), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn rejects_bad_tile() {
        assert_eq!(
            parse_puzzle("0:\n#x#\n").unwrap_err(),
            ParseError::UnexpectedTile {
                line: 2,
                column: 1,
                found: 'x'
            }
        );
    }

    #[test]
    fn rejects_bad_header() {
        assert!(matches!(
            parse_puzzle("zero:\n#\n").unwrap_err(),
            ParseError::InvalidHeader { line: 1, .. }
        ));
    }

    #[test]
    fn rejects_row_without_header() {
        assert!(matches!(
            parse_puzzle("##\n").unwrap_err(),
            ParseError::MissingHeader { line: 1, .. }
        ));
    }

    #[test]
    fn rejects_bad_region() {
        assert!(matches!(
            parse_puzzle("0:\n#\n\n3xa: 1\n").unwrap_err(),
            ParseError::Number { line: 4, .. }
        ));
        assert!(matches!(
            parse_puzzle("0:\n#\n\n3x3: 1 y\n").unwrap_err(),
            ParseError::Number { line: 4, .. }
        ));
    }

    #[test]
    fn rejects_empty_shape_and_duplicates() {
        assert_eq!(
            parse_puzzle("0:\n...\n").unwrap_err(),
            ParseError::Shape(ShapeError::Empty { id: 0 })
        );
        assert_eq!(
            parse_puzzle("0:\n#\n\n0:\n##\n").unwrap_err(),
            ParseError::Shape(ShapeError::DuplicateId { id: 0 })
        );
    }

    #[test]
    fn rejects_region_problems() {
        assert_eq!(
            parse_puzzle("0:\n#\n\n0x3: 1\n").unwrap_err(),
            ParseError::Region(RegionError::ZeroDimension {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            parse_puzzle("0:\n#\n\n3x3: 1 1\n").unwrap_err(),
            ParseError::Region(RegionError::UnknownShape { id: 1 })
        );
    }
}
