use std::error::Error;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::grid::Grid;
use crate::grid_dimensions::{DimensionsError, MazeDimensions};
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

// One glyph per cell, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ColumnsCount(columns_count) = self.columns();
        let mut output = String::with_capacity(self.size() + self.rows().0);

        for row in self.iter_row() {
            debug_assert_eq!(row.len(), columns_count);
            for coord in row {
                output.push(self[coord].glyph());
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum GridParseError {
    UnknownGlyph { row: usize, column: usize, glyph: char },
    RaggedRow { row: usize, expected: usize, found: usize },
    InvalidDimensions(DimensionsError),
}

impl fmt::Display for GridParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridParseError::UnknownGlyph { row, column, glyph } => {
                write!(f, "unknown glyph {:?} at row {} column {}", glyph, row, column)
            }
            GridParseError::RaggedRow { row, expected, found } => {
                write!(f, "row {} has {} cells, expected {}", row, found, expected)
            }
            GridParseError::InvalidDimensions(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for GridParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            GridParseError::InvalidDimensions(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<DimensionsError> for GridParseError {
    fn from(e: DimensionsError) -> GridParseError {
        GridParseError::InvalidDimensions(e)
    }
}

/// Read back a grid rendered with the `Display` impl.
///
/// Trailing empty lines are ignored, every other line must be exactly as long as the first.
pub fn parse_grid(text: &str) -> Result<Grid, GridParseError> {
    let lines = text.trim_end_matches(|c: char| c == '\n' || c == '\r')
                    .lines()
                    .map(|line| line.trim_end_matches('\r'))
                    .collect::<Vec<_>>();

    let columns_count = lines.first().map_or(0, |line| line.chars().count());
    let dimensions = MazeDimensions::new(RowsCount(lines.len()), ColumnsCount(columns_count))?;
    let mut grid = Grid::new(dimensions);

    for (row_index, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != columns_count {
            return Err(GridParseError::RaggedRow {
                row: row_index,
                expected: columns_count,
                found,
            });
        }

        for (column_index, glyph) in line.chars().enumerate() {
            let state = CellState::from_glyph(glyph).ok_or(GridParseError::UnknownGlyph {
                row: row_index,
                column: column_index,
                glyph,
            })?;
            let coord = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column_index),
                                                                       RowIndex(row_index));
            grid[coord] = state;
        }
    }

    Ok(grid)
}
