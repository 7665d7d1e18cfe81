use std::error::Error;
use std::fmt;

use crate::units::{ColumnsCount, RowsCount};

/// The smallest grid length that still has room for a wall on either side of a cell.
pub const MIN_GRID_LENGTH: usize = 3;

/// A maze needs separate nodes for its entrance and its exit.
pub const MIN_MAZE_CELLS: usize = 2;

/// Size of a maze grid, walls included.
///
/// Both lengths are always odd and at least `MIN_GRID_LENGTH`, so maze cells sit
/// at odd coordinates with a wall or passage between every pair of them.
/// There are always at least `MIN_MAZE_CELLS` maze cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum DimensionsError {
    NonPositive { rows: i64, columns: i64 },
    EvenLength { rows: usize, columns: usize },
    TooSmall { rows: usize, columns: usize },
    TooLarge { rows: usize, columns: usize },
}

impl fmt::Display for DimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DimensionsError::NonPositive { rows, columns } => {
                write!(f, "maze needs at least one row and one column, got {} x {}", rows, columns)
            }
            DimensionsError::EvenLength { rows, columns } => {
                write!(f, "grid lengths must be odd, got {} x {}", rows, columns)
            }
            DimensionsError::TooSmall { rows, columns } => {
                write!(f,
                       "grid of {} x {} is too small, lengths must be at least {} with room for \
                        {} maze cells",
                       rows,
                       columns,
                       MIN_GRID_LENGTH,
                       MIN_MAZE_CELLS)
            }
            DimensionsError::TooLarge { rows, columns } => {
                write!(f, "grid of {} x {} cells is too large", rows, columns)
            }
        }
    }
}

impl Error for DimensionsError {}

impl MazeDimensions {
    /// Validate grid lengths that already include the surrounding walls.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<MazeDimensions, DimensionsError> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);

        if r < MIN_GRID_LENGTH || c < MIN_GRID_LENGTH ||
           (r / 2).saturating_mul(c / 2) < MIN_MAZE_CELLS {
            return Err(DimensionsError::TooSmall { rows: r, columns: c });
        }
        if r % 2 == 0 || c % 2 == 0 {
            return Err(DimensionsError::EvenLength { rows: r, columns: c });
        }
        // Coordinates are u32 and the storage is one contiguous vec
        if r > u32::MAX as usize || c > u32::MAX as usize || r.checked_mul(c).is_none() {
            return Err(DimensionsError::TooLarge { rows: r, columns: c });
        }

        Ok(MazeDimensions { rows, columns })
    }

    /// Grid dimensions for a maze of `rows` x `columns` logical cells, each padded by walls:
    /// a grid length is `n * 2 + 1`.
    pub fn for_maze_cells(rows: i64, columns: i64) -> Result<MazeDimensions, DimensionsError> {
        if rows <= 0 || columns <= 0 {
            return Err(DimensionsError::NonPositive { rows, columns });
        }

        let padded = |n: i64| {
            n.checked_mul(2)
             .and_then(|doubled| doubled.checked_add(1))
             .filter(|&length| length <= u32::MAX as i64)
             .map(|length| length as usize)
        };

        match (padded(rows), padded(columns)) {
            (Some(r), Some(c)) => MazeDimensions::new(RowsCount(r), ColumnsCount(c)),
            _ => Err(DimensionsError::TooLarge {
                rows: rows as usize,
                columns: columns as usize,
            }),
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Total number of grid positions, walls included.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// Number of nodes in the logical maze graph (the odd/odd positions).
    pub fn maze_cells_count(&self) -> usize {
        (self.rows.0 / 2) * (self.columns.0 / 2)
    }
}
