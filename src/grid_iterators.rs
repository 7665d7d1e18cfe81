use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::MazeDimensions;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Visits every grid coordinate in row-major order.
#[derive(Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    columns: ColumnsCount,
}

impl CellIter {
    pub(crate) fn new(dimensions: &MazeDimensions) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: dimensions.size(),
            columns: dimensions.columns(),
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields one row of coordinates at a time, top to bottom.
#[derive(Debug, Copy, Clone)]
pub struct RowBatchIter {
    current_index: usize,
    rows_size: RowsCount,
    row_length: ColumnsCount,
}

impl RowBatchIter {
    pub(crate) fn new(dimensions: &MazeDimensions) -> RowBatchIter {
        RowBatchIter {
            current_index: 0,
            rows_size: dimensions.rows(),
            row_length: dimensions.columns(),
        }
    }
}

impl ExactSizeIterator for RowBatchIter {} // default impl using size_hint()
impl Iterator for RowBatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows_size;
        if self.current_index < count {
            let ColumnsCount(length) = self.row_length;
            let coords = (0..length)
                .map(|i: usize| {
                    Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                   RowIndex(self.current_index))
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows_size.0 - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dimensions(rows: usize, columns: usize) -> MazeDimensions {
        MazeDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap()
    }

    #[test]
    fn cell_iter_is_row_major() {
        let dims = dimensions(3, 5);
        let coords = CellIter::new(&dims).collect::<Vec<_>>();
        assert_eq!(coords.len(), 15);
        assert_eq!(coords[0], Cartesian2DCoordinate::new(0, 0));
        assert_eq!(coords[4], Cartesian2DCoordinate::new(4, 0));
        assert_eq!(coords[5], Cartesian2DCoordinate::new(0, 1));
        assert_eq!(coords[14], Cartesian2DCoordinate::new(4, 2));
    }

    #[test]
    fn cell_iter_size_hint_shrinks() {
        let dims = dimensions(3, 5);
        let mut iter = CellIter::new(&dims);
        assert_eq!(iter.len(), 15);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 13);
    }

    #[test]
    fn row_iter() {
        let dims = dimensions(5, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(RowBatchIter::new(&dims).collect::<Vec<Vec<Cartesian2DCoordinate>>>(),
                   vec![vec![gc(0, 0), gc(1, 0), gc(2, 0)],
                        vec![gc(0, 1), gc(1, 1), gc(2, 1)],
                        vec![gc(0, 2), gc(1, 2), gc(2, 2)],
                        vec![gc(0, 3), gc(1, 3), gc(2, 3)],
                        vec![gc(0, 4), gc(1, 4), gc(2, 4)]]);
    }

    #[test]
    fn row_iter_length_is_rows_count() {
        let dims = dimensions(5, 3);
        let mut iter = RowBatchIter::new(&dims);
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next().map(|row| row.len()), Some(3));
        assert_eq!(iter.len(), 4);
    }
}
