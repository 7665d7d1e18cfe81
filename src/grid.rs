use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use petgraph::{Graph, Undirected};

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary, CoordinateSmallVec,
                   PositionKind};
use crate::grid_dimensions::MazeDimensions;
use crate::grid_iterators::{CellIter, RowBatchIter};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;

/// The logical maze graph: carved nodes joined by carved passages.
pub type MazeGraph = Graph<Cartesian2DCoordinate, (), Undirected>;

/// A rectangular grid of cell states stored row by row in one vec.
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
    cells: Vec<CellState>,
    dimensions: MazeDimensions,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridAccessError {
    InvalidGridCoordinate,
}

impl fmt::Display for GridAccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridAccessError::InvalidGridCoordinate => write!(f, "coordinate is outside the grid"),
        }
    }
}

impl Error for GridAccessError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, carved: {:?}",
               self.rows(),
               self.columns(),
               self.cells.iter().filter(|state| state.is_carved()).count())
    }
}

impl Grid {
    /// A grid of solid walls.
    pub fn new(dimensions: MazeDimensions) -> Grid {
        Grid {
            cells: vec![CellState::Wall; dimensions.size()],
            dimensions,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &MazeDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Where every maze starts, the top left maze node.
    #[inline]
    pub fn entrance_coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(1, 1)
    }

    /// The bottom right maze node.
    #[inline]
    pub fn exit_coordinate(&self) -> Cartesian2DCoordinate {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows(), self.columns());
        Cartesian2DCoordinate::new(columns as u32 - 2, rows as u32 - 2)
    }

    pub fn cell_state(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index])
    }

    pub fn set_cell_state(&mut self,
                          coord: Cartesian2DCoordinate,
                          state: CellState)
                          -> Result<(), GridAccessError> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or(GridAccessError::InvalidGridCoordinate)?;
        self.cells[index] = state;
        Ok(())
    }

    /// In bounds and open for a route to step onto.
    pub fn is_passable(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_state(coord).map_or(false, CellState::is_passable)
    }

    pub fn fill(&mut self, state: CellState) {
        for cell in &mut self.cells {
            *cell = state;
        }
    }

    /// Reopen every cell marked as part of a route.
    /// Returns how many cells were reset.
    pub fn clear_path(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|state| **state == CellState::PathMark) {
            *cell = CellState::Open;
            cleared += 1;
        }
        cleared
    }

    pub fn count_cells(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_distance(coord, direction, 1)
    }

    /// The coordinate `distance` steps away in a direction, if it lies within the grid.
    pub fn neighbour_at_distance(&self,
                                 coord: Cartesian2DCoordinate,
                                 direction: CompassPrimary,
                                 distance: u32)
                                 -> Option<Cartesian2DCoordinate> {
        coord.offset(direction, distance)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Cells that are to the North, South, East or West of a particular cell, whatever their state.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West]
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let ColumnsCount(row_size) = self.columns();
            Some((coord.y as usize * row_size) + coord.x as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows(), self.columns());
        (coord.x as usize) < columns && (coord.y as usize) < rows
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RowBatchIter {
        RowBatchIter::new(&self.dimensions)
    }

    /// Every node position of the logical maze graph, carved or not.
    pub fn maze_nodes<'a>(&'a self) -> impl Iterator<Item = Cartesian2DCoordinate> + 'a {
        self.iter().filter(|coord| coord.position_kind() == PositionKind::Node)
    }

    /// Pairs of carved maze nodes joined by a carved passage.
    /// Each link is reported once, from the west or north node of the pair.
    pub fn links(&self) -> Vec<(Cartesian2DCoordinate, Cartesian2DCoordinate)> {
        let is_carved = |coord| self.cell_state(coord).map_or(false, CellState::is_carved);

        let mut links = vec![];
        for node in self.maze_nodes().filter(|node| is_carved(*node)) {
            for dir in &[CompassPrimary::East, CompassPrimary::South] {
                let passage = self.neighbour_at_distance(node, *dir, 1);
                let other_node = self.neighbour_at_distance(node, *dir, 2);
                if let (Some(p), Some(n)) = (passage, other_node) {
                    if is_carved(p) && is_carved(n) {
                        links.push((node, n));
                    }
                }
            }
        }
        links
    }

    /// Build the logical maze graph over the carved nodes.
    ///
    /// Node indices follow the row-major order of the carved nodes.
    pub fn to_graph(&self) -> MazeGraph {
        let carved_nodes = self.maze_nodes()
            .filter(|node| self.cell_state(*node).map_or(false, CellState::is_carved))
            .collect::<Vec<_>>();
        let links = self.links();

        let mut graph = MazeGraph::with_capacity(carved_nodes.len(), links.len());
        let mut node_indices = utils::fnv_hashmap(carved_nodes.len());
        for node in carved_nodes {
            node_indices.insert(node, graph.add_node(node));
        }
        for (a, b) in links {
            if let (Some(&a_index), Some(&b_index)) = (node_indices.get(&a), node_indices.get(&b)) {
                graph.add_edge(a_index, b_index, ());
            }
        }
        graph
    }
}

impl Index<Cartesian2DCoordinate> for Grid {
    type Output = CellState;

    /// Panics if the coordinate is outside the grid.
    fn index(&self, coord: Cartesian2DCoordinate) -> &CellState {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &self.cells[index],
            None => panic!("coordinate {:?} is outside the grid {:?}", coord, self.dimensions),
        }
    }
}

impl IndexMut<Cartesian2DCoordinate> for Grid {
    fn index_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut CellState {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &mut self.cells[index],
            None => panic!("coordinate {:?} is outside the grid {:?}", coord, self.dimensions),
        }
    }
}
