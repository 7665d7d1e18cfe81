use std::collections::VecDeque;

use bit_set::BitSet;
use log::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid::Grid;

/// Order the cells around a dequeued cell are examined in: down, up, right, left.
const SEARCH_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::South,
                                                CompassPrimary::North,
                                                CompassPrimary::East,
                                                CompassPrimary::West];

/// Breadth first search bookkeeping for one search over a grid.
///
/// Cells are discovered in order of their distance from the start, so the parent recorded for
/// a cell is always one step closer to the start along a shortest route.
struct BreadthFirstSearch<'a> {
    grid: &'a Grid,
    visited: BitSet,
    parents: Vec<Option<Cartesian2DCoordinate>>,
}

impl<'a> BreadthFirstSearch<'a> {
    fn new(grid: &'a Grid) -> BreadthFirstSearch<'a> {
        BreadthFirstSearch {
            grid,
            visited: BitSet::with_capacity(grid.size()),
            parents: vec![None; grid.size()],
        }
    }

    /// Search outwards from `start` until `end` is discovered or nothing is left to explore.
    fn search(&mut self, start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> bool {
        let start_index = match self.grid.grid_coordinate_to_index(start) {
            Some(index) => index,
            None => return false,
        };
        self.visited.insert(start_index);

        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut explored_count = 0;

        while let Some(current) = queue.pop_front() {
            explored_count += 1;

            for dir in &SEARCH_DIRECTIONS {
                let neighbour = match self.grid.neighbour_at_direction(current, *dir) {
                    Some(coord) if self.grid.is_passable(coord) => coord,
                    _ => continue,
                };
                let neighbour_index = match self.grid.grid_coordinate_to_index(neighbour) {
                    Some(index) => index,
                    None => continue,
                };

                // insert is false when already visited
                if self.visited.insert(neighbour_index) {
                    self.parents[neighbour_index] = Some(current);
                    queue.push_back(neighbour);
                    trace!("discovered {:?} from {:?}", neighbour, current);

                    if neighbour == end {
                        debug!("reached {:?} from {:?} after exploring {} cells",
                               end,
                               start,
                               explored_count);
                        return true;
                    }
                }
            }
        }

        debug!("no route from {:?} to {:?}, explored {} cells", start, end, explored_count);
        false
    }

    fn parent(&self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        self.grid
            .grid_coordinate_to_index(coord)
            .and_then(|index| self.parents[index])
    }

    /// Follow the parents back from `end`, giving the route in start to end order.
    fn route(&self,
             start: Cartesian2DCoordinate,
             end: Cartesian2DCoordinate)
             -> Option<Vec<Cartesian2DCoordinate>> {
        let mut route = vec![end];
        let mut step = end;
        while step != start {
            step = self.parent(step)?;
            route.push(step);
        }
        route.reverse();
        Some(route)
    }
}

/// Find a shortest route between two cells, stepping only onto open cells or the exit.
///
/// The route includes both `start` and `end`. The grid is not modified.
/// Returns None if either coordinate is outside the grid or `end` cannot be reached.
pub fn shortest_path(grid: &Grid,
                     start: Cartesian2DCoordinate,
                     end: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut bfs = BreadthFirstSearch::new(grid);
    if bfs.search(start, end) {
        bfs.route(start, end)
    } else {
        None
    }
}

/// Solve the maze between `start` and `end`, marking every cell strictly between them on a
/// shortest route as `PathMark`.
///
/// Returns false, leaving the grid untouched, if there is no route.
pub fn solve(grid: &mut Grid, start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> bool {
    match shortest_path(grid, start, end) {
        Some(route) => {
            let inner_steps = route.len().saturating_sub(2);
            for coord in route.iter().skip(1).take(inner_steps) {
                grid[*coord] = CellState::PathMark;
            }
            debug!("marked {} cells between {:?} and {:?}", inner_steps, start, end);
            true
        }
        None => false,
    }
}
