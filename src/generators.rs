use std::cmp;

use log::{debug, trace};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary, PositionKind};
use crate::grid::Grid;
use crate::grid_dimensions::MazeDimensions;

/// Order in which the maze nodes around the current node are considered before the random pick.
const CARVING_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::West,
                                                 CompassPrimary::East];

/// Allocate a grid of the given dimensions and carve a maze into it.
pub fn carve_maze<R>(dimensions: MazeDimensions, rng: &mut R) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::new(dimensions);
    recursive_backtracker(&mut grid, rng);
    grid
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// The grid is first turned back into solid walls. Starting at the entrance we walk randomly
/// through maze nodes that are still walled in, knocking down the wall between the node we are
/// on and the node we step to. The walk is remembered on a stack (the frontier); when the node
/// on top of the stack has no walled in nodes around it we back up to the previous node and
/// try from there. Once the stack is empty every node reachable from the entrance has been
/// visited exactly once, so the passages form a spanning tree over the maze nodes: a perfect
/// maze with exactly one route between any two nodes.
///
/// Finally the entrance is marked at the top left node and the exit at the bottom right node.
pub fn recursive_backtracker<R>(grid: &mut Grid, rng: &mut R)
    where R: Rng + ?Sized
{
    grid.fill(CellState::Wall);

    let start = grid.entrance_coordinate();
    grid[start] = CellState::Open;

    let mut frontier = vec![start];
    let mut carved_nodes_count = 1;
    let mut frontier_high_water = frontier.len();

    while let Some(&current) = frontier.last() {

        let unvisited = unvisited_neighbours(grid, current);
        if unvisited.is_empty() {
            frontier.pop();
            continue;
        }

        let next = unvisited[rng.gen_range(0..unvisited.len())];
        let passage = current.midpoint(next);
        debug_assert_eq!(passage.position_kind(), PositionKind::Passage);

        grid[passage] = CellState::Open;
        grid[next] = CellState::Open;
        trace!("carved {:?} -> {:?} via {:?}", current, next, passage);

        frontier.push(next);
        carved_nodes_count += 1;
        frontier_high_water = cmp::max(frontier_high_water, frontier.len());
    }

    let exit = grid.exit_coordinate();
    grid[start] = CellState::Entrance;
    grid[exit] = CellState::Exit;

    debug!("carved {} maze nodes on a {} x {} grid, deepest frontier {}",
           carved_nodes_count,
           grid.rows().0,
           grid.columns().0,
           frontier_high_water);
}

/// Maze nodes two steps away from `coord` that are still solid wall.
fn unvisited_neighbours(grid: &Grid,
                        coord: Cartesian2DCoordinate)
                        -> SmallVec<[Cartesian2DCoordinate; 4]> {
    CARVING_DIRECTIONS.iter()
        .filter_map(|dir| grid.neighbour_at_distance(coord, *dir, 2))
        .filter(|neighbour| grid[*neighbour] == CellState::Wall)
        .collect()
}

#[cfg(test)]
mod tests {

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::grid_dimensions::DimensionsError;
    use crate::units::{ColumnsCount, RowsCount};

    fn seeded_rng(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn maze(rows: i64, columns: i64, seed: u64) -> Grid {
        let dimensions = MazeDimensions::for_maze_cells(rows, columns).unwrap();
        carve_maze(dimensions, &mut seeded_rng(seed))
    }

    fn is_perfect_maze(grid: &Grid) -> bool {
        let nodes_count = grid.dimensions().maze_cells_count();
        let all_nodes_carved = grid.maze_nodes().all(|node| grid[node].is_carved());
        let carved_count = grid.iter().filter(|coord| grid[*coord].is_carved()).count();
        let connectors_count = carved_count - nodes_count;

        let graph = grid.to_graph();
        all_nodes_carved && connectors_count == nodes_count - 1 &&
        graph.edge_count() == nodes_count - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    fn boundary_is_walled(grid: &Grid) -> bool {
        let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
        grid.iter()
            .filter(|c| c.x == 0 || c.y == 0 || c.x as usize == columns - 1 ||
                        c.y as usize == rows - 1)
            .all(|c| grid[c] == CellState::Wall)
    }

    #[test]
    fn three_by_three_maze() {
        let g = maze(3, 3, 42);
        assert_eq!(g.rows(), RowsCount(7));
        assert_eq!(g.columns(), ColumnsCount(7));
        assert_eq!(g[Cartesian2DCoordinate::new(1, 1)], CellState::Entrance);
        assert_eq!(g[Cartesian2DCoordinate::new(5, 5)], CellState::Exit);
        assert_eq!(g.count_cells(CellState::Entrance), 1);
        assert_eq!(g.count_cells(CellState::Exit), 1);
        assert_eq!(g.count_cells(CellState::PathMark), 0);
        assert!(is_perfect_maze(&g));
        assert!(boundary_is_walled(&g));
    }

    #[test]
    fn pillars_are_never_carved() {
        let g = maze(8, 5, 7);
        assert!(g.iter()
                 .filter(|c| c.position_kind() == PositionKind::Pillar)
                 .all(|c| g[c] == CellState::Wall));
    }

    #[test]
    fn single_row_maze_is_a_corridor() {
        let g = maze(1, 6, 3);
        assert_eq!(g.to_string(),
                   ["|||||||||||||",
                    "|E         S|",
                    "|||||||||||||"]
                       .join("\n") + "\n");
    }

    #[test]
    fn single_cell_maze_cannot_be_carved() {
        assert_eq!(MazeDimensions::for_maze_cells(1, 1),
                   Err(DimensionsError::TooSmall { rows: 3, columns: 3 }));
    }

    #[test]
    fn smallest_mazes_keep_entrance_and_exit_apart() {
        for &(rows, columns, expected) in &[(1, 2, "|||||\n|E S|\n|||||\n"),
                                            (2, 1, "|||\n|E|\n| |\n|S|\n|||\n")] {
            let g = maze(rows, columns, 0);
            assert_eq!(g.count_cells(CellState::Entrance), 1);
            assert_eq!(g.count_cells(CellState::Exit), 1);
            assert_eq!(g.to_string(), expected);
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(maze(10, 12, 2024), maze(10, 12, 2024));
    }

    #[test]
    fn different_seeds_give_different_mazes() {
        let first = maze(6, 6, 0);
        assert!((1..10).any(|seed| maze(6, 6, seed) != first));
    }

    #[test]
    fn always_taking_the_first_candidate() {
        // A zero step rng makes every pick the first candidate: north, south, west then east.
        let dimensions = MazeDimensions::for_maze_cells(2, 2).unwrap();
        let g = carve_maze(dimensions, &mut StepRng::new(0, 0));
        assert_eq!(g.to_string(),
                   ["|||||",
                    "|E| |",
                    "| | |",
                    "|  S|",
                    "|||||"]
                       .join("\n") + "\n");
    }

    #[test]
    fn regenerating_replaces_the_old_maze() {
        let mut g = maze(5, 5, 11);
        g[Cartesian2DCoordinate::new(2, 2)] = CellState::Open;
        g[Cartesian2DCoordinate::new(3, 3)] = CellState::PathMark;
        recursive_backtracker(&mut g, &mut seeded_rng(11));
        assert_eq!(g, maze(5, 5, 11));
    }

    #[test]
    fn generated_mazes_are_perfect() {
        fn p(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (i64::from(rows % 24) + 1, i64::from(columns % 24) + 1);
            if rows * columns < 2 {
                return TestResult::discard();
            }
            let g = maze(rows, columns, seed);
            TestResult::from_bool(is_perfect_maze(&g) && boundary_is_walled(&g) &&
                                  g.count_cells(CellState::Entrance) == 1 &&
                                  g.count_cells(CellState::Exit) == 1)
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }
}
