//! **carved_mazes** carves perfect mazes into a grid of walls and finds the shortest route
//! from the entrance to the exit.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod units;
mod utils;
