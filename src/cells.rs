use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// The state of a single grid position.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Open,
    Entrance,
    Exit,
    PathMark,
}

impl CellState {
    /// Anything that is no longer a wall has been carved into the maze.
    #[inline]
    pub fn is_carved(self) -> bool {
        self != CellState::Wall
    }

    /// Can a route step onto a cell in this state?
    ///
    /// A route only ever leaves the entrance, it never steps back onto it.
    #[inline]
    pub fn is_passable(self) -> bool {
        match self {
            CellState::Open | CellState::Exit => true,
            CellState::Wall | CellState::Entrance | CellState::PathMark => false,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Wall => '|',
            CellState::Open => ' ',
            CellState::Entrance => 'E',
            CellState::Exit => 'S',
            CellState::PathMark => 'o',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellState> {
        match glyph {
            '|' => Some(CellState::Wall),
            ' ' => Some(CellState::Open),
            'E' => Some(CellState::Entrance),
            'S' => Some(CellState::Exit),
            'o' => Some(CellState::PathMark),
            _ => None,
        }
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// What a grid position represents in the logical maze graph.
///
/// Nodes sit at odd/odd positions, passages between two nodes share one odd
/// axis with them and pillars (even/even) are never part of any route.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PositionKind {
    Node,
    Passage,
    Pillar,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cartesian2DCoordinate {
        let ColumnsCount(width) = columns;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    pub fn position_kind(&self) -> PositionKind {
        match (self.x % 2 == 1, self.y % 2 == 1) {
            (true, true) => PositionKind::Node,
            (false, false) => PositionKind::Pillar,
            _ => PositionKind::Passage,
        }
    }

    /// Creates a new coordinate `distance` steps away in the given direction.
    /// Returns None if the coordinate is not representable.
    pub fn offset(&self, dir: CompassPrimary, distance: u32) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(distance).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(distance).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(distance).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(distance).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }

    /// The position exactly half way between two coordinates on the same row or column.
    pub fn midpoint(&self, other: Cartesian2DCoordinate) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Number of single steps between two coordinates when moving only along the axes.
    pub fn manhattan_distance(&self, other: Cartesian2DCoordinate) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn glyphs_round_trip_for_every_state() {
        for state in &[CellState::Wall,
                       CellState::Open,
                       CellState::Entrance,
                       CellState::Exit,
                       CellState::PathMark] {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(*state));
        }
        assert_eq!(CellState::from_glyph('#'), None);
    }

    #[test]
    fn only_open_and_exit_are_passable() {
        assert!(CellState::Open.is_passable());
        assert!(CellState::Exit.is_passable());
        assert!(!CellState::Wall.is_passable());
        assert!(!CellState::Entrance.is_passable());
        assert!(!CellState::PathMark.is_passable());
    }

    #[test]
    fn carved_states() {
        assert!(!CellState::Wall.is_carved());
        assert!(CellState::Open.is_carved());
        assert!(CellState::Entrance.is_carved());
        assert!(CellState::PathMark.is_carved());
    }

    #[test]
    fn position_kinds_follow_parity() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(gc(1, 1).position_kind(), PositionKind::Node);
        assert_eq!(gc(5, 3).position_kind(), PositionKind::Node);
        assert_eq!(gc(2, 1).position_kind(), PositionKind::Passage);
        assert_eq!(gc(1, 4).position_kind(), PositionKind::Passage);
        assert_eq!(gc(0, 0).position_kind(), PositionKind::Pillar);
        assert_eq!(gc(2, 6).position_kind(), PositionKind::Pillar);
    }

    #[test]
    fn offsets() {
        let c = Cartesian2DCoordinate::new(1, 1);
        assert_eq!(c.offset(CompassPrimary::North, 1), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(c.offset(CompassPrimary::North, 2), None);
        assert_eq!(c.offset(CompassPrimary::West, 2), None);
        assert_eq!(c.offset(CompassPrimary::South, 2), Some(Cartesian2DCoordinate::new(1, 3)));
        assert_eq!(c.offset(CompassPrimary::East, 2), Some(Cartesian2DCoordinate::new(3, 1)));
        assert_eq!(Cartesian2DCoordinate::new(u32::MAX, 0).offset(CompassPrimary::East, 1),
                   None);
    }

    #[test]
    fn midpoint_between_nodes_is_a_passage() {
        let a = Cartesian2DCoordinate::new(1, 3);
        let b = Cartesian2DCoordinate::new(3, 3);
        let mid = a.midpoint(b);
        assert_eq!(mid, Cartesian2DCoordinate::new(2, 3));
        assert_eq!(mid.position_kind(), PositionKind::Passage);
        assert_eq!(b.midpoint(a), mid);
    }

    #[test]
    fn row_major_index_conversion() {
        let columns = ColumnsCount(7);
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(0, columns),
                   Cartesian2DCoordinate::new(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(8, columns),
                   Cartesian2DCoordinate::new(1, 1));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(48, columns),
                   Cartesian2DCoordinate::new(6, 6));
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Cartesian2DCoordinate::new(1, 1);
        let b = Cartesian2DCoordinate::new(5, 5);
        assert_eq!(a.manhattan_distance(b), 8);
        assert_eq!(b.manhattan_distance(a), 8);
        assert_eq!(a.manhattan_distance(a), 0);
    }
}
