/*
point.rs

Copyright 2026 The Gridstroke Authors

This file is part of Gridstroke.

Gridstroke is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Gridstroke is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Gridstroke. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Nodes, cells, and directions on the puzzle board.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

use super::edges::EdgeKey;

/// Number of nodes on each side of the board.
pub const GRID_NODES: i32 = 5;

/// Number of cells on each side of the board.
pub const GRID_CELLS: i32 = GRID_NODES - 1;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (GRID_CELLS * GRID_CELLS) as usize;

/// Default starting node (bottom-left corner).
pub const START: GridPoint = GridPoint { x: 0, y: GRID_NODES - 1 };

/// Default ending node (top-right corner).
pub const END: GridPoint = GridPoint { x: GRID_NODES - 1, y: 0 };

/// Compass direction on the board. `Up` decreases `y`, `Right` increases `x`.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The four directions, clockwise from `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset of the direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The two directions perpendicular to this one.
    pub fn sides(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Direction of the unit step between two adjacent points.
    pub fn between(from: GridPoint, to: GridPoint) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Node of the lattice.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the point lies on the board.
    pub fn in_bounds(&self) -> bool {
        (0..GRID_NODES).contains(&self.x) && (0..GRID_NODES).contains(&self.y)
    }

    /// The adjacent point in the given direction, if it is on the board.
    pub fn step(&self, direction: Direction) -> Option<GridPoint> {
        let (dx, dy) = direction.delta();
        let p = GridPoint::new(self.x + dx, self.y + dy);
        if p.in_bounds() { Some(p) } else { None }
    }

    /// Whether the point is on the outer border of the board.
    pub fn on_border(&self) -> bool {
        self.x == 0 || self.y == 0 || self.x == GRID_NODES - 1 || self.y == GRID_NODES - 1
    }

    pub fn manhattan(&self, other: GridPoint) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_adjacent(&self, other: GridPoint) -> bool {
        self.manhattan(other) == 1
    }
}

/// Return the in-bounds points adjacent to the given point, clockwise from the top.
pub fn neighbors(point: GridPoint) -> Vec<GridPoint> {
    Direction::ALL
        .iter()
        .filter_map(|d| point.step(*d))
        .collect()
}

/// Iterate over every node of the board, row by row.
pub fn all_points() -> impl Iterator<Item = GridPoint> {
    (0..GRID_NODES).flat_map(|y| (0..GRID_NODES).map(move |x| GridPoint::new(x, y)))
}

/// Cell of the board, addressed by its top-left node.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies on the board.
    pub fn in_bounds(&self) -> bool {
        (0..GRID_CELLS).contains(&self.x) && (0..GRID_CELLS).contains(&self.y)
    }

    /// Row-major index of the cell, between 0 and [`CELL_COUNT`] - 1.
    pub fn index(&self) -> usize {
        (self.y * GRID_CELLS + self.x) as usize
    }

    /// Cell from its row-major index.
    pub fn from_index(index: usize) -> Self {
        Cell::new(index as i32 % GRID_CELLS, index as i32 / GRID_CELLS)
    }

    /// Bit of the cell in a 16-bit cell mask.
    pub fn bit(&self) -> u16 {
        1 << self.index()
    }

    /// The adjacent cell in the given direction, if it is on the board.
    pub fn neighbor(&self, direction: Direction) -> Option<Cell> {
        let (dx, dy) = direction.delta();
        let c = Cell::new(self.x + dx, self.y + dy);
        if c.in_bounds() { Some(c) } else { None }
    }

    /// The four corner nodes: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [GridPoint; 4] {
        [
            GridPoint::new(self.x, self.y),
            GridPoint::new(self.x + 1, self.y),
            GridPoint::new(self.x + 1, self.y + 1),
            GridPoint::new(self.x, self.y + 1),
        ]
    }

    /// The side of the cell facing the given direction.
    ///
    /// This is also the edge separating the cell from its neighbor in that direction.
    pub fn side(&self, direction: Direction) -> EdgeKey {
        let [tl, tr, br, bl] = self.corners();
        match direction {
            Direction::Up => EdgeKey::new(tl, tr),
            Direction::Right => EdgeKey::new(tr, br),
            Direction::Down => EdgeKey::new(bl, br),
            Direction::Left => EdgeKey::new(tl, bl),
        }
    }

    /// The four sides of the cell, in [`Direction::ALL`] order.
    pub fn sides(&self) -> [EdgeKey; 4] {
        Direction::ALL.map(|d| self.side(d))
    }
}

/// Iterate over every cell of the board, row by row.
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..CELL_COUNT).map(Cell::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_two_neighbors() {
        assert_eq!(neighbors(START), vec![GridPoint::new(0, 3), GridPoint::new(1, 4)]);
        assert_eq!(neighbors(GridPoint::new(2, 2)).len(), 4);
    }

    #[test]
    fn cell_index_round_trip() {
        for cell in all_cells() {
            assert_eq!(Cell::from_index(cell.index()), cell);
        }
        assert_eq!(all_cells().count(), CELL_COUNT);
    }

    #[test]
    fn shared_side_between_neighbors() {
        let a = Cell::new(1, 1);
        let b = a.neighbor(Direction::Right).unwrap();
        assert_eq!(a.side(Direction::Right), b.side(Direction::Left));
        assert_eq!(Cell::new(3, 0).neighbor(Direction::Right), None);
    }

    #[test]
    fn direction_between_points() {
        let p = GridPoint::new(2, 2);
        for d in Direction::ALL {
            let q = p.step(d).unwrap();
            assert_eq!(Direction::between(p, q), Some(d));
            assert_eq!(Direction::between(q, p), Some(d.opposite()));
        }
        assert_eq!(Direction::between(p, GridPoint::new(3, 3)), None);
    }
}
