/*
mod.rs

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

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use gridstroke::grid::edges::EdgeSet;
use gridstroke::grid::path::Path;
use gridstroke::grid::point::{Cell, END, GridPoint, START};
use gridstroke::puzzle::Puzzle;
use gridstroke::symbols::color::SymbolColor;
use gridstroke::symbols::kind::Kind;
use gridstroke::symbols::target::{Symbols, Target};

/// Path through the given nodes.
pub fn path_of(points: &[(i32, i32)]) -> Path {
    let points: Vec<GridPoint> = points.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect();
    Path::from_points(&points)
}

/// Along the left and top borders. Every cell is in the same region.
pub fn border_path() -> Path {
    path_of(&[
        (0, 4),
        (0, 3),
        (0, 2),
        (0, 1),
        (0, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (4, 0),
    ])
}

/// Isolates the 2 × 2 block of cells in the bottom-left corner.
pub fn corner_block_path() -> Path {
    path_of(&[
        (0, 4),
        (1, 4),
        (2, 4),
        (2, 3),
        (2, 2),
        (1, 2),
        (0, 2),
        (0, 1),
        (0, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (4, 0),
    ])
}

pub fn cell_symbol(x: i32, y: i32, color: SymbolColor) -> Target {
    Target::Cell {
        cell: Cell::new(x, y),
        color,
    }
}

pub fn count_symbol(x: i32, y: i32, count: u8) -> Target {
    Target::Count {
        cell: Cell::new(x, y),
        color: SymbolColor::White,
        count,
    }
}

/// Puzzle on the full board with the given symbols.
pub fn puzzle_with(symbols: &[(Kind, Vec<Target>)]) -> Puzzle {
    let mut s: Symbols = Symbols::new();
    for (kind, targets) in symbols {
        s.extend(*kind, targets.clone());
    }
    Puzzle::new(EdgeSet::full(), START, END, s)
}

/// Copy of the puzzle on the full board, with only the symbols of one kind.
pub fn only_kind(puzzle: &Puzzle, kind: Kind) -> Puzzle {
    puzzle_with(&[(kind, puzzle.targets(kind).to_vec())])
}
