/*
shape.rs

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

//! Polyomino shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::grid::point::{Cell, GRID_CELLS};

/// A set of unit squares, normalized so that the smallest coordinates are zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "Vec<(i32, i32)>", into = "Vec<(i32, i32)>")]
pub struct Shape {
    squares: Vec<(i32, i32)>,
}

impl From<Vec<(i32, i32)>> for Shape {
    fn from(squares: Vec<(i32, i32)>) -> Self {
        Self::new(squares)
    }
}

impl From<Shape> for Vec<(i32, i32)> {
    fn from(shape: Shape) -> Self {
        shape.squares
    }
}

impl Shape {
    /// Create a shape from any list of squares. Duplicates are dropped.
    pub fn new(squares: Vec<(i32, i32)>) -> Self {
        let min_x: i32 = squares.iter().map(|s| s.0).min().unwrap_or(0);
        let min_y: i32 = squares.iter().map(|s| s.1).min().unwrap_or(0);
        let set: BTreeSet<(i32, i32)> = squares
            .into_iter()
            .map(|(x, y)| (x - min_x, y - min_y))
            .collect();
        Self {
            squares: set.into_iter().collect(),
        }
    }

    /// Shape covering the given board cells.
    pub fn from_cells(cells: &[Cell]) -> Self {
        Self::new(cells.iter().map(|c| (c.x, c.y)).collect())
    }

    /// Shape covering the cells of a 16-bit cell mask.
    pub fn from_mask(mask: u16) -> Self {
        Self::from_cells(&cells_of(mask))
    }

    pub fn squares(&self) -> &[(i32, i32)] {
        &self.squares
    }

    /// Number of squares.
    pub fn area(&self) -> usize {
        self.squares.len()
    }

    /// Shape turned a quarter turn clockwise.
    pub fn rotated(&self) -> Shape {
        Shape::new(self.squares.iter().map(|(x, y)| (-y, *x)).collect())
    }

    /// Mirror image of the shape.
    pub fn mirrored(&self) -> Shape {
        Shape::new(self.squares.iter().map(|(x, y)| (-x, *y)).collect())
    }

    /// Return the shape turned `quarter_turns` times.
    pub fn rotated_by(&self, quarter_turns: usize) -> Shape {
        let mut s: Shape = self.clone();
        for _ in 0..quarter_turns % 4 {
            s = s.rotated();
        }
        s
    }

    /// Distinct orientations of the shape.
    ///
    /// Without rotation or mirroring, the only orientation is the shape itself.
    pub fn orientations(&self, rotatable: bool, mirrorable: bool) -> Vec<Shape> {
        let mut seen: BTreeSet<Shape> = BTreeSet::new();
        let bases: Vec<Shape> = if mirrorable {
            vec![self.clone(), self.mirrored()]
        } else {
            vec![self.clone()]
        };
        for base in bases {
            let turns: usize = if rotatable { 4 } else { 1 };
            for t in 0..turns {
                seen.insert(base.rotated_by(t));
            }
        }
        seen.into_iter().collect()
    }

    /// Representative of the shape up to rotation and mirroring.
    pub fn canonical(&self) -> Shape {
        self.orientations(true, true)
            .into_iter()
            .min()
            .unwrap_or_else(|| self.clone())
    }

    /// Whether every square is connected to the others through shared sides.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.squares.first() else {
            return false;
        };
        let all: BTreeSet<(i32, i32)> = self.squares.iter().copied().collect();
        let mut seen: BTreeSet<(i32, i32)> = BTreeSet::from([*first]);
        let mut stack: Vec<(i32, i32)> = vec![*first];
        while let Some((x, y)) = stack.pop() {
            for n in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if all.contains(&n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen.len() == all.len()
    }

    /// Every translation of this exact orientation on the board, as cell masks contained in
    /// `within`.
    pub fn placements_within(&self, within: u16) -> Vec<u16> {
        let width: i32 = self.squares.iter().map(|s| s.0).max().unwrap_or(0) + 1;
        let height: i32 = self.squares.iter().map(|s| s.1).max().unwrap_or(0) + 1;
        let mut placements: Vec<u16> = Vec::new();

        for dy in 0..=(GRID_CELLS - height) {
            for dx in 0..=(GRID_CELLS - width) {
                let mask: u16 = self
                    .squares
                    .iter()
                    .fold(0, |m, (x, y)| m | Cell::new(x + dx, y + dy).bit());
                if mask & within == mask {
                    placements.push(mask);
                }
            }
        }
        placements
    }
}

/// Board cells of a 16-bit cell mask, in row-major order.
pub fn cells_of(mask: u16) -> Vec<Cell> {
    (0..16)
        .filter(|i| mask & (1 << i) != 0)
        .map(Cell::from_index)
        .collect()
}
