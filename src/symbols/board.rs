/*
board.rs

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

//! Read-only view of a finished path that the symbol rules evaluate.

use std::collections::BTreeSet;

use super::kind::Kind;
use super::target::{SymbolRef, Symbols, Target};
use crate::grid::edges::EdgeKey;
use crate::grid::path::{Path, UsedEdges};
use crate::grid::point::{Cell, Direction, GridPoint};
use crate::grid::regions::RegionMap;

/// A path, the partition it induces, and the symbols still in play.
///
/// Symbols listed in `removed` have been cancelled by negators: the rules behave as if they were
/// not on the board.
pub struct Board<'a> {
    pub symbols: &'a Symbols,
    pub path: &'a Path,
    pub used: &'a UsedEdges,
    pub regions: &'a RegionMap,
    pub removed: &'a BTreeSet<SymbolRef>,

    /// Search budget for each polyomino tiling.
    pub tiling_budget: usize,
}

impl Board<'_> {
    /// Whether the symbol is still in play.
    pub fn is_active(&self, symbol: SymbolRef) -> bool {
        !self.removed.contains(&symbol)
    }

    /// Symbols of the given kind still in play, with their index.
    pub fn targets(&self, kind: Kind) -> impl Iterator<Item = (usize, &Target)> {
        self.symbols
            .get(kind)
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.is_active(SymbolRef::new(kind, *i)))
    }

    /// Every cell symbol still in play, whatever its kind.
    pub fn cell_symbols(&self) -> impl Iterator<Item = (SymbolRef, &Target)> {
        self.symbols
            .iter()
            .filter(|(r, t)| t.cell().is_some() && self.is_active(*r))
    }

    pub fn is_used(&self, edge: &EdgeKey) -> bool {
        self.used.contains(edge)
    }

    pub fn visits(&self, point: GridPoint) -> bool {
        self.path.contains(point)
    }

    pub fn region_of(&self, cell: Cell) -> usize {
        self.regions.region_of(cell)
    }

    /// Number of used edges among the four sides of the cell.
    pub fn used_sides(&self, cell: Cell) -> usize {
        cell.sides().iter().filter(|e| self.is_used(e)).count()
    }

    /// Sides crossed by a ray cast from the center of the cell to the edge of the board.
    pub fn ray_crossings(&self, cell: Cell, direction: Direction) -> usize {
        let mut crossed: usize = 0;
        let mut current: Option<Cell> = Some(cell);
        while let Some(c) = current {
            if self.is_used(&c.side(direction)) {
                crossed += 1;
            }
            current = c.neighbor(direction);
        }
        crossed
    }

    /// Sides crossed by the same ray, the side on the border of the board excluded.
    pub fn inner_crossings(&self, cell: Cell, direction: Direction) -> usize {
        let mut crossed: usize = 0;
        let mut current: Cell = cell;
        while let Some(next) = current.neighbor(direction) {
            if self.is_used(&current.side(direction)) {
                crossed += 1;
            }
            current = next;
        }
        crossed
    }
}
