/*
target.rs

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

//! Symbol placements.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::color::{Palette, SymbolColor};
use super::kind::Kind;
use super::shape::Shape;
use crate::grid::edges::EdgeKey;
use crate::grid::point::{Cell, Direction, GridPoint};

/// Node or edge that a hexagon asks the path to go through.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HexagonSite {
    Node(GridPoint),
    Edge(EdgeKey),
}

/// Placement of one symbol, with the payload of its kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "at", rename_all = "lowercase")]
pub enum Target {
    /// Removed edge.
    Gap { edge: EdgeKey },

    /// Plain cell symbol: squares, stars, ghosts, crystals, and negators.
    Cell { cell: Cell, color: SymbolColor },

    /// Cell symbol with a required count: triangles, dots, diamonds, and tally marks.
    Count {
        cell: Cell,
        color: SymbolColor,
        count: u8,
    },

    /// Cell symbol looking in a direction: arrows, chevrons, droplets, sentinels, and
    /// cardinals (which ignore `direction` and `count`).
    Ray {
        cell: Cell,
        color: SymbolColor,
        direction: Direction,
        count: u8,
    },

    /// Polyomino.
    Shape {
        cell: Cell,
        color: SymbolColor,
        shape: Shape,
        rotatable: bool,
        negative: bool,
    },

    /// Hexagon on a node or an edge.
    Hexagon { site: HexagonSite },
}

impl Target {
    /// Cell occupied by the symbol, if the symbol sits in a cell.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Target::Cell { cell, .. }
            | Target::Count { cell, .. }
            | Target::Ray { cell, .. }
            | Target::Shape { cell, .. } => Some(*cell),
            Target::Gap { .. } | Target::Hexagon { .. } => None,
        }
    }

    /// Whether the cell, node, or edge of the symbol lies on the board.
    pub fn is_on_board(&self) -> bool {
        match self {
            Target::Gap { edge }
            | Target::Hexagon {
                site: HexagonSite::Edge(edge),
            } => edge.is_on_board(),
            Target::Hexagon {
                site: HexagonSite::Node(p),
            } => p.in_bounds(),
            Target::Cell { cell, .. }
            | Target::Count { cell, .. }
            | Target::Ray { cell, .. }
            | Target::Shape { cell, .. } => cell.in_bounds(),
        }
    }

    pub fn color(&self) -> Option<SymbolColor> {
        match self {
            Target::Cell { color, .. }
            | Target::Count { color, .. }
            | Target::Ray { color, .. }
            | Target::Shape { color, .. } => Some(*color),
            Target::Gap { .. } | Target::Hexagon { .. } => None,
        }
    }

    /// Required count of counting and ray symbols.
    pub fn count(&self) -> Option<usize> {
        match self {
            Target::Count { count, .. } | Target::Ray { count, .. } => Some(*count as usize),
            _ => None,
        }
    }

    /// Return the same symbol moved to another cell.
    pub fn moved_to(&self, to: Cell) -> Target {
        let mut t: Target = self.clone();
        match &mut t {
            Target::Cell { cell, .. }
            | Target::Count { cell, .. }
            | Target::Ray { cell, .. }
            | Target::Shape { cell, .. } => *cell = to,
            Target::Gap { .. } | Target::Hexagon { .. } => (),
        }
        t
    }
}

/// Reference to one symbol of a puzzle: its kind and its index in the list of that kind.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolRef {
    pub kind: Kind,
    pub index: usize,
}

impl SymbolRef {
    pub fn new(kind: Kind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Symbol placements of a puzzle, one list per kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Symbols {
    by_kind: BTreeMap<Kind, Vec<Target>>,
}

impl Symbols {
    pub fn new() -> Self {
        Self {
            by_kind: BTreeMap::new(),
        }
    }

    /// Placements of the given kind. The slice is empty when the kind is absent.
    pub fn get(&self, kind: Kind) -> &[Target] {
        self.by_kind
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the puzzle has at least one symbol of the given kind.
    pub fn has(&self, kind: Kind) -> bool {
        !self.get(kind).is_empty()
    }

    /// Append placements to the list of the given kind.
    pub fn extend(&mut self, kind: Kind, targets: Vec<Target>) {
        if targets.is_empty() {
            return;
        }
        self.by_kind.entry(kind).or_default().extend(targets);
    }

    /// Return a copy with additional placements for the given kind.
    pub fn with(&self, kind: Kind, targets: Vec<Target>) -> Symbols {
        let mut s: Symbols = self.clone();
        s.extend(kind, targets);
        s
    }

    /// Kinds with at least one placement, in generation order.
    pub fn kinds(&self) -> Vec<Kind> {
        self.by_kind
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| *k)
            .collect()
    }

    /// Total number of placements.
    pub fn len(&self) -> usize {
        self.by_kind.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every placement with its reference.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolRef, &Target)> {
        self.by_kind.iter().flat_map(|(k, v)| {
            v.iter()
                .enumerate()
                .map(move |(i, t)| (SymbolRef::new(*k, i), t))
        })
    }

    /// Placement behind a reference.
    pub fn target(&self, symbol: SymbolRef) -> Option<&Target> {
        self.get(symbol.kind).get(symbol.index)
    }

    /// Cells occupied by cell symbols.
    pub fn occupied_cells(&self) -> BTreeSet<Cell> {
        self.iter().filter_map(|(_, t)| t.cell()).collect()
    }

    /// Colors used by the symbols.
    pub fn palette(&self) -> Palette {
        Palette::from_colors(self.iter().filter_map(|(_, t)| t.color()))
    }
}
