/*
puzzle.rs

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

//! Puzzle representation.
//!
//! A [`Puzzle`] groups the drawable edges of the board, the starting and ending nodes, and the
//! symbol placements. It is built once by the generator and is only read afterwards.

use serde::{Deserialize, Serialize};

use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::{END, GridPoint, START};
use crate::symbols::kind::Kind;
use crate::symbols::target::{Symbols, Target};

/// Puzzle object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Drawable edges. Missing edges are gaps.
    pub edges: EdgeSet,

    /// Node where the path starts.
    pub start: GridPoint,

    /// Node where the path ends.
    pub end: GridPoint,

    /// Symbol placements, one list per kind.
    pub symbols: Symbols,

    /// Path known to solve the puzzle when it was generated.
    ///
    /// The hint speeds up generation only: validation and solving never rely on it, and it is
    /// not serialized.
    #[serde(skip)]
    pub solution_hint: Option<Path>,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(EdgeSet::full(), START, END, Symbols::new())
    }
}

impl Puzzle {
    /// Create a [`Puzzle`] object.
    pub fn new(edges: EdgeSet, start: GridPoint, end: GridPoint, symbols: Symbols) -> Self {
        Self {
            edges,
            start,
            end,
            symbols,
            solution_hint: None,
        }
    }

    /// Placements of the given kind.
    pub fn targets(&self, kind: Kind) -> &[Target] {
        self.symbols.get(kind)
    }

    /// Whether every given kind has at least one placement.
    pub fn covers(&self, kinds: &[Kind]) -> bool {
        kinds.iter().all(|k| self.symbols.has(*k))
    }

    /// Whether the edges allow at least one path from the start to the end.
    pub fn is_reachable(&self) -> bool {
        self.edges.has_path(self.start, self.end)
    }

    /// Short textual key of the puzzle, used to avoid handing out the same puzzle twice in a
    /// row.
    pub fn key(&self) -> String {
        let mut key: String = String::new();
        for e in self.edges.missing() {
            key.push_str(&format!("g{}{}{}{}", e.a.x, e.a.y, e.b.x, e.b.y));
        }
        for (r, t) in self.symbols.iter() {
            let name: &'static str = r.kind.into();
            key.push('|');
            key.push_str(name);
            if let Some(c) = t.cell() {
                key.push_str(&format!("@{}{}", c.x, c.y));
            }
        }
        key
    }
}
