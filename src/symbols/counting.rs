/*
counting.rs

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

//! Counting symbols: triangles, dots, diamonds, and tally marks.
//!
//! Each symbol carries a count, and the path must use exactly that many edges (or visit that
//! many nodes) around the symbol. The four kinds only differ by what they measure.

use rand::Rng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

use super::board::Board;
use super::color::Palette;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::Target;
use crate::grid::path::Path;
use crate::grid::point::{Cell, GridPoint};
use crate::solver::evaluation::Snapshot;

/// Rule shared by the counting kinds.
pub struct CountingRule {
    kind: Kind,

    /// Value that the count of a symbol in the given cell must match.
    measure: fn(&Board, Cell) -> usize,

    /// Smallest and largest counts worth showing.
    range: (usize, usize),
}

pub static TRIANGLES: CountingRule = CountingRule {
    kind: Kind::Triangles,
    measure: used_sides,
    range: (1, 3),
};

pub static DOTS: CountingRule = CountingRule {
    kind: Kind::Dots,
    measure: visited_corners,
    range: (1, 4),
};

pub static DIAMONDS: CountingRule = CountingRule {
    kind: Kind::Diamonds,
    measure: used_outline,
    range: (1, 12),
};

pub static TALLY_MARKS: CountingRule = CountingRule {
    kind: Kind::TallyMarks,
    measure: touching_edges,
    range: (1, 9),
};

/// Used edges among the sides of the cell.
fn used_sides(board: &Board, cell: Cell) -> usize {
    board.used_sides(cell)
}

/// Corners of the cell that the path goes through.
fn visited_corners(board: &Board, cell: Cell) -> usize {
    cell.corners().iter().filter(|p| board.visits(**p)).count()
}

/// Used edges on the outline of the region of the cell.
fn used_outline(board: &Board, cell: Cell) -> usize {
    board
        .regions
        .outline(board.region_of(cell))
        .iter()
        .filter(|e| board.is_used(e))
        .count()
}

/// Used edges that touch the cell, either along a side or at a corner.
fn touching_edges(board: &Board, cell: Cell) -> usize {
    let corners: [GridPoint; 4] = cell.corners();
    board
        .used
        .iter()
        .filter(|e| corners.iter().any(|c| e.touches(*c)))
        .count()
}

impl CountingRule {
    /// Expected count for a symbol in the cell, if the count is worth showing.
    fn count_for(&self, board: &Board, cell: Cell) -> Option<u8> {
        let m: usize = (self.measure)(board, cell);
        if m >= self.range.0 && m <= self.range.1 {
            u8::try_from(m).ok()
        } else {
            None
        }
    }
}

impl SymbolRule for CountingRule {
    fn kind(&self) -> Kind {
        self.kind
    }

    /// Drop one to three symbols in free cells, each with the count measured on the path.
    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let snapshot: Snapshot = Snapshot::new(&state.symbols, path, state.limits.tiling_budget);
        let removed = BTreeSet::new();
        let board: Board = snapshot.board(&removed);

        let wanted: usize = rng.random_range(1..=3);
        let mut palette: Palette = state.palette.clone();
        let mut targets: Vec<Target> = Vec::new();
        for cell in state.free_cells(rng) {
            if targets.len() == wanted {
                break;
            }
            let Some(count) = self.count_for(&board, cell) else {
                continue;
            };
            let mut trial: Palette = palette.clone();
            let Some(color) = state.plain_color(&mut trial, rng) else {
                continue;
            };
            targets.push(Target::Count { cell, color, count });
            if state.accepts_targets(self.kind, &targets, path) {
                palette = trial;
            } else {
                targets.pop();
            }
        }

        if targets.is_empty() {
            Err(PlacementError::NoCandidate(self.kind))
        } else {
            Ok(Placement::new(targets))
        }
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        board
            .targets(self.kind)
            .filter(|(_, t)| match (t.cell(), t.count()) {
                (Some(cell), Some(count)) => (self.measure)(board, cell) != count,
                _ => true,
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// Symbols of a single counting kind, for the tests of other modules.
#[cfg(test)]
pub fn single(kind: Kind, cell: Cell, count: u8) -> super::target::Symbols {
    let mut symbols = super::target::Symbols::new();
    symbols.extend(
        kind,
        vec![Target::Count {
            cell,
            color: super::color::SymbolColor::White,
            count,
        }],
    );
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::path::UsedEdges;
    use crate::grid::regions::{self, RegionMap};
    use crate::symbols::target::{SymbolRef, Symbols};

    fn border_path() -> Path {
        let points: Vec<GridPoint> = [
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
        ]
        .iter()
        .map(|(x, y)| GridPoint::new(*x, *y))
        .collect();
        Path::from_points(&points)
    }

    fn measure(rule: &CountingRule, cell: Cell) -> usize {
        let symbols = Symbols::new();
        let path = border_path();
        let used: UsedEdges = path.used_edges();
        let regions: RegionMap = regions::build_cell_regions(&used);
        let removed: BTreeSet<SymbolRef> = BTreeSet::new();
        let board = Board {
            symbols: &symbols,
            path: &path,
            used: &used,
            regions: &regions,
            removed: &removed,
            tiling_budget: 100,
        };
        (rule.measure)(&board, cell)
    }

    #[test]
    fn corner_cell_measures() {
        let corner = Cell::new(0, 0);
        assert_eq!(measure(&TRIANGLES, corner), 2);
        assert_eq!(measure(&DOTS, corner), 3);
        // The whole board is one region: its outline holds the 8 used edges
        assert_eq!(measure(&DIAMONDS, corner), 8);
        // Left column edges (0,2)-(0,1), (0,1)-(0,0), top edges (0,0)-(1,0), (1,0)-(2,0)
        assert_eq!(measure(&TALLY_MARKS, corner), 4);
    }

    #[test]
    fn inner_cell_measures() {
        let inner = Cell::new(2, 2);
        assert_eq!(measure(&TRIANGLES, inner), 0);
        assert_eq!(measure(&DOTS, inner), 0);
        assert_eq!(measure(&TALLY_MARKS, inner), 0);
    }

    #[test]
    fn wrong_count_fails() {
        let path = border_path();
        let symbols = single(Kind::Triangles, Cell::new(0, 0), 3);
        let snapshot = Snapshot::new(&symbols, &path, 100);
        let failing = snapshot.failing(&BTreeSet::new());
        assert!(failing.contains(&SymbolRef::new(Kind::Triangles, 0)));

        let symbols = single(Kind::Triangles, Cell::new(0, 0), 2);
        let snapshot = Snapshot::new(&symbols, &path, 100);
        assert!(snapshot.failing(&BTreeSet::new()).is_empty());
    }
}
