/*
evaluation.rs

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

//! Check a path against the symbols of a puzzle.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::negation;
use crate::grid::path::{Path, UsedEdges};
use crate::grid::regions::{self, RegionMap};
use crate::puzzle::Puzzle;
use crate::symbols::board::Board;
use crate::symbols::kind::Kind;
use crate::symbols::registry;
use crate::symbols::target::{SymbolRef, Symbols};

/// Search budgets used while evaluating a path.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EvaluationLimits {
    /// Maximum number of search nodes for the tiling of one region.
    pub tiling_budget: usize,

    /// Maximum number of negators in a puzzle. Puzzles with more negators never validate.
    pub max_negators: usize,

    /// Maximum number of search nodes for the negator assignment.
    pub negation_budget: usize,
}

impl Default for EvaluationLimits {
    fn default() -> Self {
        Self {
            tiling_budget: 20_000,
            max_negators: 4,
            negation_budget: 20_000,
        }
    }
}

/// Result of checking a path against a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintEvaluation {
    /// Whether the path solves the puzzle.
    pub ok: bool,

    /// Negators used up to cancel other symbols.
    pub eliminated_negator_indexes: Vec<usize>,

    /// Symbols cancelled by the negators.
    pub eliminated_symbol_refs: Vec<SymbolRef>,
}

impl ConstraintEvaluation {
    pub fn passed() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// A path with its used edges and regions, computed once and evaluated many times.
pub struct Snapshot<'a> {
    pub symbols: &'a Symbols,
    pub path: &'a Path,
    pub used: UsedEdges,
    pub regions: RegionMap,
    tiling_budget: usize,
}

impl<'a> Snapshot<'a> {
    pub fn new(symbols: &'a Symbols, path: &'a Path, tiling_budget: usize) -> Self {
        let used: UsedEdges = path.used_edges();
        let regions: RegionMap = regions::build_cell_regions(&used);
        Self {
            symbols,
            path,
            used,
            regions,
            tiling_budget,
        }
    }

    /// View of the snapshot where the `removed` symbols are out of play.
    pub fn board<'b>(&'b self, removed: &'b BTreeSet<SymbolRef>) -> Board<'b> {
        Board {
            symbols: self.symbols,
            path: self.path,
            used: &self.used,
            regions: &self.regions,
            removed,
            tiling_budget: self.tiling_budget,
        }
    }

    /// Symbols, other than negators, that the path violates once the `removed` symbols are
    /// taken out.
    pub fn failing(&self, removed: &BTreeSet<SymbolRef>) -> BTreeSet<SymbolRef> {
        let board: Board = self.board(removed);
        let mut failing: BTreeSet<SymbolRef> = BTreeSet::new();

        for kind in self.symbols.kinds() {
            if kind == Kind::Negator {
                continue;
            }
            for index in registry::rule(kind).collect_failing(&board) {
                failing.insert(SymbolRef::new(kind, index));
            }
        }
        failing
    }
}

/// Evaluate a structurally valid path against the symbols, negators included.
pub fn evaluate_symbols(
    symbols: &Symbols,
    path: &Path,
    limits: &EvaluationLimits,
) -> ConstraintEvaluation {
    let snapshot: Snapshot = Snapshot::new(symbols, path, limits.tiling_budget);
    negation::resolve(&snapshot, limits)
}

/// Check a path against a puzzle with the default search budgets.
pub fn check_path(puzzle: &Puzzle, path: &Path) -> ConstraintEvaluation {
    check_path_with(puzzle, path, &EvaluationLimits::default())
}

/// Check a path against a puzzle.
///
/// A path that is not a simple path from the start to the end over the drawable edges fails
/// without looking at the symbols.
pub fn check_path_with(
    puzzle: &Puzzle,
    path: &Path,
    limits: &EvaluationLimits,
) -> ConstraintEvaluation {
    if let Err(e) = path.validate(&puzzle.edges, puzzle.start, puzzle.end) {
        debug!("Invalid path: {e}");
        return ConstraintEvaluation::failed();
    }
    evaluate_symbols(&puzzle.symbols, path, limits)
}
