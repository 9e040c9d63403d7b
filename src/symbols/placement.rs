/*
placement.rs

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

//! State of a puzzle during generation, as seen by the symbol generators.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use thiserror::Error;

use super::color::{Palette, SymbolColor};
use super::kind::Kind;
use super::target::{Symbols, Target};
use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::{self, Cell, GridPoint};
use crate::grid::regions::{self, RegionMap};
use crate::solver::evaluation::{self, EvaluationLimits};

/// Reasons for a generator to give up on the current attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No path from the starting node to the ending node.
    #[error("no path from start to end")]
    NoPath,

    /// Not enough free cells for the kind.
    #[error("no room left for {0}")]
    NoRoom(Kind),

    /// None of the candidate placements passed the checks.
    #[error("no valid placement for {0}")]
    NoCandidate(Kind),

    /// The color budget does not allow the kind.
    #[error("color budget exhausted while placing {0}")]
    PaletteExhausted(Kind),

    /// The complete attempt failed the final validation.
    #[error("attempt rejected: {0}")]
    Rejected(String),
}

/// Result of a generator: the new placements, and optionally a new solution path.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub targets: Vec<Target>,

    /// Placements of other kinds that come along with the targets (the decoys of negators).
    pub companions: Vec<(Kind, Target)>,

    /// Replacement solution path. Only kinds that shape the regions may provide one, and only
    /// while no cell symbol has been placed yet.
    pub path: Option<Path>,
}

impl Placement {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            ..Default::default()
        }
    }

    pub fn with_path(targets: Vec<Target>, path: Path) -> Self {
        Self {
            targets,
            path: Some(path),
            ..Default::default()
        }
    }

    pub fn with_companions(targets: Vec<Target>, companions: Vec<(Kind, Target)>) -> Self {
        Self {
            targets,
            companions,
            path: None,
        }
    }

    /// Cells occupied by the targets and their companions.
    pub fn cells(&self) -> Vec<Cell> {
        self.targets
            .iter()
            .chain(self.companions.iter().map(|(_, t)| t))
            .filter_map(|t| t.cell())
            .collect()
    }
}

/// Puzzle under construction.
#[derive(Debug, Clone)]
pub struct PlacementContext {
    /// Drawable edges.
    pub edges: EdgeSet,

    pub start: GridPoint,
    pub end: GridPoint,

    /// Solution path shared by all the kinds.
    pub path: Option<Path>,

    /// Symbols placed so far.
    pub symbols: Symbols,

    /// Cells occupied by the symbols placed so far.
    pub used_cells: BTreeSet<Cell>,

    /// Colors used so far.
    pub palette: Palette,

    /// Whether colored symbols are in play (stars are requested). When they are not, the
    /// symbols other than the squares are all white.
    pub color_mode: bool,

    /// Kinds requested for the puzzle.
    pub requested: Vec<Kind>,

    /// Search budgets used to verify the placements.
    pub limits: EvaluationLimits,
}

impl PlacementContext {
    /// Create the context for an empty board.
    pub fn new(
        edges: EdgeSet,
        start: GridPoint,
        end: GridPoint,
        requested: &[Kind],
        limits: EvaluationLimits,
    ) -> Self {
        Self {
            edges,
            start,
            end,
            path: None,
            symbols: Symbols::new(),
            used_cells: BTreeSet::new(),
            palette: Palette::new(),
            color_mode: requested.contains(&Kind::Stars),
            requested: requested.to_vec(),
            limits,
        }
    }

    /// The solution path.
    ///
    /// # Errors
    ///
    /// Return [`PlacementError::NoPath`] when no path has been chosen yet.
    pub fn path(&self) -> Result<&Path, PlacementError> {
        self.path.as_ref().ok_or(PlacementError::NoPath)
    }

    /// Regions of the solution path.
    pub fn regions(&self) -> Result<RegionMap, PlacementError> {
        Ok(regions::build_cell_regions(&self.path()?.used_edges()))
    }

    /// Whether the solution path is fixed because cell symbols already rely on it.
    pub fn path_locked(&self) -> bool {
        self.path.is_some()
            && self
                .symbols
                .kinds()
                .iter()
                .any(|k| k.is_cell_anchored())
    }

    /// Whether the kind was requested for this puzzle.
    pub fn is_requested(&self, kind: Kind) -> bool {
        self.requested.contains(&kind)
    }

    /// Free cells, in random order.
    pub fn free_cells(&self, rng: &mut StdRng) -> Vec<Cell> {
        let mut cells: Vec<Cell> = point::all_cells()
            .filter(|c| !self.used_cells.contains(c))
            .collect();
        cells.shuffle(rng);
        cells
    }

    /// Free cells of the given region, in random order.
    pub fn free_cells_in(&self, regions: &RegionMap, region: usize, rng: &mut StdRng) -> Vec<Cell> {
        let mut cells: Vec<Cell> = regions
            .cells_in(region)
            .into_iter()
            .filter(|c| !self.used_cells.contains(c))
            .collect();
        cells.shuffle(rng);
        cells
    }

    /// Color for a symbol that does not care about colors by itself.
    ///
    /// In color mode, the color comes from the running palette so that stars can pair with the
    /// symbol. Otherwise the symbol is white.
    pub fn plain_color(&self, palette: &mut Palette, rng: &mut StdRng) -> Option<SymbolColor> {
        if self.color_mode {
            Some(palette.pick(rng))
        } else if palette.try_add(SymbolColor::White) {
            Some(SymbolColor::White)
        } else {
            None
        }
    }

    /// Symbols of the puzzle once the placement is added.
    pub fn symbols_with(&self, kind: Kind, placement: &Placement) -> Symbols {
        let mut symbols: Symbols = self.symbols.with(kind, placement.targets.clone());
        for (k, t) in &placement.companions {
            symbols.extend(*k, vec![t.clone()]);
        }
        symbols
    }

    /// Whether adding the placement for the kind keeps every placed symbol satisfied by the
    /// given path.
    ///
    /// Negators are verified with the full negation search; the other kinds with the plain
    /// rules, ignoring the negators.
    pub fn accepts(&self, kind: Kind, placement: &Placement, path: &Path) -> bool {
        let symbols: Symbols = self.symbols_with(kind, placement);
        if symbols.palette().len() > super::color::MAX_DISTINCT_COLORS {
            return false;
        }
        let cells: Vec<Cell> = placement.cells();
        let distinct: BTreeSet<Cell> = cells.iter().copied().collect();
        if distinct.len() != cells.len() || cells.iter().any(|c| self.used_cells.contains(c)) {
            return false;
        }

        if symbols.has(Kind::Negator) {
            evaluation::evaluate_symbols(&symbols, path, &self.limits).ok
        } else {
            evaluation::Snapshot::new(&symbols, path, self.limits.tiling_budget)
                .failing(&BTreeSet::new())
                .is_empty()
        }
    }

    /// Shorthand for [`Self::accepts`] on plain targets.
    pub fn accepts_targets(&self, kind: Kind, targets: &[Target], path: &Path) -> bool {
        self.accepts(kind, &Placement::new(targets.to_vec()), path)
    }

    /// Return the new context after placing the kind.
    ///
    /// Gap placements also remove their edges from the drawable edges.
    pub fn apply(&self, kind: Kind, placement: Placement) -> PlacementContext {
        let mut next: PlacementContext = self.clone();
        if let Some(p) = placement.path.clone() {
            next.path = Some(p);
        }
        for c in placement.cells() {
            next.used_cells.insert(c);
        }
        for t in &placement.targets {
            if let Target::Gap { edge } = t {
                next.edges.remove(edge);
            }
        }
        next.symbols = self.symbols_with(kind, &placement);
        next.palette = next.symbols.palette();
        next
    }
}
