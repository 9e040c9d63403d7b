/*
negator.rs

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

//! Negators: each negator cancels one other symbol of its region.
//!
//! A negator has no rule of its own. The negation search in the solver decides what the
//! negators cancel. The generator plants a decoy, a copy of an existing symbol that the path
//! violates, and puts the negator next to it.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use super::board::Board;
use super::color::Palette;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::{SymbolRef, Target};
use crate::grid::path::Path;
use crate::grid::point::Cell;
use crate::grid::regions::RegionMap;
use crate::solver::evaluation::{self, ConstraintEvaluation};

pub struct NegatorRule;

pub static NEGATOR: NegatorRule = NegatorRule;

impl NegatorRule {
    /// Copy an existing symbol into another cell where the path violates it, and put the
    /// negator in the same region.
    fn decoy(
        &self,
        state: &PlacementContext,
        path: &Path,
        regions: &RegionMap,
        rng: &mut StdRng,
    ) -> Option<Placement> {
        let mut sources: Vec<(Kind, Target)> = state
            .symbols
            .iter()
            .filter(|(r, t)| r.kind != Kind::Negator && t.cell().is_some())
            .map(|(r, t)| (r.kind, t.clone()))
            .collect();
        sources.shuffle(rng);

        let free: Vec<Cell> = state.free_cells(rng);
        for (kind, source) in sources {
            for decoy_cell in &free {
                let neighbors: Vec<Cell> = state
                    .free_cells_in(regions, regions.region_of(*decoy_cell), rng)
                    .into_iter()
                    .filter(|c| c != decoy_cell)
                    .collect();
                let Some(negator_cell) = neighbors.first() else {
                    continue;
                };
                let mut palette: Palette = state.palette.clone();
                let Some(color) = state.plain_color(&mut palette, rng) else {
                    continue;
                };

                let placement: Placement = Placement::with_companions(
                    vec![Target::Cell {
                        cell: *negator_cell,
                        color,
                    }],
                    vec![(kind, source.moved_to(*decoy_cell))],
                );
                let decoy: SymbolRef = SymbolRef::new(kind, state.symbols.get(kind).len());
                if self.cancels(state, &placement, path, decoy) {
                    debug!(
                        "Negator at {:?} cancels a {} copied to {:?}",
                        negator_cell, kind, decoy_cell
                    );
                    return Some(placement);
                }
            }
        }
        None
    }

    /// Whether the path solves the puzzle with the placement, and the negators cancel the
    /// decoy.
    fn cancels(
        &self,
        state: &PlacementContext,
        placement: &Placement,
        path: &Path,
        decoy: SymbolRef,
    ) -> bool {
        if !state.accepts(Kind::Negator, placement, path) {
            return false;
        }
        let symbols = state.symbols_with(Kind::Negator, placement);
        let result: ConstraintEvaluation = evaluation::evaluate_symbols(&symbols, path, &state.limits);
        result.ok && result.eliminated_symbol_refs.contains(&decoy)
    }

    /// Two negators cancelling each other in the same region.
    fn pair(
        &self,
        state: &PlacementContext,
        path: &Path,
        regions: &RegionMap,
        rng: &mut StdRng,
    ) -> Option<Placement> {
        let mut order: Vec<usize> = (0..regions.count()).collect();
        order.shuffle(rng);
        for region in order {
            let free: Vec<Cell> = state.free_cells_in(regions, region, rng);
            if free.len() < 2 {
                continue;
            }
            let mut palette: Palette = state.palette.clone();
            let Some(color) = state.plain_color(&mut palette, rng) else {
                continue;
            };
            let targets: Vec<Target> = free[..2]
                .iter()
                .map(|c| Target::Cell { cell: *c, color })
                .collect();
            if state.accepts_targets(Kind::Negator, &targets, path) {
                return Some(Placement::new(targets));
            }
        }
        None
    }
}

impl SymbolRule for NegatorRule {
    fn kind(&self) -> Kind {
        Kind::Negator
    }

    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let regions: RegionMap = state.regions()?;

        if let Some(placement) = self.decoy(state, path, &regions, rng) {
            return Ok(placement);
        }
        debug!("No decoy for the negator, placing a pair");
        self.pair(state, path, &regions, rng)
            .ok_or(PlacementError::NoCandidate(Kind::Negator))
    }

    /// Negators never fail by themselves. The negation search handles them.
    fn collect_failing(&self, _board: &Board) -> BTreeSet<usize> {
        BTreeSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::edges::EdgeSet;
    use crate::grid::point::{END, GridPoint, START};
    use crate::puzzle::Puzzle;
    use crate::solver::evaluation::{EvaluationLimits, check_path};
    use crate::symbols::counting;
    use rand::SeedableRng;

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

    #[test]
    fn decoy_is_cancelled() {
        let path = border_path();
        let mut state = PlacementContext::new(
            EdgeSet::full(),
            START,
            END,
            &[Kind::Triangles, Kind::Negator],
            EvaluationLimits::default(),
        );
        state.path = Some(path.clone());
        let state = state.apply(
            Kind::Triangles,
            Placement::new(
                counting::single(Kind::Triangles, Cell::new(0, 0), 2)
                    .get(Kind::Triangles)
                    .to_vec(),
            ),
        );

        let placement = NEGATOR
            .generate(&state, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(placement.targets.len(), 1);
        assert_eq!(placement.companions.len(), 1);

        let next = state.apply(Kind::Negator, placement);
        let puzzle = Puzzle::new(EdgeSet::full(), START, END, next.symbols);
        let result = check_path(&puzzle, &path);
        assert!(result.ok);
        assert_eq!(
            result.eliminated_symbol_refs,
            vec![SymbolRef::new(Kind::Triangles, 1)]
        );
        assert_eq!(result.eliminated_negator_indexes, vec![0]);
    }
}
