/*
solitary.rs

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

//! Ghosts and crystals: one symbol alone in every region.
//!
//! The path must cut the board into as many regions as there are symbols, with one symbol in
//! each region. Crystals also require all the regions to have the same shape, rotations and
//! mirror images included.
//!
//! Both kinds constrain the whole partition. When they are the first cell symbols placed, they
//! may replace the solution path with one that suits them.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};

use super::board::Board;
use super::color::Palette;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::shape::Shape;
use super::target::Target;
use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::{Cell, GridPoint};
use crate::grid::regions::{self, RegionMap};

/// Maximum number of search nodes while looking for a path that suits the kind.
const PATH_SEARCH_BUDGET: usize = 20_000;

/// Maximum number of symbols, and therefore of regions.
const MAX_REGIONS: usize = 6;

pub struct SolitaryRule {
    kind: Kind,

    /// Whether all the regions must be congruent.
    congruent: bool,
}

pub static CRYSTALS: SolitaryRule = SolitaryRule {
    kind: Kind::Crystals,
    congruent: true,
};

pub static GHOSTS: SolitaryRule = SolitaryRule {
    kind: Kind::Ghosts,
    congruent: false,
};

/// Whether all the regions have the same shape, up to rotation and mirroring.
pub fn regions_congruent(regions: &RegionMap) -> bool {
    let shapes: BTreeSet<Shape> = regions
        .regions()
        .iter()
        .map(|cells| Shape::from_cells(cells).canonical())
        .collect();
    shapes.len() == 1
}

impl SolitaryRule {
    /// Whether the partition can hold one symbol per region.
    fn layout_fits(&self, regions: &RegionMap, used_cells: &BTreeSet<Cell>) -> bool {
        let count: usize = regions.count();
        if !(2..=MAX_REGIONS).contains(&count) {
            return false;
        }
        if self.congruent && !regions_congruent(regions) {
            return false;
        }
        regions
            .regions()
            .iter()
            .all(|cells| cells.iter().any(|c| !used_cells.contains(c)))
    }
}

/// Randomized depth-first search for a path whose partition passes the `accept` test.
struct PathSearch<'a> {
    edges: &'a EdgeSet,
    end: GridPoint,
    budget: usize,
    visits: usize,
}

impl PathSearch<'_> {
    fn walk<F>(&mut self, path: &mut Path, rng: &mut StdRng, accept: &F) -> Option<Path>
    where
        F: Fn(&RegionMap) -> bool,
    {
        self.visits += 1;
        if self.visits > self.budget {
            return None;
        }
        let current: GridPoint = path.get_last()?;
        if current == self.end {
            let regions: RegionMap = regions::build_cell_regions(&path.used_edges());
            return if accept(&regions) {
                Some(path.clone())
            } else {
                None
            };
        }

        let mut next: Vec<GridPoint> = self
            .edges
            .neighbors(current)
            .into_iter()
            .filter(|p| !path.contains(*p))
            .collect();
        next.shuffle(rng);

        for n in next {
            // Skip the nodes from which the end cannot be reached anymore
            let blocked: BTreeSet<GridPoint> = path.get().iter().copied().collect();
            if !self.edges.reachable_from(n, &blocked).contains(&self.end) {
                continue;
            }
            path.push(n);
            if let Some(found) = self.walk(path, rng, accept) {
                return Some(found);
            }
            path.pop();
            if self.visits > self.budget {
                return None;
            }
        }
        None
    }
}

impl SymbolRule for SolitaryRule {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let current: Option<&Path> = state.path.as_ref();
        let fits = |regions: &RegionMap| self.layout_fits(regions, &state.used_cells);

        let (path, replaced): (Path, bool) = match current {
            Some(p) if fits(&regions::build_cell_regions(&p.used_edges())) => (p.clone(), false),
            _ if state.path_locked() => return Err(PlacementError::NoCandidate(self.kind)),
            _ => {
                let mut search: PathSearch = PathSearch {
                    edges: &state.edges,
                    end: state.end,
                    budget: PATH_SEARCH_BUDGET,
                    visits: 0,
                };
                let mut start: Path = Path::new();
                start.push(state.start);
                match search.walk(&mut start, rng, &fits) {
                    Some(p) => {
                        debug!(
                            "New path for {} after {} visits: {}",
                            self.kind,
                            search.visits,
                            p.signature()
                        );
                        (p, true)
                    }
                    None => return Err(PlacementError::NoCandidate(self.kind)),
                }
            }
        };

        let regions: RegionMap = regions::build_cell_regions(&path.used_edges());
        let mut palette: Palette = state.palette.clone();
        let mut targets: Vec<Target> = Vec::new();
        for region in 0..regions.count() {
            let cell: Cell = *state
                .free_cells_in(&regions, region, rng)
                .first()
                .ok_or(PlacementError::NoRoom(self.kind))?;
            let color = state
                .plain_color(&mut palette, rng)
                .ok_or(PlacementError::PaletteExhausted(self.kind))?;
            targets.push(Target::Cell { cell, color });
        }

        if !state.accepts_targets(self.kind, &targets, &path) {
            return Err(PlacementError::NoCandidate(self.kind));
        }
        if replaced {
            Ok(Placement::with_path(targets, path))
        } else {
            Ok(Placement::new(targets))
        }
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        let mut by_region: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, t) in board.targets(self.kind) {
            if let Some(c) = t.cell() {
                by_region.entry(board.region_of(c)).or_default().push(i);
            }
        }

        // Regions with more than one symbol
        let mut failing: BTreeSet<usize> = by_region
            .values()
            .filter(|v| v.len() > 1)
            .flatten()
            .copied()
            .collect();

        if failing.is_empty() && !by_region.is_empty() {
            let empty_regions: bool = by_region.len() != board.regions.count();
            let misshapen: bool = self.congruent
                && (board.regions.count() < 2 || !regions_congruent(board.regions));
            if empty_regions || misshapen {
                failing = by_region.values().flatten().copied().collect();
            }
        }
        failing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::point::{END, START};
    use crate::puzzle::Puzzle;
    use crate::solver::evaluation::{EvaluationLimits, check_path};
    use crate::symbols::color::SymbolColor;
    use crate::symbols::target::Symbols;
    use rand::SeedableRng;

    fn path(points: &[(i32, i32)]) -> Path {
        let p: Vec<GridPoint> = points.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect();
        Path::from_points(&p)
    }

    /// Path across the middle row, cutting the board into two 4x2 halves.
    fn halves() -> Path {
        path(&[
            (0, 4),
            (0, 3),
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 2),
            (4, 2),
            (4, 1),
            (4, 0),
        ])
    }

    fn puzzle(kind: Kind, cells: &[(i32, i32)]) -> Puzzle {
        let mut symbols = Symbols::new();
        symbols.extend(
            kind,
            cells
                .iter()
                .map(|(x, y)| Target::Cell {
                    cell: Cell::new(*x, *y),
                    color: SymbolColor::White,
                })
                .collect(),
        );
        Puzzle::new(EdgeSet::full(), START, END, symbols)
    }

    #[test]
    fn one_ghost_per_region() {
        assert!(check_path(&puzzle(Kind::Ghosts, &[(0, 0), (3, 3)]), &halves()).ok);
        assert!(!check_path(&puzzle(Kind::Ghosts, &[(0, 0), (3, 0)]), &halves()).ok);
        assert!(!check_path(&puzzle(Kind::Ghosts, &[(0, 0)]), &halves()).ok);
    }

    #[test]
    fn crystals_need_congruent_regions() {
        assert!(check_path(&puzzle(Kind::Crystals, &[(0, 0), (3, 3)]), &halves()).ok);

        // Staircase: the two regions hold 10 and 6 cells
        let staircase = path(&[
            (0, 4),
            (0, 3),
            (1, 3),
            (1, 2),
            (2, 2),
            (2, 1),
            (3, 1),
            (3, 0),
            (4, 0),
        ]);
        assert!(!check_path(&puzzle(Kind::Crystals, &[(0, 0), (3, 3)]), &staircase).ok);
        assert!(check_path(&puzzle(Kind::Ghosts, &[(0, 0), (3, 3)]), &staircase).ok);
    }

    #[test]
    fn crystals_find_their_own_path() {
        let state = PlacementContext::new(
            EdgeSet::full(),
            START,
            END,
            &[Kind::Crystals],
            EvaluationLimits::default(),
        );
        let placement = (0..8)
            .find_map(|seed| {
                CRYSTALS
                    .generate(&state, &mut StdRng::seed_from_u64(seed))
                    .ok()
            })
            .unwrap();
        let p = placement.path.clone().unwrap();
        let regions = regions::build_cell_regions(&p.used_edges());
        assert!(regions_congruent(&regions));
        assert_eq!(placement.targets.len(), regions.count());
    }
}
