/*
hexagon.rs

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

//! Hexagons: the path must go through the marked nodes and edges.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use super::board::Board;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::{HexagonSite, Target};
use crate::grid::path::Path;

pub struct HexagonRule;

pub static HEXAGON: HexagonRule = HexagonRule;

impl SymbolRule for HexagonRule {
    fn kind(&self) -> Kind {
        Kind::Hexagon
    }

    /// Mark one to three nodes or edges of the solution path, leaving the start and the end
    /// alone.
    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;

        let mut sites: Vec<HexagonSite> = path
            .get()
            .iter()
            .filter(|p| **p != state.start && **p != state.end)
            .map(|p| HexagonSite::Node(*p))
            .chain(path.used_edges().iter().map(|e| HexagonSite::Edge(*e)))
            .collect();
        if sites.is_empty() {
            return Err(PlacementError::NoRoom(Kind::Hexagon));
        }
        sites.shuffle(rng);

        let wanted: usize = rng.random_range(1..=3);
        let targets: Vec<Target> = sites
            .into_iter()
            .take(wanted)
            .map(|site| Target::Hexagon { site })
            .collect();
        Ok(Placement::new(targets))
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        board
            .targets(Kind::Hexagon)
            .filter(|(_, t)| match t {
                Target::Hexagon {
                    site: HexagonSite::Node(p),
                } => !board.visits(*p),
                Target::Hexagon {
                    site: HexagonSite::Edge(e),
                } => !board.is_used(e),
                _ => true,
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::edges::{EdgeKey, EdgeSet};
    use crate::grid::point::{END, GridPoint, START};
    use crate::puzzle::Puzzle;
    use crate::solver::evaluation::check_path;
    use crate::symbols::target::Symbols;

    fn path(points: &[(i32, i32)]) -> Path {
        let p: Vec<GridPoint> = points.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect();
        Path::from_points(&p)
    }

    #[test]
    fn path_must_cover_hexagons() {
        let mut symbols = Symbols::new();
        symbols.extend(
            Kind::Hexagon,
            vec![
                Target::Hexagon {
                    site: HexagonSite::Node(GridPoint::new(0, 0)),
                },
                Target::Hexagon {
                    site: HexagonSite::Edge(EdgeKey::new(
                        GridPoint::new(2, 0),
                        GridPoint::new(1, 0),
                    )),
                },
            ],
        );
        let puzzle = Puzzle::new(EdgeSet::full(), START, END, symbols);

        let along_left_and_top = path(&[
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
        ]);
        assert!(check_path(&puzzle, &along_left_and_top).ok);

        let along_bottom_and_right = path(&[
            (0, 4),
            (1, 4),
            (2, 4),
            (3, 4),
            (4, 4),
            (4, 3),
            (4, 2),
            (4, 1),
            (4, 0),
        ]);
        assert!(!check_path(&puzzle, &along_bottom_and_right).ok);
    }
}
