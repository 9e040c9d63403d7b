/*
stars.rs

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

//! Stars: each star must share its region with exactly one other symbol of its color.
//!
//! The partner is either another star or any other cell symbol of the same color, whatever its
//! kind.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};

use super::board::Board;
use super::color::{Palette, SymbolColor};
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::Target;
use crate::grid::path::Path;
use crate::grid::point::Cell;
use crate::grid::regions::RegionMap;

pub struct StarsRule;

pub static STARS: StarsRule = StarsRule;

impl StarsRule {
    /// Stars for one region: a star next to a lone symbol of another kind, or a pair of stars
    /// in a color absent from the region.
    fn region_stars(
        &self,
        state: &PlacementContext,
        regions: &RegionMap,
        region: usize,
        palette: &mut Palette,
        rng: &mut StdRng,
    ) -> Vec<Target> {
        let free: Vec<Cell> = state.free_cells_in(regions, region, rng);
        if free.is_empty() {
            return Vec::new();
        }

        let mut colors: BTreeMap<SymbolColor, usize> = BTreeMap::new();
        for (_, t) in state.symbols.iter() {
            if let (Some(c), Some(color)) = (t.cell(), t.color())
                && regions.region_of(c) == region
            {
                *colors.entry(color).or_default() += 1;
            }
        }

        // Pair with a symbol that is alone in its color
        let mut lonely: Vec<SymbolColor> = colors
            .iter()
            .filter(|(_, n)| **n == 1)
            .map(|(c, _)| *c)
            .collect();
        lonely.shuffle(rng);
        if let Some(color) = lonely.first()
            && rng.random_bool(0.7)
        {
            return vec![Target::Cell {
                cell: free[0],
                color: *color,
            }];
        }

        if free.len() < 2 {
            return Vec::new();
        }
        let taken: Vec<SymbolColor> = colors.keys().copied().collect();
        match palette.pick_other(rng, &taken) {
            Some(color) => vec![
                Target::Cell {
                    cell: free[0],
                    color,
                },
                Target::Cell {
                    cell: free[1],
                    color,
                },
            ],
            None => Vec::new(),
        }
    }
}

impl SymbolRule for StarsRule {
    fn kind(&self) -> Kind {
        Kind::Stars
    }

    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let regions: RegionMap = state.regions()?;

        let mut order: Vec<usize> = (0..regions.count()).collect();
        order.shuffle(rng);
        let wanted: usize = rng.random_range(1..=2);

        let mut palette: Palette = state.palette.clone();
        let mut targets: Vec<Target> = Vec::new();
        let mut groups: usize = 0;
        for region in order {
            if groups == wanted {
                break;
            }
            let mut trial: Palette = palette.clone();
            let stars: Vec<Target> = self.region_stars(state, &regions, region, &mut trial, rng);
            if stars.is_empty() {
                continue;
            }
            let n: usize = stars.len();
            targets.extend(stars);
            if state.accepts_targets(Kind::Stars, &targets, path) {
                palette = trial;
                groups += 1;
            } else {
                targets.truncate(targets.len() - n);
            }
        }

        if targets.is_empty() {
            Err(PlacementError::NoCandidate(Kind::Stars))
        } else {
            Ok(Placement::new(targets))
        }
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        // Number of active cell symbols per region and color, stars included
        let mut counts: BTreeMap<(usize, SymbolColor), usize> = BTreeMap::new();
        for (_, t) in board.cell_symbols() {
            if let (Some(c), Some(color)) = (t.cell(), t.color()) {
                *counts.entry((board.region_of(c), color)).or_default() += 1;
            }
        }

        board
            .targets(Kind::Stars)
            .filter(|(_, t)| match (t.cell(), t.color()) {
                (Some(c), Some(color)) => {
                    counts.get(&(board.region_of(c), color)).copied().unwrap_or(0) != 2
                }
                _ => true,
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::edges::EdgeSet;
    use crate::grid::point::{END, GridPoint, START};
    use crate::puzzle::Puzzle;
    use crate::solver::evaluation::check_path;
    use crate::symbols::target::Symbols;

    fn cell(x: i32, y: i32, color: SymbolColor) -> Target {
        Target::Cell {
            cell: Cell::new(x, y),
            color,
        }
    }

    /// Staircase from the start to the end, splitting the board in two halves.
    fn staircase() -> Path {
        let points: Vec<GridPoint> = [
            (0, 4),
            (0, 3),
            (1, 3),
            (1, 2),
            (2, 2),
            (2, 1),
            (3, 1),
            (3, 0),
            (4, 0),
        ]
        .iter()
        .map(|(x, y)| GridPoint::new(*x, *y))
        .collect();
        Path::from_points(&points)
    }

    fn puzzle(squares: Vec<Target>) -> Puzzle {
        let mut symbols = Symbols::new();
        symbols.extend(Kind::Stars, vec![cell(3, 3, SymbolColor::Red)]);
        symbols.extend(Kind::ColorSquares, squares);
        Puzzle::new(EdgeSet::full(), START, END, symbols)
    }

    #[test]
    fn lonely_star_fails() {
        let p = puzzle(vec![cell(0, 0, SymbolColor::Red)]);
        assert!(!check_path(&p, &staircase()).ok);
    }

    #[test]
    fn star_paired_with_a_square_passes() {
        let p = puzzle(vec![
            cell(2, 3, SymbolColor::Red),
            cell(0, 0, SymbolColor::Blue),
        ]);
        assert!(check_path(&p, &staircase()).ok);
    }

    #[test]
    fn three_of_a_color_fail() {
        let p = puzzle(vec![
            cell(2, 3, SymbolColor::Red),
            cell(3, 2, SymbolColor::Red),
        ]);
        assert!(!check_path(&p, &staircase()).ok);
    }
}
