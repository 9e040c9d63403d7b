/*
squares.rs

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

//! Color squares: the path must separate squares of different colors.

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

pub struct ColorSquaresRule;

pub static COLOR_SQUARES: ColorSquaresRule = ColorSquaresRule;

impl SymbolRule for ColorSquaresRule {
    fn kind(&self) -> Kind {
        Kind::ColorSquares
    }

    /// Give a distinct color to two or three regions of the path, and drop one or two squares
    /// in each.
    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let regions: RegionMap = state.regions()?;

        let mut candidates: Vec<(usize, Vec<Cell>)> = (0..regions.count())
            .map(|r| (r, state.free_cells_in(&regions, r, rng)))
            .filter(|(_, cells)| !cells.is_empty())
            .collect();
        if candidates.len() < 2 {
            return Err(PlacementError::NoRoom(Kind::ColorSquares));
        }
        candidates.shuffle(rng);

        for _ in 0..4 {
            let wanted: usize = rng.random_range(2..=candidates.len().min(3));
            let mut palette: Palette = state.palette.clone();
            let mut region_colors: Vec<SymbolColor> = Vec::new();
            let mut targets: Vec<Target> = Vec::new();

            for (_, cells) in candidates.iter().take(wanted) {
                let Some(color) = palette.pick_other(rng, &region_colors) else {
                    break;
                };
                region_colors.push(color);
                let count: usize = rng.random_range(1..=cells.len().min(2));
                for cell in cells.iter().take(count) {
                    targets.push(Target::Cell { cell: *cell, color });
                }
            }

            if region_colors.len() >= 2
                && state.accepts_targets(Kind::ColorSquares, &targets, path)
            {
                return Ok(Placement::new(targets));
            }
            candidates.shuffle(rng);
        }
        Err(PlacementError::PaletteExhausted(Kind::ColorSquares))
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        let mut by_region: BTreeMap<usize, Vec<(usize, SymbolColor)>> = BTreeMap::new();
        for (i, t) in board.targets(Kind::ColorSquares) {
            if let (Some(cell), Some(color)) = (t.cell(), t.color()) {
                by_region
                    .entry(board.region_of(cell))
                    .or_default()
                    .push((i, color));
            }
        }

        let mut failing: BTreeSet<usize> = BTreeSet::new();
        for squares in by_region.values() {
            let colors: BTreeSet<SymbolColor> = squares.iter().map(|(_, c)| *c).collect();
            if colors.len() > 1 {
                failing.extend(squares.iter().map(|(i, _)| *i));
            }
        }
        failing
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

    fn square(x: i32, y: i32, color: SymbolColor) -> Target {
        Target::Cell {
            cell: Cell::new(x, y),
            color,
        }
    }

    fn path(points: &[(i32, i32)]) -> Path {
        let p: Vec<GridPoint> = points.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect();
        Path::from_points(&p)
    }

    fn puzzle() -> Puzzle {
        let mut symbols = Symbols::new();
        symbols.extend(
            Kind::ColorSquares,
            vec![square(0, 3, SymbolColor::Black), square(0, 0, SymbolColor::White)],
        );
        Puzzle::new(EdgeSet::full(), START, END, symbols)
    }

    #[test]
    fn separated_colors_pass() {
        // Diagonal staircase splitting the board in two
        let p = path(&[
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
        assert!(check_path(&puzzle(), &p).ok);
    }

    #[test]
    fn merged_colors_fail() {
        // Path along the border: a single region holds both colors
        let p = path(&[
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
        let result = check_path(&puzzle(), &p);
        assert!(!result.ok);
    }
}
