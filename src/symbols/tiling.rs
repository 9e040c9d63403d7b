/*
tiling.rs

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

//! Exact tiling of a set of cells by polyomino pieces.
//!
//! The tiler solves an exact-cover problem on the 16 cells of the board. At each step it picks
//! the uncovered cell with the fewest candidate placements (minimum remaining candidates),
//! tries each placement in turn, and backtracks on dead ends. The number of search nodes is
//! bounded by a budget; once the budget is spent the search fails.

use log::debug;

use super::shape::Shape;

/// Allowed orientations of one piece.
pub type Piece = Vec<Shape>;

/// Budgeted exact-cover tiler.
pub struct Tiler {
    budget: usize,

    /// Number of search nodes expanded so far.
    pub visits: usize,

    /// Whether the budget ran out during the last search.
    pub exhausted: bool,
}

impl Tiler {
    /// Create a tiler that expands at most `budget` search nodes over its lifetime.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            visits: 0,
            exhausted: false,
        }
    }

    /// Find how to cover exactly the `target` cell mask with every piece, each used once.
    ///
    /// Return the cell mask of every piece, in the order of `pieces`.
    pub fn tile(&mut self, target: u16, pieces: &[Piece]) -> Option<Vec<u16>> {
        let area: usize = pieces
            .iter()
            .map(|p| p.first().map_or(0, |s| s.area()))
            .sum();
        if area != target.count_ones() as usize || pieces.len() > 32 {
            return None;
        }

        // All the positions of every piece that stay inside the target
        let placements: Vec<Vec<u16>> = pieces
            .iter()
            .map(|orientations| {
                let mut masks: Vec<u16> = orientations
                    .iter()
                    .flat_map(|s| s.placements_within(target))
                    .collect();
                masks.sort_unstable();
                masks.dedup();
                masks
            })
            .collect();

        let mut chosen: Vec<u16> = vec![0; pieces.len()];
        if self.search(target, 0, &placements, &mut chosen) {
            Some(chosen)
        } else {
            None
        }
    }

    fn search(
        &mut self,
        uncovered: u16,
        used_pieces: u32,
        placements: &[Vec<u16>],
        chosen: &mut [u16],
    ) -> bool {
        if uncovered == 0 {
            return used_pieces.count_ones() as usize == placements.len();
        }
        self.visits += 1;
        if self.visits > self.budget {
            if !self.exhausted {
                debug!("Tiling budget of {} visits exhausted", self.budget);
            }
            self.exhausted = true;
            return false;
        }

        // Select the uncovered cell with the fewest options
        let mut best: Option<(u16, usize)> = None;
        for i in 0..16 {
            let bit: u16 = 1 << i;
            if uncovered & bit == 0 {
                continue;
            }
            let options: usize = placements
                .iter()
                .enumerate()
                .filter(|(p, _)| used_pieces & (1 << p) == 0)
                .map(|(_, masks)| {
                    masks
                        .iter()
                        .filter(|m| *m & bit != 0 && *m & uncovered == **m)
                        .count()
                })
                .sum();
            if options == 0 {
                return false;
            }
            if best.is_none_or(|(_, n)| options < n) {
                best = Some((bit, options));
            }
        }
        let Some((bit, _)) = best else {
            return false;
        };

        for (p, masks) in placements.iter().enumerate() {
            if used_pieces & (1 << p) != 0 {
                continue;
            }
            for m in masks
                .iter()
                .filter(|m| *m & bit != 0 && *m & uncovered == **m)
            {
                chosen[p] = *m;
                if self.search(uncovered & !m, used_pieces | (1 << p), placements, chosen) {
                    return true;
                }
                if self.exhausted {
                    return false;
                }
            }
        }
        false
    }
}

/// Whether the `target` cell mask can be covered exactly by the pieces.
pub fn can_tile_region(target: u16, pieces: &[Piece], budget: usize) -> bool {
    tile_region_with_shapes(target, pieces, budget).is_some()
}

/// Cover the `target` cell mask exactly with the pieces and return the mask of each piece.
pub fn tile_region_with_shapes(target: u16, pieces: &[Piece], budget: usize) -> Option<Vec<u16>> {
    Tiler::new(budget).tile(target, pieces)
}
