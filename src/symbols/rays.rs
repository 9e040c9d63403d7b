/*
rays.rs

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

//! Directional symbols: arrows, chevrons, droplets, cardinals, and sentinels.
//!
//! These symbols look from their cell in a direction and count what the path puts in the way.
//!
//! * Arrows count the used edges crossed by a ray going to the edge of the board. The side of
//!   the last cell, on the border, counts too.
//! * Chevrons count the used edges that lie entirely ahead of the cell.
//! * Droplets count the used edges that water running from the cell crosses before it spills
//!   off the board. The border does not hold water, so its sides never count.
//! * Sentinels count the used edges crossed by three rays: one ahead and one on each side.
//! * Cardinals require the path to block all four directions. Their direction is not used and
//!   their count is always four.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use super::board::Board;
use super::color::Palette;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::Target;
use crate::grid::edges::EdgeKey;
use crate::grid::path::Path;
use crate::grid::point::{Cell, Direction, GridPoint};
use crate::solver::evaluation::Snapshot;

/// Rule shared by the directional kinds.
pub struct RayRule {
    kind: Kind,
    measure: fn(&Board, Cell, Direction) -> usize,
    range: (usize, usize),

    /// Whether the symbol points in a direction. Undirected symbols are stored facing up.
    directed: bool,
}

pub static ARROWS: RayRule = RayRule {
    kind: Kind::Arrows,
    measure: crossings,
    range: (1, 4),
    directed: true,
};

pub static CHEVRONS: RayRule = RayRule {
    kind: Kind::Chevrons,
    measure: edges_ahead,
    range: (1, 12),
    directed: true,
};

pub static DROPLETS: RayRule = RayRule {
    kind: Kind::Droplets,
    measure: flow,
    range: (1, 3),
    directed: true,
};

pub static CARDINALS: RayRule = RayRule {
    kind: Kind::Cardinals,
    measure: blocked_directions,
    range: (4, 4),
    directed: false,
};

pub static SENTINELS: RayRule = RayRule {
    kind: Kind::Sentinels,
    measure: watched_crossings,
    range: (1, 9),
    directed: true,
};

fn crossings(board: &Board, cell: Cell, direction: Direction) -> usize {
    board.ray_crossings(cell, direction)
}

/// Whether the node lies in the half-plane beyond the given side of the cell, the side itself
/// included.
fn is_ahead(cell: Cell, direction: Direction, p: GridPoint) -> bool {
    match direction {
        Direction::Up => p.y <= cell.y,
        Direction::Right => p.x > cell.x,
        Direction::Down => p.y > cell.y,
        Direction::Left => p.x <= cell.x,
    }
}

fn edges_ahead(board: &Board, cell: Cell, direction: Direction) -> usize {
    board
        .used
        .iter()
        .filter(|e: &&EdgeKey| is_ahead(cell, direction, e.a) && is_ahead(cell, direction, e.b))
        .count()
}

fn flow(board: &Board, cell: Cell, direction: Direction) -> usize {
    board.inner_crossings(cell, direction)
}

fn blocked_directions(board: &Board, cell: Cell, _direction: Direction) -> usize {
    Direction::ALL
        .iter()
        .filter(|d| board.ray_crossings(cell, **d) > 0)
        .count()
}

fn watched_crossings(board: &Board, cell: Cell, direction: Direction) -> usize {
    let [left, right] = direction.sides();
    board.ray_crossings(cell, direction)
        + board.ray_crossings(cell, left)
        + board.ray_crossings(cell, right)
}

impl RayRule {
    /// Direction and count of a symbol in the cell, if one is worth showing.
    fn pick(&self, board: &Board, cell: Cell, rng: &mut StdRng) -> Option<(Direction, u8)> {
        let mut directions: Vec<Direction> = if self.directed {
            Direction::ALL.to_vec()
        } else {
            vec![Direction::Up]
        };
        directions.shuffle(rng);

        directions.into_iter().find_map(|d| {
            let m: usize = (self.measure)(board, cell, d);
            if m >= self.range.0 && m <= self.range.1 {
                u8::try_from(m).ok().map(|c| (d, c))
            } else {
                None
            }
        })
    }
}

impl SymbolRule for RayRule {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let snapshot: Snapshot = Snapshot::new(&state.symbols, path, state.limits.tiling_budget);
        let removed = BTreeSet::new();
        let board: Board = snapshot.board(&removed);

        let wanted: usize = rng.random_range(1..=2);
        let mut palette: Palette = state.palette.clone();
        let mut targets: Vec<Target> = Vec::new();
        for cell in state.free_cells(rng) {
            if targets.len() == wanted {
                break;
            }
            let Some((direction, count)) = self.pick(&board, cell, rng) else {
                continue;
            };
            let mut trial: Palette = palette.clone();
            let Some(color) = state.plain_color(&mut trial, rng) else {
                continue;
            };
            targets.push(Target::Ray {
                cell,
                color,
                direction,
                count,
            });
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
            .filter(|(_, t)| match t {
                Target::Ray {
                    cell,
                    direction,
                    count,
                    ..
                } => (self.measure)(board, *cell, *direction) != *count as usize,
                _ => true,
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::path::UsedEdges;
    use crate::grid::regions::{self, RegionMap};
    use crate::symbols::target::{SymbolRef, Symbols};

    /// Path going up the column x=2, then right along the top.
    fn column_path() -> Path {
        let points: Vec<GridPoint> = [
            (0, 4),
            (1, 4),
            (2, 4),
            (2, 3),
            (2, 2),
            (2, 1),
            (2, 0),
            (3, 0),
            (4, 0),
        ]
        .iter()
        .map(|(x, y)| GridPoint::new(*x, *y))
        .collect();
        Path::from_points(&points)
    }

    fn measure(rule: &RayRule, cell: Cell, direction: Direction) -> usize {
        let symbols = Symbols::new();
        let path = column_path();
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
        (rule.measure)(&board, cell, direction)
    }

    #[test]
    fn arrows_count_crossed_edges() {
        assert_eq!(measure(&ARROWS, Cell::new(0, 1), Direction::Right), 1);
        assert_eq!(measure(&ARROWS, Cell::new(0, 1), Direction::Left), 0);
        // Bottom border side of the last cell is used
        assert_eq!(measure(&ARROWS, Cell::new(0, 1), Direction::Down), 1);
        assert_eq!(measure(&ARROWS, Cell::new(3, 2), Direction::Up), 1);
    }

    #[test]
    fn chevrons_count_edges_ahead() {
        // From (1, 1) looking right: the 4 edges of the column and the 2 top edges
        assert_eq!(measure(&CHEVRONS, Cell::new(1, 1), Direction::Right), 6);
        // From (3, 3) looking down: the two bottom edges
        assert_eq!(measure(&CHEVRONS, Cell::new(3, 3), Direction::Down), 2);
        // Looking left, every used edge but the last one
        assert_eq!(measure(&CHEVRONS, Cell::new(3, 3), Direction::Left), 7);
    }

    #[test]
    fn droplets_skip_the_border() {
        assert_eq!(measure(&DROPLETS, Cell::new(0, 2), Direction::Right), 1);
        assert_eq!(measure(&DROPLETS, Cell::new(3, 3), Direction::Left), 1);
        // The used bottom and top border sides do not count, unlike for arrows
        assert_eq!(measure(&DROPLETS, Cell::new(0, 1), Direction::Down), 0);
        assert_eq!(measure(&DROPLETS, Cell::new(3, 2), Direction::Up), 0);
    }

    #[test]
    fn sentinels_look_three_ways() {
        // One edge ahead on the top border, one on the left, none on the right
        assert_eq!(measure(&SENTINELS, Cell::new(2, 3), Direction::Up), 2);
        // One edge ahead in the column, none above, one on the bottom border
        assert_eq!(measure(&SENTINELS, Cell::new(0, 0), Direction::Right), 2);
    }

    #[test]
    fn cardinals_need_four_blocked_rays() {
        assert_eq!(measure(&CARDINALS, Cell::new(0, 0), Direction::Up), 2);
        assert_eq!(measure(&CARDINALS, Cell::new(3, 1), Direction::Up), 2);
    }
}
