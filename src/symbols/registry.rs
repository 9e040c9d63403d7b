/*
registry.rs

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

//! Table of the symbol rules, one per kind.

use rand::rngs::StdRng;
use std::collections::BTreeSet;

use super::board::Board;
use super::kind::{KIND_COUNT, Kind};
use super::placement::{Placement, PlacementContext, PlacementError};
use super::{counting, gaps, hexagon, negator, polyominoes, rays, solitary, squares, stars};

/// Generator and checker of one symbol kind.
pub trait SymbolRule: Sync {
    fn kind(&self) -> Kind;

    /// Produce placements for the kind that the current solution path satisfies.
    ///
    /// # Errors
    ///
    /// Return a [`PlacementError`] when the kind cannot be placed on the current state. The
    /// generator then gives up on the attempt.
    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError>;

    /// Indexes of the symbols of the kind that the path violates.
    fn collect_failing(&self, board: &Board) -> BTreeSet<usize>;

    /// Whether the path satisfies every symbol of the kind.
    fn check(&self, board: &Board) -> bool {
        self.collect_failing(board).is_empty()
    }
}

/// The rules, in [`Kind`] order.
static RULES: [&dyn SymbolRule; KIND_COUNT] = [
    &gaps::GAPS,
    &solitary::CRYSTALS,
    &solitary::GHOSTS,
    &polyominoes::POLYOMINO,
    &polyominoes::ROTATED_POLYOMINO,
    &polyominoes::NEGATIVE_POLYOMINO,
    &polyominoes::ROTATED_NEGATIVE_POLYOMINO,
    &squares::COLOR_SQUARES,
    &counting::TRIANGLES,
    &counting::DOTS,
    &counting::DIAMONDS,
    &counting::TALLY_MARKS,
    &rays::ARROWS,
    &rays::CHEVRONS,
    &rays::DROPLETS,
    &rays::CARDINALS,
    &stars::STARS,
    &hexagon::HEXAGON,
    &rays::SENTINELS,
    &negator::NEGATOR,
];

/// Rule of the given kind.
pub fn rule(kind: Kind) -> &'static dyn SymbolRule {
    RULES[kind.rank()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_kind_order() {
        for kind in Kind::all() {
            assert_eq!(rule(kind).kind(), kind);
        }
    }
}
