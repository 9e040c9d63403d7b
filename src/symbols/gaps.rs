/*
gaps.rs

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

//! Gaps: edges removed from the board.
//!
//! A gap does not test the path by itself. The edge is missing from the drawable edges, so a
//! valid path never goes through it. The rule still reports a gap whose edge is used, for paths
//! checked against other edge sets.

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use super::board::Board;
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::target::Target;
use crate::grid::edges::{EdgeKey, EdgeSet};

/// Minimum and maximum number of gaps.
const GAP_RANGE: (usize, usize) = (2, 4);

pub struct GapRule;

pub static GAPS: GapRule = GapRule;

impl SymbolRule for GapRule {
    fn kind(&self) -> Kind {
        Kind::Gap
    }

    /// Remove a few edges, keeping the end reachable from the start.
    ///
    /// When a solution path already exists, its edges are kept.
    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let wanted: usize = rng.random_range(GAP_RANGE.0..=GAP_RANGE.1);
        let mut edges: EdgeSet = state.edges.clone();
        let mut candidates: Vec<EdgeKey> = edges
            .iter()
            .filter(|e| match &state.path {
                Some(p) => !p.used_edges().contains(e),
                None => true,
            })
            .copied()
            .collect();
        candidates.shuffle(rng);

        let mut targets: Vec<Target> = Vec::new();
        for edge in candidates {
            if targets.len() == wanted {
                break;
            }
            edges.remove(&edge);
            if edges.has_path(state.start, state.end) {
                targets.push(Target::Gap { edge });
            } else {
                edges.insert(edge);
            }
        }

        if targets.is_empty() {
            return Err(PlacementError::NoRoom(Kind::Gap));
        }
        debug!("Removing {} edges", targets.len());
        Ok(Placement::new(targets))
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        board
            .targets(Kind::Gap)
            .filter(|(_, t)| match t {
                Target::Gap { edge } => board.is_used(edge),
                _ => false,
            })
            .map(|(i, _)| i)
            .collect()
    }
}
