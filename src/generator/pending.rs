/*
pending.rs

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

//! Attempts that placed every kind but failed validation.
//!
//! The generator keeps the best of them. When no attempt succeeds, it spends solver time on
//! these candidates instead of giving up.

use std::collections::BTreeSet;

use super::attempt::AttemptState;
use crate::puzzle::Puzzle;
use crate::symbols::kind::Kind;
use crate::symbols::shape::Shape;
use crate::symbols::target::Target;

/// Rejected attempt and its score.
#[derive(Debug, Clone)]
pub struct PendingCandidate {
    pub score: usize,

    /// Attempt number, to break ties in favor of the earliest attempt.
    pub attempt: usize,

    /// Puzzle of the attempt, with its solution path as a hint.
    pub puzzle: Puzzle,
}

/// Score of a rejected attempt.
///
/// Coverage of the requested kinds comes first, then the number of symbols, the number of
/// distinct polyomino shapes, and the length of the solution path.
pub fn score(state: &AttemptState, kinds: &[Kind]) -> usize {
    let symbols = &state.context.symbols;
    let coverage: usize = kinds.iter().filter(|k| symbols.has(**k)).count();
    let variety: usize = symbols
        .iter()
        .filter_map(|(_, t)| match t {
            Target::Shape { shape, .. } => Some(shape.canonical()),
            _ => None,
        })
        .collect::<BTreeSet<Shape>>()
        .len();
    let length: usize = state.context.path.as_ref().map_or(0, |p| p.edge_count());

    coverage * 100 + symbols.len() * 10 + variety * 4 + length
}

/// Best rejected attempts, highest score first.
#[derive(Debug, Clone, Default)]
pub struct PendingPool {
    capacity: usize,
    candidates: Vec<PendingCandidate>,
}

impl PendingPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            candidates: Vec::with_capacity(capacity + 1),
        }
    }

    /// Add a rejected attempt. The lowest-scored candidate is dropped when the pool is full.
    pub fn push(&mut self, state: &AttemptState, kinds: &[Kind]) {
        if self.capacity == 0 {
            return;
        }
        let candidate: PendingCandidate = PendingCandidate {
            score: score(state, kinds),
            attempt: state.index,
            puzzle: state.puzzle(),
        };
        let position: usize = self
            .candidates
            .iter()
            .position(|c| c.score < candidate.score)
            .unwrap_or(self.candidates.len());
        self.candidates.insert(position, candidate);
        self.candidates.truncate(self.capacity);
    }

    pub fn best(&self) -> Option<&PendingCandidate> {
        self.candidates.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingCandidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::edges::EdgeSet;
    use crate::grid::point::{Cell, END, START};
    use crate::solver::evaluation::EvaluationLimits;
    use crate::symbols::color::SymbolColor;
    use crate::symbols::placement::{Placement, PlacementContext};

    fn state(index: usize, squares: i32) -> AttemptState {
        let context = PlacementContext::new(
            EdgeSet::full(),
            START,
            END,
            &[Kind::ColorSquares],
            EvaluationLimits::default(),
        );
        let targets: Vec<Target> = (0..squares)
            .map(|x| Target::Cell {
                cell: Cell::new(x, 0),
                color: SymbolColor::White,
            })
            .collect();
        AttemptState {
            index,
            context: context.apply(Kind::ColorSquares, Placement::new(targets)),
        }
    }

    #[test]
    fn pool_keeps_the_best_candidates() {
        let kinds = [Kind::ColorSquares];
        let mut pool = PendingPool::new(2);
        pool.push(&state(0, 1), &kinds);
        pool.push(&state(1, 3), &kinds);
        pool.push(&state(2, 2), &kinds);
        pool.push(&state(3, 3), &kinds);

        let attempts: Vec<usize> = pool.iter().map(|c| c.attempt).collect();
        assert_eq!(attempts, vec![1, 3]);
        assert_eq!(pool.best().map(|c| c.score), Some(130));
    }

    #[test]
    fn missing_kinds_cost_the_most() {
        let kinds = [Kind::ColorSquares, Kind::Stars];
        assert_eq!(score(&state(0, 2), &kinds), 120);
        assert_eq!(score(&state(0, 0), &kinds), 0);
    }
}
