/*
path_solver.rs

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

//! Find a path that solves a puzzle.
//!
//! The solver runs a depth-first search from the starting node. At each node it tries the
//! neighbors closest to the ending node first, and it skips the neighbors from which the ending
//! node cannot be reached anymore. Complete paths are checked against every symbol. The number
//! of search nodes is bounded; once the budget is spent the search stops.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::evaluation::{self, EvaluationLimits};
use crate::grid::path::Path;
use crate::grid::point::GridPoint;
use crate::puzzle::Puzzle;

/// Search budget for interactive solving.
pub const INTERACTIVE_BUDGET: usize = 12_000;

/// Search budget used when the interactive budget is not enough.
pub const FALLBACK_BUDGET: usize = 80_000;

/// Which solution the solver returns.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolveMode {
    /// The first path found.
    #[default]
    First,

    /// The shortest path found within the budget, then the one with the fewest turns.
    Simplest,
}

/// Bounded depth-first path solver.
pub struct PathSolver<'a> {
    puzzle: &'a Puzzle,
    limits: EvaluationLimits,
    mode: SolveMode,
    budget: usize,

    /// Number of search nodes expanded so far.
    pub visits: usize,

    /// Whether the budget ran out.
    pub exhausted: bool,

    best: Option<Path>,
}

impl<'a> PathSolver<'a> {
    pub fn new(puzzle: &'a Puzzle, budget: usize) -> Self {
        Self {
            puzzle,
            limits: EvaluationLimits::default(),
            mode: SolveMode::First,
            budget,
            visits: 0,
            exhausted: false,
            best: None,
        }
    }

    pub fn with_mode(mut self, mode: SolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: EvaluationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run the search.
    ///
    /// In [`SolveMode::First`] mode, return `None` when the budget runs out before a solution
    /// is found. In [`SolveMode::Simplest`] mode, return the best solution found before the
    /// budget runs out.
    pub fn solve(&mut self) -> Option<Path> {
        let mut path: Path = Path::new();
        path.push(self.puzzle.start);
        self.visit(&mut path);

        debug!(
            "Solver: {} visits, {}",
            self.visits,
            match &self.best {
                Some(p) => format!("solution of {} edges", p.edge_count()),
                None => "no solution".to_string(),
            }
        );
        self.best.take()
    }

    /// Whether `candidate` is a better solution than `current`.
    fn is_simpler(candidate: &Path, current: &Path) -> bool {
        (candidate.edge_count(), candidate.turns()) < (current.edge_count(), current.turns())
    }

    /// Explore from the last node of the path. Return `true` to stop the search.
    fn visit(&mut self, path: &mut Path) -> bool {
        self.visits += 1;
        if self.visits > self.budget {
            self.exhausted = true;
            return true;
        }
        let Some(current) = path.get_last() else {
            return true;
        };

        if current == self.puzzle.end {
            if evaluation::evaluate_symbols(&self.puzzle.symbols, path, &self.limits).ok {
                match self.mode {
                    SolveMode::First => {
                        self.best = Some(path.clone());
                        return true;
                    }
                    SolveMode::Simplest => {
                        if self.best.as_ref().is_none_or(|b| Self::is_simpler(path, b)) {
                            self.best = Some(path.clone());
                        }
                    }
                }
            }
            return false;
        }

        // No shorter solution down this branch
        if let Some(b) = &self.best
            && path.edge_count() + current.manhattan(self.puzzle.end) as usize > b.edge_count()
        {
            return false;
        }

        let mut next: Vec<GridPoint> = self
            .puzzle
            .edges
            .neighbors(current)
            .into_iter()
            .filter(|p| !path.contains(*p))
            .collect();
        next.sort_by_key(|p| p.manhattan(self.puzzle.end));

        let visited: BTreeSet<GridPoint> = path.get().iter().copied().collect();
        for n in next {
            if !self
                .puzzle
                .edges
                .reachable_from(n, &visited)
                .contains(&self.puzzle.end)
            {
                continue;
            }
            path.push(n);
            let stop: bool = self.visit(path);
            path.pop();
            if stop {
                return true;
            }
        }
        false
    }
}

/// Find a path that solves the puzzle.
///
/// With an explicit budget, run one search with that budget. Otherwise run a search with the
/// interactive budget, then with the larger fallback budget.
pub fn solve(puzzle: &Puzzle, budget: Option<usize>) -> Option<Path> {
    match budget {
        Some(b) => PathSolver::new(puzzle, b).solve(),
        None => PathSolver::new(puzzle, INTERACTIVE_BUDGET)
            .solve()
            .or_else(|| PathSolver::new(puzzle, FALLBACK_BUDGET).solve()),
    }
}
