/*
puzzles.rs

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

//! Puzzle generator.
//!
//! [`PuzzleGenerator::generate`] runs attempts with derived seeds until one of them produces a
//! valid puzzle. Attempts that placed every kind but failed validation go to a pending pool.
//! When the attempt budget is spent, the pending candidates get increasing amounts of solver
//! time, best candidates first:
//!
//! 1. their own solution path is checked again,
//! 2. the solver runs with the generation budget on each candidate,
//! 3. the solver runs with the interactive budget on each candidate,
//! 4. the solver runs with the fallback budget on the best candidate.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use thiserror::Error;

use super::attempt::{self, AttemptEnv, AttemptFailure};
use super::config::GeneratorConfig;
use super::pending::PendingPool;
use super::recent::RecentHistory;
use crate::grid::edges::{EdgeKey, EdgeSet};
use crate::grid::path::Path;
use crate::grid::point::{END, GridPoint, START};
use crate::puzzle::Puzzle;
use crate::solver::evaluation;
use crate::solver::path_solver::PathSolver;
use crate::symbols::kind::Kind;
use crate::symbols::target::{Symbols, Target};

/// Maximum number of requested kinds, gaps excluded.
pub const MAX_KINDS: usize = 4;

/// Offset between the seeds of two successive attempts.
const ATTEMPT_SEED_STEP: i64 = 7919;

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("the forced edges do not connect the start to the end")]
    UnreachableOverride,

    #[error("no path solves the forced symbols")]
    UnsolvableOverride,

    #[error("no puzzle found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Parts of the puzzle imposed by the caller.
///
/// With forced symbol targets, nothing is generated: the puzzle is built from the overrides and
/// the solver checks that it can be solved. Otherwise the forced edges, start, and end replace
/// the ones the generator would use.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PuzzleOverrides {
    pub forced_edge_keys: Option<Vec<EdgeKey>>,
    pub forced_start: Option<GridPoint>,
    pub forced_end: Option<GridPoint>,
    pub forced_symbol_targets: Option<BTreeMap<Kind, Vec<Target>>>,
}

/// Statistics of the last generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    /// Number of attempts run.
    pub attempts: usize,

    /// Number of candidates in the pending pool at the end of the attempts.
    pub pending: usize,

    /// Fallback tier that produced the puzzle, if any.
    pub fallback_tier: Option<usize>,

    /// Duration in seconds.
    pub duration: f32,
}

/// [`PuzzleGenerator`] object.
///
/// The generator remembers the path shapes and the puzzles it recently returned, and avoids
/// them in the next generations.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    pub config: GeneratorConfig,
    pub history: RecentHistory,
    pub stats: GenerationStats,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Seed of the given attempt.
fn attempt_seed(seed: i32, attempt: usize) -> u64 {
    (i64::from(seed) + attempt as i64 * ATTEMPT_SEED_STEP) as u64
}

/// Sort the kinds and drop the duplicates.
///
/// # Errors
///
/// Return [`GenerateError::InvalidRequest`] when no kind, or too many kinds, are requested.
fn normalize_kinds(kinds: &[Kind]) -> Result<Vec<Kind>, GenerateError> {
    let kinds: BTreeSet<Kind> = kinds.iter().copied().collect();
    if kinds.is_empty() {
        return Err(GenerateError::InvalidRequest("no kind requested".to_string()));
    }
    let count: usize = kinds.iter().filter(|k| **k != Kind::Gap).count();
    if count > MAX_KINDS {
        return Err(GenerateError::InvalidRequest(format!(
            "{count} kinds requested, at most {MAX_KINDS} are allowed besides gaps"
        )));
    }
    Ok(kinds.into_iter().collect())
}

impl PuzzleGenerator {
    /// Create a generator with an empty history.
    pub fn new(config: GeneratorConfig) -> Self {
        let history: RecentHistory = RecentHistory::new(config.recent_capacity);
        Self {
            config,
            history,
            stats: GenerationStats::default(),
        }
    }

    /// Generate a puzzle with the requested kinds.
    ///
    /// # Errors
    ///
    /// Return a [`GenerateError`] when the request or the overrides are invalid, or when no
    /// puzzle could be built.
    pub fn generate(
        &mut self,
        seed: i32,
        kinds: &[Kind],
        overrides: Option<&PuzzleOverrides>,
    ) -> Result<Puzzle, GenerateError> {
        let start_time: Instant = Instant::now();
        self.stats = GenerationStats::default();

        let no_overrides: PuzzleOverrides = PuzzleOverrides::default();
        let overrides: &PuzzleOverrides = overrides.unwrap_or(&no_overrides);
        let start: GridPoint = overrides.forced_start.unwrap_or(START);
        let end: GridPoint = overrides.forced_end.unwrap_or(END);
        if !start.in_bounds() || !end.in_bounds() || start == end {
            return Err(GenerateError::InvalidRequest(format!(
                "invalid start {start:?} or end {end:?}"
            )));
        }
        if let Some(edge) = overrides
            .forced_edge_keys
            .iter()
            .flatten()
            .find(|e| !e.is_on_board())
        {
            return Err(GenerateError::InvalidRequest(format!(
                "forced edge {edge:?} is not an edge of the board"
            )));
        }
        let forced_edges: Option<EdgeSet> =
            overrides.forced_edge_keys.as_deref().map(EdgeSet::from_keys);
        if !forced_edges
            .as_ref()
            .is_none_or(|edges| edges.has_path(start, end))
        {
            return Err(GenerateError::UnreachableOverride);
        }

        if let Some(targets) = &overrides.forced_symbol_targets {
            let edges: EdgeSet = forced_edges.unwrap_or_else(EdgeSet::full);
            let puzzle: Puzzle = self.solve_forced(edges, start, end, targets)?;
            self.stats.duration = start_time.elapsed().as_secs_f32();
            return Ok(puzzle);
        }

        let kinds: Vec<Kind> = normalize_kinds(kinds)?;
        let budget: usize = self.config.attempt_budget(&kinds);
        let mut pool: PendingPool = PendingPool::new(self.config.pending_capacity(&kinds));

        let env: AttemptEnv = AttemptEnv {
            config: &self.config,
            kinds: &kinds,
            forced_edges: forced_edges.as_ref(),
            start,
            end,
            avoid: &self.history.signatures,
        };

        let mut found: Option<Puzzle> = None;
        let mut attempts: usize = 0;
        for index in 0..budget {
            attempts += 1;
            match attempt::run(&env, index, attempt_seed(seed, index)) {
                Ok(state) => {
                    let puzzle: Puzzle = state.puzzle();
                    if self.history.puzzles.contains(&puzzle.key()) {
                        debug!("Attempt {index}: puzzle generated recently");
                        continue;
                    }
                    found = Some(puzzle);
                    break;
                }
                Err(AttemptFailure::Aborted { step, error }) => {
                    debug!("Attempt {index} aborted at {step:?}: {error}");
                }
                Err(AttemptFailure::Rejected { state, error }) => {
                    debug!("Attempt {index} rejected: {error}");
                    if state.puzzle().covers(&kinds) {
                        pool.push(&state, &kinds);
                    }
                }
            }
        }
        self.stats.attempts = attempts;
        self.stats.pending = pool.len();

        let puzzle: Puzzle = match found {
            Some(p) => p,
            None => match self.fallback(&pool, &kinds) {
                Some((tier, p)) => {
                    self.stats.fallback_tier = Some(tier);
                    p
                }
                None => return Err(GenerateError::Exhausted { attempts }),
            },
        };

        if let Some(hint) = &puzzle.solution_hint {
            self.history.signatures.push(hint.signature());
        }
        self.history.puzzles.push(puzzle.key());
        self.stats.duration = start_time.elapsed().as_secs_f32();
        info!(
            "Puzzle with {} symbols after {} attempts ({} pending, fallback tier {:?}) in {:.3}s",
            puzzle.symbols.len(),
            self.stats.attempts,
            self.stats.pending,
            self.stats.fallback_tier,
            self.stats.duration
        );
        Ok(puzzle)
    }

    /// Spend solver time on the pending candidates. Return the tier and the puzzle.
    ///
    /// Candidates missing one of the kinds are never returned.
    fn fallback(&self, pool: &PendingPool, kinds: &[Kind]) -> Option<(usize, Puzzle)> {
        let candidates: Vec<&Puzzle> = pool
            .iter()
            .map(|c| &c.puzzle)
            .filter(|p| p.covers(kinds))
            .collect();
        let best: &Puzzle = candidates.first().copied()?;
        let limits = &self.config.limits;

        debug!(
            "Fallback 1: checking the hints of {} candidates",
            candidates.len()
        );
        for puzzle in candidates.iter().copied() {
            if let Some(hint) = &puzzle.solution_hint
                && evaluation::check_path_with(puzzle, hint, limits).ok
            {
                return Some((1, puzzle.clone()));
            }
        }

        let tiers: [(usize, usize); 2] = [
            (2, self.config.generation_budget(kinds)),
            (3, self.config.solver.interactive),
        ];
        for (tier, budget) in tiers {
            debug!("Fallback {tier}: solver budget {budget}");
            for puzzle in candidates.iter().copied() {
                if let Some(solved) = self.solved(puzzle, budget) {
                    return Some((tier, solved));
                }
            }
        }

        debug!("Fallback 4: solver budget {}", self.config.solver.fallback);
        self.solved(best, self.config.solver.fallback)
            .map(|p| (4, p))
    }

    /// Return the puzzle with a new solution path, if the solver finds one.
    fn solved(&self, puzzle: &Puzzle, budget: usize) -> Option<Puzzle> {
        let path: Path = PathSolver::new(puzzle, budget)
            .with_limits(self.config.limits)
            .solve()?;
        let mut solved: Puzzle = puzzle.clone();
        solved.solution_hint = Some(path);
        Some(solved)
    }

    /// Build the puzzle from forced targets, and check that it has a solution.
    fn solve_forced(
        &self,
        edges: EdgeSet,
        start: GridPoint,
        end: GridPoint,
        targets: &BTreeMap<Kind, Vec<Target>>,
    ) -> Result<Puzzle, GenerateError> {
        if let Some(target) = targets.values().flatten().find(|t| !t.is_on_board()) {
            return Err(GenerateError::InvalidRequest(format!(
                "forced symbol {target:?} is not on the board"
            )));
        }
        let mut symbols: Symbols = Symbols::new();
        for (kind, t) in targets {
            symbols.extend(*kind, t.clone());
        }
        let puzzle: Puzzle = Puzzle::new(edges, start, end, symbols);

        self.solved(&puzzle, self.config.solver.interactive)
            .or_else(|| self.solved(&puzzle, self.config.solver.fallback))
            .ok_or(GenerateError::UnsolvableOverride)
    }
}

/// Generate a puzzle with the requested kinds, using the default settings and no history.
///
/// The same seed and kinds always give the same puzzle.
///
/// # Errors
///
/// Return a [`GenerateError`] when the request or the overrides are invalid, or when no
/// puzzle could be built.
pub fn generate_puzzle(
    seed: i32,
    kinds: &[Kind],
    overrides: Option<&PuzzleOverrides>,
) -> Result<Puzzle, GenerateError> {
    PuzzleGenerator::new(GeneratorConfig::default()).generate(seed, kinds, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::attempt::AttemptState;
    use crate::grid::point::Cell;
    use crate::solver::evaluation::{EvaluationLimits, check_path};
    use crate::symbols::color::SymbolColor;
    use crate::symbols::placement::{Placement, PlacementContext};
    use crate::symbols::target::HexagonSite;

    #[test]
    fn invalid_requests() {
        assert!(matches!(
            generate_puzzle(1, &[], None),
            Err(GenerateError::InvalidRequest(_))
        ));
        assert!(matches!(
            generate_puzzle(
                1,
                &[
                    Kind::Dots,
                    Kind::Stars,
                    Kind::Arrows,
                    Kind::Hexagon,
                    Kind::Triangles
                ],
                None
            ),
            Err(GenerateError::InvalidRequest(_))
        ));
        let overrides = PuzzleOverrides {
            forced_start: Some(GridPoint::new(4, 0)),
            ..Default::default()
        };
        assert!(matches!(
            generate_puzzle(1, &[Kind::Dots], Some(&overrides)),
            Err(GenerateError::InvalidRequest(_))
        ));
    }

    #[test]
    fn duplicate_kinds_are_merged() {
        assert_eq!(
            normalize_kinds(&[Kind::Stars, Kind::Dots, Kind::Stars, Kind::Gap]),
            Ok(vec![Kind::Gap, Kind::Dots, Kind::Stars])
        );
    }

    #[test]
    fn unreachable_forced_edges() {
        let keys: Vec<EdgeKey> = EdgeSet::full()
            .iter()
            .filter(|e| !e.touches(END))
            .copied()
            .collect();
        let overrides = PuzzleOverrides {
            forced_edge_keys: Some(keys),
            ..Default::default()
        };
        assert_eq!(
            generate_puzzle(1, &[Kind::Dots], Some(&overrides)),
            Err(GenerateError::UnreachableOverride)
        );
    }

    #[test]
    fn forced_targets_are_solved() {
        let mut targets = BTreeMap::new();
        targets.insert(
            Kind::Triangles,
            vec![Target::Count {
                cell: Cell::new(0, 0),
                color: SymbolColor::White,
                count: 2,
            }],
        );
        let overrides = PuzzleOverrides {
            forced_symbol_targets: Some(targets.clone()),
            ..Default::default()
        };
        let puzzle = generate_puzzle(1, &[], Some(&overrides)).unwrap();
        assert_eq!(puzzle.targets(Kind::Triangles), targets[&Kind::Triangles]);
        let hint = puzzle.solution_hint.clone().unwrap();
        assert!(check_path(&puzzle, &hint).ok);

        targets.insert(
            Kind::Triangles,
            vec![Target::Count {
                cell: Cell::new(1, 1),
                color: SymbolColor::White,
                count: 4,
            }],
        );
        let overrides = PuzzleOverrides {
            forced_symbol_targets: Some(targets),
            ..Default::default()
        };
        assert_eq!(
            generate_puzzle(1, &[], Some(&overrides)),
            Err(GenerateError::UnsolvableOverride)
        );
    }

    #[test]
    fn no_attempts_is_exhaustion() {
        let mut config = GeneratorConfig::default();
        config.attempts.max = 0;
        let mut generator = PuzzleGenerator::new(config);
        assert_eq!(
            generator.generate(1, &[Kind::Dots], None),
            Err(GenerateError::Exhausted { attempts: 0 })
        );
    }

    #[test]
    fn requested_gaps_are_never_dropped() {
        // Every edge is forced, so no gap can be placed
        let keys: Vec<EdgeKey> = EdgeSet::full().iter().copied().collect();
        let overrides = PuzzleOverrides {
            forced_edge_keys: Some(keys),
            ..Default::default()
        };
        assert!(matches!(
            generate_puzzle(1, &[Kind::Gap, Kind::Triangles], Some(&overrides)),
            Err(GenerateError::Exhausted { .. })
        ));
    }

    #[test]
    fn forced_geometry_must_be_on_the_board() {
        let targets_at = |target: Target| {
            let mut targets = BTreeMap::new();
            targets.insert(Kind::ColorSquares, vec![target]);
            PuzzleOverrides {
                forced_symbol_targets: Some(targets),
                ..Default::default()
            }
        };
        for cell in [Cell::new(0, 4), Cell::new(7, 0), Cell::new(-1, 2)] {
            let overrides = targets_at(Target::Cell {
                cell,
                color: SymbolColor::White,
            });
            assert!(matches!(
                generate_puzzle(1, &[], Some(&overrides)),
                Err(GenerateError::InvalidRequest(_))
            ));
        }
        let overrides = targets_at(Target::Hexagon {
            site: HexagonSite::Node(GridPoint::new(5, 5)),
        });
        assert!(matches!(
            generate_puzzle(1, &[], Some(&overrides)),
            Err(GenerateError::InvalidRequest(_))
        ));

        let overrides = PuzzleOverrides {
            forced_edge_keys: Some(vec![EdgeKey::new(
                GridPoint::new(0, 0),
                GridPoint::new(2, 0),
            )]),
            ..Default::default()
        };
        assert!(matches!(
            generate_puzzle(1, &[Kind::Dots], Some(&overrides)),
            Err(GenerateError::InvalidRequest(_))
        ));
    }

    /// Rejected attempt with a single gap and the given hint.
    fn candidate(kinds: &[Kind], hint: Option<Path>) -> AttemptState {
        let gap = EdgeKey::new(GridPoint::new(2, 2), GridPoint::new(3, 2));
        let mut edges = EdgeSet::full();
        edges.remove(&gap);
        let mut context = PlacementContext::new(
            edges,
            START,
            END,
            kinds,
            EvaluationLimits::default(),
        )
        .apply(Kind::Gap, Placement::new(vec![Target::Gap { edge: gap }]));
        context.path = hint;
        AttemptState { index: 0, context }
    }

    fn pool_of(state: &AttemptState, kinds: &[Kind]) -> PendingPool {
        let mut pool = PendingPool::new(4);
        pool.push(state, kinds);
        pool
    }

    #[test]
    fn fallback_tiers() {
        let kinds = [Kind::Gap];
        let generator = PuzzleGenerator::default();

        // Left and top borders
        let points: Vec<GridPoint> = [
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
        ]
        .iter()
        .map(|(x, y)| GridPoint::new(*x, *y))
        .collect();
        let pool = pool_of(&candidate(&kinds, Some(Path::from_points(&points))), &kinds);
        let (tier, _) = generator.fallback(&pool, &kinds).unwrap();
        assert_eq!(tier, 1);

        // Without a hint, the solver with the generation budget finds a path
        let pool = pool_of(&candidate(&kinds, None), &kinds);
        let (tier, puzzle) = generator.fallback(&pool, &kinds).unwrap();
        assert_eq!(tier, 2);
        let hint = puzzle.solution_hint.clone().unwrap();
        assert!(check_path(&puzzle, &hint).ok);

        // Only the largest budget is left
        let mut config = GeneratorConfig::default();
        config.solver.generation_min = 0;
        config.solver.generation_max = 0;
        config.solver.interactive = 0;
        let generator = PuzzleGenerator::new(config);
        let (tier, puzzle) = generator.fallback(&pool, &kinds).unwrap();
        assert_eq!(tier, 4);
        let hint = puzzle.solution_hint.clone().unwrap();
        assert!(check_path(&puzzle, &hint).ok);
    }

    #[test]
    fn fallback_skips_candidates_missing_a_kind() {
        let kinds = [Kind::Gap, Kind::Triangles];
        let pool = pool_of(&candidate(&kinds, None), &kinds);
        assert_eq!(pool.len(), 1);
        assert!(PuzzleGenerator::default().fallback(&pool, &kinds).is_none());
    }

    #[test]
    fn generator_remembers_its_puzzles() {
        let mut generator = PuzzleGenerator::new(GeneratorConfig::default());
        let puzzle = generator.generate(5, &[Kind::Triangles], None).unwrap();
        assert!(generator.history.puzzles.contains(&puzzle.key()));
        assert_eq!(generator.history.signatures.len(), 1);
        assert!(generator.stats.attempts >= 1);
    }
}
