/*
attempt.rs

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

//! One generation attempt.
//!
//! An attempt is a fixed list of steps: build the edges, find a solution path, place every
//! requested kind in [`Kind`] order, and validate. Each step takes the current
//! [`AttemptState`] and returns the next one, so the attempt is a fold over the steps. The first
//! failing step ends the attempt.

use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::GeneratorConfig;
use super::loopy_path::{self, LoopyOptions};
use super::random_path;
use super::recent::RecentCache;
use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::GridPoint;
use crate::puzzle::Puzzle;
use crate::solver::evaluation;
use crate::symbols::kind::Kind;
use crate::symbols::placement::{Placement, PlacementContext, PlacementError};
use crate::symbols::registry;
use crate::symbols::target::Target;

/// Step of an attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    BuildEdges,
    FindPath,
    PlaceKind(Kind),
    Validate,
}

/// Everything an attempt reads but never changes.
pub struct AttemptEnv<'a> {
    pub config: &'a GeneratorConfig,

    /// Requested kinds, without duplicates, in [`Kind`] order.
    pub kinds: &'a [Kind],

    /// Edges to use instead of generated gaps.
    pub forced_edges: Option<&'a EdgeSet>,

    pub start: GridPoint,
    pub end: GridPoint,

    /// Path signatures to avoid.
    pub avoid: &'a RecentCache,
}

impl AttemptEnv<'_> {
    /// Number of requested kinds, gaps excluded.
    pub fn kind_count(&self) -> usize {
        self.kinds.iter().filter(|k| **k != Kind::Gap).count()
    }
}

/// Ways an attempt can end without a puzzle.
#[derive(Debug)]
pub enum AttemptFailure {
    /// A step could not complete. Nothing is kept.
    Aborted { step: Step, error: PlacementError },

    /// Every kind was placed, but the result failed validation.
    Rejected {
        state: Box<AttemptState>,
        error: PlacementError,
    },
}

/// Puzzle under construction.
#[derive(Debug, Clone)]
pub struct AttemptState {
    /// Attempt number.
    pub index: usize,

    pub context: PlacementContext,
}

/// Steps of an attempt for the kinds.
pub fn plan(kinds: &[Kind]) -> Vec<Step> {
    let mut steps: Vec<Step> = vec![Step::BuildEdges, Step::FindPath];
    steps.extend(
        kinds
            .iter()
            .filter(|k| **k != Kind::Gap)
            .map(|k| Step::PlaceKind(*k)),
    );
    steps.push(Step::Validate);
    steps
}

impl AttemptState {
    pub fn new(env: &AttemptEnv, index: usize) -> Self {
        let edges: EdgeSet = env.forced_edges.cloned().unwrap_or_else(EdgeSet::full);
        Self {
            index,
            context: PlacementContext::new(
                edges,
                env.start,
                env.end,
                env.kinds,
                env.config.limits,
            ),
        }
    }

    /// Run one step.
    ///
    /// # Errors
    ///
    /// Return [`AttemptFailure::Aborted`] when the step cannot complete, and
    /// [`AttemptFailure::Rejected`] when the validation fails.
    pub fn advance(
        self,
        step: Step,
        env: &AttemptEnv,
        rng: &mut StdRng,
    ) -> Result<AttemptState, AttemptFailure> {
        trace!("Attempt {}: {:?}", self.index, step);
        let aborted = |error: PlacementError| AttemptFailure::Aborted { step, error };
        match step {
            Step::BuildEdges => self.build_edges(env, rng).map_err(aborted),
            Step::FindPath => self.find_path(env, rng).map_err(aborted),
            Step::PlaceKind(kind) => {
                let placement: Placement = registry::rule(kind)
                    .generate(&self.context, rng)
                    .map_err(aborted)?;
                Ok(Self {
                    context: self.context.apply(kind, placement),
                    ..self
                })
            }
            Step::Validate => match self.validate(env) {
                Ok(()) => Ok(self),
                Err(error) => Err(AttemptFailure::Rejected {
                    state: Box::new(self),
                    error,
                }),
            },
        }
    }

    /// Remove a few edges, or record the missing forced edges as gaps.
    fn build_edges(self, env: &AttemptEnv, rng: &mut StdRng) -> Result<Self, PlacementError> {
        let requested: bool = env.kinds.contains(&Kind::Gap);

        if env.forced_edges.is_some() {
            let gaps: Vec<Target> = self
                .context
                .edges
                .missing()
                .into_iter()
                .map(|edge| Target::Gap { edge })
                .collect();
            if gaps.is_empty() {
                return if requested {
                    Err(PlacementError::NoRoom(Kind::Gap))
                } else {
                    Ok(self)
                };
            }
            // The edges are already missing; only the symbols are added
            let context: PlacementContext = self.context.apply(Kind::Gap, Placement::new(gaps));
            return Ok(Self { context, ..self });
        }

        if !requested && !env.config.implicit_gaps {
            return Ok(self);
        }
        match registry::rule(Kind::Gap).generate(&self.context, rng) {
            Ok(placement) => Ok(Self {
                context: self.context.apply(Kind::Gap, placement),
                ..self
            }),
            Err(e) if requested => Err(e),
            Err(e) => {
                debug!("No implicit gaps: {e}");
                Ok(self)
            }
        }
    }

    /// Choose the solution path: a winding one if possible, any path otherwise.
    fn find_path(self, env: &AttemptEnv, rng: &mut StdRng) -> Result<Self, PlacementError> {
        let options: LoopyOptions = LoopyOptions {
            min_length: env
                .config
                .loopy
                .min_length
                .max(env.config.wildness.min_length(env.kind_count())),
            ..env.config.loopy.clone()
        };
        let edges: &EdgeSet = &self.context.edges;
        let path: Path = loopy_path::find_best_loopy_path_by_regions(
            edges, env.start, env.end, rng, &options, env.avoid,
        )
        .or_else(|| random_path::find_random_path(edges, env.start, env.end, rng))
        .ok_or(PlacementError::NoPath)?;

        let mut context: PlacementContext = self.context;
        context.path = Some(path);
        Ok(Self { context, ..self })
    }

    /// Check that the attempt produced a valid puzzle.
    fn validate(&self, env: &AttemptEnv) -> Result<(), PlacementError> {
        if let Some(kind) = env
            .kinds
            .iter()
            .find(|k| self.context.symbols.get(**k).is_empty())
        {
            return Err(PlacementError::Rejected(format!("no {kind} placed")));
        }
        let path: &Path = self.context.path()?;
        if !evaluation::check_path_with(&self.puzzle(), path, &env.config.limits).ok {
            return Err(PlacementError::Rejected(
                "the solution path fails the symbols".to_string(),
            ));
        }
        if !loopy_path::meets_wildness_target(path, env.kind_count(), &env.config.wildness) {
            return Err(PlacementError::Rejected(format!(
                "path too plain ({} edges, {} turns)",
                path.edge_count(),
                path.turns()
            )));
        }
        Ok(())
    }

    /// The puzzle built so far, with the solution path as a hint.
    pub fn puzzle(&self) -> Puzzle {
        let mut puzzle: Puzzle = Puzzle::new(
            self.context.edges.clone(),
            self.context.start,
            self.context.end,
            self.context.symbols.clone(),
        );
        puzzle.solution_hint = self.context.path.clone();
        puzzle
    }
}

/// Run a complete attempt with its own random generator.
///
/// # Errors
///
/// Return the failure of the first step that did not complete.
pub fn run(env: &AttemptEnv, index: usize, seed: u64) -> Result<AttemptState, AttemptFailure> {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    plan(env.kinds)
        .into_iter()
        .try_fold(AttemptState::new(env, index), |state, step| {
            state.advance(step, env, &mut rng)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::point::{END, START};

    fn env<'a>(
        config: &'a GeneratorConfig,
        kinds: &'a [Kind],
        avoid: &'a RecentCache,
    ) -> AttemptEnv<'a> {
        AttemptEnv {
            config,
            kinds,
            forced_edges: None,
            start: START,
            end: END,
            avoid,
        }
    }

    #[test]
    fn plan_follows_the_kinds() {
        let steps = plan(&[Kind::Gap, Kind::Triangles, Kind::Stars]);
        assert_eq!(
            steps,
            vec![
                Step::BuildEdges,
                Step::FindPath,
                Step::PlaceKind(Kind::Triangles),
                Step::PlaceKind(Kind::Stars),
                Step::Validate
            ]
        );
    }

    /// Puzzle of an attempt that placed every kind.
    fn placed(result: Result<AttemptState, AttemptFailure>) -> Option<Puzzle> {
        match result {
            Ok(state) => Some(state.puzzle()),
            Err(AttemptFailure::Rejected { state, .. }) => Some(state.puzzle()),
            Err(AttemptFailure::Aborted { .. }) => None,
        }
    }

    #[test]
    fn attempts_are_deterministic() {
        let config = GeneratorConfig::default();
        let avoid = RecentCache::new(0);
        let kinds = [Kind::Dots];
        let env = env(&config, &kinds, &avoid);
        for seed in [1, 42, 7919] {
            assert_eq!(placed(run(&env, 0, seed)), placed(run(&env, 0, seed)));
        }
    }

    #[test]
    fn gaps_only_keep_the_board_solvable() {
        let config = GeneratorConfig::default();
        let avoid = RecentCache::new(0);
        let kinds = [Kind::Gap];
        let env = env(&config, &kinds, &avoid);
        for seed in 0..10 {
            let puzzle = placed(run(&env, 0, seed)).unwrap();
            assert!(!puzzle.edges.is_full());
            assert!(puzzle.is_reachable());
            let hint = puzzle.solution_hint.as_ref().unwrap();
            assert!(hint.validate(&puzzle.edges, START, END).is_ok());
        }
    }

    #[test]
    fn forced_edges_become_gaps() {
        let config = GeneratorConfig::default();
        let avoid = RecentCache::new(0);
        let kinds = [Kind::Gap];
        let mut edges = EdgeSet::full();
        let removed = edges.iter().next().copied().unwrap();
        edges.remove(&removed);
        let env = AttemptEnv {
            forced_edges: Some(&edges),
            ..env(&config, &kinds, &avoid)
        };
        let state = AttemptState::new(&env, 0)
            .advance(Step::BuildEdges, &env, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(
            state.context.symbols.get(Kind::Gap),
            &[Target::Gap { edge: removed }]
        );
        assert_eq!(state.context.edges, edges);
    }

    #[test]
    fn requested_gaps_need_a_missing_forced_edge() {
        let config = GeneratorConfig::default();
        let avoid = RecentCache::new(0);
        let kinds = [Kind::Gap, Kind::Triangles];
        let edges = EdgeSet::full();
        let env = AttemptEnv {
            forced_edges: Some(&edges),
            ..env(&config, &kinds, &avoid)
        };
        let result = AttemptState::new(&env, 0).advance(
            Step::BuildEdges,
            &env,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(AttemptFailure::Aborted {
                step: Step::BuildEdges,
                error: PlacementError::NoRoom(Kind::Gap)
            })
        ));

        // Without a gap request, the full board is fine
        let kinds = [Kind::Triangles];
        let env = AttemptEnv {
            forced_edges: Some(&edges),
            ..self::env(&config, &kinds, &avoid)
        };
        assert!(
            AttemptState::new(&env, 0)
                .advance(Step::BuildEdges, &env, &mut StdRng::seed_from_u64(1))
                .is_ok()
        );
    }
}
