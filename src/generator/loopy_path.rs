/*
loopy_path.rs

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

//! Generate winding paths.
//!
//! A plain random path is often short and straight, which leaves few regions for the symbols.
//! This module grows many weighted random walks, scores each one by how winding it is, and picks
//! one of the best, skipping the shapes used recently.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::recent::RecentCache;
use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::{Direction, GridPoint};
use crate::grid::regions;

/// Weights of the wildness score.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct WildnessWeights {
    pub regions: f64,
    pub turns: f64,
    pub interior: f64,
    pub length: f64,

    /// Penalty for the longest straight run.
    pub straight: f64,
}

impl Default for WildnessWeights {
    fn default() -> Self {
        Self {
            regions: 3.0,
            turns: 2.0,
            interior: 1.0,
            length: 0.5,
            straight: 2.5,
        }
    }
}

impl WildnessWeights {
    /// Return a copy of the weights, each scaled by a random factor between 0.7 and 1.3.
    pub fn jittered(&self, rng: &mut StdRng) -> Self {
        let mut jitter = || rng.random_range(0.7..=1.3);
        Self {
            regions: self.regions * jitter(),
            turns: self.turns * jitter(),
            interior: self.interior * jitter(),
            length: self.length * jitter(),
            straight: self.straight * jitter(),
        }
    }

    /// Wildness score of the path.
    pub fn score(&self, path: &Path) -> f64 {
        let region_count: usize = regions::build_cell_regions(&path.used_edges()).count();
        region_count as f64 * self.regions
            + path.turns() as f64 * self.turns
            + path.interior_nodes() as f64 * self.interior
            + path.edge_count() as f64 * self.length
            - path.longest_straight_run() as f64 * self.straight
    }
}

/// Minimum shape of an accepted solution path, depending on the number of requested kinds.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WildnessProfile {
    pub base_turns: usize,
    pub turns_per_kind: usize,
    pub max_turns: usize,

    pub base_length: usize,
    pub length_per_kind: usize,
    pub max_length: usize,

    /// Longest straight run allowed, in edges.
    pub max_straight: usize,
}

impl Default for WildnessProfile {
    fn default() -> Self {
        Self {
            base_turns: 2,
            turns_per_kind: 1,
            max_turns: 6,
            base_length: 8,
            length_per_kind: 1,
            max_length: 12,
            max_straight: 3,
        }
    }
}

impl WildnessProfile {
    pub fn min_turns(&self, kind_count: usize) -> usize {
        (self.base_turns + self.turns_per_kind * kind_count).min(self.max_turns)
    }

    pub fn min_length(&self, kind_count: usize) -> usize {
        (self.base_length + self.length_per_kind * kind_count).min(self.max_length)
    }
}

/// Whether the path is winding enough for a puzzle with `kind_count` kinds.
pub fn meets_wildness_target(path: &Path, kind_count: usize, profile: &WildnessProfile) -> bool {
    path.turns() >= profile.min_turns(kind_count)
        && path.edge_count() >= profile.min_length(kind_count)
        && path.longest_straight_run() <= profile.max_straight
}

/// Grow a self-avoiding walk from `start` to `end`.
///
/// The walk prefers turns and interior nodes. It never steps into a node from which `end`
/// cannot be reached anymore, and it steps into `end` as soon as the walk has at least
/// `min_length` edges. Return `None` if the walk gets stuck.
pub fn build_loopy_path(
    edges: &EdgeSet,
    start: GridPoint,
    end: GridPoint,
    rng: &mut StdRng,
    min_length: usize,
) -> Option<Path> {
    let mut path: Path = Path::new();
    path.push(start);
    let mut visited: BTreeSet<GridPoint> = BTreeSet::from([start]);
    let mut heading: Option<Direction> = None;

    while let Some(current) = path.get_last() {
        if current == end {
            return Some(path);
        }

        let neighbors: Vec<GridPoint> = edges
            .neighbors(current)
            .into_iter()
            .filter(|p| !visited.contains(p))
            .filter(|p| *p == end || edges.reachable_from(*p, &visited).contains(&end))
            .collect();
        if neighbors.contains(&end) && (path.edge_count() + 1 >= min_length || neighbors.len() == 1)
        {
            path.push(end);
            continue;
        }

        let choices: Vec<GridPoint> = neighbors.into_iter().filter(|p| *p != end).collect();
        let next: GridPoint = *choices
            .choose_weighted(rng, |p| {
                let mut weight: f64 = 1.0;
                if heading.is_some_and(|h| Direction::between(current, *p) != Some(h)) {
                    weight += 1.5;
                }
                if !p.on_border() {
                    weight += 1.0;
                }
                weight
            })
            .ok()?;

        heading = Direction::between(current, next);
        visited.insert(next);
        path.push(next);
    }
    None
}

/// Settings of [`find_best_loopy_path_by_regions`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoopyOptions {
    /// Number of walks to grow.
    pub attempts: usize,

    pub min_length: usize,
    pub weights: WildnessWeights,

    /// Candidates within this distance of the best score are kept.
    pub score_window: f64,

    /// Maximum number of candidates to pick from.
    pub keep: usize,
}

impl Default for LoopyOptions {
    fn default() -> Self {
        Self {
            attempts: 40,
            min_length: 10,
            weights: WildnessWeights::default(),
            score_window: 6.0,
            keep: 5,
        }
    }
}

/// Return one of the most winding paths found among `options.attempts` walks.
///
/// The weights are jittered from `rng`. Walks are deduplicated by signature, and the paths
/// whose signature is in `avoid` are only used when nothing else is left.
pub fn find_best_loopy_path_by_regions(
    edges: &EdgeSet,
    start: GridPoint,
    end: GridPoint,
    rng: &mut StdRng,
    options: &LoopyOptions,
    avoid: &RecentCache,
) -> Option<Path> {
    let weights: WildnessWeights = options.weights.jittered(rng);

    // Best score for each distinct signature
    let mut candidates: BTreeMap<String, (f64, Path)> = BTreeMap::new();
    for _ in 0..options.attempts {
        let Some(path) = build_loopy_path(edges, start, end, rng, options.min_length) else {
            continue;
        };
        let score: f64 = weights.score(&path);
        let signature: String = path.signature();
        if candidates.get(&signature).is_none_or(|(s, _)| score > *s) {
            candidates.insert(signature, (score, path));
        }
    }

    let best: f64 = candidates
        .values()
        .map(|(s, _)| *s)
        .max_by(|a, b| a.total_cmp(b))?;
    let floor: f64 = best - options.score_window;

    let mut shortlist: Vec<(&String, f64, &Path)> = candidates
        .iter()
        .filter(|(_, (s, _))| *s >= floor)
        .map(|(sig, (s, p))| (sig, *s, p))
        .collect();
    shortlist.sort_by(|a, b| b.1.total_cmp(&a.1));
    shortlist.truncate(options.keep.max(1));

    let fresh: Vec<(&String, f64, &Path)> = shortlist
        .iter()
        .filter(|(sig, _, _)| !avoid.contains(sig))
        .copied()
        .collect();
    let pool = if fresh.is_empty() { shortlist } else { fresh };

    if log_enabled!(Level::Debug) {
        debug!(
            "Loopy paths: {} distinct, best score {:.1}, picking among:",
            candidates.len(),
            best
        );
        for (sig, score, _) in &pool {
            debug!("  {score:6.1}  {sig}");
        }
    }

    pool.choose_weighted(rng, |(_, s, _)| s - floor + 0.1)
        .ok()
        .map(|(_, _, p)| (*p).clone())
}
