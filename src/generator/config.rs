/*
config.rs

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

//! Generator settings.
//!
//! All the values are tuning knobs. [`GeneratorConfig::default`] gives the settings used by
//! [`crate::generate_puzzle`]; the command-line tool can load other values from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::loopy_path::{LoopyOptions, WildnessProfile};
use crate::solver::evaluation::EvaluationLimits;
use crate::solver::path_solver::{FALLBACK_BUDGET, INTERACTIVE_BUDGET};
use crate::symbols::kind::Kind;

/// Errors while loading a settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Read and parse a JSON file.
///
/// # Errors
///
/// Return [`ConfigError`] when the file cannot be read or is not valid.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text: String = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Number of generation attempts, scaled by the number of kinds.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AttemptBudget {
    pub base: usize,
    pub per_kind: usize,

    /// Added when a heavy kind is requested.
    pub heavy_bonus: usize,
    pub max: usize,
}

impl Default for AttemptBudget {
    fn default() -> Self {
        Self {
            base: 110,
            per_kind: 30,
            heavy_bonus: 40,
            max: 260,
        }
    }
}

/// Size of the pool of rejected attempts kept for the fallback.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PendingBounds {
    pub base: usize,
    pub per_kind: usize,
    pub max: usize,
}

impl Default for PendingBounds {
    fn default() -> Self {
        Self {
            base: 6,
            per_kind: 2,
            max: 12,
        }
    }
}

/// Visit budgets of the path solver.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SolverBudgets {
    /// Budget used on the pending attempts, for one kind.
    pub generation_min: usize,

    /// Budget used on the pending attempts, for four kinds.
    pub generation_max: usize,

    pub interactive: usize,
    pub fallback: usize,
}

impl Default for SolverBudgets {
    fn default() -> Self {
        Self {
            generation_min: 1_400,
            generation_max: 2_600,
            interactive: INTERACTIVE_BUDGET,
            fallback: FALLBACK_BUDGET,
        }
    }
}

/// Settings of the puzzle generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub attempts: AttemptBudget,
    pub pending: PendingBounds,
    pub loopy: LoopyOptions,
    pub wildness: WildnessProfile,
    pub solver: SolverBudgets,
    pub limits: EvaluationLimits,

    /// Number of path signatures and puzzle keys remembered by a generator.
    pub recent_capacity: usize,

    /// Whether to remove a few edges even when gaps are not requested.
    pub implicit_gaps: bool,
}

/// Number of kinds that count toward the budgets. Gaps are cheap and do not count.
fn weight(kinds: &[Kind]) -> usize {
    kinds.iter().filter(|k| **k != Kind::Gap).count().max(1)
}

impl GeneratorConfig {
    /// Load the settings from a JSON file. Missing fields keep their default value.
    ///
    /// # Errors
    ///
    /// Return [`ConfigError`] when the file cannot be read or is not valid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Number of attempts for the kinds.
    pub fn attempt_budget(&self, kinds: &[Kind]) -> usize {
        let b: &AttemptBudget = &self.attempts;
        let mut n: usize = b.base + b.per_kind * (weight(kinds) - 1);
        if kinds.iter().any(|k| k.is_heavy()) {
            n += b.heavy_bonus;
        }
        n.clamp(b.base.min(b.max), b.max)
    }

    /// Capacity of the pending pool for the kinds.
    pub fn pending_capacity(&self, kinds: &[Kind]) -> usize {
        let p: &PendingBounds = &self.pending;
        (p.base + p.per_kind * (weight(kinds) - 1)).min(p.max)
    }

    /// Solver budget used on the pending attempts, between the minimum for one kind and the
    /// maximum for four kinds.
    pub fn generation_budget(&self, kinds: &[Kind]) -> usize {
        let s: &SolverBudgets = &self.solver;
        let span: usize = s.generation_max.saturating_sub(s.generation_min);
        s.generation_min + span * (weight(kinds).min(4) - 1) / 3
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts: AttemptBudget::default(),
            pending: PendingBounds::default(),
            loopy: LoopyOptions::default(),
            wildness: WildnessProfile::default(),
            solver: SolverBudgets::default(),
            limits: EvaluationLimits::default(),
            recent_capacity: 16,
            implicit_gaps: true,
        }
    }
}
