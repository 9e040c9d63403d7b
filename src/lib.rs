/*
lib.rs

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

//! Generate and solve single-stroke grid puzzles.
//!
//! A puzzle is a 5 × 5 grid of nodes with a starting node and an ending node. The player draws
//! a path along the edges, from the start to the end, that never visits a node twice. Symbols
//! placed in the cells, on the nodes, or on the edges constrain the path.
//!
//! * [`grid`] holds the geometry: nodes, cells, edges, paths, and regions.
//! * [`symbols`] holds the symbol kinds and their rules.
//! * [`solver`] checks paths and searches for solutions.
//! * [`generator`] builds random puzzles.
//!
//! The three entry points are [`generate_puzzle`], [`check_path`], and [`solve`].

pub mod generator;
pub mod grid;
pub mod puzzle;
pub mod solver;
pub mod symbols;

pub use generator::puzzles::{GenerateError, PuzzleOverrides, generate_puzzle};
pub use grid::path::Path;
pub use puzzle::Puzzle;
pub use solver::evaluation::{ConstraintEvaluation, check_path};
pub use solver::path_solver::solve;
pub use symbols::kind::Kind;
