/*
generator.rs

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

//! Generate random puzzles.
//!
//! A puzzle is generated in attempts. Each attempt runs the same steps, described in
//! [`attempt`]:
//!
//! * Build the edges of the board. A few edges are removed as gaps.
//! * Find a solution path.
//!   The generator prefers winding paths, found by the [`loopy_path`] module, and falls back to
//!   a plain random path from the [`random_path`] module.
//! * Place the requested kinds of symbols, in order.
//!   Each kind is placed by its rule in [`crate::symbols::registry`], so that the solution path
//!   satisfies the new symbols.
//! * Validate the result.
//!
//! The [`puzzles::PuzzleGenerator`] object runs the attempts, keeps the rejected ones in a
//! [`pending::PendingPool`], and falls back to the solver when no attempt succeeds.
//! Its settings are in [`config::GeneratorConfig`], and it remembers the recently generated
//! puzzles in a [`recent::RecentHistory`] object.

pub mod attempt;
pub mod config;
pub mod loopy_path;
pub mod pending;
pub mod puzzles;
pub mod random_path;
pub mod recent;
