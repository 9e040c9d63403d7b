/*
solver.rs

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

//! Validate and solve puzzles.
//!
//! * [`evaluation`] checks a path against every symbol of a puzzle and produces a
//!   [`evaluation::ConstraintEvaluation`].
//! * [`negation`] searches how the negators of a puzzle cancel the other symbols.
//! * [`path_solver`] looks for a path that satisfies a puzzle with a bounded depth-first search.

pub mod evaluation;
pub mod negation;
pub mod path_solver;
