/*
grid.rs

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

//! Grid primitives shared by the generator and the solver.
//!
//! The board is a square lattice of [`point::GRID_NODES`] × [`point::GRID_NODES`] nodes.
//! The path runs along the edges between the nodes, and the symbols sit in the
//! [`point::GRID_CELLS`] × [`point::GRID_CELLS`] cells enclosed by the nodes.
//!
//! * [`point`] addresses nodes, cells, and directions.
//! * [`edges`] stores the drawable edges of a puzzle ([`edges::EdgeSet`]) and answers
//!   reachability questions.
//! * [`path`] represents a drawn path ([`path::Path`]) and the edges it uses
//!   ([`path::UsedEdges`]).
//! * [`regions`] partitions the cells into regions separated by the path.

pub mod edges;
pub mod path;
pub mod point;
pub mod regions;
