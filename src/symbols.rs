/*
symbols.rs

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

//! Library of constraint symbols.
//!
//! Each symbol [`kind::Kind`] imposes an independent rule on the path drawn by the player.
//! Every kind is implemented by one [`registry::SymbolRule`] object that can both generate
//! placements for a puzzle ([`registry::SymbolRule::generate`]) and report the placements that a
//! finished path violates ([`registry::SymbolRule::collect_failing`]).
//!
//! The rules are grouped by the way they evaluate the path:
//!
//! * [`squares`]: a region never mixes colors.
//! * [`stars`]: stars pair off with exactly one same-colored symbol of their region.
//! * [`counting`]: the number of path edges around a cell, its corners, or its region.
//! * [`rays`]: the path edges crossed by, or blocking, rays cast from a cell.
//! * [`polyominoes`]: regions exactly tiled by shapes (see [`shape`] and [`tiling`]).
//! * [`solitary`]: one symbol per region (ghosts and crystals).
//! * [`hexagon`]: nodes and edges the path must go through.
//! * [`gaps`]: edges removed from the board.
//! * [`negator`]: symbols that cancel another failing symbol of their region.
//!
//! [`board::Board`] is the read-only view of a finished path that the rules evaluate, and
//! [`placement::PlacementContext`] is the state of a puzzle being generated.

pub mod board;
pub mod color;
pub mod counting;
pub mod gaps;
pub mod hexagon;
pub mod kind;
pub mod negator;
pub mod placement;
pub mod polyominoes;
pub mod rays;
pub mod registry;
pub mod shape;
pub mod solitary;
pub mod squares;
pub mod stars;
pub mod target;
pub mod tiling;
