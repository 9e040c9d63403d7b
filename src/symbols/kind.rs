/*
kind.rs

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

//! Symbol kinds.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr, IntoStaticStr};

/// Number of symbol kinds.
pub const KIND_COUNT: usize = 20;

/// Kind of symbol.
///
/// The declaration order is the generation order: within one generation attempt, the kinds are
/// placed from the first variant to the last, so that later kinds can see the cells and the
/// colors already used by the earlier ones.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    FromRepr,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum Kind {
    Gap,
    Crystals,
    Ghosts,
    Polyomino,
    RotatedPolyomino,
    NegativePolyomino,
    RotatedNegativePolyomino,
    ColorSquares,
    Triangles,
    Dots,
    Diamonds,
    TallyMarks,
    Arrows,
    Chevrons,
    Droplets,
    Cardinals,
    Stars,
    Hexagon,
    Sentinels,
    Negator,
}

/// What a symbol is attached to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// An edge of the board (gaps).
    Edge,

    /// A cell. Cell symbols belong to the region of their cell.
    Cell,

    /// A node or an edge that the path must go through (hexagons).
    Site,
}

impl Kind {
    /// Every kind, in generation order.
    pub fn all() -> impl Iterator<Item = Kind> {
        (0..KIND_COUNT as u8).map_while(Kind::from_repr)
    }

    /// Position of the kind in the generation order.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn anchor(self) -> Anchor {
        match self {
            Kind::Gap => Anchor::Edge,
            Kind::Hexagon => Anchor::Site,
            _ => Anchor::Cell,
        }
    }

    /// Whether the symbols of this kind occupy a cell.
    pub fn is_cell_anchored(self) -> bool {
        self.anchor() == Anchor::Cell
    }

    pub fn is_polyomino(self) -> bool {
        matches!(
            self,
            Kind::Polyomino
                | Kind::RotatedPolyomino
                | Kind::NegativePolyomino
                | Kind::RotatedNegativePolyomino
        )
    }

    /// Kinds whose rule depends on the whole partition, and which may therefore pick the
    /// solution path themselves when they are the first cell symbols placed.
    pub fn shapes_regions(self) -> bool {
        matches!(self, Kind::Crystals | Kind::Ghosts)
    }

    /// Kinds that are expensive to place or to verify. Their presence raises the attempt
    /// budget of the generator.
    pub fn is_heavy(self) -> bool {
        self.is_polyomino() || matches!(self, Kind::Crystals | Kind::Negator)
    }
}
