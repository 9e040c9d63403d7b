/*
polyominoes.rs

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

//! Polyominoes: the shapes in a region must tile that region exactly.
//!
//! The four polyomino kinds are checked together. For every region holding at least one shape
//! of any of these kinds:
//!
//! * Without negative shapes, the positive shapes must cover every cell of the region exactly
//!   once.
//! * With negative shapes, the region is satisfied when the positive and negative areas cancel
//!   out. Otherwise the positive area minus the negative area must match the size of the region,
//!   and the positive shapes must cover the region plus the cells that the negative shapes cover
//!   outside of it. Negative shapes never overlap the region or each other.
//!
//! Shapes of the rotated kinds may be turned by quarter turns. Shapes are never mirrored.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::{BTreeMap, BTreeSet};

use super::board::Board;
use super::color::{Palette, SymbolColor};
use super::kind::Kind;
use super::placement::{Placement, PlacementContext, PlacementError};
use super::registry::SymbolRule;
use super::shape::{self, Shape};
use super::target::Target;
use super::tiling::{Piece, Tiler};
use crate::grid::path::Path;
use crate::grid::point::{Cell, Direction};
use crate::grid::regions::RegionMap;

/// The kinds checked together.
const POLYOMINO_KINDS: [Kind; 4] = [
    Kind::Polyomino,
    Kind::RotatedPolyomino,
    Kind::NegativePolyomino,
    Kind::RotatedNegativePolyomino,
];

/// Largest piece produced when a region is split.
const MAX_PIECE_AREA: u32 = 4;

/// Largest number of pieces for one region.
const MAX_PIECES: usize = 3;

pub struct PolyominoRule {
    kind: Kind,
    rotatable: bool,

    /// Whether the kind comes with negative shapes.
    negative: bool,
}

pub static POLYOMINO: PolyominoRule = PolyominoRule {
    kind: Kind::Polyomino,
    rotatable: false,
    negative: false,
};

pub static ROTATED_POLYOMINO: PolyominoRule = PolyominoRule {
    kind: Kind::RotatedPolyomino,
    rotatable: true,
    negative: false,
};

pub static NEGATIVE_POLYOMINO: PolyominoRule = PolyominoRule {
    kind: Kind::NegativePolyomino,
    rotatable: false,
    negative: true,
};

pub static ROTATED_NEGATIVE_POLYOMINO: PolyominoRule = PolyominoRule {
    kind: Kind::RotatedNegativePolyomino,
    rotatable: true,
    negative: true,
};

/// Allowed orientations of a shape target, and whether the shape is negative.
fn piece_of(target: &Target) -> Option<(Piece, bool)> {
    match target {
        Target::Shape {
            shape,
            rotatable,
            negative,
            ..
        } => Some((shape.orientations(*rotatable, false), *negative)),
        _ => None,
    }
}

fn total_area(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .map(|p| p.first().map_or(0, |s| s.area()))
        .sum()
}

/// Whether the positive and negative pieces satisfy the region of the given cell mask.
pub fn region_fits(mask: u16, positives: &[Piece], negatives: &[Piece], budget: usize) -> bool {
    let positive_area: usize = total_area(positives);
    let negative_area: usize = total_area(negatives);

    if !negatives.is_empty() && positive_area == negative_area {
        return true;
    }
    if positive_area < negative_area
        || positive_area - negative_area != mask.count_ones() as usize
    {
        return false;
    }

    let mut tiler: Tiler = Tiler::new(budget);
    place_negatives(&mut tiler, mask, negatives, positives)
}

/// Place the negative pieces outside of the `covered` mask, one after the other, then tile the
/// resulting mask with the positive pieces.
fn place_negatives(
    tiler: &mut Tiler,
    covered: u16,
    negatives: &[Piece],
    positives: &[Piece],
) -> bool {
    let Some((first, rest)) = negatives.split_first() else {
        return tiler.tile(covered, positives).is_some();
    };

    let mut masks: Vec<u16> = first
        .iter()
        .flat_map(|s| s.placements_within(!covered))
        .collect();
    masks.sort_unstable();
    masks.dedup();
    for m in masks {
        if tiler.exhausted {
            return false;
        }
        if place_negatives(tiler, covered | m, rest, positives) {
            return true;
        }
    }
    false
}

/// Regions whose polyominoes, of any of the four kinds, do not fit.
pub fn failing_regions(board: &Board) -> BTreeSet<usize> {
    let mut per_region: BTreeMap<usize, (Vec<Piece>, Vec<Piece>)> = BTreeMap::new();
    for kind in POLYOMINO_KINDS {
        for (_, t) in board.targets(kind) {
            if let (Some(c), Some((piece, negative))) = (t.cell(), piece_of(t)) {
                let entry = per_region.entry(board.region_of(c)).or_default();
                if negative {
                    entry.1.push(piece);
                } else {
                    entry.0.push(piece);
                }
            }
        }
    }

    per_region
        .into_iter()
        .filter(|(region, (positives, negatives))| {
            !region_fits(
                board.regions.mask(*region),
                positives,
                negatives,
                board.tiling_budget,
            )
        })
        .map(|(region, _)| region)
        .collect()
}

/// Split the cell mask into connected pieces of at most [`MAX_PIECE_AREA`] cells.
fn split_region(mask: u16, rng: &mut StdRng) -> Option<Vec<u16>> {
    let mut remaining: u16 = mask;
    let mut pieces: Vec<u16> = Vec::new();

    while remaining != 0 {
        if pieces.len() == MAX_PIECES {
            return None;
        }
        let seed: Cell = *shape::cells_of(remaining).choose(rng)?;
        let size: u32 = rng.random_range(2..=MAX_PIECE_AREA);
        let mut piece: u16 = seed.bit();

        while piece.count_ones() < size {
            let frontier: Vec<Cell> = shape::cells_of(remaining & !piece)
                .into_iter()
                .filter(|c| {
                    Direction::ALL
                        .iter()
                        .any(|d| c.neighbor(*d).is_some_and(|n| piece & n.bit() != 0))
                })
                .collect();
            let Some(next) = frontier.choose(rng) else {
                break;
            };
            piece |= next.bit();
        }
        pieces.push(piece);
        remaining &= !piece;
    }
    Some(pieces)
}

impl PolyominoRule {
    /// Shape as shown on the board. Rotatable shapes are shown in a random orientation.
    fn displayed(&self, shape: Shape, rng: &mut StdRng) -> Shape {
        if self.rotatable {
            shape.rotated_by(rng.random_range(0..4))
        } else {
            shape
        }
    }

    /// Regions without any polyomino yet, in random order.
    fn open_regions(
        &self,
        state: &PlacementContext,
        regions: &RegionMap,
        rng: &mut StdRng,
    ) -> Vec<usize> {
        let taken: BTreeSet<usize> = POLYOMINO_KINDS
            .iter()
            .flat_map(|k| state.symbols.get(*k))
            .filter_map(|t| t.cell())
            .map(|c| regions.region_of(c))
            .collect();
        let mut open: Vec<usize> = (0..regions.count())
            .filter(|r| !taken.contains(r))
            .collect();
        open.shuffle(rng);
        open
    }

    /// Positive shapes that exactly tile the region.
    fn tiling_placement(
        &self,
        state: &PlacementContext,
        regions: &RegionMap,
        region: usize,
        color: SymbolColor,
        rng: &mut StdRng,
    ) -> Option<Vec<Target>> {
        let free: Vec<Cell> = state.free_cells_in(regions, region, rng);
        let pieces: Vec<u16> = split_region(regions.mask(region), rng)?;
        if free.len() < pieces.len() {
            return None;
        }
        Some(
            pieces
                .iter()
                .zip(free)
                .map(|(m, cell)| Target::Shape {
                    cell,
                    color,
                    shape: self.displayed(Shape::from_mask(*m), rng),
                    rotatable: self.rotatable,
                    negative: false,
                })
                .collect(),
        )
    }

    /// A positive shape overhanging the region by one cell, and a negative square that cancels
    /// the overhang.
    fn overhang_placement(
        &self,
        state: &PlacementContext,
        regions: &RegionMap,
        region: usize,
        color: SymbolColor,
        rng: &mut StdRng,
    ) -> Option<Vec<Target>> {
        let mask: u16 = regions.mask(region);
        if mask.count_ones() > MAX_PIECE_AREA {
            return None;
        }
        let free: Vec<Cell> = state.free_cells_in(regions, region, rng);
        if free.len() < 2 {
            return None;
        }
        let outside: Vec<Cell> = shape::cells_of(!mask)
            .into_iter()
            .filter(|c| {
                Direction::ALL
                    .iter()
                    .any(|d| c.neighbor(*d).is_some_and(|n| mask & n.bit() != 0))
            })
            .collect();
        let extra: Cell = *outside.choose(rng)?;

        Some(vec![
            Target::Shape {
                cell: free[0],
                color,
                shape: self.displayed(Shape::from_mask(mask | extra.bit()), rng),
                rotatable: self.rotatable,
                negative: false,
            },
            Target::Shape {
                cell: free[1],
                color,
                shape: Shape::new(vec![(0, 0)]),
                rotatable: self.rotatable,
                negative: true,
            },
        ])
    }
}

impl SymbolRule for PolyominoRule {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn generate(
        &self,
        state: &PlacementContext,
        rng: &mut StdRng,
    ) -> Result<Placement, PlacementError> {
        let path: &Path = state.path()?;
        let regions: RegionMap = state.regions()?;

        for region in self.open_regions(state, &regions, rng) {
            for _ in 0..4 {
                let mut palette: Palette = state.palette.clone();
                let Some(color) = state.plain_color(&mut palette, rng) else {
                    return Err(PlacementError::PaletteExhausted(self.kind));
                };
                let targets: Option<Vec<Target>> = if self.negative {
                    self.overhang_placement(state, &regions, region, color, rng)
                } else {
                    self.tiling_placement(state, &regions, region, color, rng)
                };
                if let Some(targets) = targets
                    && state.accepts_targets(self.kind, &targets, path)
                {
                    return Ok(Placement::new(targets));
                }
            }
        }
        Err(PlacementError::NoCandidate(self.kind))
    }

    fn collect_failing(&self, board: &Board) -> BTreeSet<usize> {
        let failing: BTreeSet<usize> = failing_regions(board);
        if failing.is_empty() {
            return BTreeSet::new();
        }
        board
            .targets(self.kind)
            .filter(|(_, t)| {
                t.cell()
                    .is_none_or(|c| failing.contains(&board.region_of(c)))
            })
            .map(|(i, _)| i)
            .collect()
    }
}
