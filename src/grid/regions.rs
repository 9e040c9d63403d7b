/*
regions.rs

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

//! Partition the cells of the board into regions separated by the path.
//!
//! Two adjacent cells belong to the same region when the edge between them is not used by the
//! path. Every "same region" rule of the symbol library relies on this partition.

use log::{Level, log_enabled, trace};
use std::collections::VecDeque;

use super::edges::EdgeKey;
use super::path::UsedEdges;
use super::point::{self, CELL_COUNT, Cell, Direction, GRID_CELLS};

/// Map from cells to region identifiers.
///
/// Identifiers are assigned in the row-major order in which the flood fill discovers the
/// regions. They are not meaningful across different paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMap {
    ids: [usize; CELL_COUNT],
    count: usize,
}

impl RegionMap {
    /// Region identifier of the given cell.
    pub fn region_of(&self, cell: Cell) -> usize {
        self.ids[cell.index()]
    }

    /// Number of regions.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether two cells are in the same region.
    pub fn same_region(&self, a: Cell, b: Cell) -> bool {
        self.region_of(a) == self.region_of(b)
    }

    /// Cells of the given region, in row-major order.
    pub fn cells_in(&self, region: usize) -> Vec<Cell> {
        point::all_cells()
            .filter(|c| self.region_of(*c) == region)
            .collect()
    }

    /// Cells of every region, indexed by region identifier.
    pub fn regions(&self) -> Vec<Vec<Cell>> {
        let mut regions: Vec<Vec<Cell>> = vec![Vec::new(); self.count];
        for c in point::all_cells() {
            regions[self.region_of(c)].push(c);
        }
        regions
    }

    /// Cell mask (one bit per cell, see [`Cell::bit`]) of the given region.
    pub fn mask(&self, region: usize) -> u16 {
        self.cells_in(region).iter().fold(0, |m, c| m | c.bit())
    }

    /// Edges on the outline of the given region.
    ///
    /// The outline is made of the cell sides that face either another region or the outside
    /// of the board.
    pub fn outline(&self, region: usize) -> Vec<EdgeKey> {
        let mut outline: Vec<EdgeKey> = Vec::new();
        for c in self.cells_in(region) {
            for d in Direction::ALL {
                let inside: bool = match c.neighbor(d) {
                    Some(n) => self.region_of(n) == region,
                    None => false,
                };
                if !inside {
                    outline.push(c.side(d));
                }
            }
        }
        outline
    }
}

/// Build the region map for the given used edges.
///
/// The function is pure: identical used edges always produce the identical map.
pub fn build_cell_regions(used: &UsedEdges) -> RegionMap {
    let mut ids: [usize; CELL_COUNT] = [usize::MAX; CELL_COUNT];
    let mut count: usize = 0;
    let mut queue: VecDeque<Cell> = VecDeque::with_capacity(CELL_COUNT);

    for seed in point::all_cells() {
        if ids[seed.index()] != usize::MAX {
            continue;
        }
        ids[seed.index()] = count;
        queue.push_back(seed);
        while let Some(c) = queue.pop_front() {
            for d in Direction::ALL {
                let Some(n) = c.neighbor(d) else {
                    continue;
                };
                if ids[n.index()] == usize::MAX && !used.contains(&c.side(d)) {
                    ids[n.index()] = count;
                    queue.push_back(n);
                }
            }
        }
        count += 1;
    }

    let map = RegionMap { ids, count };
    if log_enabled!(Level::Trace) {
        let mut s: String = String::new();
        for y in 0..GRID_CELLS {
            s.clear();
            for x in 0..GRID_CELLS {
                s.push_str(&format!("{:>3}", map.region_of(Cell::new(x, y))));
            }
            trace!("{s}");
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::path::Path;
    use crate::grid::point::GridPoint;

    fn path(list: &[(i32, i32)]) -> Path {
        Path::from_points(
            &list
                .iter()
                .map(|(x, y)| GridPoint::new(*x, *y))
                .collect::<Vec<GridPoint>>(),
        )
    }

    #[test]
    fn border_path_leaves_one_region() {
        let p = path(&[(0, 4), (0, 3), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let regions = build_cell_regions(&p.used_edges());
        assert_eq!(regions.count(), 1);
        assert_eq!(regions.cells_in(0).len(), CELL_COUNT);
        // The outline is the whole border of the board
        assert_eq!(regions.outline(0).len(), 16);
    }

    #[test]
    fn vertical_cut_splits_board() {
        // Right along the bottom to x = 2, straight up, then right along the top
        let p = path(&[(0, 4), (1, 4), (2, 4), (2, 3), (2, 2), (2, 1), (2, 0), (3, 0), (4, 0)]);
        let regions = build_cell_regions(&p.used_edges());
        assert_eq!(regions.count(), 2);
        assert_eq!(regions.region_of(Cell::new(0, 0)), 0);
        assert_eq!(regions.region_of(Cell::new(2, 0)), 1);
        assert!(regions.same_region(Cell::new(1, 3), Cell::new(0, 0)));
        assert!(!regions.same_region(Cell::new(1, 3), Cell::new(2, 3)));
        assert_eq!(regions.mask(0).count_ones(), 8);
    }

    #[test]
    fn partition_is_pure_and_total() {
        let p = path(&[(0, 4), (0, 3), (1, 3), (1, 2), (2, 2), (2, 1), (3, 1), (3, 0), (4, 0)]);
        let a = build_cell_regions(&p.used_edges());
        let b = build_cell_regions(&p.used_edges());
        assert_eq!(a, b);
        let total: usize = a.regions().iter().map(|r| r.len()).sum();
        assert_eq!(total, CELL_COUNT);
    }
}
