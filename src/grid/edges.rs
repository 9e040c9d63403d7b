/*
edges.rs

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

//! Edges between nodes of the puzzle board.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use super::point::{self, GRID_NODES, GridPoint};

/// Canonical identity of a unit edge.
///
/// The two end points are stored in ascending order so that `EdgeKey::new(a, b)` and
/// `EdgeKey::new(b, a)` are equal.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub a: GridPoint,
    pub b: GridPoint,
}

impl EdgeKey {
    /// Create the key of the edge between two points, in any order.
    pub fn new(p: GridPoint, q: GridPoint) -> Self {
        if p <= q { Self { a: p, b: q } } else { Self { a: q, b: p } }
    }

    /// Create the key only if the two points are adjacent nodes of the board.
    pub fn between(p: GridPoint, q: GridPoint) -> Option<Self> {
        if p.in_bounds() && q.in_bounds() && p.is_adjacent(q) {
            Some(Self::new(p, q))
        } else {
            None
        }
    }

    /// Whether the key joins two adjacent nodes of the board, in canonical order.
    pub fn is_on_board(&self) -> bool {
        Self::between(self.a, self.b).is_some_and(|k| k == *self)
    }

    /// Whether the given point is one end of the edge.
    pub fn touches(&self, p: GridPoint) -> bool {
        self.a == p || self.b == p
    }

    /// Given one end of the edge, return the other end.
    pub fn other(&self, p: GridPoint) -> GridPoint {
        if self.a == p { self.b } else { self.a }
    }

    pub fn is_horizontal(&self) -> bool {
        self.a.y == self.b.y
    }

    /// Whether the edge runs along the outer border of the board.
    pub fn on_border(&self) -> bool {
        if self.is_horizontal() {
            self.a.y == 0 || self.a.y == GRID_NODES - 1
        } else {
            self.a.x == 0 || self.a.x == GRID_NODES - 1
        }
    }
}

/// Set of drawable edges of a puzzle.
///
/// An edge missing from the set is a permanent gap that the path cannot use.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EdgeSet {
    edges: BTreeSet<EdgeKey>,
}

impl EdgeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            edges: BTreeSet::new(),
        }
    }

    /// Create the set of all the edges of the board.
    pub fn full() -> Self {
        let mut edges: BTreeSet<EdgeKey> = BTreeSet::new();
        for p in point::all_points() {
            for q in point::neighbors(p) {
                edges.insert(EdgeKey::new(p, q));
            }
        }
        Self { edges }
    }

    /// Create a set from a list of edges.
    pub fn from_keys(keys: &[EdgeKey]) -> Self {
        Self {
            edges: keys.iter().copied().collect(),
        }
    }

    pub fn insert(&mut self, edge: EdgeKey) -> bool {
        self.edges.insert(edge)
    }

    pub fn remove(&mut self, edge: &EdgeKey) -> bool {
        self.edges.remove(edge)
    }

    pub fn contains(&self, edge: &EdgeKey) -> bool {
        self.edges.contains(edge)
    }

    /// Whether the edge between two points is drawable.
    pub fn connects(&self, p: GridPoint, q: GridPoint) -> bool {
        self.edges.contains(&EdgeKey::new(p, q))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the set contains every edge of the board.
    pub fn is_full(&self) -> bool {
        self.edges.len() == Self::full().len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }

    /// For the given point, return the adjacent points reachable through a drawable edge.
    pub fn neighbors(&self, p: GridPoint) -> Vec<GridPoint> {
        point::neighbors(p)
            .into_iter()
            .filter(|q| self.connects(p, *q))
            .collect()
    }

    /// Whether `end` can be reached from `start` (breadth-first search).
    pub fn has_path(&self, start: GridPoint, end: GridPoint) -> bool {
        self.reachable_from(start, &BTreeSet::new()).contains(&end)
    }

    /// Return the points reachable from `start` without going through the `blocked` points.
    pub fn reachable_from(
        &self,
        start: GridPoint,
        blocked: &BTreeSet<GridPoint>,
    ) -> BTreeSet<GridPoint> {
        let mut seen: BTreeSet<GridPoint> = BTreeSet::new();
        let mut queue: VecDeque<GridPoint> = VecDeque::new();

        if blocked.contains(&start) {
            return seen;
        }
        seen.insert(start);
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            for q in self.neighbors(p) {
                if !blocked.contains(&q) && seen.insert(q) {
                    queue.push_back(q);
                }
            }
        }
        seen
    }

    /// Edges of the board that are missing from the set.
    pub fn missing(&self) -> Vec<EdgeKey> {
        Self::full()
            .iter()
            .filter(|e| !self.contains(e))
            .copied()
            .collect()
    }

    /// Print the edges, one node per line.
    pub fn debug(&self) {
        let mut s: String = String::new();

        for p in point::all_points() {
            s.clear();
            s.push_str(&format!("({},{}) -->", p.x, p.y));
            for q in point::neighbors(p) {
                if self.connects(p, q) {
                    s.push_str(&format!(" ({},{})", q.x, q.y));
                } else {
                    s.push_str(&format!(" ({},{})(gap)", q.x, q.y));
                }
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::point::{END, START};

    #[test]
    fn edge_key_is_order_independent() {
        let p = GridPoint::new(1, 2);
        let q = GridPoint::new(2, 2);
        assert_eq!(EdgeKey::new(p, q), EdgeKey::new(q, p));
        assert_eq!(EdgeKey::between(p, GridPoint::new(3, 2)), None);
    }

    #[test]
    fn full_board_has_forty_edges() {
        let full = EdgeSet::full();
        assert_eq!(full.len(), 2 * GRID_NODES as usize * (GRID_NODES as usize - 1));
        assert!(full.is_full());
        assert!(full.has_path(START, END));
    }

    #[test]
    fn cut_start_is_unreachable() {
        let mut edges = EdgeSet::full();
        edges.remove(&EdgeKey::new(START, GridPoint::new(0, 3)));
        assert!(edges.has_path(START, END));
        edges.remove(&EdgeKey::new(START, GridPoint::new(1, 4)));
        assert!(!edges.has_path(START, END));
        assert_eq!(edges.missing().len(), 2);
    }

    #[test]
    fn border_edges() {
        assert!(EdgeKey::new(GridPoint::new(0, 0), GridPoint::new(1, 0)).on_border());
        assert!(EdgeKey::new(GridPoint::new(4, 1), GridPoint::new(4, 2)).on_border());
        assert!(!EdgeKey::new(GridPoint::new(1, 1), GridPoint::new(1, 2)).on_border());
    }
}
