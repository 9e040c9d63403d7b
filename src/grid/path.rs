/*
path.rs

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

//! Path drawn on the puzzle board.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use super::edges::{EdgeKey, EdgeSet};
use super::point::{Direction, GridPoint};

/// Structural defects of a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("a path needs at least two points, got {0}")]
    TooShort(usize),

    #[error("the path starts at ({},{}) instead of the starting node", .0.x, .0.y)]
    WrongStart(GridPoint),

    #[error("the path ends at ({},{}) instead of the ending node", .0.x, .0.y)]
    WrongEnd(GridPoint),

    #[error("({},{}) and ({},{}) are not adjacent", .0.x, .0.y, .1.x, .1.y)]
    NotAdjacent(GridPoint, GridPoint),

    #[error("the edge ({},{})-({},{}) is a gap", .0.a.x, .0.a.y, .0.b.x, .0.b.y)]
    MissingEdge(EdgeKey),

    #[error("the node ({},{}) is visited twice", .0.x, .0.y)]
    Revisit(GridPoint),
}

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<GridPoint>", into = "Vec<GridPoint>")]
pub struct Path {
    /// Path as an ordered list of points.
    points: Vec<GridPoint>,

    /// Stores the visited status of the points.
    /// Instead of looking for the point in the [`Path::points`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<GridPoint>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for Path {}

impl From<Vec<GridPoint>> for Path {
    fn from(points: Vec<GridPoint>) -> Self {
        Self::from_points(&points)
    }
}

impl From<Path> for Vec<GridPoint> {
    fn from(path: Path) -> Self {
        path.points
    }
}

impl Path {
    /// Create an empty [`Path`] object.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Create a [`Path`] object from a list of points.
    pub fn from_points(points: &[GridPoint]) -> Self {
        Self {
            points: points.to_vec(),
            visited: points.iter().copied().collect(),
        }
    }

    /// Remove all the points from the path.
    pub fn clear(&mut self) {
        self.points.clear();
        self.visited.clear();
    }

    /// Add a point to the path.
    pub fn push(&mut self, point: GridPoint) {
        self.points.push(point);
        self.visited.insert(point);
    }

    /// Remove the last point from the path.
    pub fn pop(&mut self) {
        if let Some(p) = self.points.pop() {
            self.visited.remove(&p);
        }
    }

    /// Get the number of points in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of edges in the path.
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Whether the point is in the path or not.
    pub fn contains(&self, point: GridPoint) -> bool {
        self.visited.contains(&point)
    }

    /// Return a reference to the point vector.
    pub fn get(&self) -> &[GridPoint] {
        &self.points
    }

    /// Return the first point in the path.
    pub fn get_first(&self) -> Option<GridPoint> {
        self.points.first().copied()
    }

    /// Return the last point in the path.
    pub fn get_last(&self) -> Option<GridPoint> {
        self.points.last().copied()
    }

    /// Verify that the path is a simple path from `start` to `end` over the drawable edges.
    ///
    /// # Errors
    ///
    /// The method returns the first structural defect found.
    pub fn validate(
        &self,
        edges: &EdgeSet,
        start: GridPoint,
        end: GridPoint,
    ) -> Result<(), PathError> {
        if self.points.len() < 2 {
            return Err(PathError::TooShort(self.points.len()));
        }
        if self.points[0] != start {
            return Err(PathError::WrongStart(self.points[0]));
        }
        let last: GridPoint = self.points[self.points.len() - 1];
        if last != end {
            return Err(PathError::WrongEnd(last));
        }

        let mut seen: HashSet<GridPoint> = HashSet::with_capacity(self.points.len());
        for p in &self.points {
            if !seen.insert(*p) {
                return Err(PathError::Revisit(*p));
            }
        }
        for w in self.points.windows(2) {
            if !w[0].in_bounds() || !w[1].in_bounds() || !w[0].is_adjacent(w[1]) {
                return Err(PathError::NotAdjacent(w[0], w[1]));
            }
            let e: EdgeKey = EdgeKey::new(w[0], w[1]);
            if !edges.contains(&e) {
                return Err(PathError::MissingEdge(e));
            }
        }
        Ok(())
    }

    /// Return the edges used by the path.
    pub fn used_edges(&self) -> UsedEdges {
        UsedEdges::from_path(self)
    }

    /// Directions of the successive steps of the path.
    pub fn directions(&self) -> Vec<Direction> {
        self.points
            .windows(2)
            .filter_map(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Number of direction changes along the path.
    pub fn turns(&self) -> usize {
        self.directions().windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Number of edges in the longest straight segment of the path.
    pub fn longest_straight_run(&self) -> usize {
        let mut longest: usize = 0;
        let mut run: usize = 0;
        let mut previous: Option<Direction> = None;

        for d in self.directions() {
            run = if previous == Some(d) { run + 1 } else { 1 };
            longest = longest.max(run);
            previous = Some(d);
        }
        longest
    }

    /// Number of visited points that are not on the border of the board.
    pub fn interior_nodes(&self) -> usize {
        self.points.iter().filter(|p| !p.on_border()).count()
    }

    /// Compact signature of the path shape.
    ///
    /// The first letter is the initial direction, followed by one letter per step: `S` for
    /// straight, `L` for a left turn, and `R` for a right turn.
    pub fn signature(&self) -> String {
        let directions: Vec<Direction> = self.directions();
        let mut s: String = String::with_capacity(directions.len() + 1);

        match directions.first() {
            Some(Direction::Up) => s.push('U'),
            Some(Direction::Right) => s.push('E'),
            Some(Direction::Down) => s.push('D'),
            Some(Direction::Left) => s.push('W'),
            None => return s,
        }
        for w in directions.windows(2) {
            let (ax, ay) = w[0].delta();
            let (bx, by) = w[1].delta();
            // The y axis points down, so a positive cross product is a clockwise (right) turn
            match ax * by - ay * bx {
                0 => s.push('S'),
                c if c > 0 => s.push('R'),
                _ => s.push('L'),
            }
        }
        s
    }
}

/// Edges used by a path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UsedEdges {
    edges: BTreeSet<EdgeKey>,
}

impl UsedEdges {
    /// Collect the edges between consecutive points of the path.
    pub fn from_path(path: &Path) -> Self {
        Self {
            edges: path
                .get()
                .windows(2)
                .map(|w| EdgeKey::new(w[0], w[1]))
                .collect(),
        }
    }

    pub fn from_keys(keys: &[EdgeKey]) -> Self {
        Self {
            edges: keys.iter().copied().collect(),
        }
    }

    pub fn contains(&self, edge: &EdgeKey) -> bool {
        self.edges.contains(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }

    /// Number of used edges ending at the given point.
    pub fn degree(&self, point: GridPoint) -> usize {
        self.edges.iter().filter(|e| e.touches(point)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::point::{END, START};

    fn pts(list: &[(i32, i32)]) -> Vec<GridPoint> {
        list.iter().map(|(x, y)| GridPoint::new(*x, *y)).collect()
    }

    /// Up the left border, then right along the top border.
    fn border_path() -> Path {
        Path::from_points(&pts(&[
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
        ]))
    }

    #[test]
    fn border_path_is_valid() {
        let path = border_path();
        assert_eq!(path.validate(&EdgeSet::full(), START, END), Ok(()));
        assert_eq!(path.turns(), 1);
        assert_eq!(path.longest_straight_run(), 4);
        assert_eq!(path.interior_nodes(), 0);
        assert_eq!(path.signature(), "USSSRSSS");
        assert_eq!(path.used_edges().len(), 8);
    }

    #[test]
    fn defects_are_reported() {
        let edges = EdgeSet::full();
        assert_eq!(
            Path::from_points(&pts(&[(0, 4)])).validate(&edges, START, END),
            Err(PathError::TooShort(1))
        );
        assert_eq!(
            Path::from_points(&pts(&[(0, 4), (1, 3)])).validate(&edges, START, GridPoint::new(1, 3)),
            Err(PathError::NotAdjacent(GridPoint::new(0, 4), GridPoint::new(1, 3)))
        );
        let looped = Path::from_points(&pts(&[(0, 4), (0, 3), (0, 4), (1, 4)]));
        assert_eq!(
            looped.validate(&edges, START, GridPoint::new(1, 4)),
            Err(PathError::Revisit(GridPoint::new(0, 4)))
        );

        let mut gapped = EdgeSet::full();
        let gap = EdgeKey::new(GridPoint::new(0, 0), GridPoint::new(1, 0));
        gapped.remove(&gap);
        assert_eq!(
            border_path().validate(&gapped, START, END),
            Err(PathError::MissingEdge(gap))
        );
    }

    #[test]
    fn push_and_pop_track_visits() {
        let mut path = Path::new();
        path.push(START);
        path.push(GridPoint::new(1, 4));
        assert!(path.contains(GridPoint::new(1, 4)));
        path.pop();
        assert!(!path.contains(GridPoint::new(1, 4)));
        assert_eq!(path.get_last(), Some(START));
    }

    #[test]
    fn serde_rebuilds_visited_points() {
        let json = serde_json::to_string(&border_path()).unwrap();
        let path: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, border_path());
        assert!(path.contains(GridPoint::new(2, 0)));
    }
}
