/*
random_path.rs

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

//! Generate a random path.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use crate::grid::edges::EdgeSet;
use crate::grid::path::Path;
use crate::grid::point::GridPoint;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// The ending node cannot be reached from the starting node.
    NoPath,
}

/// [`RandomPath`] object.
pub struct RandomPath<'a> {
    /// Drawable edges.
    pub edges: &'a EdgeSet,

    /// Starting node.
    pub start: GridPoint,

    /// Ending node.
    pub end: GridPoint,

    /// Number of nodes explored to generate the last random path.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last random path.
    pub duration: f32,
}

impl<'a> RandomPath<'a> {
    /// Create the object.
    pub fn new(edges: &'a EdgeSet, start: GridPoint, end: GridPoint) -> Self {
        Self {
            edges,
            start,
            end,
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Generate and return a random path.
    ///
    /// The method runs a breadth-first search from the starting node, visiting the neighbors
    /// of every node in a random order, and then follows the parents back from the ending node.
    ///
    /// # Errors
    ///
    /// The method returns an error if the ending node cannot be reached.
    pub fn generate(&mut self, rng: &mut StdRng) -> Result<Path, RandomPathError> {
        let start: Instant = Instant::now();
        self.iteration = 0;

        let mut parents: BTreeMap<GridPoint, GridPoint> = BTreeMap::new();
        let mut queue: VecDeque<GridPoint> = VecDeque::from([self.start]);
        let mut found: bool = self.start == self.end;

        while let Some(p) = queue.pop_front() {
            if found {
                break;
            }
            self.iteration += 1;
            let mut next: Vec<GridPoint> = self.edges.neighbors(p);
            next.shuffle(rng);
            for q in next {
                if q == self.start || parents.contains_key(&q) {
                    continue;
                }
                parents.insert(q, p);
                if q == self.end {
                    found = true;
                    break;
                }
                queue.push_back(q);
            }
        }
        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );

        if !found {
            return Err(RandomPathError::NoPath);
        }

        // Follow the parents back from the end
        let mut points: Vec<GridPoint> = vec![self.end];
        let mut current: GridPoint = self.end;
        while let Some(parent) = parents.get(&current) {
            points.push(*parent);
            current = *parent;
        }
        points.reverse();
        Ok(Path::from_points(&points))
    }
}

/// Return a random path from `start` to `end`, or `None` if `end` cannot be reached.
pub fn find_random_path(
    edges: &EdgeSet,
    start: GridPoint,
    end: GridPoint,
    rng: &mut StdRng,
) -> Option<Path> {
    RandomPath::new(edges, start, end).generate(rng).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::edges::EdgeKey;
    use crate::grid::point::{END, START};
    use rand::SeedableRng;

    #[test]
    fn random_paths_are_valid() {
        let edges = EdgeSet::full();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let path = find_random_path(&edges, START, END, &mut rng).unwrap();
            assert!(path.validate(&edges, START, END).is_ok());
        }
    }

    #[test]
    fn same_seed_same_path() {
        let edges = EdgeSet::full();
        let a = find_random_path(&edges, START, END, &mut StdRng::seed_from_u64(5));
        let b = find_random_path(&edges, START, END, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_end() {
        let mut edges = EdgeSet::full();
        edges.remove(&EdgeKey::new(GridPoint::new(4, 0), GridPoint::new(3, 0)));
        edges.remove(&EdgeKey::new(GridPoint::new(4, 0), GridPoint::new(4, 1)));
        let mut rng = StdRng::seed_from_u64(1);
        let mut random_path = RandomPath::new(&edges, START, END);
        assert_eq!(random_path.generate(&mut rng), Err(RandomPathError::NoPath));
    }
}
