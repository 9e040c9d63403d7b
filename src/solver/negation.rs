/*
negation.rs

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

//! Decide what the negators of a puzzle cancel.
//!
//! Every negator must cancel exactly one symbol of its region: either a symbol of another
//! kind or another negator. In a negator pair, both negators are used up. An assignment is
//! accepted when:
//!
//! * the symbols left once the negators and their cancelled symbols are removed all pass,
//! * the negators either all cancel other symbols, or all cancel each other,
//! * every cancelled symbol is needed: putting it back alone makes the check fail again.
//!
//! Only symbols sitting in a cell belong to a region. Hexagons and gaps are never cancelled.
//!
//! The search backtracks over the candidates of each negator and stops after a fixed number of
//! visits.

use log::{Level, debug, log_enabled, trace};
use std::collections::BTreeSet;

use super::evaluation::{ConstraintEvaluation, EvaluationLimits, Snapshot};
use crate::grid::point::Cell;
use crate::symbols::kind::Kind;
use crate::symbols::target::SymbolRef;

/// What a negator may cancel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Candidate {
    Symbol(SymbolRef),
    Negator(usize),
}

/// Kind of cancellation used by an assignment. Assignments never mix the two.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Symbols,
    Pairs,
}

struct Resolver<'a> {
    snapshot: &'a Snapshot<'a>,

    /// Candidates of every negator, failing symbols first.
    candidates: Vec<Vec<Candidate>>,

    /// All the negators, always removed once the assignment is complete.
    negators: BTreeSet<SymbolRef>,

    consumed: Vec<bool>,
    cancelled: BTreeSet<SymbolRef>,
    mode: Option<Mode>,

    budget: usize,
    visits: usize,
}

impl Resolver<'_> {
    /// Assign the negators from index `from` onward.
    fn search(&mut self, from: usize) -> Option<BTreeSet<SymbolRef>> {
        self.visits += 1;
        if self.visits > self.budget {
            return None;
        }

        let Some(n) = (from..self.consumed.len()).find(|i| !self.consumed[*i]) else {
            return self.accept();
        };
        self.consumed[n] = true;

        let candidates: Vec<Candidate> = self.candidates[n].clone();
        for candidate in candidates {
            let previous: Option<Mode> = self.mode;
            match candidate {
                Candidate::Symbol(s) => {
                    if previous == Some(Mode::Pairs) || self.cancelled.contains(&s) {
                        continue;
                    }
                    self.mode = Some(Mode::Symbols);
                    self.cancelled.insert(s);
                    let found = self.search(n + 1);
                    self.cancelled.remove(&s);
                    self.mode = previous;
                    if found.is_some() {
                        return found;
                    }
                }
                Candidate::Negator(other) => {
                    if previous == Some(Mode::Symbols) || self.consumed[other] {
                        continue;
                    }
                    self.mode = Some(Mode::Pairs);
                    self.consumed[other] = true;
                    let found = self.search(n + 1);
                    self.consumed[other] = false;
                    self.mode = previous;
                    if found.is_some() {
                        return found;
                    }
                }
            }
            if self.visits > self.budget {
                break;
            }
        }

        self.consumed[n] = false;
        None
    }

    /// Check a complete assignment.
    fn accept(&self) -> Option<BTreeSet<SymbolRef>> {
        let removed: BTreeSet<SymbolRef> = self.negators.union(&self.cancelled).copied().collect();
        if !self.snapshot.failing(&removed).is_empty() {
            return None;
        }

        // Every cancelled symbol must be needed
        for s in &self.cancelled {
            let mut restored: BTreeSet<SymbolRef> = removed.clone();
            restored.remove(s);
            if self.snapshot.failing(&restored).is_empty() {
                trace!("Cancelling {s:?} is not needed");
                return None;
            }
        }
        Some(self.cancelled.clone())
    }
}

/// Evaluate the snapshot, negators included.
pub fn resolve(snapshot: &Snapshot, limits: &EvaluationLimits) -> ConstraintEvaluation {
    let nothing: BTreeSet<SymbolRef> = BTreeSet::new();
    let negator_cells: Vec<Option<Cell>> = snapshot
        .symbols
        .get(Kind::Negator)
        .iter()
        .map(|t| t.cell())
        .collect();

    if negator_cells.is_empty() {
        return if snapshot.failing(&nothing).is_empty() {
            ConstraintEvaluation::passed()
        } else {
            ConstraintEvaluation::failed()
        };
    }
    if negator_cells.len() > limits.max_negators {
        debug!(
            "{} negators, more than the limit of {}",
            negator_cells.len(),
            limits.max_negators
        );
        return ConstraintEvaluation::failed();
    }

    let failing: BTreeSet<SymbolRef> = snapshot.failing(&nothing);
    let candidates: Vec<Vec<Candidate>> = negator_cells
        .iter()
        .enumerate()
        .map(|(n, cell)| {
            let Some(cell) = cell else {
                return Vec::new();
            };
            let region: usize = snapshot.regions.region_of(*cell);

            let mut symbols: Vec<SymbolRef> = snapshot
                .symbols
                .iter()
                .filter(|(r, t)| {
                    r.kind != Kind::Negator
                        && r.kind.is_cell_anchored()
                        && t.cell()
                            .is_some_and(|c| snapshot.regions.region_of(c) == region)
                })
                .map(|(r, _)| r)
                .collect();
            symbols.sort_by_key(|r| !failing.contains(r));

            let negators = negator_cells.iter().enumerate().filter(|(m, c)| {
                *m != n && c.is_some_and(|c| snapshot.regions.region_of(c) == region)
            });

            symbols
                .into_iter()
                .map(Candidate::Symbol)
                .chain(negators.map(|(m, _)| Candidate::Negator(m)))
                .collect()
        })
        .collect();

    if log_enabled!(Level::Trace) {
        for (n, c) in candidates.iter().enumerate() {
            trace!("Negator {n} candidates: {c:?}");
        }
    }

    let mut resolver: Resolver = Resolver {
        snapshot,
        candidates,
        negators: (0..negator_cells.len())
            .map(|i| SymbolRef::new(Kind::Negator, i))
            .collect(),
        consumed: vec![false; negator_cells.len()],
        cancelled: BTreeSet::new(),
        mode: None,
        budget: limits.negation_budget,
        visits: 0,
    };

    match resolver.search(0) {
        Some(cancelled) => ConstraintEvaluation {
            ok: true,
            eliminated_negator_indexes: (0..negator_cells.len()).collect(),
            eliminated_symbol_refs: cancelled.into_iter().collect(),
        },
        None => {
            if resolver.visits > resolver.budget {
                debug!("Negation search budget of {} exhausted", resolver.budget);
            }
            ConstraintEvaluation::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::path::Path;
    use crate::grid::point::GridPoint;
    use crate::symbols::color::SymbolColor;
    use crate::symbols::target::{HexagonSite, Symbols, Target};

    fn border_path() -> Path {
        let points: Vec<GridPoint> = [
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
        ]
        .iter()
        .map(|(x, y)| GridPoint::new(*x, *y))
        .collect();
        Path::from_points(&points)
    }

    fn triangle(x: i32, y: i32, count: u8) -> Target {
        Target::Count {
            cell: Cell::new(x, y),
            color: SymbolColor::White,
            count,
        }
    }

    fn negator(x: i32, y: i32) -> Target {
        Target::Cell {
            cell: Cell::new(x, y),
            color: SymbolColor::White,
        }
    }

    fn evaluate(symbols: &Symbols) -> ConstraintEvaluation {
        let path = border_path();
        let snapshot = Snapshot::new(symbols, &path, 1000);
        resolve(&snapshot, &EvaluationLimits::default())
    }

    #[test]
    fn negator_cancels_the_failing_triangle() {
        let mut symbols = Symbols::new();
        // (0, 0) has two used sides; (2, 2) has none
        symbols.extend(Kind::Triangles, vec![triangle(0, 0, 2), triangle(2, 2, 1)]);
        symbols.extend(Kind::Negator, vec![negator(3, 3)]);
        let result = evaluate(&symbols);
        assert!(result.ok);
        assert_eq!(
            result.eliminated_symbol_refs,
            vec![SymbolRef::new(Kind::Triangles, 1)]
        );
        assert_eq!(result.eliminated_negator_indexes, vec![0]);
    }

    #[test]
    fn unneeded_negator_fails() {
        let mut symbols = Symbols::new();
        symbols.extend(Kind::Triangles, vec![triangle(0, 0, 2)]);
        symbols.extend(Kind::Negator, vec![negator(3, 3)]);
        assert!(!evaluate(&symbols).ok);
    }

    #[test]
    fn negator_pair_cancels_out() {
        let mut symbols = Symbols::new();
        symbols.extend(Kind::Triangles, vec![triangle(0, 0, 2)]);
        symbols.extend(Kind::Negator, vec![negator(3, 3), negator(2, 3)]);
        let result = evaluate(&symbols);
        assert!(result.ok);
        assert!(result.eliminated_symbol_refs.is_empty());
        assert_eq!(result.eliminated_negator_indexes, vec![0, 1]);
    }

    #[test]
    fn no_mixed_assignments() {
        // Three negators: a pair and one cancelling the failing triangle would mix modes
        let mut symbols = Symbols::new();
        symbols.extend(Kind::Triangles, vec![triangle(2, 2, 1)]);
        symbols.extend(
            Kind::Negator,
            vec![negator(3, 3), negator(2, 3), negator(1, 3)],
        );
        assert!(!evaluate(&symbols).ok);
    }

    #[test]
    fn hexagons_cannot_be_cancelled() {
        // The border path never visits the middle node
        let mut symbols = Symbols::new();
        symbols.extend(
            Kind::Hexagon,
            vec![Target::Hexagon {
                site: HexagonSite::Node(GridPoint::new(2, 2)),
            }],
        );
        symbols.extend(Kind::Negator, vec![negator(2, 2)]);
        let result = evaluate(&symbols);
        assert!(!result.ok);
        assert!(result.eliminated_symbol_refs.is_empty());
    }

    #[test]
    fn too_many_negators_fail_closed() {
        let mut symbols = Symbols::new();
        symbols.extend(
            Kind::Negator,
            (0..6).map(|x| negator(x % 4, 1 + x / 4)).collect(),
        );
        assert!(!evaluate(&symbols).ok);
    }

    #[test]
    fn without_negators_is_a_plain_check() {
        let mut symbols = Symbols::new();
        symbols.extend(Kind::Triangles, vec![triangle(0, 0, 2)]);
        assert!(evaluate(&symbols).ok);
        symbols.extend(Kind::Triangles, vec![triangle(1, 1, 2)]);
        assert!(!evaluate(&symbols).ok);
    }
}
