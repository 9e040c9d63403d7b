/*
properties_test.rs

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

//! Properties that every generated puzzle and every evaluation must have.

mod common;

use std::collections::BTreeSet;

use gridstroke::generator::config::GeneratorConfig;
use gridstroke::generator::puzzles::PuzzleGenerator;
use gridstroke::grid::regions;
use gridstroke::solver::evaluation::{EvaluationLimits, Snapshot};
use gridstroke::symbols::kind::Kind;
use gridstroke::symbols::target::SymbolRef;
use gridstroke::{Puzzle, check_path, generate_puzzle, solve};

use common::*;

const REQUESTS: [&[Kind]; 4] = [
    &[Kind::Triangles],
    &[Kind::Dots, Kind::Hexagon],
    &[Kind::ColorSquares, Kind::Stars],
    &[Kind::Arrows, Kind::Gap],
];

#[test]
fn generation_is_deterministic() {
    for kinds in REQUESTS {
        let a = generate_puzzle(11, kinds, None).unwrap();
        let b = generate_puzzle(11, kinds, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.solution_hint, b.solution_hint);
    }
}

#[test]
fn generated_puzzles_cover_the_kinds_and_are_solvable() {
    for (seed, kinds) in REQUESTS.iter().enumerate() {
        let puzzle: Puzzle = generate_puzzle(seed as i32, kinds, None).unwrap();
        assert!(puzzle.is_reachable());
        for kind in kinds.iter() {
            assert!(!puzzle.targets(*kind).is_empty(), "no {kind}");
        }
        let hint = puzzle.solution_hint.clone().unwrap();
        assert!(check_path(&puzzle, &hint).ok);
    }
}

#[test]
fn every_kind_alone_is_generated() {
    for kind in Kind::all() {
        let puzzle: Puzzle = generate_puzzle(kind.rank() as i32, &[kind], None)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert!(puzzle.covers(&[kind]), "no {kind}");
        let hint = puzzle.solution_hint.clone().unwrap();
        assert!(check_path(&puzzle, &hint).ok, "{kind}: hint fails");
    }
}

#[test]
fn rejected_attempts_still_give_a_puzzle() {
    // No path is straight enough, so every attempt fails the last check
    let mut config = GeneratorConfig::default();
    config.wildness.max_straight = 0;
    let mut generator = PuzzleGenerator::new(config);
    let kinds = [Kind::Dots, Kind::Triangles];

    let puzzle: Puzzle = generator.generate(21, &kinds, None).unwrap();
    assert!(generator.stats.fallback_tier.is_some());
    assert!(generator.stats.pending > 0);
    assert!(puzzle.covers(&kinds));
    let hint = puzzle.solution_hint.clone().unwrap();
    assert!(check_path(&puzzle, &hint).ok);
}

#[test]
fn solver_finds_a_path_for_generated_puzzles() {
    let puzzle = generate_puzzle(4, &[Kind::Triangles, Kind::Dots], None).unwrap();
    let path = solve(&puzzle, None).unwrap();
    assert!(check_path(&puzzle, &path).ok);
}

#[test]
fn checking_twice_gives_the_same_result() {
    let puzzle = generate_puzzle(8, &[Kind::Diamonds, Kind::Chevrons], None).unwrap();
    for path in [puzzle.solution_hint.clone().unwrap(), border_path()] {
        assert_eq!(check_path(&puzzle, &path), check_path(&puzzle, &path));
    }
}

#[test]
fn regions_depend_on_the_used_edges_only() {
    let path = corner_block_path();
    let a = regions::build_cell_regions(&path.used_edges());
    let b = regions::build_cell_regions(&path.clone().used_edges());
    let mut ra = a.regions();
    let mut rb = b.regions();
    ra.sort();
    rb.sort();
    assert_eq!(ra, rb);
    assert_eq!(ra.len(), 2);
}

#[test]
fn cancelled_symbols_are_needed() {
    for seed in 0..3 {
        let puzzle = generate_puzzle(seed, &[Kind::Triangles, Kind::Negator], None).unwrap();
        let hint = puzzle.solution_hint.clone().unwrap();
        let result = check_path(&puzzle, &hint);
        assert!(result.ok);

        let limits = EvaluationLimits::default();
        let snapshot = Snapshot::new(&puzzle.symbols, &hint, limits.tiling_budget);
        let negators: BTreeSet<SymbolRef> = result
            .eliminated_negator_indexes
            .iter()
            .map(|i| SymbolRef::new(Kind::Negator, *i))
            .collect();
        let cancelled: BTreeSet<SymbolRef> =
            result.eliminated_symbol_refs.iter().copied().collect();
        assert!(snapshot.failing(&negators.union(&cancelled).copied().collect()).is_empty());

        // Restoring any cancelled symbol makes the check fail again
        for symbol in &cancelled {
            let mut removed: BTreeSet<SymbolRef> = negators.union(&cancelled).copied().collect();
            removed.remove(symbol);
            assert!(!snapshot.failing(&removed).is_empty());
        }
    }
}

#[test]
fn generated_square_regions_are_pure() {
    for seed in 0..3 {
        let puzzle = generate_puzzle(seed, &[Kind::ColorSquares], None).unwrap();
        let hint = puzzle.solution_hint.clone().unwrap();
        let map = regions::build_cell_regions(&hint.used_edges());
        for region in 0..map.count() {
            let colors: BTreeSet<_> = puzzle
                .targets(Kind::ColorSquares)
                .iter()
                .filter(|t| t.cell().is_some_and(|c| map.region_of(c) == region))
                .filter_map(|t| t.color())
                .collect();
            assert!(colors.len() <= 1, "region {region} mixes {colors:?}");
        }
    }
}
