/*
color.rs

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

//! Symbol colors and the color budget of a puzzle.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::Display;

/// Maximum number of distinct colors in one puzzle.
pub const MAX_DISTINCT_COLORS: usize = 3;

/// Color of a symbol.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SymbolColor {
    /// Color of the symbols when the puzzle does not play with colors.
    #[default]
    White,
    Black,
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl SymbolColor {
    /// Colors the generator picks from.
    pub const CHOICES: [SymbolColor; 8] = [
        SymbolColor::White,
        SymbolColor::Black,
        SymbolColor::Red,
        SymbolColor::Blue,
        SymbolColor::Yellow,
        SymbolColor::Green,
        SymbolColor::Purple,
        SymbolColor::Orange,
    ];
}

/// Set of the colors used so far by a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: BTreeSet<SymbolColor>,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            colors: BTreeSet::new(),
        }
    }

    pub fn from_colors<I: IntoIterator<Item = SymbolColor>>(colors: I) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: SymbolColor) -> bool {
        self.colors.contains(&color)
    }

    /// Whether the color can be used without exceeding the budget.
    pub fn allows(&self, color: SymbolColor) -> bool {
        self.colors.contains(&color) || self.colors.len() < MAX_DISTINCT_COLORS
    }

    /// Add the color if the budget allows it. Return whether the color is in the palette.
    pub fn try_add(&mut self, color: SymbolColor) -> bool {
        if !self.allows(color) {
            return false;
        }
        self.colors.insert(color);
        true
    }

    pub fn colors(&self) -> Vec<SymbolColor> {
        self.colors.iter().copied().collect()
    }

    /// Pick a color from the palette, or a new color while the budget allows it.
    ///
    /// Existing colors are favored so that the symbols of different kinds end up sharing
    /// colors, which is what stars need to pair with them.
    pub fn pick(&mut self, rng: &mut StdRng) -> SymbolColor {
        let existing: Vec<SymbolColor> = self.colors();
        let reuse: bool = !existing.is_empty()
            && (existing.len() >= MAX_DISTINCT_COLORS || rng.random_bool(0.6));
        if reuse && let Some(c) = existing.choose(rng) {
            return *c;
        }

        let fresh: Vec<SymbolColor> = SymbolColor::CHOICES
            .iter()
            .filter(|c| !self.contains(**c))
            .copied()
            .collect();
        let color: SymbolColor = match fresh.choose(rng) {
            Some(c) => *c,
            None => SymbolColor::White,
        };
        self.try_add(color);
        color
    }

    /// Pick a color that is different from all the given colors, within the budget.
    pub fn pick_other(&mut self, rng: &mut StdRng, avoid: &[SymbolColor]) -> Option<SymbolColor> {
        let mut candidates: Vec<SymbolColor> = SymbolColor::CHOICES
            .iter()
            .filter(|c| !avoid.contains(c) && self.allows(**c))
            .copied()
            .collect();
        // Colors already in the palette come first, so they are cheaper for the budget
        candidates.sort_by_key(|c| !self.contains(*c));
        let in_palette: usize = candidates.iter().filter(|c| self.contains(**c)).count();
        let color: SymbolColor = if in_palette > 0 && rng.random_bool(0.5) {
            *candidates[..in_palette].choose(rng)?
        } else {
            *candidates.choose(rng)?
        };
        self.try_add(color);
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn budget_is_enforced() {
        let mut palette = Palette::new();
        assert!(palette.try_add(SymbolColor::Red));
        assert!(palette.try_add(SymbolColor::Blue));
        assert!(palette.try_add(SymbolColor::White));
        assert!(!palette.try_add(SymbolColor::Black));
        assert!(palette.try_add(SymbolColor::Red));
        assert_eq!(palette.len(), MAX_DISTINCT_COLORS);
    }

    #[test]
    fn pick_stays_within_budget() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut palette = Palette::new();
        for _ in 0..50 {
            let c = palette.pick(&mut rng);
            assert!(palette.contains(c));
        }
        assert!(palette.len() <= MAX_DISTINCT_COLORS);
    }

    #[test]
    fn pick_other_avoids_colors() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut palette = Palette::from_colors([SymbolColor::Red, SymbolColor::Blue]);
        for _ in 0..20 {
            let c = palette.pick_other(&mut rng, &[SymbolColor::Red]).unwrap();
            assert_ne!(c, SymbolColor::Red);
        }
        let mut full =
            Palette::from_colors([SymbolColor::Red, SymbolColor::Blue, SymbolColor::Green]);
        assert_eq!(
            full.pick_other(
                &mut rng,
                &[SymbolColor::Red, SymbolColor::Blue, SymbolColor::Green]
            ),
            None
        );
    }
}
