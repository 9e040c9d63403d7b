/*
recent.rs

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

//! Recently generated path shapes and puzzles.

use std::collections::VecDeque;

/// Bounded list of recent keys. The oldest key is dropped when the list is full.
#[derive(Debug, Clone, Default)]
pub struct RecentCache {
    capacity: usize,
    entries: VecDeque<String>,
}

impl RecentCache {
    /// Create an empty cache. A cache with no capacity never remembers anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Remember the key. A key that is already present becomes the most recent one.
    pub fn push(&mut self, key: String) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|k| *k != key);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Recent path signatures and puzzle keys of a generator.
#[derive(Debug, Clone, Default)]
pub struct RecentHistory {
    pub signatures: RecentCache,
    pub puzzles: RecentCache,
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            signatures: RecentCache::new(capacity),
            puzzles: RecentCache::new(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.signatures.clear();
        self.puzzles.clear();
    }
}
